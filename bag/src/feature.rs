use derive_more::Display;
use geo_types::Geometry;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::GeometryError;

/// A GeoJSON feature exactly as the API returned it.
///
/// The schema is not checked; accessors look things up on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feature(pub Value);

impl Feature {
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties")?.as_object()
    }

    /// Whether there is anything to draw.
    pub fn has_geometry(&self) -> bool {
        self.0
            .get("geometry")
            .and_then(|g| g.get("coordinates"))
            .is_some_and(|c| !c.is_null())
    }

    /// Geometry in the coordinate system the API serves (RD).
    pub fn geometry(&self) -> Result<Geometry<f64>, GeometryError> {
        if !self.has_geometry() {
            return Err(GeometryError::Missing);
        }
        let raw = self.0.get("geometry").cloned().unwrap_or_default();
        let geometry: geojson::Geometry = serde_json::from_value(raw)?;
        Ok(Geometry::<f64>::try_from(geometry)?)
    }

    /// Lines shown in the popup of a building on the map.
    pub fn popup_lines(&self) -> Vec<String> {
        let id = self.id().unwrap_or_else(|| "N/A".into());
        std::iter::once(format!("Building ID: {id}"))
            .chain(
                self.properties()
                    .into_iter()
                    .flatten()
                    .map(|(key, value)| format!("{key}: {}", plain(value))),
            )
            .collect()
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectionType {
    #[default]
    FeatureCollection,
}

/// The document written to disk by a download.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: CollectionType,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self {
            kind: CollectionType::FeatureCollection,
            features,
        }
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

/// One response of a paginated items endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Page {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<Feature>,
    #[serde(default, alias = "total_feature_count")]
    pub total_count: Option<u64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Feature>, D::Error> {
    Ok(Option::<Vec<Feature>>::deserialize(d)?.unwrap_or_default())
}

/// Identifier of a pand, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct PandId(String);

impl PandId {
    /// `None` for empty or whitespace-only input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("bag_vbo_{}.geojson", self.0)
    }
}
