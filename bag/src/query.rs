use std::fmt::Display;

use itertools::Itertools;
use url::Url;

use crate::{bbox::BoundingBox, config::ApiConfig, error::FetchError, feature::PandId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Panden,
    Verblijfsobjecten,
}

impl Collection {
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Panden => "collections/panden/items",
            Collection::Verblijfsobjecten => "collections/verblijfsobjecten/items",
        }
    }
}

/// Filters on one collection, without pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: Collection,
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            params: Vec::new(),
        }
    }

    pub fn woonplaats(mut self, name: &str) -> Self {
        self.params.push(("woonplaats", name.into()));
        self
    }

    pub fn postcode_4(mut self, postcode: &str) -> Self {
        self.params.push(("postcode_4", postcode.into()));
        self
    }

    pub fn bbox(mut self, bbox: &BoundingBox) -> Self {
        self.params.extend(bbox.query_pairs());
        self
    }

    pub fn pand_ref(mut self, pand: &PandId) -> Self {
        self.params.push(("pandRef", pand.as_str().into()));
        self
    }

    pub fn is_filtered(&self) -> bool {
        !self.params.is_empty()
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Base url handed to the paginator; values are percent-encoded.
    pub fn to_url(&self, api: &ApiConfig) -> Result<Url, FetchError> {
        let mut url = api.collection_url(self.collection)?;
        if self.is_filtered() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}?{}",
            self.collection.path(),
            self.params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .join("&")
        )
    }
}

/// What the user filled in on the download panel for buildings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PandenFilter {
    pub gemeente: Option<String>,
    pub postcode: Option<String>,
    pub bbox: Option<BoundingBox>,
}

impl PandenFilter {
    /// Blank text fields count as not filled in.
    pub fn new(gemeente: &str, postcode: &str, bbox: Option<BoundingBox>) -> Self {
        let text = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(String::from);
        Self {
            gemeente: text(gemeente),
            postcode: text(postcode),
            bbox,
        }
    }

    /// Query for the filter; `fallback` supplies a box when nothing is filled in.
    pub fn query<E>(
        &self,
        fallback: impl FnOnce() -> Result<BoundingBox, E>,
    ) -> Result<Query, E> {
        let mut query = Query::new(Collection::Panden);
        if let Some(gemeente) = &self.gemeente {
            query = query.woonplaats(gemeente);
        }
        if let Some(postcode) = &self.postcode {
            query = query.postcode_4(postcode);
        }
        if let Some(bbox) = &self.bbox {
            query = query.bbox(bbox);
        }
        if !query.is_filtered() {
            query = query.bbox(&fallback()?);
        }
        Ok(query)
    }
}
