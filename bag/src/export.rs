use std::{fs, path::Path};

use log::info;

use crate::{error::ExportError, feature::FeatureCollection};

/// Pretty printed GeoJSON, two space indent.
pub fn to_geojson_string(collection: &FeatureCollection) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(collection)?)
}

pub fn write_feature_collection(
    path: &Path,
    collection: &FeatureCollection,
) -> Result<(), ExportError> {
    fs::write(path, to_geojson_string(collection)?)?;
    info!(
        "Wrote {} features to {}",
        collection.len(),
        path.display()
    );
    Ok(())
}
