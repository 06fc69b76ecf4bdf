use reqwest::StatusCode;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status}")]
    Status { status: StatusCode, url: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize features: {0}")]
    Json(#[from] serde_json::Error),
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("feature has no geometry")]
    Missing,

    #[error("malformed geometry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported geometry: {0}")]
    GeoJson(#[from] geojson::Error),
}
