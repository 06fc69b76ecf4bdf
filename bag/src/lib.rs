pub mod bbox;
pub mod config;
pub mod error;
pub mod export;
pub mod feature;
pub mod fetch;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod query;

pub use bbox::BoundingBox;
pub use config::ApiConfig;
pub use error::{ExportError, FetchError, GeometryError};
pub use feature::{Feature, FeatureCollection, Page, PandId};
pub use fetch::{fetch_all_pages, PageSource};
pub use http::HttpPageSource;
pub use query::{Collection, PandenFilter, Query};

/// Filename used for building downloads without a pand id.
pub const PANDEN_FILE_NAME: &str = "bag_panden.geojson";
