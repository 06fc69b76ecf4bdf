use url::Url;

use crate::{error::FetchError, query::Collection};

pub const DEFAULT_API_URL: &str = "https://godzilla.bk.tudelft.nl/2dbagparquet/api/";

/// Page size when downloading everything that matches a query.
pub const DOWNLOAD_PAGE_SIZE: usize = 50;
/// Page size when previewing the buildings inside the map view.
pub const PREVIEW_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub download_page_size: usize,
    pub preview_page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            download_page_size: DOWNLOAD_PAGE_SIZE,
            preview_page_size: PREVIEW_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Url of the items endpoint of a collection, without any query.
    pub fn collection_url(&self, collection: Collection) -> Result<Url, FetchError> {
        // joining replaces the last path segment unless the base ends in '/'
        let base = if self.base_url.ends_with('/') {
            Url::parse(&self.base_url)?
        } else {
            Url::parse(&format!("{}/", self.base_url))?
        };
        Ok(base.join(collection.path())?)
    }
}
