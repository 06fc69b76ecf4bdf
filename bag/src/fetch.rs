use async_trait::async_trait;
use log::{debug, error, info};
use url::Url;

use crate::{
    error::FetchError,
    feature::{Feature, Page},
};

/// Something that serves one page of an items endpoint.
#[async_trait(?Send)]
pub trait PageSource {
    /// Fetches `limit` features starting at `offset` from `base`.
    async fn fetch_page(&self, base: &Url, limit: usize, offset: usize)
        -> Result<Page, FetchError>;
}

#[async_trait(?Send)]
impl<T: PageSource + ?Sized> PageSource for &T {
    async fn fetch_page(
        &self,
        base: &Url,
        limit: usize,
        offset: usize,
    ) -> Result<Page, FetchError> {
        (**self).fetch_page(base, limit, offset).await
    }
}

/// Fetches every feature matching `base`, one page at a time.
///
/// Stops when the declared total is reached, on a short page or on an empty
/// page. A server that keeps answering with full pages and never declares a
/// total is followed until it sends an empty page. The first error aborts the
/// whole fetch and the features gathered so far are dropped.
pub async fn fetch_all_pages<S: PageSource + ?Sized>(
    source: &S,
    base: &Url,
    page_size: usize,
) -> Result<Vec<Feature>, FetchError> {
    let limit = page_size.max(1);
    let mut features: Vec<Feature> = Vec::new();
    let mut offset = 0;
    let mut total_count: Option<u64> = None;

    loop {
        debug!("Fetching: offset={offset}, limit={limit}...");
        let page = source
            .fetch_page(base, limit, offset)
            .await
            .inspect_err(|e| error!("Error fetching at offset {offset}: {e}"))?;

        if total_count.is_none() {
            if let Some(total) = page.total_count {
                info!("Total count: {total} features");
                total_count = Some(total);
            }
        }

        let received = page.features.len();
        if received == 0 {
            debug!("No more features, stopping");
            break;
        }

        features.extend(page.features);
        debug!(
            "Got {received} features (total so far: {}{})",
            features.len(),
            total_count.map(|t| format!("/{t}")).unwrap_or_default()
        );

        offset += limit;

        if total_count.is_some_and(|total| offset as u64 >= total) {
            debug!("Reached total count, stopping");
            break;
        }
        if received < limit {
            debug!("Last page (fewer features than limit), stopping");
            break;
        }
    }

    Ok(features)
}
