use std::path::{Path, PathBuf};

use bag::{
    export::write_feature_collection, fetch_all_pages, ApiConfig, BoundingBox, Collection,
    FeatureCollection, PageSource, PandId, PandenFilter, Query, PANDEN_FILE_NAME,
};
use log::info;
use rd::TransformError;

use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub collection: Collection,
    pub path: PathBuf,
    pub count: usize,
}

async fn fetch_collection<S: PageSource + ?Sized>(
    source: &S,
    api: &ApiConfig,
    query: &Query,
) -> Result<FeatureCollection, ActionError> {
    let url = query.to_url(api)?;
    info!("Starting download from: {url}");

    let collection: FeatureCollection = fetch_all_pages(source, &url, api.download_page_size)
        .await?
        .into();
    info!("Downloaded {} features total", collection.len());
    Ok(collection)
}

/// Downloads every building matching `filter` into `out_dir`.
///
/// With no filter at all the visible map area is used.
pub async fn download_panden<S: PageSource + ?Sized>(
    source: &S,
    api: &ApiConfig,
    filter: &PandenFilter,
    viewport_bounds: impl FnOnce() -> Result<BoundingBox, TransformError>,
    out_dir: &Path,
) -> Result<DownloadReport, ActionError> {
    let query = filter.query(viewport_bounds)?;
    let collection = fetch_collection(source, api, &query).await?;
    let path = out_dir.join(PANDEN_FILE_NAME);
    write_feature_collection(&path, &collection)?;

    info!("Download complete!");
    Ok(DownloadReport {
        collection: Collection::Panden,
        path,
        count: collection.len(),
    })
}

/// Downloads the verblijfsobjecten of one pand into `out_dir`.
pub async fn download_vbo<S: PageSource + ?Sized>(
    source: &S,
    api: &ApiConfig,
    pand_id: &str,
    out_dir: &Path,
) -> Result<DownloadReport, ActionError> {
    let pand_id = PandId::parse(pand_id).ok_or(ActionError::MissingPandId)?;
    let query = Query::new(Collection::Verblijfsobjecten).pand_ref(&pand_id);
    let collection = fetch_collection(source, api, &query).await?;
    if collection.is_empty() {
        return Err(ActionError::Empty { pand_id });
    }

    let path = out_dir.join(pand_id.file_name());
    write_feature_collection(&path, &collection)?;

    info!("Download complete!");
    Ok(DownloadReport {
        collection: Collection::Verblijfsobjecten,
        path,
        count: collection.len(),
    })
}
