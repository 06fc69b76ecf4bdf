use bag::{fetch_all_pages, ApiConfig, Collection, PageSource, Query};
use log::info;
use rd::Transform;

use crate::{error::ActionError, event::Viewport, surface::DisplayFeature};

/// The toggleable buildings layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildingsOverlay {
    active: bool,
}

impl BuildingsOverlay {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn turn_on(&mut self) {
        info!("Buildings layer turned ON");
        self.active = true;
    }

    pub fn turn_off(&mut self) {
        info!("Buildings layer turned OFF");
        self.active = false;
    }
}

/// Fetches the buildings inside `viewport`, ready for display.
pub async fn load_buildings_in_view<S: PageSource + ?Sized>(
    source: &S,
    api: &ApiConfig,
    transform: &dyn Transform,
    viewport: &Viewport,
) -> Result<Vec<DisplayFeature>, ActionError> {
    let bounds = viewport.visible_bounds(transform)?;
    let url = Query::new(Collection::Panden).bbox(&bounds).to_url(api)?;
    info!("Loading buildings in viewport from: {url}");

    let features = fetch_all_pages(source, &url, api.preview_page_size).await?;
    info!("Loaded {} buildings", features.len());

    Ok(features
        .iter()
        .filter_map(|f| DisplayFeature::from_feature(f, transform))
        .collect())
}
