use bag::{ApiConfig, BoundingBox, Collection, PageSource, PandenFilter};
use log::{debug, error};
use rd::Transform;

use crate::{
    actions::{self, DownloadReport},
    alert::Alert,
    config::ViewerConfig,
    error::ActionError,
    event::{MapEvent, Overlay, Viewport},
    overlay::{load_buildings_in_view, BuildingsOverlay},
    panel::Panel,
    session::BboxSession,
    surface::MapSurface,
};

/// One open map page: the box being drawn, the buildings layer and the
/// current view, wired to a page source and a map surface.
pub struct Viewer<S, M> {
    config: ViewerConfig,
    transform: Box<dyn Transform>,
    source: S,
    map: M,
    panel: Panel,
    session: BboxSession,
    buildings: BuildingsOverlay,
    viewport: Viewport,
}

impl<S: PageSource, M: MapSurface> Viewer<S, M> {
    pub fn new(config: ViewerConfig, transform: Box<dyn Transform>, source: S, map: M) -> Self {
        Self {
            config,
            transform,
            source,
            map,
            panel: Panel::default(),
            session: BboxSession::new(),
            buildings: BuildingsOverlay::default(),
            viewport: Viewport::initial(),
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiConfig {
        &self.config.api
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn session(&self) -> &BboxSession {
        &self.session
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn buildings_visible(&self) -> bool {
        self.buildings.is_active()
    }

    /// Dispatches a map event. Move events are expected to be debounced
    /// already. Preview failures are logged, not raised, like the map does.
    pub async fn handle(&mut self, event: MapEvent) -> Result<(), ActionError> {
        match event {
            MapEvent::Click(at) if self.session.is_listening() => {
                self.session.handle_click(
                    at,
                    self.transform.as_ref(),
                    &mut self.map,
                    &mut self.panel,
                )?;
            }
            MapEvent::Click(at) => debug!("click at {at} ignored"),
            MapEvent::MoveEnd(viewport) => {
                self.viewport = viewport;
                if self.buildings.is_active() {
                    self.refresh_buildings_logged().await;
                }
            }
            MapEvent::OverlayAdd(Overlay::Buildings) => {
                self.buildings.turn_on();
                self.refresh_buildings_logged().await;
            }
            MapEvent::OverlayRemove(Overlay::Buildings) => {
                self.buildings.turn_off();
                self.map.clear_buildings();
            }
        }
        Ok(())
    }

    async fn refresh_buildings_logged(&mut self) {
        if let Err(e) = self.refresh_buildings().await {
            error!("Failed to load buildings in viewport: {e}");
        }
    }

    /// Reloads the buildings layer for the current view. On failure the
    /// previously shown buildings stay.
    pub async fn refresh_buildings(&mut self) -> Result<usize, ActionError> {
        let shown = load_buildings_in_view(
            &self.source,
            &self.config.api,
            self.transform.as_ref(),
            &self.viewport,
        )
        .await?;
        let count = shown.len();
        self.map.clear_buildings();
        self.map.show_buildings(shown);
        Ok(count)
    }

    pub fn start_drawing(&mut self) -> bool {
        self.session.start_drawing(&mut self.map, &mut self.panel)
    }

    pub fn clear_bbox(&mut self) {
        self.session.clear(&mut self.map, &mut self.panel);
    }

    pub fn current_bbox(&self) -> Option<BoundingBox> {
        self.session.current_bbox()
    }

    /// Fills the download panel with the drawn box.
    pub fn use_bbox_for_download(&mut self) -> Result<BoundingBox, Alert> {
        self.session
            .use_for_download(&mut self.panel)
            .ok_or_else(Alert::draw_bbox_first)
    }

    /// Downloads buildings filtered by municipality, postcode and the drawn box.
    pub async fn download_panden(
        &self,
        gemeente: &str,
        postcode: &str,
    ) -> Result<DownloadReport, ActionError> {
        let filter = PandenFilter::new(gemeente, postcode, self.session.current_bbox());
        let transform = self.transform.as_ref();
        actions::download_panden(
            &self.source,
            &self.config.api,
            &filter,
            || self.viewport.visible_bounds(transform),
            &self.config.out_dir,
        )
        .await
    }

    pub async fn download_vbo(&self, pand_id: &str) -> Result<DownloadReport, ActionError> {
        actions::download_vbo(&self.source, &self.config.api, pand_id, &self.config.out_dir).await
    }

    /// Message for the user about a finished download.
    pub fn report(
        &self,
        collection: Collection,
        outcome: &Result<DownloadReport, ActionError>,
    ) -> Alert {
        match outcome {
            Ok(report) => Alert::downloaded(report),
            Err(e) => {
                error!("Download failed: {e}");
                Alert::from_error(e, &self.config.api, collection)
            }
        }
    }
}
