use bag::BoundingBox;
use log::{debug, info};
use rd::{LatLon, Transform, TransformError};

use crate::{
    panel::{Panel, FIRST_CORNER_LABEL, SECOND_CORNER_LABEL},
    surface::{Cursor, LayerHandle, MapSurface},
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    #[default]
    Idle,
    AwaitingFirstClick,
    AwaitingSecondClick {
        first: LatLon,
        marker: LayerHandle,
    },
    Drawn {
        bbox: BoundingBox,
        rectangle: LayerHandle,
    },
}

/// Two-click bounding box drawing.
#[derive(Debug, Clone, Default)]
pub struct BboxSession {
    state: DrawState,
}

impl BboxSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Map clicks should be routed here.
    pub fn is_listening(&self) -> bool {
        matches!(
            self.state,
            DrawState::AwaitingFirstClick | DrawState::AwaitingSecondClick { .. }
        )
    }

    pub fn current_bbox(&self) -> Option<BoundingBox> {
        match self.state {
            DrawState::Drawn { bbox, .. } => Some(bbox),
            _ => None,
        }
    }

    /// Removes any previous box and waits for the first corner.
    ///
    /// Returns `false` and does nothing while a box is already being drawn.
    pub fn start_drawing(&mut self, map: &mut dyn MapSurface, panel: &mut Panel) -> bool {
        if self.is_listening() {
            return false;
        }
        self.clear(map, panel);
        self.state = DrawState::AwaitingFirstClick;
        panel.drawing(FIRST_CORNER_LABEL);
        map.set_cursor(Cursor::Crosshair);
        true
    }

    /// Handles a map click; returns the box once the second corner is in.
    ///
    /// When the corners cannot be converted to RD the session keeps waiting
    /// for the second corner.
    pub fn handle_click(
        &mut self,
        at: LatLon,
        transform: &dyn Transform,
        map: &mut dyn MapSurface,
        panel: &mut Panel,
    ) -> Result<Option<BoundingBox>, TransformError> {
        match self.state {
            DrawState::AwaitingFirstClick => {
                let marker = map.add_marker(at);
                self.state = DrawState::AwaitingSecondClick { first: at, marker };
                panel.drawing(SECOND_CORNER_LABEL);
                Ok(None)
            }
            DrawState::AwaitingSecondClick { first, marker } => {
                let bbox = BoundingBox::from_corners(
                    transform.geo_to_grid(first)?,
                    transform.geo_to_grid(at)?,
                );
                map.remove_layer(marker);
                let rectangle = map.add_rectangle(first, at);
                self.state = DrawState::Drawn { bbox, rectangle };

                panel.show_coordinates(bbox);
                panel.done_drawing();
                map.set_cursor(Cursor::Default);

                info!(
                    "Bounding Box (RD New): xmin: {}, ymin: {}, xmax: {}, ymax: {}",
                    bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax
                );
                info!("API format: {}", bbox.api_format());
                Ok(Some(bbox))
            }
            DrawState::Idle | DrawState::Drawn { .. } => {
                debug!("ignoring click at {at}, not drawing");
                Ok(None)
            }
        }
    }

    /// Removes whatever was drawn and resets the panel.
    pub fn clear(&mut self, map: &mut dyn MapSurface, panel: &mut Panel) {
        match std::mem::take(&mut self.state) {
            DrawState::AwaitingSecondClick { marker, .. } => map.remove_layer(marker),
            DrawState::Drawn { rectangle, .. } => map.remove_layer(rectangle),
            DrawState::Idle | DrawState::AwaitingFirstClick => {}
        }
        panel.reset();
        map.set_cursor(Cursor::Default);
    }

    /// Copies the drawn box into the download panel.
    pub fn use_for_download(&self, panel: &mut Panel) -> Option<BoundingBox> {
        let bbox = self.current_bbox()?;
        panel.bbox_field = bbox.to_string();
        Some(bbox)
    }
}
