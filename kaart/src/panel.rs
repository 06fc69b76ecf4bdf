use bag::BoundingBox;

pub const DRAW_LABEL: &str = "Draw Bounding Box";
pub const FIRST_CORNER_LABEL: &str = "Click first corner...";
pub const SECOND_CORNER_LABEL: &str = "Click second corner...";

/// State of the control and download panels, minus the text inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub draw_enabled: bool,
    pub draw_label: &'static str,
    pub clear_enabled: bool,
    /// Coordinate readout; hidden when `None`.
    pub coordinates: Option<BoundingBox>,
    /// Bbox text field of the download panel.
    pub bbox_field: String,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            draw_enabled: true,
            draw_label: DRAW_LABEL,
            clear_enabled: false,
            coordinates: None,
            bbox_field: String::new(),
        }
    }
}

impl Panel {
    pub fn drawing(&mut self, label: &'static str) {
        self.draw_enabled = false;
        self.draw_label = label;
    }

    /// Draw button back to normal, nothing else touched.
    pub fn done_drawing(&mut self) {
        self.draw_enabled = true;
        self.draw_label = DRAW_LABEL;
    }

    pub fn show_coordinates(&mut self, bbox: BoundingBox) {
        self.coordinates = Some(bbox);
        self.clear_enabled = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
