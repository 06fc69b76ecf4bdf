use derive_more::Display;
use geo_types::Geometry;
use log::{debug, info, warn};
use rd::{reproject_geometry, LatLon, Transform};

use bag::Feature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("#{_0}")]
pub struct LayerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}

/// A building ready to be drawn: WGS84 geometry plus its popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFeature {
    pub id: Option<String>,
    pub geometry: Geometry<f64>,
    pub popup: Vec<String>,
}

impl DisplayFeature {
    /// `None` (with a warning) for features that cannot be drawn.
    pub fn from_feature(feature: &Feature, transform: &dyn Transform) -> Option<Self> {
        if !feature.has_geometry() {
            warn!("Building has no geometry: {:?}", feature.id());
            return None;
        }
        let geometry = feature
            .geometry()
            .inspect_err(|e| warn!("Skipping building {:?}: {e}", feature.id()))
            .ok()?;
        let geometry = reproject_geometry(transform, &geometry)
            .inspect_err(|e| warn!("Skipping building {:?}: {e}", feature.id()))
            .ok()?;
        Some(Self {
            id: feature.id(),
            geometry,
            popup: feature.popup_lines(),
        })
    }
}

/// What the viewer needs from a map widget.
pub trait MapSurface {
    /// Small marker at the first corner of a box being drawn.
    fn add_marker(&mut self, at: LatLon) -> LayerHandle;
    fn add_rectangle(&mut self, a: LatLon, b: LatLon) -> LayerHandle;
    fn remove_layer(&mut self, layer: LayerHandle);
    fn set_cursor(&mut self, cursor: Cursor);
    /// Replaces the buildings layer content.
    fn show_buildings(&mut self, buildings: Vec<DisplayFeature>);
    fn clear_buildings(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    AddMarker(LayerHandle, LatLon),
    AddRectangle(LayerHandle, LatLon, LatLon),
    RemoveLayer(LayerHandle),
    SetCursor(Cursor),
    ShowBuildings(usize),
    ClearBuildings,
}

/// A map that only logs and remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct LogSurface {
    next_handle: u64,
    live: Vec<LayerHandle>,
    pub cursor: Cursor,
    pub buildings: Vec<DisplayFeature>,
    pub calls: Vec<SurfaceCall>,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker and rectangle layers currently on the map.
    pub fn live_layers(&self) -> &[LayerHandle] {
        &self.live
    }

    fn allocate(&mut self) -> LayerHandle {
        self.next_handle += 1;
        let handle = LayerHandle(self.next_handle);
        self.live.push(handle);
        handle
    }
}

impl MapSurface for LogSurface {
    fn add_marker(&mut self, at: LatLon) -> LayerHandle {
        let handle = self.allocate();
        info!("marker {handle} at {at}");
        self.calls.push(SurfaceCall::AddMarker(handle, at));
        handle
    }

    fn add_rectangle(&mut self, a: LatLon, b: LatLon) -> LayerHandle {
        let handle = self.allocate();
        info!("rectangle {handle} from {a} to {b}");
        self.calls.push(SurfaceCall::AddRectangle(handle, a, b));
        handle
    }

    fn remove_layer(&mut self, layer: LayerHandle) {
        debug!("remove {layer}");
        self.live.retain(|&l| l != layer);
        self.calls.push(SurfaceCall::RemoveLayer(layer));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.calls.push(SurfaceCall::SetCursor(cursor));
    }

    fn show_buildings(&mut self, buildings: Vec<DisplayFeature>) {
        info!("showing {} buildings", buildings.len());
        self.calls.push(SurfaceCall::ShowBuildings(buildings.len()));
        self.buildings = buildings;
    }

    fn clear_buildings(&mut self) {
        self.calls.push(SurfaceCall::ClearBuildings);
        self.buildings.clear();
    }
}
