//! Viewer logic for the BAG map: drawing a bounding box, previewing the
//! buildings in view and downloading them, without any rendering.
//!
//! All mutable viewer state lives in [`Viewer`]; the map itself is reached
//! through the [`MapSurface`] trait and user-facing messages are produced by
//! [`Alert`] only.

pub mod actions;
pub mod alert;
pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod overlay;
pub mod panel;
pub mod session;
pub mod surface;
pub mod viewer;

pub use actions::DownloadReport;
pub use alert::Alert;
pub use config::ViewerConfig;
pub use debounce::{debounce, Debouncer};
pub use error::ActionError;
pub use event::{MapEvent, Overlay, Viewport};
pub use panel::Panel;
pub use session::{BboxSession, DrawState};
pub use surface::{Cursor, DisplayFeature, LayerHandle, LogSurface, MapSurface, SurfaceCall};
pub use viewer::Viewer;
