use std::{path::PathBuf, time::Duration};

use bag::ApiConfig;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub api: ApiConfig,
    /// Quiet time after the last map move before buildings are reloaded.
    pub debounce: Duration,
    /// Where downloads are written.
    pub out_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            debounce: DEFAULT_DEBOUNCE,
            out_dir: PathBuf::from("."),
        }
    }
}
