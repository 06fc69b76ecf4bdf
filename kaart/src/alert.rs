use std::fmt::Display;

use bag::{ApiConfig, Collection};

use crate::{actions::DownloadReport, error::ActionError};

/// A blocking message for the user.
///
/// This is the only place where errors are turned into text for people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert(pub String);

impl Alert {
    pub fn downloaded(report: &DownloadReport) -> Self {
        Self(format!("Successfully downloaded {} buildings!", report.count))
    }

    pub fn draw_bbox_first() -> Self {
        Self("Please draw a bounding box first!".into())
    }

    /// `collection` is the one the failed action was talking to, used for the
    /// hint about where the API is expected.
    pub fn from_error(error: &ActionError, api: &ApiConfig, collection: Collection) -> Self {
        match error {
            ActionError::MissingBoundingBox => Self::draw_bbox_first(),
            ActionError::MissingPandId => {
                Self("Please enter a Pand ID to download verblijfsobjecten".into())
            }
            ActionError::Empty { pand_id } => {
                Self(format!("No verblijfsobjecten found for Pand ID: {pand_id}"))
            }
            other => {
                let location = api
                    .collection_url(collection)
                    .map(String::from)
                    .unwrap_or_else(|_| api.base_url.clone());
                Self(format!(
                    "Download failed: {other}\n\nMake sure your API is running on {location}"
                ))
            }
        }
    }
}

impl Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
