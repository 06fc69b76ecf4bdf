use bag::{ExportError, FetchError, PandId};
use rd::TransformError;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("no bounding box has been drawn")]
    MissingBoundingBox,

    #[error("no pand id given")]
    MissingPandId,

    #[error("no verblijfsobjecten found for pand {pand_id}")]
    Empty { pand_id: PandId },
}
