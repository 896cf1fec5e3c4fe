//! Error taxonomy for the sky map pipeline.
//!
//! Every pipeline stage either returns a clean result or aborts the run with
//! one of these variants. Nothing is retried and no partial sky map is ever
//! produced.

use thiserror::Error;

/// Failure of a single pipeline run.
#[derive(Debug, Error)]
pub enum SkyError {
    /// The star catalog could not be fetched or parsed.
    #[error("cannot load star data: {0}")]
    CatalogUnavailable(String),

    /// The observer location or timestamp could not be resolved by the
    /// time model.
    #[error("cannot resolve observer frame: {0}")]
    TransformError(String),

    /// Out-of-domain horizontal coordinates reached the projector.
    #[error("invalid coordinates for projection: {0}")]
    ProjectionError(String),

    /// The drawing backend failed while rendering the chart.
    #[error("failed to render sky map: {0}")]
    RenderError(String),
}

impl SkyError {
    pub(crate) fn catalog(msg: impl Into<String>) -> Self {
        SkyError::CatalogUnavailable(msg.into())
    }

    pub(crate) fn transform(msg: impl Into<String>) -> Self {
        SkyError::TransformError(msg.into())
    }

    pub(crate) fn projection(msg: impl Into<String>) -> Self {
        SkyError::ProjectionError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SkyError>;
