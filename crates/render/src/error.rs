use thiserror::Error;

/// Failure while producing an output document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}
