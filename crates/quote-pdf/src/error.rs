use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Asset not found at {}: {source}", .path.display())]
    MissingAsset {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse template: {0}")]
    TemplateParse(String),

    #[error("Template must have {expected} pages, found {found}")]
    TemplatePageCount { expected: usize, found: usize },

    #[error("Invalid logo image: {0}")]
    Logo(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RenderError {
    /// Deployment problems: bad or missing assets. Retrying will not help.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RenderError::MissingAsset { .. }
                | RenderError::TemplateParse(_)
                | RenderError::TemplatePageCount { .. }
                | RenderError::Logo(_)
        )
    }
}
