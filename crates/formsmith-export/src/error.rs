use formsmith_core::enums::ExportFormat;

/// A generation pass that could not produce output.
#[derive(Debug, thiserror::Error)]
#[error("{format} export failed: {reason}")]
pub struct ExportError {
    pub format: ExportFormat,
    pub reason: String,
}

impl ExportError {
    pub fn new(format: ExportFormat, reason: impl Into<String>) -> Self {
        Self {
            format,
            reason: reason.into(),
        }
    }
}

/// Result alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
