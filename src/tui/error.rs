/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The submitted application could not be encoded for output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
