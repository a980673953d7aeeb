//! Engine error type.

/// Error categories for the animation engine.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The surface could not provide a 2D drawing context.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// The platform refused to schedule a frame callback.
    #[error("Scheduling error: {0}")]
    Scheduling(String),
}

impl Error {
    // Initialization errors
    pub(crate) fn context_unavailable() -> Self {
        Self::Initialization("Surface did not provide a 2D drawing context".to_string())
    }

    // Scheduling errors

    /// A platform scheduler refused a frame request; `detail` says why.
    pub fn frame_request_failed(detail: &str) -> Self {
        Self::Scheduling(format!("Frame request failed: {detail}"))
    }
}
