/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failed to retrieve DOM elements or the 2D context.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Event listener or timer registration errors.
    #[error("Event listener error: {0}")]
    Callback(String),

    /// Engine construction or frame scheduling failed.
    #[error(transparent)]
    Engine(#[from] glyphwave_core::Error),
}

impl Error {
    pub(crate) fn window_not_found() -> Self {
        Self::Initialization("Unable to retrieve window".to_string())
    }

    pub(crate) fn document_not_found() -> Self {
        Self::Initialization("Unable to retrieve document".to_string())
    }

    pub(crate) fn canvas_not_found() -> Self {
        Self::Initialization("Unable to retrieve canvas".to_string())
    }

    pub(crate) fn listener_failed(event_type: &str) -> Self {
        Self::Callback(format!("Failed to add {event_type} listener"))
    }
}
