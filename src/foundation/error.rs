/// Convenience result type used across morphpack.
pub type MorphResult<T> = Result<T, MorphError>;

/// Top-level error taxonomy used by the public APIs.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Invalid configuration or dataset content.
    #[error("validation error: {0}")]
    Validation(String),

    /// A layout could not be computed for the given input.
    #[error("layout error: {0}")]
    Layout(String),

    /// A cross-visualization transition could not be started or driven.
    #[error("transition error: {0}")]
    Transition(String),

    /// SVG composition or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`MorphError::Transition`] value.
    pub fn transition(msg: impl Into<String>) -> Self {
        Self::Transition(msg.into())
    }

    /// Build a [`MorphError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MorphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MorphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
