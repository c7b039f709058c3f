/// Convenience result alias used throughout the crate.
pub type SeatplanResult<T> = Result<T, SeatplanError>;

/// Error type for the fallible edges of the crate.
///
/// The layout engine itself never returns these; they come from loading input, resolving
/// assets, and writing or capturing output artifacts.
#[derive(thiserror::Error, Debug)]
pub enum SeatplanError {
    /// Input or configuration rejected before any work was done.
    #[error("validation error: {0}")]
    Validation(String),

    /// A portrait or other asset could not be resolved or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Markup parsing, rasterization or capture failed.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem failure while reading input or writing output.
    #[error("io error: {0}")]
    Io(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its context chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeatplanError {
    /// Build a [`SeatplanError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SeatplanError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SeatplanError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SeatplanError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`SeatplanError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
