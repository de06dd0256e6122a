/// Convenience result type used across Chromata.
pub type ChromataResult<T> = Result<T, ChromataError>;

/// Top-level error taxonomy used by library APIs.
///
/// Steady-state drawing never produces one of these; they surface only while building
/// inputs (pixel grids, options) or when the session lifecycle is driven out of order.
#[derive(thiserror::Error, Debug)]
pub enum ChromataError {
    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while decoding or resampling a source image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Session lifecycle called in an unsupported order.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Errors when serializing or deserializing options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChromataError {
    /// Build a [`ChromataError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChromataError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ChromataError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`ChromataError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
