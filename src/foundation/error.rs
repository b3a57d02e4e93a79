/// Crate-wide result alias.
pub type TileforgeResult<T> = Result<T, TileforgeError>;

/// Errors surfaced by configuration, buffer allocation and the encode boundary.
///
/// Pattern evaluation itself is infallible; only setup and I/O edges produce these.
#[derive(thiserror::Error, Debug)]
pub enum TileforgeError {
    /// Invalid configuration or misuse of a stateful object (e.g. a closed session).
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame or scratch buffer could not be allocated. Fatal to the current run.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Codec open, frame write or trailer failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Config file parse/serialize failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with context preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TileforgeError {
    /// Build a [`TileforgeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TileforgeError::Allocation`].
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`TileforgeError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TileforgeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
