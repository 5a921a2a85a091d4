// File: crates/stockchart-core/src/error.rs
// Summary: Error taxonomy for a single render call.

/// Terminal failures of one render call. None of them are retried internally.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// No data points were supplied.
    #[error("series is empty; nothing to render")]
    EmptySeries,

    /// A data point failed to parse or was not finite.
    #[error("invalid data at index {index}: {value:?}")]
    InvalidData { index: usize, value: String },

    /// PNG serialization failed.
    #[error("png encoding failed: {0}")]
    Encoding(String),

    /// The chart configuration cannot produce an image (zero-sized canvas, wrong kind).
    #[error("invalid chart config: {0}")]
    InvalidConfig(String),
}

impl ChartError {
    pub(crate) fn invalid_data(index: usize, value: impl Into<String>) -> Self {
        Self::InvalidData { index, value: value.into() }
    }

    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
