//! Error types for separation backends.

use thiserror::Error;

/// Result type for separation operations.
pub type SeparatorResult<T> = Result<T, SeparatorError>;

/// Errors from source separation and noise suppression.
#[derive(Debug, Error)]
pub enum SeparatorError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("separation service request failed: {0}")]
    RequestFailed(String),

    #[error("separation service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("DSP error: {0}")]
    Dsp(#[from] vsep_dsp::DspError),
}

impl SeparatorError {
    /// Whether retrying the operation could help.
    ///
    /// Connection problems and timeouts are transient; a malformed
    /// response or a rejected request will not improve on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            SeparatorError::Network(e) => e.is_timeout() || e.is_connect(),
            SeparatorError::RequestFailed(_) => true,
            SeparatorError::InvalidResponse(_) | SeparatorError::Dsp(_) => false,
        }
    }
}
