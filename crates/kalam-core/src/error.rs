//! Error taxonomy shared by every view controller.
//!
//! All variants are recovered at the view boundary: a controller moves into
//! its error state and the application keeps running.

use thiserror::Error;

/// Why a view could not reach (or stay in) its ready state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A route parameter was non-numeric or outside its valid range.
    /// Raised before any network call is attempted.
    #[error("invalid {kind} '{value}': expected a number in {min}..={max}")]
    InvalidParameter {
        kind: &'static str,
        value: String,
        min: u32,
        max: u32,
    },

    /// The provider could not be reached, or kept answering with a
    /// non-success status, until every attempt was used up.
    #[error("failed to fetch {target} after {attempts} attempt(s): {reason}")]
    FetchFailed {
        target: String,
        attempts: u32,
        reason: String,
    },

    /// The provider answered successfully but the body lacked expected fields.
    #[error("malformed response from {target}: {reason}")]
    MalformedResponse { target: String, reason: String },

    /// A recitation clip could not be started.
    #[error("playback failed for verse {global_verse}: {reason}")]
    PlaybackError { global_verse: u32, reason: String },
}

impl ViewError {
    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ViewError::FetchFailed { .. } | ViewError::MalformedResponse { .. }
        )
    }

    pub(crate) fn malformed(target: &str, reason: impl Into<String>) -> Self {
        ViewError::MalformedResponse {
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}
