//! Simulation errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::frame::FrameId;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while loading input or running a simulation.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Fields are documented by variant docs
pub enum SimError {
    /// The reference string contains a token that is not a page number.
    #[error("malformed reference string: token {index} ({token:?}) is not a page number")]
    MalformedInput { token: String, index: usize },

    /// The reference string source could not be read.
    #[error("cannot read reference string from {}: {source}", .path.display())]
    UnavailableInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `next` was called with no reference left.
    #[error("reference string exhausted after {consumed} references")]
    Exhausted { consumed: usize },

    /// An eviction policy selected a frame it was not allowed to select.
    #[error("policy {policy} selected {frame}, which is {reason}")]
    InvalidPolicyOutcome {
        policy: &'static str,
        frame: FrameId,
        reason: &'static str,
    },

    /// An eviction policy found nothing to evict in a full pool.
    #[error("policy {policy} selected no frame")]
    NoVictim { policy: &'static str },

    /// A frame pool needs at least one frame.
    #[error("frame count must be positive")]
    InvalidFrameCount,

    /// No eviction policy is registered under this name.
    #[error("unknown paging algorithm: {name}")]
    UnknownPolicy { name: String },
}

impl SimError {
    /// Creates an unavailable input error for the given path.
    pub fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::UnavailableInput {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error is a broken caller or policy contract
    /// rather than bad input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::Exhausted { .. } | Self::InvalidPolicyOutcome { .. } | Self::NoVictim { .. }
        )
    }

    /// Returns true if the error stems from the reference string source.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::UnavailableInput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = SimError::Exhausted { consumed: 4 };
        assert!(err.is_contract_violation());
        assert!(!err.is_input_error());

        let err = SimError::MalformedInput {
            token: "x".into(),
            index: 2,
        };
        assert!(err.is_input_error());
        assert!(!err.is_contract_violation());

        let err = SimError::unavailable("refs.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_error_messages() {
        let err = SimError::MalformedInput {
            token: "abc".into(),
            index: 3,
        };
        assert_eq!(
            err.to_string(),
            "malformed reference string: token 3 (\"abc\") is not a page number"
        );

        let err = SimError::InvalidPolicyOutcome {
            policy: "OPT",
            frame: FrameId::new(7),
            reason: "out of range",
        };
        assert_eq!(err.to_string(), "policy OPT selected frame 7, which is out of range");
    }
}
