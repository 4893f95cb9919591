use crate::constants::{GENERIC_FAILURE_MESSAGE, NO_INPUT_MESSAGE};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("No file was provided")]
    NoInput,

    #[error("Input too large: {0} bytes. Maximum allowed: {1} bytes")]
    InputTooLarge(u64, u64),

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Could not read image container: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decoded image reports no usable width ({0}x{1})")]
    MissingDimension(u32, u32),

    #[error("{format} encoder rejected the pixel buffer: {reason}")]
    Encode {
        format: &'static str,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Worker pool error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, TranscodeError>;

impl TranscodeError {
    pub(crate) fn encode(format: &'static str, reason: impl fmt::Display) -> Self {
        TranscodeError::Encode {
            format,
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            TranscodeError::NoInput => FailureKind::NoInput,
            TranscodeError::InputTooLarge(..) => FailureKind::InputTooLarge,
            TranscodeError::Decode(_) | TranscodeError::Io(_) => FailureKind::Decode,
            TranscodeError::MissingDimension(..) => FailureKind::MissingDimension,
            TranscodeError::Encode { .. } => FailureKind::Encode,
            TranscodeError::InvalidConfig(_) | TranscodeError::Worker(_) => FailureKind::Internal,
        }
    }

    /// The message shown to the end user. Only the input-side kinds are
    /// surfaced verbatim; everything else collapses to one generic line.
    pub fn public_message(&self) -> String {
        match self {
            TranscodeError::NoInput => NO_INPUT_MESSAGE.to_string(),
            TranscodeError::InputTooLarge(_, max) => {
                format!("The file exceeds the maximum allowed size of {} bytes.", max)
            }
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn into_failure(self, original_size: u64) -> TranscodeFailure {
        TranscodeFailure {
            kind: self.kind(),
            message: self.public_message(),
            original_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoInput,
    InputTooLarge,
    Decode,
    MissingDimension,
    Encode,
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::NoInput => "no_input",
            FailureKind::InputTooLarge => "input_too_large",
            FailureKind::Decode => "decode",
            FailureKind::MissingDimension => "missing_dimension",
            FailureKind::Encode => "encode",
            FailureKind::Internal => "internal",
        };
        write!(f, "{}", name)
    }
}

/// Failure shape handed back across the pipeline boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeFailure {
    pub kind: FailureKind,
    pub message: String,
    pub original_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_is_surfaced_verbatim() {
        let failure = TranscodeError::NoInput.into_failure(0);
        assert_eq!(failure.kind, FailureKind::NoInput);
        assert_eq!(failure.message, "No file was provided.");
        assert_eq!(failure.original_size, 0);
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = TranscodeError::encode("JPEG", "scanline length mismatch");
        assert!(err.to_string().contains("scanline length mismatch"));

        let failure = err.into_failure(42);
        assert_eq!(failure.kind, FailureKind::Encode);
        assert_eq!(failure.message, "Could not optimize the image.");
        assert!(!failure.message.contains("scanline"));
        assert_eq!(failure.original_size, 42);
    }

    #[test]
    fn test_missing_dimension_uses_generic_message() {
        let failure = TranscodeError::MissingDimension(0, 10).into_failure(7);
        assert_eq!(failure.kind, FailureKind::MissingDimension);
        assert_eq!(failure.message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_input_too_large_names_the_limit() {
        let failure = TranscodeError::InputTooLarge(2048, 1024).into_failure(2048);
        assert_eq!(failure.kind, FailureKind::InputTooLarge);
        assert!(failure.message.contains("1024"));
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Decode.to_string(), "decode");
        assert_eq!(FailureKind::InputTooLarge.to_string(), "input_too_large");
    }
}
