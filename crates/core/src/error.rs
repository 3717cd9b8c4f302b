//! Error types for deck validation, layout and serialization.

use std::fmt;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a deck description into a document.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read input or write output.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The deck description does not match the slide schema.
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    /// Raw model output could not be turned into a JSON object.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// ZIP archive error while packaging or reading a deck.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error while writing or reading a deck part.
    #[error("XML error: {0}")]
    XmlError(String),
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

/// A schema violation, located as precisely as the input allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Zero-based index into `slides`, if the violation is inside a slide.
    pub slide_index: Option<usize>,

    /// The declared `type` of the offending slide, when one was readable.
    pub kind: Option<String>,

    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// A violation in the top-level presentation object.
    pub fn document(message: impl Into<String>) -> Self {
        Self {
            slide_index: None,
            kind: None,
            message: message.into(),
        }
    }

    /// A violation inside the slide at `index`.
    pub fn slide(index: usize, kind: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            slide_index: Some(index),
            kind: kind.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.slide_index, &self.kind) {
            (Some(idx), Some(kind)) => write!(f, "slides[{}] (type '{}'): {}", idx, kind, self.message),
            (Some(idx), None) => write!(f, "slides[{}]: {}", idx, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ValidationError {}
