//! Error types for calendar link building.

use thiserror::Error;

/// Errors that can occur while building a calendar link.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Could not parse date/time: \"{0}\"")]
    DateParse(String),

    #[error("URL encoding error: {0}")]
    Encoding(#[from] url::ParseError),
}

/// Result type alias for link building.
pub type LinkResult<T> = Result<T, LinkError>;
