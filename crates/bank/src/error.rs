use core::fmt::{self, Display};
use serde_json::error::Category;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// Local question file could not be read.
    Io(io::Error),
    InvalidUri,
    /// Only plain `http` URLs can be fetched.
    UnsupportedScheme,
    /// HTTP fetch error.
    FailedFetch,
    /// Non-success HTTP status.
    Status(u16),
    /// JSON syntax error detected.
    Syntax,
    /// Unexpected JSON data types encountered.
    Data,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<hyper::Error> for Error {
    fn from(_: hyper::Error) -> Self {
        Self::FailedFetch
    }
}

impl From<hyper_util::client::legacy::Error> for Error {
    fn from(_: hyper_util::client::legacy::Error) -> Self {
        Self::FailedFetch
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Data,
            Category::Syntax | Category::Eof => Self::Syntax,
            Category::Io => Self::FailedFetch,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to read the question file: {err}."),
            Self::InvalidUri => f.write_str("Invalid URI."),
            Self::UnsupportedScheme => f.write_str("Only plain http:// question sources are supported."),
            Self::FailedFetch => f.write_str("Failed to fetch the JSON data."),
            Self::Status(code) => write!(f, "The question source responded with HTTP status {code}."),
            Self::Syntax => f.write_str("Syntax error in JSON detected."),
            Self::Data => f.write_str("Unexpected data types in JSON detected."),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
