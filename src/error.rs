use core::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// Setting is not a whole number.
    NotANumber(&'static str),
    /// Setting is outside of its accepted range.
    OutOfRange { var: &'static str, min: u16, max: u16 },
    /// No question source was configured.
    NoSources,
    InvalidSource(bank::error::Error),
}

impl From<bank::error::Error> for Error {
    fn from(err: bank::error::Error) -> Self {
        Self::InvalidSource(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(var) => write!(f, "`{var}` must be a whole number."),
            Self::OutOfRange { var, min, max } => write!(f, "`{var}` must be between {min} and {max}."),
            Self::NoSources => f.write_str("At least one question source is required."),
            Self::InvalidSource(err) => write!(f, "Invalid question source: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSource(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
