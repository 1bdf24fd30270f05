use core::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The session refused to start or to summarize.
    Quiz(quiz::Error),
    /// The runner was aborted before the last question was settled.
    Abandoned,
}

impl From<quiz::Error> for Error {
    fn from(err: quiz::Error) -> Self {
        Self::Quiz(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiz(err) => err.fmt(f),
            Self::Abandoned => f.write_str("The quiz was abandoned."),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Quiz(err) => Some(err),
            Self::Abandoned => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
