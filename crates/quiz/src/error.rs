use core::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The difficulty filter left nothing to ask.
    NoMatchingQuestions,
    /// A session was started without questions.
    EmptyQuestionSet,
    /// A session was started with a zero time limit.
    ZeroDuration,
    /// The session has not been started yet.
    NotStarted,
    /// The current question is still accepting answers.
    Unsettled,
    /// Results were requested before the last question was settled.
    NotFinished,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoMatchingQuestions => "No questions match your selected criteria. Please adjust your filters.",
            Self::EmptyQuestionSet => "Cannot start a quiz without any questions.",
            Self::ZeroDuration => "Each question needs a time limit of at least one second.",
            Self::NotStarted => "The quiz has not been started.",
            Self::Unsettled => "The current question has not been answered or expired yet.",
            Self::NotFinished => "The quiz is still in progress.",
        })
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
