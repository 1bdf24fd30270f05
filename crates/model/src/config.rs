use alloc::string::{String, ToString};
use core::{
    fmt::{self, Display},
    num::NonZeroU16,
    str::FromStr,
    time::Duration,
};
use serde::{Deserialize, Serialize};

/// Difficulty filter applied before selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    /// No filtering.
    #[default]
    All,
    /// Only questions whose `difficulty` label equals this one.
    Level(String),
}

impl Difficulty {
    const ALL: &'static str = "all";

    pub fn matches(&self, label: &str) -> bool {
        match self {
            Self::All => true,
            Self::Level(level) => level == label,
        }
    }
}

impl From<String> for Difficulty {
    fn from(text: String) -> Self {
        if text.eq_ignore_ascii_case(Self::ALL) {
            Self::All
        } else {
            Self::Level(text)
        }
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::All => String::from(Difficulty::ALL),
            Difficulty::Level(level) => level,
        }
    }
}

impl FromStr for Difficulty {
    type Err = core::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(text.trim().to_string().into())
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => Self::ALL,
            Self::Level(level) => level,
        })
    }
}

/// User-chosen parameters of one quiz run. Read-only once a session begins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizConfig {
    /// Upper bound on the number of questions asked.
    pub num_questions: NonZeroU16,
    /// How long each question stays open (in seconds).
    pub time_per_question: NonZeroU16,
    pub difficulty: Difficulty,
}

impl QuizConfig {
    pub const DEFAULT_QUESTIONS: u16 = 10;
    pub const DEFAULT_SECONDS: u16 = 30;

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_per_question.get().into())
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            num_questions: NonZeroU16::new(Self::DEFAULT_QUESTIONS).unwrap_or(NonZeroU16::MIN),
            time_per_question: NonZeroU16::new(Self::DEFAULT_SECONDS).unwrap_or(NonZeroU16::MIN),
            difficulty: Difficulty::All,
        }
    }
}
