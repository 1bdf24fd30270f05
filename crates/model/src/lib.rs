#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod config;
pub mod question;
pub mod record;
pub mod urgency;

pub use config::{Difficulty, QuizConfig};
pub use question::{PreparedQuestion, Question, TEXT_MCQ};
pub use record::{AnswerRecord, OptionMark, Summary};
pub use urgency::Urgency;
