use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// The only record kind the runner knows how to present.
pub const TEXT_MCQ: &str = "text_mcq";

/// A raw record from a question bank. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Question to be displayed.
    pub question: String,
    pub category: String,
    pub difficulty: String,
    /// Record kind. Only [`TEXT_MCQ`] records are usable.
    #[serde(rename = "type")]
    pub kind: String,
    /// Possible answers to select from.
    pub options: Vec<String>,
    /// Must be one of the `options` verbatim.
    pub correct_answer: String,
}

impl Question {
    pub fn is_text_mcq(&self) -> bool {
        self.kind == TEXT_MCQ
    }

    /// At least two options, one of which is the correct answer.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() >= 2 && self.options.contains(&self.correct_answer)
    }

    /// Exact string equality against the correct answer.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// A [`Question`] whose options have been put in presentation order for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedQuestion {
    question: Question,
    options: Vec<String>,
}

impl PreparedQuestion {
    /// Fixes the presentation order of the options. The `shuffle` callback may
    /// only reorder the slice it is given.
    pub fn prepare<F>(question: Question, shuffle: F) -> Self
    where
        F: FnOnce(&mut [String]),
    {
        let mut options = question.options.clone();
        shuffle(&mut options);
        Self { question, options }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn text(&self) -> &str {
        &self.question.question
    }

    pub fn category(&self) -> &str {
        &self.question.category
    }

    /// Options in the order they are presented.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.question.correct_answer
    }
}
