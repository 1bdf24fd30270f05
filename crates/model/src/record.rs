use crate::question::PreparedQuestion;
use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// The outcome of exactly one question. Appended in question order, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// `None` when the question expired before an answer arrived.
    pub user_answer: Option<String>,
    pub correct_answer: String,
    /// Options in the order they were presented.
    pub options: Vec<String>,
    pub is_correct: bool,
}

impl AnswerRecord {
    pub fn settle(prepared: &PreparedQuestion, answer: Option<&str>) -> Self {
        let question = prepared.question();
        let is_correct = answer.is_some_and(|answer| question.is_correct(answer));
        Self {
            question: question.question.clone(),
            category: question.category.clone(),
            kind: question.kind.clone(),
            user_answer: answer.map(String::from),
            correct_answer: question.correct_answer.clone(),
            options: prepared.options().to_vec(),
            is_correct,
        }
    }

    pub fn is_unanswered(&self) -> bool {
        self.user_answer.is_none()
    }

    /// Review marks for every presented option, in presentation order.
    pub fn marks(&self) -> impl Iterator<Item = OptionMark<'_>> + '_ {
        self.options.iter().map(move |option| OptionMark {
            text: option,
            is_correct_answer: *option == self.correct_answer,
            is_user_answer: self.user_answer.as_ref() == Some(option),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMark<'a> {
    pub text: &'a str,
    pub is_correct_answer: bool,
    pub is_user_answer: bool,
}

impl OptionMark<'_> {
    pub const fn is_wrong_choice(&self) -> bool {
        self.is_user_answer && !self.is_correct_answer
    }
}

/// Results of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Rounded half up, always within `0..=100`.
    pub percentage: u8,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    /// Every answer record in question order.
    pub review: Vec<AnswerRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{Question, TEXT_MCQ};

    fn prepared() -> PreparedQuestion {
        let question = Question {
            question: String::from("Capital of France?"),
            category: String::from("Geography"),
            difficulty: String::from("easy"),
            kind: String::from(TEXT_MCQ),
            options: ["Paris", "Lyon", "Nice", "Lille"].map(String::from).to_vec(),
            correct_answer: String::from("Paris"),
        };
        PreparedQuestion::prepare(question, |options| options.rotate_left(1))
    }

    #[test]
    fn settles_correct_answer() {
        let record = AnswerRecord::settle(&prepared(), Some("Paris"));
        assert!(record.is_correct);
        assert_eq!(record.user_answer.as_deref(), Some("Paris"));
        assert_eq!(record.options, ["Lyon", "Nice", "Lille", "Paris"]);
    }

    #[test]
    fn settles_expiry_as_incorrect() {
        let record = AnswerRecord::settle(&prepared(), None);
        assert!(!record.is_correct);
        assert!(record.is_unanswered());
        assert!(record.marks().all(|mark| !mark.is_user_answer));
    }

    #[test]
    fn marks_wrong_choice_and_correct_answer() {
        let record = AnswerRecord::settle(&prepared(), Some("Nice"));
        let marks: Vec<_> = record.marks().collect();
        assert_eq!(marks.len(), 4);

        let wrong: Vec<_> = marks.iter().filter(|mark| mark.is_wrong_choice()).map(|mark| mark.text).collect();
        assert_eq!(wrong, ["Nice"]);

        let correct: Vec<_> = marks.iter().filter(|mark| mark.is_correct_answer).map(|mark| mark.text).collect();
        assert_eq!(correct, ["Paris"]);
    }

    #[test]
    fn correct_choice_is_never_wrong() {
        let record = AnswerRecord::settle(&prepared(), Some("Paris"));
        assert!(record.marks().all(|mark| !mark.is_wrong_choice()));
        assert!(record.marks().any(|mark| mark.is_user_answer && mark.is_correct_answer));
    }
}
