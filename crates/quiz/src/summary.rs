use crate::{
    error::{Error, Result},
    session::QuizSession,
};
use model::Summary;

/// Share of correct answers as a whole percentage, rounded half up.
/// Returns zero for an empty quiz.
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let correct = correct.min(total) as u128;
    let total = total as u128;
    let rounded = (200 * correct + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Aggregates a finished session into results and the ordered review.
pub fn summarize(session: &QuizSession) -> Result<Summary> {
    if !session.is_finished() {
        return Err(Error::NotFinished);
    }

    let review = session.answers().to_vec();
    let total = session.questions().len();
    let correct = review.iter().filter(|record| record.is_correct).count();
    debug_assert_eq!(review.len(), total);
    debug_assert_eq!(correct, session.score());

    Ok(Summary { percentage: percentage(correct, total), correct, incorrect: total - correct, total, review })
}
