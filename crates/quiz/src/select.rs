use crate::error::{Error, Result};
use model::{PreparedQuestion, Question, QuizConfig};
use rand::{seq::SliceRandom, Rng};

/// Picks the questions for one run: filter by difficulty, shuffle, truncate to
/// the requested count, then shuffle each question's options independently.
///
/// When fewer questions match than were requested, every matching question is
/// used.
pub fn select<R>(questions: &[Question], config: &QuizConfig, rng: &mut R) -> Result<Vec<PreparedQuestion>>
where
    R: Rng + ?Sized,
{
    let mut matching: Vec<_> = questions.iter().filter(|q| config.difficulty.matches(&q.difficulty)).collect();
    if matching.is_empty() {
        log::info!("no questions match difficulty `{}`", config.difficulty);
        return Err(Error::NoMatchingQuestions);
    }

    let requested = usize::from(config.num_questions.get());
    if matching.len() < requested {
        log::info!("only {} questions match difficulty `{}` ({requested} requested)", matching.len(), config.difficulty);
    }

    // Fisher-Yates over the whole set before truncating
    matching.shuffle(rng);
    matching.truncate(requested);

    let prepared = matching
        .into_iter()
        .map(|question| PreparedQuestion::prepare(question.clone(), |options| options.shuffle(rng)))
        .collect();
    Ok(prepared)
}

/// Distinct difficulty labels in the order they first appear.
pub fn available_difficulties(questions: &[Question]) -> Vec<&str> {
    let mut labels = Vec::new();
    for Question { difficulty, .. } in questions {
        if !labels.contains(&difficulty.as_str()) {
            labels.push(difficulty.as_str());
        }
    }
    labels
}
