pub mod error;

use core::time::Duration;
use error::{Error, Result};
use quiz::{
    model::{AnswerRecord, PreparedQuestion, Summary, Urgency},
    Progress, QuizSession, Settlement,
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

/// An answer intent stamped with the instant the user gave it.
struct Answer {
    choice: Box<str>,
    sent_at: Instant,
}

/// Everything the presentation layer needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// A new question is open.
    Question {
        /// 1-based.
        position: usize,
        total: usize,
        question: PreparedQuestion,
        remaining_secs: u64,
    },
    /// Countdown refresh, once per second while a question is open.
    Tick { remaining_secs: u64, urgency: Urgency },
    /// The current question closed, either answered or expired.
    Settled { record: AnswerRecord, score: usize },
    Finished(Summary),
}

/// Handle to a running quiz. The worker task owns the [`QuizSession`], so
/// answers and the countdown are applied one at a time in arrival order.
/// Dropping the handle abandons the run.
pub struct Lobby {
    answers: mpsc::UnboundedSender<Answer>,
    updates: mpsc::UnboundedReceiver<Update>,
    worker: JoinHandle<QuizSession>,
}

impl Lobby {
    /// Pause between a settlement and the next question.
    pub const SETTLE_DELAY: Duration = Duration::from_millis(500);
    const TICK: Duration = Duration::from_secs(1);

    /// Starts the first question immediately. Must be called within a Tokio runtime.
    pub fn start(questions: Vec<PreparedQuestion>, limit: Duration) -> Result<Self> {
        let mut session = QuizSession::new();
        session.start(questions, limit, Instant::now().into_std())?;

        let (answer_tx, answer_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(session, answer_rx, update_tx));
        Ok(Self { answers: answer_tx, updates: update_rx, worker })
    }

    /// Forwards an answer for whichever question is open right now. Returns
    /// `false` once the run is over.
    pub fn answer(&self, choice: impl Into<Box<str>>) -> bool {
        let answer = Answer { choice: choice.into(), sent_at: Instant::now() };
        self.answers.send(answer).is_ok()
    }

    /// Waits for the next update. Returns `None` after [`Update::Finished`].
    pub async fn next_update(&mut self) -> Option<Update> {
        self.updates.recv().await
    }

    /// Waits until the last question is settled.
    pub async fn finish(mut self) -> Result<Summary> {
        let session = (&mut self.worker).await.map_err(|_| Error::Abandoned)?;
        Ok(quiz::summarize(&session)?)
    }

    pub fn abandon(self) {
        log::info!("quiz abandoned");
        drop(self);
    }
}

impl Drop for Lobby {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

fn announce(session: &QuizSession, updates: &mpsc::UnboundedSender<Update>) {
    let snapshot = session.snapshot(Instant::now().into_std());
    let Some(question) = snapshot.question else {
        return;
    };

    // The presentation may have gone away already
    let _ = updates.send(Update::Question {
        position: snapshot.position,
        total: snapshot.total,
        question: question.clone(),
        remaining_secs: snapshot.remaining_secs.unwrap_or_default(),
    });
}

async fn run(
    mut session: QuizSession,
    mut answers: mpsc::UnboundedReceiver<Answer>,
    updates: mpsc::UnboundedSender<Update>,
) -> QuizSession {
    let mut listening = true;
    while let Some(deadline) = session.deadline() {
        announce(&session, &updates);

        let mut ticker = time::interval_at(Instant::now() + Lobby::TICK, Lobby::TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let expiry = time::sleep_until(Instant::from_std(deadline));
        tokio::pin!(expiry);

        // Keep processing answers until one of them or the deadline settles the question
        loop {
            tokio::select! {
                biased;
                answer = answers.recv(), if listening => {
                    let Some(Answer { choice, sent_at }) = answer else {
                        listening = false;
                        continue;
                    };
                    if session.submit_answer(&choice, sent_at.into_std()).is_settled() {
                        break;
                    }
                }
                _ = &mut expiry => {
                    let settlement = session.expire();
                    debug_assert_eq!(settlement, Settlement::Expired);
                    break;
                }
                _ = ticker.tick() => {
                    let Some(remaining_secs) = session.remaining_secs(Instant::now().into_std()) else {
                        break;
                    };
                    let urgency = Urgency::from_remaining(remaining_secs);
                    let _ = updates.send(Update::Tick { remaining_secs, urgency });
                }
            }
        }

        if let Some(record) = session.answers().last() {
            let _ = updates.send(Update::Settled { record: record.clone(), score: session.score() });
        }

        time::sleep(Lobby::SETTLE_DELAY).await;
        match session.advance(Instant::now().into_std()) {
            Ok(Progress::Opened { index, .. }) => log::debug!("opened question {}", index + 1),
            Ok(Progress::Finished) => break,
            Err(err) => {
                log::error!("cannot advance quiz: {err}");
                break;
            }
        }
    }

    match quiz::summarize(&session) {
        Ok(summary) => {
            let _ = updates.send(Update::Finished(summary));
        }
        Err(err) => log::error!("cannot summarize quiz: {err}"),
    }

    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz::model::{Question, TEXT_MCQ};

    const LIMIT: Duration = Duration::from_secs(30);

    fn prepared(n: usize) -> Vec<PreparedQuestion> {
        (0..n)
            .map(|i| Question {
                question: format!("Question {i}?"),
                category: String::from("Trivia"),
                difficulty: String::from("easy"),
                kind: String::from(TEXT_MCQ),
                options: vec![format!("wrong {i}"), format!("right {i}")],
                correct_answer: format!("right {i}"),
            })
            .map(|question| PreparedQuestion::prepare(question, |_| ()))
            .collect()
    }

    async fn expect_question(lobby: &mut Lobby) -> PreparedQuestion {
        match lobby.next_update().await {
            Some(Update::Question { question, .. }) => question,
            other => panic!("expected a question, got {other:?}"),
        }
    }

    async fn expect_settled(lobby: &mut Lobby) -> (AnswerRecord, usize) {
        loop {
            match lobby.next_update().await {
                Some(Update::Tick { .. }) => continue,
                Some(Update::Settled { record, score }) => return (record, score),
                other => panic!("expected a settlement, got {other:?}"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_empty_question_set() {
        let err = Lobby::start(Vec::new(), LIMIT).err();
        assert_eq!(err, Some(Error::Quiz(quiz::Error::EmptyQuestionSet)));
    }

    #[tokio::test(start_paused = true)]
    async fn answering_every_question_correctly() {
        let mut lobby = Lobby::start(prepared(3), LIMIT).unwrap();
        for expected_score in 1..=3 {
            let question = expect_question(&mut lobby).await;
            assert!(lobby.answer(question.correct_answer()));
            let (record, score) = expect_settled(&mut lobby).await;
            assert!(record.is_correct);
            assert_eq!(score, expected_score);
        }

        let Some(Update::Finished(summary)) = lobby.next_update().await else {
            panic!("expected the summary");
        };
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.percentage, 100);
        assert!(lobby.next_update().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unanswered_question_expires_after_countdown() {
        let mut lobby = Lobby::start(prepared(2), LIMIT).unwrap();
        let Some(Update::Question { position, remaining_secs, .. }) = lobby.next_update().await else {
            panic!("expected the first question");
        };
        assert_eq!(position, 1);
        assert_eq!(remaining_secs, 30);

        let started = Instant::now();
        let mut ticks = Vec::new();
        let record = loop {
            match lobby.next_update().await {
                Some(Update::Tick { remaining_secs, urgency }) => ticks.push((remaining_secs, urgency)),
                Some(Update::Settled { record, .. }) => break record,
                other => panic!("unexpected update {other:?}"),
            }
        };

        let elapsed = Instant::now() - started;
        assert!(elapsed >= LIMIT && elapsed < LIMIT + Lobby::TICK, "{elapsed:?}");
        assert!(record.user_answer.is_none());
        assert!(!record.is_correct);
        assert_eq!(ticks.first(), Some(&(29, Urgency::Normal)));
        assert_eq!(ticks.last(), Some(&(1, Urgency::Danger)));
        assert!(ticks.windows(2).all(|pair| pair[0].0 > pair[1].0));
        assert!(ticks.contains(&(10, Urgency::Warning)));

        let Some(Update::Question { position, .. }) = lobby.next_update().await else {
            panic!("expected the second question");
        };
        assert_eq!(position, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_first_answer_counts() {
        let mut lobby = Lobby::start(prepared(1), LIMIT).unwrap();
        let question = expect_question(&mut lobby).await;
        assert!(lobby.answer("wrong 0"));
        assert!(lobby.answer(question.correct_answer()));

        let (record, score) = expect_settled(&mut lobby).await;
        assert_eq!(record.user_answer.as_deref(), Some("wrong 0"));
        assert_eq!(score, 0);

        let summary = lobby.finish().await.unwrap();
        assert_eq!(summary.review.len(), 1);
        assert_eq!(summary.correct, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn answer_during_pause_does_not_leak_into_next_question() {
        let mut lobby = Lobby::start(prepared(2), LIMIT).unwrap();
        expect_question(&mut lobby).await;
        assert!(lobby.answer("right 0"));
        expect_settled(&mut lobby).await;

        // Still within the settle delay
        assert!(lobby.answer("right 1"));

        expect_question(&mut lobby).await;
        let (record, score) = expect_settled(&mut lobby).await;
        assert!(record.user_answer.is_none());
        assert_eq!(score, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn answers_after_finish_are_refused() {
        let mut lobby = Lobby::start(prepared(1), Duration::from_secs(5)).unwrap();
        while !matches!(lobby.next_update().await, Some(Update::Finished(_)) | None) {}
        assert!(lobby.next_update().await.is_none());
        assert!(!lobby.answer("right 0"));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_run_has_no_summary() {
        let mut lobby = Lobby::start(prepared(2), LIMIT).unwrap();
        expect_question(&mut lobby).await;
        lobby.worker.abort();
        assert_eq!(lobby.finish().await, Err(Error::Abandoned));
    }
}
