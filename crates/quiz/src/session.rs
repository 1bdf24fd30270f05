use crate::error::{Error, Result};
use model::{AnswerRecord, PreparedQuestion, Urgency};
use std::time::{Duration, Instant};

/// Where the session stands with respect to the current question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// The current question accepts answers given between `opened` and
    /// `deadline`, both inclusive.
    Open { opened: Instant, deadline: Instant },
    /// The current question has been settled and awaits [`QuizSession::advance`].
    Closed,
    Finished,
}

/// Outcome of a settlement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Answered { correct: bool },
    Expired,
    /// The question was already closed. Nothing changed.
    Ignored,
}

impl Settlement {
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Opened { index: usize, deadline: Instant },
    Finished,
}

/// Read-only projection of the session at some instant.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'s> {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub question: Option<&'s PreparedQuestion>,
    /// Whole seconds left, rounded up. `None` unless a question is open.
    pub remaining_secs: Option<u64>,
    pub urgency: Urgency,
    pub score: usize,
    pub phase: Phase,
}

/// Sequencing of one quiz run. Exactly one [`AnswerRecord`] is produced per
/// question, whether it is settled by an answer or by its deadline.
///
/// The session never reads the clock itself. Every time-dependent operation
/// takes the instant it should be evaluated at.
#[derive(Debug, Default)]
pub struct QuizSession {
    questions: Vec<PreparedQuestion>,
    index: usize,
    answers: Vec<AnswerRecord>,
    score: usize,
    limit: Duration,
    phase: Phase,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any previous run and opens the first question.
    pub fn start(&mut self, questions: Vec<PreparedQuestion>, limit: Duration, now: Instant) -> Result<Instant> {
        if questions.is_empty() {
            return Err(Error::EmptyQuestionSet);
        }

        if limit.is_zero() {
            return Err(Error::ZeroDuration);
        }

        log::info!("starting quiz with {} questions at {}s each", questions.len(), limit.as_secs());
        self.answers = Vec::with_capacity(questions.len());
        self.questions = questions;
        self.index = 0;
        self.score = 0;
        self.limit = limit;

        let deadline = now + limit;
        self.phase = Phase::Open { opened: now, deadline };
        Ok(deadline)
    }

    /// Accepts `answer` if the current question was open at instant `at`.
    /// An answer given exactly at the deadline is accepted. Anything later,
    /// anything given before the question opened, or any second settlement is
    /// ignored.
    pub fn submit_answer(&mut self, answer: &str, at: Instant) -> Settlement {
        let Phase::Open { opened, deadline } = self.phase else {
            log::debug!("ignoring answer `{answer}` for a closed question");
            return Settlement::Ignored;
        };

        if at > deadline {
            log::debug!("ignoring answer `{answer}` submitted after the deadline");
            return Settlement::Ignored;
        }

        if at < opened {
            log::debug!("ignoring answer `{answer}` submitted before question {} opened", self.index + 1);
            return Settlement::Ignored;
        }

        self.settle(Some(answer))
    }

    /// Closes the current question without an answer.
    pub fn expire(&mut self) -> Settlement {
        if !self.is_open() {
            return Settlement::Ignored;
        }
        self.settle(None)
    }

    /// Expires the current question only if its deadline has been reached at `now`.
    pub fn expire_due(&mut self, now: Instant) -> Settlement {
        match self.phase {
            Phase::Open { deadline, .. } if now >= deadline => self.expire(),
            _ => Settlement::Ignored,
        }
    }

    fn settle(&mut self, answer: Option<&str>) -> Settlement {
        let prepared = &self.questions[self.index];
        let record = AnswerRecord::settle(prepared, answer);
        let settlement = match answer {
            Some(_) => Settlement::Answered { correct: record.is_correct },
            None => Settlement::Expired,
        };

        if record.is_correct {
            self.score += 1;
        }

        log::debug!("question {} settled: {settlement:?}", self.index + 1);
        self.answers.push(record);
        self.phase = Phase::Closed;
        debug_assert_eq!(self.answers.len(), self.index + 1);
        settlement
    }

    /// Moves past a settled question, opening the next one or finishing the run.
    pub fn advance(&mut self, now: Instant) -> Result<Progress> {
        match self.phase {
            Phase::Idle => return Err(Error::NotStarted),
            Phase::Open { .. } => return Err(Error::Unsettled),
            Phase::Finished => return Ok(Progress::Finished),
            Phase::Closed => (),
        }

        self.index += 1;
        if self.index < self.questions.len() {
            let deadline = now + self.limit;
            self.phase = Phase::Open { opened: now, deadline };
            Ok(Progress::Opened { index: self.index, deadline })
        } else {
            log::info!("quiz finished with {}/{} correct", self.score, self.questions.len());
            self.phase = Phase::Finished;
            Ok(Progress::Finished)
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open { .. })
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    pub const fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Open { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// The question being asked or just settled.
    pub fn current(&self) -> Option<&PreparedQuestion> {
        match self.phase {
            Phase::Open { .. } | Phase::Closed => self.questions.get(self.index),
            Phase::Idle | Phase::Finished => None,
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn questions(&self) -> &[PreparedQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub const fn score(&self) -> usize {
        self.score
    }

    pub const fn time_limit(&self) -> Duration {
        self.limit
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        let remaining = self.remaining(now)?;
        let secs = remaining.as_secs();
        Some(if remaining.subsec_nanos() > 0 { secs + 1 } else { secs })
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.remaining(now).map(|remaining| self.limit.saturating_sub(remaining))
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot<'_> {
        let remaining_secs = self.remaining_secs(now);
        Snapshot {
            position: (self.index + 1).min(self.questions.len()),
            total: self.questions.len(),
            question: self.current(),
            remaining_secs,
            urgency: remaining_secs.map(Urgency::from_remaining).unwrap_or_default(),
            score: self.score,
            phase: self.phase,
        }
    }
}
