use crate::error::{Error, Result};
use bank::Source;
use core::{num::NonZeroU16, ops::RangeInclusive, str::FromStr};
use quiz::model::{Difficulty, QuizConfig};

pub const SOURCES: &str = "QUIZ_SOURCES";
pub const QUESTIONS: &str = "QUIZ_QUESTIONS";
pub const TIME: &str = "QUIZ_TIME";
pub const DIFFICULTY: &str = "QUIZ_DIFFICULTY";

const DEFAULT_SOURCES: &str = "questions.json,question2.json,question3.json";
const QUESTION_RANGE: RangeInclusive<u16> = 1..=50;
const TIME_RANGE: RangeInclusive<u16> = 5..=120;

/// Runtime settings gathered from the environment.
#[derive(Debug)]
pub struct Config {
    pub sources: Vec<Source>,
    pub quiz: QuizConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Unset variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sources = lookup(SOURCES).unwrap_or_else(|| String::from(DEFAULT_SOURCES));
        let sources = sources
            .split(',')
            .map(str::trim)
            .filter(|source| !source.is_empty())
            .map(str::parse)
            .collect::<core::result::Result<Vec<Source>, _>>()?;
        if sources.is_empty() {
            return Err(Error::NoSources);
        }

        let defaults = QuizConfig::default();
        let num_questions = match lookup(QUESTIONS) {
            Some(text) => parse_bounded(QUESTIONS, &text, QUESTION_RANGE)?,
            None => defaults.num_questions,
        };
        let time_per_question = match lookup(TIME) {
            Some(text) => parse_bounded(TIME, &text, TIME_RANGE)?,
            None => defaults.time_per_question,
        };
        let difficulty = match lookup(DIFFICULTY) {
            Some(text) if !text.trim().is_empty() => Difficulty::from(text.trim().to_owned()),
            _ => defaults.difficulty,
        };

        Ok(Self { sources, quiz: QuizConfig { num_questions, time_per_question, difficulty } })
    }
}

/// A command typed on the setup screen.
#[derive(Debug, PartialEq, Eq)]
pub enum Intent {
    /// An empty line.
    Start,
    Quit,
    /// `n <count>`
    Questions(NonZeroU16),
    /// `t <secs>`
    Time(NonZeroU16),
    /// `d <level>` or a bare level name.
    Difficulty(Difficulty),
}

impl FromStr for Intent {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, arg) = line.split_once(char::is_whitespace).map_or((line, ""), |(cmd, arg)| (cmd, arg.trim()));
        Ok(match (command, arg) {
            ("", _) => Self::Start,
            ("q" | "Q", "") => Self::Quit,
            ("n", count) => Self::Questions(parse_bounded("n", count, QUESTION_RANGE)?),
            ("t", secs) => Self::Time(parse_bounded("t", secs, TIME_RANGE)?),
            ("d", level) if !level.is_empty() => Self::Difficulty(Difficulty::from(level.to_owned())),
            _ => Self::Difficulty(Difficulty::from(line.to_owned())),
        })
    }
}

impl Intent {
    /// Writes a setting change into `settings`. [`Intent::Start`] and
    /// [`Intent::Quit`] leave it alone.
    pub fn apply(self, settings: &mut QuizConfig) {
        match self {
            Self::Start | Self::Quit => (),
            Self::Questions(count) => settings.num_questions = count,
            Self::Time(secs) => settings.time_per_question = secs,
            Self::Difficulty(difficulty) => settings.difficulty = difficulty,
        }
    }
}

fn parse_bounded(var: &'static str, text: &str, range: RangeInclusive<u16>) -> Result<NonZeroU16> {
    let value: u16 = text.trim().parse().map_err(|_| Error::NotANumber(var))?;
    let out_of_range = Error::OutOfRange { var, min: *range.start(), max: *range.end() };
    if !range.contains(&value) {
        return Err(out_of_range);
    }
    NonZeroU16::new(value).ok_or(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, path::PathBuf};

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<_, _> = vars.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_to_three_local_banks() {
        let config = config(&[]).unwrap();
        assert_eq!(config.quiz, QuizConfig::default());
        assert_eq!(
            config.sources,
            ["questions.json", "question2.json", "question3.json"].map(|p| Source::File(PathBuf::from(p)))
        );
    }

    #[test]
    fn accepts_valid_overrides() {
        let config = config(&[
            (SOURCES, "bank.json, http://localhost:8080/extra.json"),
            (QUESTIONS, "25"),
            (TIME, "5"),
            (DIFFICULTY, "hard"),
        ])
        .unwrap();
        assert_eq!(config.sources.len(), 2);
        assert!(matches!(config.sources[1], Source::Http(_)));
        assert_eq!(config.quiz.num_questions.get(), 25);
        assert_eq!(config.quiz.time_per_question.get(), 5);
        assert_eq!(config.quiz.difficulty, Difficulty::Level(String::from("hard")));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(config(&[(TIME, "4")]), Err(Error::OutOfRange { var: TIME, .. })));
        assert!(matches!(config(&[(TIME, "121")]), Err(Error::OutOfRange { var: TIME, .. })));
        assert!(matches!(config(&[(QUESTIONS, "0")]), Err(Error::OutOfRange { var: QUESTIONS, .. })));
        assert!(matches!(config(&[(QUESTIONS, "51")]), Err(Error::OutOfRange { var: QUESTIONS, .. })));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(config(&[(QUESTIONS, "ten")]), Err(Error::NotANumber(QUESTIONS))));
        assert!(matches!(config(&[(TIME, "-3")]), Err(Error::NotANumber(TIME))));
        assert!(matches!(config(&[(SOURCES, " , ")]), Err(Error::NoSources)));
        assert!(matches!(config(&[(SOURCES, "https://example.com/q.json")]), Err(Error::InvalidSource(_))));
    }

    #[test]
    fn setup_commands_change_settings() {
        let mut settings = QuizConfig::default();
        for line in ["n 25", " t  45 ", "d hard"] {
            line.parse::<Intent>().unwrap().apply(&mut settings);
        }
        assert_eq!(settings.num_questions.get(), 25);
        assert_eq!(settings.time_per_question.get(), 45);
        assert_eq!(settings.difficulty, Difficulty::Level(String::from("hard")));

        "All".parse::<Intent>().unwrap().apply(&mut settings);
        assert_eq!(settings.difficulty, Difficulty::All);
        "easy".parse::<Intent>().unwrap().apply(&mut settings);
        assert_eq!(settings.difficulty, Difficulty::Level(String::from("easy")));
    }

    #[test]
    fn setup_commands_share_the_env_ranges() {
        assert_eq!("".parse::<Intent>().unwrap(), Intent::Start);
        assert_eq!("  q ".parse::<Intent>().unwrap(), Intent::Quit);
        assert!(matches!("n 0".parse::<Intent>(), Err(Error::OutOfRange { min: 1, max: 50, .. })));
        assert!(matches!("n 51".parse::<Intent>(), Err(Error::OutOfRange { min: 1, max: 50, .. })));
        assert!(matches!("t 4".parse::<Intent>(), Err(Error::OutOfRange { min: 5, max: 120, .. })));
        assert!(matches!("t 121".parse::<Intent>(), Err(Error::OutOfRange { min: 5, max: 120, .. })));
        assert!(matches!("t".parse::<Intent>(), Err(Error::NotANumber("t"))));
        assert!(matches!("n many".parse::<Intent>(), Err(Error::NotANumber("n"))));

        let mut settings = QuizConfig::default();
        assert!("t 500".parse::<Intent>().is_err());
        assert_eq!(settings, QuizConfig::default());
        "t 120".parse::<Intent>().unwrap().apply(&mut settings);
        assert_eq!(settings.time_per_question.get(), 120);
    }
}
