//! Plain-text screens for the terminal front end. Nothing here touches the
//! session; every function renders from values the runner hands out.

use core::fmt::Write;
use quiz::model::{AnswerRecord, PreparedQuestion, Summary, Urgency};

const PROGRESS_WIDTH: usize = 20;

/// `A`, `B`, `C`, ... for option positions.
pub fn letter(index: usize) -> char {
    u8::try_from(index).ok().and_then(|i| i.checked_add(b'A')).filter(u8::is_ascii_uppercase).map_or('?', char::from)
}

/// Resolves user input to one of the presented options. Accepts a letter, a
/// 1-based number or the option text itself.
pub fn parse_choice<'q>(input: &str, options: &'q [String]) -> Option<&'q str> {
    let input = input.trim();
    if let Some(option) = options.iter().find(|option| option.as_str() == input) {
        return Some(option.as_str());
    }

    let index = match input.parse::<usize>() {
        Ok(number) => number.checked_sub(1)?,
        Err(_) => {
            let mut chars = input.chars();
            let c = chars.next()?.to_ascii_uppercase();
            if chars.next().is_some() || !c.is_ascii_uppercase() {
                return None;
            }
            usize::from(c as u8 - b'A')
        }
    };
    options.get(index).map(String::as_str)
}

pub fn question(position: usize, total: usize, question: &PreparedQuestion) -> String {
    let filled = if total == 0 { 0 } else { position * PROGRESS_WIDTH / total };
    let mut out = String::new();
    let _ = writeln!(out, "\n[{}{}] Question {position} of {total}", "#".repeat(filled), "-".repeat(PROGRESS_WIDTH - filled));
    let _ = writeln!(out, "<{}>", question.category());
    let _ = writeln!(out, "{}", question.text());
    for (i, option) in question.options().iter().enumerate() {
        let _ = writeln!(out, "  {}) {option}", letter(i));
    }
    out
}

pub fn timer(remaining_secs: u64, urgency: Urgency) -> String {
    match urgency {
        Urgency::Normal => format!("{remaining_secs}s"),
        Urgency::Warning => format!("{remaining_secs}s !"),
        Urgency::Danger => format!("{remaining_secs}s !!!"),
    }
}

pub fn settlement(record: &AnswerRecord) -> &'static str {
    match (&record.user_answer, record.is_correct) {
        (None, _) => "Time's up!",
        (Some(_), true) => "Correct!",
        (Some(_), false) => "Incorrect.",
    }
}

pub fn results(summary: &Summary) -> String {
    let Summary { percentage, correct, incorrect, total, .. } = summary;
    format!("\nScore: {percentage}% ({correct}/{total})\n  correct:   {correct}\n  incorrect: {incorrect}\n")
}

pub fn review(summary: &Summary) -> String {
    let mut out = String::new();
    for (i, record) in summary.review.iter().enumerate() {
        let status = if record.is_correct { "Correct" } else { "Incorrect" };
        let _ = writeln!(out, "\nQuestion {} - {status}", i + 1);
        let _ = writeln!(out, "<{}>", record.category);
        let _ = writeln!(out, "{}", record.question);
        for mark in record.marks() {
            let icon = if mark.is_correct_answer {
                '+'
            } else if mark.is_wrong_choice() {
                'x'
            } else {
                ' '
            };
            let yours = if mark.is_user_answer { "  (your answer)" } else { "" };
            let _ = writeln!(out, "  [{icon}] {}{yours}", mark.text);
        }
        if record.is_unanswered() {
            let _ = writeln!(out, "  (no answer given)");
        }
    }
    out
}
