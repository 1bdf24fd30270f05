use crate::error::Result;
use model::{Question, TEXT_MCQ};
use serde_json::Value;

/// Parses one source document: a JSON array of question records of any kind.
pub fn parse(bytes: &[u8]) -> Result<Vec<Value>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Keeps only well-formed `text_mcq` records. Anything else is dropped and logged.
pub fn retain_usable<I>(records: I) -> Vec<Question>
where
    I: IntoIterator<Item = Value>,
{
    records
        .into_iter()
        .filter(|record| {
            let kind = record.get("type").and_then(Value::as_str);
            if kind == Some(TEXT_MCQ) {
                return true;
            }
            log::debug!("skipping record of kind {kind:?}");
            false
        })
        .filter_map(|record| match serde_json::from_value::<Question>(record) {
            Ok(question) => Some(question),
            Err(err) => {
                log::warn!("skipping malformed {TEXT_MCQ} record: {err}");
                None
            }
        })
        .filter(|question| {
            if question.is_well_formed() {
                return true;
            }
            log::warn!("skipping question {:?}: correct answer must be one of at least two options", question.question);
            false
        })
        .collect()
}
