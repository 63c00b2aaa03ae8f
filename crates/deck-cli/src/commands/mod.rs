pub mod check;
pub mod customize;
pub mod next;
pub mod show;
pub mod templates;
pub mod token;
pub mod walk;

use std::path::Path;

use deck_core::AnswerValue;
use deck_custom::CustomizationRecord;
use deck_share::Publication;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What `deck customize --output` writes: the record plus where it was
/// published.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublishedRecord {
    pub record: CustomizationRecord,
    pub publication: Publication,
}

/// A record file, with or without its publication.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Published(PublishedRecord),
    Bare(CustomizationRecord),
}

/// Parse an answer given on the command line.
///
/// JSON objects become field answers with every value stringified, so
/// `{"omega3": 1}` and `{"omega3": "1"}` are the same. Anything that is not
/// JSON is taken as plain text.
fn parse_answer(raw: &str) -> AnswerValue {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => AnswerValue::Fields(
            map.into_iter()
                .map(|(k, v)| match v {
                    Value::String(s) => (k, s),
                    other => (k, other.to_string()),
                })
                .collect(),
        ),
        Ok(value) => serde_json::from_value(value)
            .unwrap_or_else(|_| AnswerValue::Text(raw.to_string())),
        Err(_) => AnswerValue::Text(raw.to_string()),
    }
}

/// Load a customization record written by `deck customize`. A bare record
/// without publication details is accepted too.
fn read_record(path: &Path) -> Result<CustomizationRecord, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let file: RecordFile = serde_json::from_str(&text)
        .map_err(|e| format!("invalid record {}: {e}", path.display()))?;
    Ok(match file {
        RecordFile::Published(published) => published.record,
        RecordFile::Bare(record) => record,
    })
}
