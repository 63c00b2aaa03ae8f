//! Operator-supplied customization payloads.

use std::collections::{BTreeMap, HashSet};

use deck_core::{QuestionKind, Template};
use serde::{Deserialize, Serialize};

use crate::config::CustomizeConfig;
use crate::error::{CustomizeError, CustomizeResult};

/// Payload key for the recipient's name.
pub const RECIPIENT_NAME: &str = "recipientName";
/// Payload key for the contact or store link.
pub const CONTACT_LINK: &str = "contactLink";
/// Payload key for the free-text message.
pub const MESSAGE: &str = "message";

/// How much of the deck the operator customizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomizationLevel {
    /// Text substitution only.
    #[default]
    Basic,
    /// Text substitution plus custom question slides.
    Advanced,
}

/// A custom question to splice into the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSpec {
    /// Optional stable id; a synthetic one is assigned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The prompt.
    pub text: String,
    /// Expected answer kind.
    #[serde(rename = "type", default)]
    pub kind: QuestionKind,
    /// Slide position to insert at. Out-of-range values are clamped.
    #[serde(default)]
    pub position: i64,
    /// Whether the recipient must answer it.
    #[serde(default)]
    pub required: bool,
    /// Fixed choices for single-choice questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl QuestionSpec {
    /// Create an optional question at `position`.
    pub fn new(text: impl Into<String>, kind: QuestionKind, position: i64) -> Self {
        Self {
            id: None,
            text: text.into(),
            kind,
            position,
            required: false,
            choices: Vec::new(),
        }
    }

    /// Set the question id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the fixed choice list.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }
}

/// Everything the operator supplies to personalize one deck.
///
/// Fields may be given nested under `fields` or flat beside `level` and
/// `questions`; nested values win when a key appears in both places.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "PayloadWire")]
pub struct CustomizationPayload {
    /// Customization level.
    #[serde(default)]
    pub level: CustomizationLevel,
    /// Substitution values keyed by placeholder name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Custom questions, used at the advanced level only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<QuestionSpec>,
}

#[derive(Deserialize)]
struct PayloadWire {
    #[serde(default)]
    level: CustomizationLevel,
    #[serde(default)]
    fields: BTreeMap<String, String>,
    #[serde(default)]
    questions: Vec<QuestionSpec>,
    #[serde(flatten)]
    flat: BTreeMap<String, String>,
}

impl From<PayloadWire> for CustomizationPayload {
    fn from(wire: PayloadWire) -> Self {
        let mut fields = wire.flat;
        fields.extend(wire.fields);
        Self {
            level: wire.level,
            fields,
            questions: wire.questions,
        }
    }
}

impl CustomizationPayload {
    /// Create an empty basic payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the customization level.
    pub fn with_level(mut self, level: CustomizationLevel) -> Self {
        self.level = level;
        self
    }

    /// Set a substitution field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set the recipient's name.
    pub fn with_recipient(self, name: impl Into<String>) -> Self {
        self.with_field(RECIPIENT_NAME, name)
    }

    /// Add a custom question.
    pub fn with_question(mut self, question: QuestionSpec) -> Self {
        self.questions.push(question);
        self
    }

    /// The recipient's name, if supplied and not blank.
    pub fn recipient_name(&self) -> Option<&str> {
        self.field(RECIPIENT_NAME)
    }

    /// A field value, if present and not blank.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Returns true when question slides will be inserted.
    pub fn inserts_questions(&self) -> bool {
        self.level == CustomizationLevel::Advanced && !self.questions.is_empty()
    }

    /// Check the payload against `config` before anything is produced.
    pub fn validate(&self, config: &CustomizeConfig) -> CustomizeResult<()> {
        let missing: Vec<&str> = config
            .required_fields
            .iter()
            .map(String::as_str)
            .filter(|key| self.field(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(CustomizeError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        if !self.inserts_questions() {
            return Ok(());
        }

        let mut ids = HashSet::new();
        for (i, question) in self.questions.iter().enumerate() {
            let n = i + 1;
            if question.text.trim().is_empty() {
                return Err(CustomizeError::Validation(format!(
                    "question {n} has no text"
                )));
            }
            if question.kind == QuestionKind::SingleChoice && question.choices.is_empty() {
                return Err(CustomizeError::Validation(format!(
                    "single-choice question {n} (\"{}\") has no choices",
                    question.text
                )));
            }
            if let Some(id) = &question.id {
                if id.trim().is_empty() {
                    return Err(CustomizeError::Validation(format!(
                        "question {n} has a blank id"
                    )));
                }
                if !ids.insert(id.as_str()) {
                    return Err(CustomizeError::Validation(format!(
                        "duplicate question id \"{id}\""
                    )));
                }
            }
        }
        Ok(())
    }

    /// Reject explicit question ids already used by a question in `template`.
    pub fn check_question_ids(&self, template: &Template) -> CustomizeResult<()> {
        let clash = self.questions.iter().filter_map(|q| q.id.as_deref()).find(|id| {
            template
                .slides
                .iter()
                .any(|s| s.questions.iter().any(|q| q.id == *id))
        });
        match clash {
            Some(id) => Err(CustomizeError::Validation(format!(
                "question id \"{id}\" is already used by template \"{}\"",
                template.id
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_shape() {
        let payload: CustomizationPayload = serde_json::from_str(
            r#"{
                "level": "advanced",
                "fields": {"recipientName": "Ada"},
                "questions": [
                    {"text": "Like it?", "type": "yes_no", "position": 1, "required": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.level, CustomizationLevel::Advanced);
        assert_eq!(payload.recipient_name(), Some("Ada"));
        assert_eq!(payload.questions[0].kind, QuestionKind::YesNo);
        assert!(payload.questions[0].required);
        assert!(payload.inserts_questions());
    }

    #[test]
    fn deserializes_flat_fields() {
        let payload: CustomizationPayload = serde_json::from_str(
            r#"{"recipientName": "Ada", "contactLink": "https://shop.test", "level": "basic"}"#,
        )
        .unwrap();
        assert_eq!(payload.recipient_name(), Some("Ada"));
        assert_eq!(payload.field(CONTACT_LINK), Some("https://shop.test"));
        assert!(!payload.fields.contains_key("level"));
    }

    #[test]
    fn nested_fields_win_over_flat() {
        let payload: CustomizationPayload = serde_json::from_str(
            r#"{"recipientName": "Flat", "fields": {"recipientName": "Nested"}}"#,
        )
        .unwrap();
        assert_eq!(payload.recipient_name(), Some("Nested"));
    }

    #[test]
    fn non_text_flat_field_is_reported() {
        let result = serde_json::from_str::<CustomizationPayload>(r#"{"recipientName": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialized_payload_reads_back() {
        let payload = CustomizationPayload::new()
            .with_recipient("Ada")
            .with_level(CustomizationLevel::Advanced)
            .with_question(QuestionSpec::new("Like it?", QuestionKind::YesNo, 1));
        let json = serde_json::to_string(&payload).unwrap();
        let back: CustomizationPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn question_id_clashing_with_template() {
        use deck_core::{Slide, SlideQuestion, SlideVariant};

        let template = Template::new("t", "T").with_slide(
            Slide::new("s1", SlideVariant::Quiz)
                .with_question(SlideQuestion::new("q1", "Existing", QuestionKind::Text)),
        );
        let clashing = CustomizationPayload::new()
            .with_question(QuestionSpec::new("New", QuestionKind::Text, 0).with_id("q1"));
        assert!(clashing.check_question_ids(&template).is_err());

        let fine = CustomizationPayload::new()
            .with_question(QuestionSpec::new("New", QuestionKind::Text, 0).with_id("q2"));
        assert!(fine.check_question_ids(&template).is_ok());
    }

    #[test]
    fn empty_object_is_basic() {
        let payload: CustomizationPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.level, CustomizationLevel::Basic);
        assert!(payload.fields.is_empty());
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let payload = CustomizationPayload::new().with_recipient("   ");
        assert_eq!(payload.recipient_name(), None);
    }

    #[test]
    fn basic_level_ignores_questions() {
        let payload =
            CustomizationPayload::new().with_question(QuestionSpec::new("", QuestionKind::Text, 0));
        assert!(!payload.inserts_questions());
        assert!(payload.validate(&CustomizeConfig::default()).is_ok());
    }

    #[test]
    fn missing_required_field() {
        let config = CustomizeConfig::new().with_required_field(CONTACT_LINK);
        let err = CustomizationPayload::new()
            .with_recipient("Ada")
            .validate(&config)
            .unwrap_err();
        assert!(err.to_string().contains("contactLink"));
    }

    #[test]
    fn rejects_blank_question_text() {
        let payload = CustomizationPayload::new()
            .with_level(CustomizationLevel::Advanced)
            .with_question(QuestionSpec::new("  ", QuestionKind::Text, 0));
        assert!(matches!(
            payload.validate(&CustomizeConfig::default()),
            Err(CustomizeError::Validation(_))
        ));
    }

    #[test]
    fn rejects_choice_question_without_choices() {
        let payload = CustomizationPayload::new()
            .with_level(CustomizationLevel::Advanced)
            .with_question(QuestionSpec::new("Pick", QuestionKind::SingleChoice, 0));
        assert!(payload.validate(&CustomizeConfig::default()).is_err());

        let payload = CustomizationPayload::new()
            .with_level(CustomizationLevel::Advanced)
            .with_question(
                QuestionSpec::new("Pick", QuestionKind::SingleChoice, 0).with_choices(["a", "b"]),
            );
        assert!(payload.validate(&CustomizeConfig::default()).is_ok());
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let payload = CustomizationPayload::new()
            .with_level(CustomizationLevel::Advanced)
            .with_question(QuestionSpec::new("One", QuestionKind::Text, 0).with_id("q"))
            .with_question(QuestionSpec::new("Two", QuestionKind::Text, 1).with_id("q"));
        let err = payload.validate(&CustomizeConfig::default()).unwrap_err();
        assert!(err.to_string().contains("duplicate question id"));
    }
}
