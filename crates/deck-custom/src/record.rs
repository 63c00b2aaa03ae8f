//! Customization records and completion checks.

use chrono::{DateTime, Utc};
use deck_core::{Answer, Template};
use serde::{Deserialize, Serialize};

use crate::payload::CustomizationPayload;

/// A custom question that was turned into a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertedQuestion {
    /// The question id answers refer to.
    pub question_id: String,
    /// The synthetic slide carrying the question.
    pub slide_id: String,
    /// The prompt.
    pub text: String,
    /// Whether an answer is required.
    pub required: bool,
}

/// The result of customizing one template for one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationRecord {
    /// The personalized deck.
    pub template: Template,
    /// The request that produced it, kept for audit and replay.
    pub request: CustomizationPayload,
    /// Custom questions spliced into the deck.
    #[serde(default)]
    pub inserted: Vec<InsertedQuestion>,
    /// Answers collected so far. Empty when the record is created.
    #[serde(default)]
    pub answers: Vec<Answer>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl CustomizationRecord {
    /// Texts of the required custom questions that have no answer yet.
    pub fn missing_required(&self) -> Vec<&str> {
        self.inserted
            .iter()
            .filter(|q| q.required)
            .filter(|q| !self.answers.iter().any(|a| a.question_id == q.question_id))
            .map(|q| q.text.as_str())
            .collect()
    }

    /// Whether every required custom question has been answered.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// The most recent answer to a question.
    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers
            .iter()
            .rev()
            .find(|a| a.question_id == question_id)
    }
}
