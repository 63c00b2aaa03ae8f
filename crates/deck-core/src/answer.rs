use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipient's response to a question.
///
/// Untagged on the wire: `true`, `4`, `"yes"` and `{"omega3": "1"}` are all
/// valid answer values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A yes/no answer.
    Bool(bool),
    /// A numeric answer, e.g. a rating.
    Number(f64),
    /// Free text or a selected choice.
    Text(String),
    /// Several named inputs submitted together.
    Fields(BTreeMap<String, String>),
}

impl AnswerValue {
    /// Build a `Fields` answer from key/value pairs.
    pub fn fields<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Interpret the answer as a number. Text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) | Self::Fields(_) => None,
        }
    }

    /// Interpret the answer as yes/no. Accepts `yes/no/true/false`
    /// case-insensitively for text.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(s) => match s.trim().to_lowercase().as_str() {
                "yes" | "true" | "y" => Some(true),
                "no" | "false" | "n" => Some(false),
                _ => None,
            },
            Self::Number(_) | Self::Fields(_) => None,
        }
    }

    /// The answer as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// A named input of a `Fields` answer.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Fields(map) => map.get(name).map(String::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Fields(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}={v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// A recorded answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The question this answers.
    pub question_id: String,
    /// The recipient's response.
    pub value: AnswerValue,
    /// When the answer was given.
    pub answered_at: DateTime<Utc>,
}

impl Answer {
    /// Create an answer stamped with the current time.
    pub fn new(question_id: impl Into<String>, value: AnswerValue) -> Self {
        Self {
            question_id: question_id.into(),
            value,
            answered_at: Utc::now(),
        }
    }
}
