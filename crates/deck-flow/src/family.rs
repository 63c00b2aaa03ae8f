//! Flow families and transition tables.

use std::collections::BTreeMap;

use deck_core::AnswerValue;
use serde::{Deserialize, Serialize};

use crate::decision::Decision;

/// What happens when the recipient leaves a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Always continue with this slide.
    Goto(String),
    /// Let the recipient's answer pick the next slide.
    Decide(Decision),
}

impl Transition {
    /// The target for `answer`, or `None` to advance in document order.
    pub fn resolve(&self, answer: Option<&AnswerValue>) -> Option<&str> {
        match self {
            Self::Goto(target) => Some(target.as_str()),
            Self::Decide(decision) => decision.decide(answer),
        }
    }

    /// Whether this transition can fall back to document order.
    pub fn may_advance(&self) -> bool {
        match self {
            Self::Goto(_) => false,
            Self::Decide(decision) => decision.may_advance(),
        }
    }

    /// Every slide this transition can lead to.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Goto(target) => vec![target.as_str()],
            Self::Decide(decision) => decision.targets(),
        }
    }
}

/// The branching rules for one template family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowFamily {
    /// Family id; matches the template id it governs.
    pub id: String,
    /// Transition per slide id. Slides without an entry advance by one.
    #[serde(default)]
    pub transitions: BTreeMap<String, Transition>,
}

impl FlowFamily {
    /// A family with no branches: every slide advances in document order.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transitions: BTreeMap::new(),
        }
    }

    /// Jump from `from` to `to` regardless of the answer.
    pub fn goto(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.transitions
            .insert(from.into(), Transition::Goto(to.into()));
        self
    }

    /// Let `decision` pick the successor of `from`.
    pub fn decide(mut self, from: impl Into<String>, decision: Decision) -> Self {
        self.transitions
            .insert(from.into(), Transition::Decide(decision));
        self
    }

    /// The transition registered for a slide.
    pub fn transition(&self, slide_id: &str) -> Option<&Transition> {
        self.transitions.get(slide_id)
    }

    /// Returns true if the family has no branches.
    pub fn is_linear(&self) -> bool {
        self.transitions.is_empty()
    }
}
