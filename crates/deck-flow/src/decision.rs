//! Answer-driven branch decisions.
//!
//! A decision is total: every answer, including a missing or malformed one,
//! maps either to a target slide or to "advance in document order" (`None`).

use std::collections::BTreeMap;

use deck_core::AnswerValue;
use serde::{Deserialize, Serialize};

/// How a slide picks its successor from the recipient's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Compare named numeric inputs against reference values.
    ///
    /// Matches only when every expected field is present, parses as a number
    /// and equals its reference exactly. There is no tolerance.
    RatioMatch {
        /// Reference value per input field.
        expected: BTreeMap<String, f64>,
        /// Target when all inputs match.
        matched: String,
        /// Target otherwise, including missing or unparseable inputs.
        unmatched: String,
    },
    /// Branch on a yes/no answer.
    YesNo {
        /// Target for yes.
        yes: String,
        /// Target for no.
        no: String,
        /// Target for anything else; `None` advances in document order.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<String>,
    },
    /// Branch on a selected choice.
    Choice {
        /// Target per choice text.
        arms: BTreeMap<String, String>,
        /// Target for an unlisted choice; `None` advances in document order.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<String>,
    },
    /// Branch on a numeric threshold.
    AtLeast {
        /// Smallest value that takes the high branch.
        threshold: f64,
        /// Target for values at or above the threshold.
        high: String,
        /// Target for values below the threshold.
        low: String,
        /// Target for non-numeric answers; `None` advances in document order.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<String>,
    },
}

impl Decision {
    /// Exact-match comparison of named numeric inputs.
    pub fn ratio<I, K>(expected: I, matched: impl Into<String>, unmatched: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self::RatioMatch {
            expected: expected.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            matched: matched.into(),
            unmatched: unmatched.into(),
        }
    }

    /// Yes/no branch.
    pub fn yes_no(yes: impl Into<String>, no: impl Into<String>) -> Self {
        Self::YesNo {
            yes: yes.into(),
            no: no.into(),
            otherwise: None,
        }
    }

    /// Choice branch.
    pub fn choice<I, C, T>(arms: I) -> Self
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: Into<String>,
    {
        Self::Choice {
            arms: arms
                .into_iter()
                .map(|(c, t)| (c.into(), t.into()))
                .collect(),
            otherwise: None,
        }
    }

    /// Threshold branch.
    pub fn at_least(threshold: f64, high: impl Into<String>, low: impl Into<String>) -> Self {
        Self::AtLeast {
            threshold,
            high: high.into(),
            low: low.into(),
            otherwise: None,
        }
    }

    /// Set the fallback target for unrecognized answers.
    ///
    /// `RatioMatch` already routes every non-match to `unmatched` and is
    /// returned unchanged.
    pub fn otherwise(mut self, target: impl Into<String>) -> Self {
        match &mut self {
            Self::YesNo { otherwise, .. }
            | Self::Choice { otherwise, .. }
            | Self::AtLeast { otherwise, .. } => *otherwise = Some(target.into()),
            Self::RatioMatch { .. } => {}
        }
        self
    }

    /// The target for `answer`, or `None` to advance in document order.
    pub fn decide(&self, answer: Option<&AnswerValue>) -> Option<&str> {
        match self {
            Self::RatioMatch {
                expected,
                matched,
                unmatched,
            } => {
                if answer.is_some_and(|a| ratio_matches(expected, a)) {
                    Some(matched.as_str())
                } else {
                    Some(unmatched.as_str())
                }
            }
            Self::YesNo { yes, no, otherwise } => match answer.and_then(AnswerValue::as_bool) {
                Some(true) => Some(yes.as_str()),
                Some(false) => Some(no.as_str()),
                None => otherwise.as_deref(),
            },
            Self::Choice { arms, otherwise } => answer
                .and_then(AnswerValue::as_text)
                .and_then(|choice| arms.get(choice.trim()))
                .map(String::as_str)
                .or(otherwise.as_deref()),
            Self::AtLeast {
                threshold,
                high,
                low,
                otherwise,
            } => match answer.and_then(AnswerValue::as_number) {
                Some(n) if n.is_nan() => otherwise.as_deref(),
                Some(n) if n >= *threshold => Some(high.as_str()),
                Some(_) => Some(low.as_str()),
                None => otherwise.as_deref(),
            },
        }
    }

    /// Whether some answer makes this decision advance in document order.
    pub fn may_advance(&self) -> bool {
        match self {
            Self::RatioMatch { .. } => false,
            Self::YesNo { otherwise, .. }
            | Self::Choice { otherwise, .. }
            | Self::AtLeast { otherwise, .. } => otherwise.is_none(),
        }
    }

    /// Every slide this decision can lead to.
    pub fn targets(&self) -> Vec<&str> {
        let (mut targets, otherwise): (Vec<&str>, Option<&str>) = match self {
            Self::RatioMatch {
                matched, unmatched, ..
            } => (vec![matched.as_str(), unmatched.as_str()], None),
            Self::YesNo { yes, no, otherwise } => {
                (vec![yes.as_str(), no.as_str()], otherwise.as_deref())
            }
            Self::Choice { arms, otherwise } => (
                arms.values().map(String::as_str).collect(),
                otherwise.as_deref(),
            ),
            Self::AtLeast {
                high,
                low,
                otherwise,
                ..
            } => (vec![high.as_str(), low.as_str()], otherwise.as_deref()),
        };
        targets.extend(otherwise);
        targets
    }
}

fn ratio_matches(expected: &BTreeMap<String, f64>, answer: &AnswerValue) -> bool {
    expected.iter().all(|(field, reference)| {
        answer
            .field(field)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .is_some_and(|value| value == *reference)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn omega() -> Decision {
        Decision::ratio([("omega3", 1.0), ("omega6", 3.0)], "balanced", "unbalanced")
    }

    fn inputs(omega3: &str, omega6: &str) -> AnswerValue {
        AnswerValue::fields([("omega3", omega3), ("omega6", omega6)])
    }

    #[test]
    fn ratio_exact_match() {
        assert_eq!(omega().decide(Some(&inputs("1", "3"))), Some("balanced"));
        assert_eq!(omega().decide(Some(&inputs(" 1.0 ", "3"))), Some("balanced"));
        assert_eq!(omega().decide(Some(&inputs("2", "3"))), Some("unbalanced"));
    }

    #[test]
    fn ratio_has_no_tolerance() {
        assert_eq!(
            omega().decide(Some(&inputs("1.0000001", "3"))),
            Some("unbalanced")
        );
    }

    #[test]
    fn ratio_unparseable_or_missing_is_unmatched() {
        assert_eq!(omega().decide(Some(&inputs("one", "3"))), Some("unbalanced"));
        assert_eq!(
            omega().decide(Some(&AnswerValue::fields([("omega3", "1")]))),
            Some("unbalanced")
        );
        assert_eq!(omega().decide(Some(&AnswerValue::Bool(true))), Some("unbalanced"));
        assert_eq!(omega().decide(None), Some("unbalanced"));
    }

    #[test]
    fn yes_no_branches() {
        let d = Decision::yes_no("y", "n");
        assert_eq!(d.decide(Some(&AnswerValue::Bool(true))), Some("y"));
        assert_eq!(d.decide(Some(&AnswerValue::Text("No".into()))), Some("n"));
        assert_eq!(d.decide(Some(&AnswerValue::Text("perhaps".into()))), None);
        assert_eq!(d.decide(None), None);

        let d = d.otherwise("ask-again");
        assert_eq!(d.decide(None), Some("ask-again"));
    }

    #[test]
    fn choice_branches() {
        let d = Decision::choice([("red", "warm"), ("blue", "cool")]);
        assert_eq!(d.decide(Some(&AnswerValue::Text(" blue ".into()))), Some("cool"));
        assert_eq!(d.decide(Some(&AnswerValue::Text("green".into()))), None);
        assert_eq!(d.decide(Some(&AnswerValue::Number(1.0))), None);
    }

    #[test]
    fn at_least_branches() {
        let d = Decision::at_least(4.0, "happy", "unhappy");
        assert_eq!(d.decide(Some(&AnswerValue::Number(4.0))), Some("happy"));
        assert_eq!(d.decide(Some(&AnswerValue::Text("5".into()))), Some("happy"));
        assert_eq!(d.decide(Some(&AnswerValue::Number(3.5))), Some("unhappy"));
        assert_eq!(d.decide(Some(&AnswerValue::Text("great".into()))), None);
        assert_eq!(d.decide(Some(&AnswerValue::Text("NaN".into()))), None);
    }

    #[test]
    fn ratio_ignores_otherwise() {
        assert_eq!(omega().otherwise("elsewhere"), omega());
    }

    #[test]
    fn targets_lists_all_branches() {
        assert_eq!(omega().targets(), vec!["balanced", "unbalanced"]);
        let d = Decision::yes_no("y", "n").otherwise("o");
        assert_eq!(d.targets(), vec!["y", "n", "o"]);
    }

    #[test]
    fn may_advance_without_fallback() {
        assert!(!omega().may_advance());
        assert!(Decision::yes_no("y", "n").may_advance());
        assert!(!Decision::yes_no("y", "n").otherwise("o").may_advance());
        assert!(Decision::at_least(4.0, "h", "l").may_advance());
    }

    #[test]
    fn serde_tagged_by_kind() {
        let d: Decision = serde_json::from_str(
            r#"{"kind": "yes_no", "yes": "a", "no": "b"}"#,
        )
        .unwrap();
        assert_eq!(d, Decision::yes_no("a", "b"));
    }
}
