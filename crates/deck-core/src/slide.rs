use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The layout variant of a slide. Extensible via `Custom(String)` for
/// renderer-specific layouts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideVariant {
    /// Full-bleed opener with a large title.
    Hero,
    /// Text on one side, media on the other.
    Split,
    /// A grid of feature cards.
    Grid,
    /// An interactive slide carrying one or more questions.
    Quiz,
    /// Contact details and call to action.
    Contact,
    /// Closing slide.
    Final,
    /// Embedded video.
    Video,
    /// A renderer-specific variant not covered by the built-in ones.
    Custom(String),
}

impl SlideVariant {
    /// Parse a variant tag, falling back to `Custom` for unknown names.
    pub fn parse(s: &str) -> Self {
        match s {
            "hero" => Self::Hero,
            "split" => Self::Split,
            "grid" => Self::Grid,
            "quiz" => Self::Quiz,
            "contact" => Self::Contact,
            "final" => Self::Final,
            "video" => Self::Video,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for SlideVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hero => write!(f, "hero"),
            Self::Split => write!(f, "split"),
            Self::Grid => write!(f, "grid"),
            Self::Quiz => write!(f, "quiz"),
            Self::Contact => write!(f, "contact"),
            Self::Final => write!(f, "final"),
            Self::Video => write!(f, "video"),
            Self::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// The kind of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free text.
    #[default]
    Text,
    /// Yes or no.
    YesNo,
    /// One of a fixed set of choices.
    SingleChoice,
    /// A numeric rating.
    Rating,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::YesNo => write!(f, "yes_no"),
            Self::SingleChoice => write!(f, "single_choice"),
            Self::Rating => write!(f, "rating"),
        }
    }
}

/// A feature card shown on grid-style slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Icon name understood by the renderer.
    pub icon: String,
    /// Card heading.
    pub title: String,
    /// Card body text.
    pub description: String,
}

impl Feature {
    /// Create a feature card.
    pub fn new(
        icon: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A question rendered on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideQuestion {
    /// Identifier answers refer back to.
    pub id: String,
    /// The prompt shown to the recipient.
    pub text: String,
    /// Expected answer kind.
    pub kind: QuestionKind,
    /// Whether the recipient must answer before the session is complete.
    #[serde(default)]
    pub required: bool,
    /// Fixed choices for `SingleChoice` questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl SlideQuestion {
    /// Create an optional question with no fixed choices.
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            required: false,
            choices: Vec::new(),
        }
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

/// One addressable unit of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Identifier, unique within its template.
    pub id: String,
    /// Layout variant.
    pub variant: SlideVariant,
    /// Heading text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Secondary heading text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Body copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Feature cards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
    /// Questions asked on this slide.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<SlideQuestion>,
    /// Auto-advance delay in milliseconds. Zero waits for the recipient.
    #[serde(default)]
    pub duration_ms: u64,
    /// Variant-specific fields (background asset, embedded media, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl Slide {
    /// Create an empty slide that waits for the recipient.
    pub fn new(id: impl Into<String>, variant: SlideVariant) -> Self {
        Self {
            id: id.into(),
            variant,
            title: None,
            subtitle: None,
            body: None,
            features: Vec::new(),
            questions: Vec::new(),
            duration_ms: 0,
            extra: BTreeMap::new(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a feature card.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Add a question.
    pub fn with_question(mut self, question: SlideQuestion) -> Self {
        self.questions.push(question);
        self
    }

    /// Set the auto-advance delay.
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Attach a variant-specific field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether the slide waits for the recipient instead of auto-advancing.
    pub fn is_manual(&self) -> bool {
        self.duration_ms == 0
    }

    /// Whether any question on this slide must be answered.
    pub fn has_required_question(&self) -> bool {
        self.questions.iter().any(|q| q.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parse_known_and_custom() {
        assert_eq!(SlideVariant::parse("quiz"), SlideVariant::Quiz);
        assert_eq!(
            SlideVariant::parse("particles"),
            SlideVariant::Custom("particles".to_string())
        );
    }

    #[test]
    fn variant_display_roundtrips_parse() {
        for variant in [
            SlideVariant::Hero,
            SlideVariant::Split,
            SlideVariant::Grid,
            SlideVariant::Quiz,
            SlideVariant::Contact,
            SlideVariant::Final,
            SlideVariant::Video,
        ] {
            assert_eq!(SlideVariant::parse(&variant.to_string()), variant);
        }
    }

    #[test]
    fn question_kind_uses_snake_case_on_the_wire() {
        let kind: QuestionKind = serde_json::from_str("\"yes_no\"").unwrap();
        assert_eq!(kind, QuestionKind::YesNo);
        assert_eq!(
            serde_json::to_string(&QuestionKind::SingleChoice).unwrap(),
            "\"single_choice\""
        );
    }

    #[test]
    fn slide_builder() {
        let slide = Slide::new("intro", SlideVariant::Hero)
            .with_title("Hello {{recipientName}}")
            .with_duration(4000)
            .with_extra("background", "stars.jpg");

        assert_eq!(slide.title.as_deref(), Some("Hello {{recipientName}}"));
        assert!(!slide.is_manual());
        assert_eq!(slide.extra["background"], "stars.jpg");
    }

    #[test]
    fn required_question_detection() {
        let slide = Slide::new("q", SlideVariant::Quiz)
            .with_question(SlideQuestion::new("a", "Optional?", QuestionKind::Text));
        assert!(!slide.has_required_question());

        let slide = slide.with_question(
            SlideQuestion::new("b", "Pick one", QuestionKind::SingleChoice)
                .required()
                .with_choices(["x", "y"]),
        );
        assert!(slide.has_required_question());
        assert_eq!(slide.questions[1].choices, vec!["x", "y"]);
    }

    #[test]
    fn slide_deserializes_with_defaults() {
        let slide: Slide =
            serde_json::from_str(r#"{"id": "s1", "variant": "final"}"#).unwrap();
        assert_eq!(slide.variant, SlideVariant::Final);
        assert!(slide.is_manual());
        assert!(slide.features.is_empty());
    }
}
