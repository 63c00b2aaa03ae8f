//! The customization engine.

use std::collections::{BTreeSet, HashSet};

use chrono::Utc;
use deck_core::{Slide, SlideQuestion, SlideVariant, Template, TemplateCatalog};
use tracing::{debug, warn};

use crate::config::CustomizeConfig;
use crate::error::CustomizeResult;
use crate::payload::{CustomizationPayload, QuestionSpec, RECIPIENT_NAME};
use crate::placeholder;
use crate::record::{CustomizationRecord, InsertedQuestion};

/// Produces personalized copies of templates.
///
/// Stateless apart from its configuration; every operation returns a new
/// template and leaves its input untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomizationEngine {
    config: CustomizeConfig,
}

impl CustomizationEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: CustomizeConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &CustomizeConfig {
        &self.config
    }

    /// Fill `{{key}}` markers in every text field of every slide.
    ///
    /// `recipientName` falls back to the configured label when the payload has
    /// no usable name. Markers with no payload value are left as written.
    pub fn apply_field_substitution(
        &self,
        template: &Template,
        payload: &CustomizationPayload,
    ) -> Template {
        let name = payload
            .recipient_name()
            .unwrap_or(self.config.fallback_recipient_name.as_str());

        let unmatched = self.unmatched_placeholders(template, payload);
        if !unmatched.is_empty() {
            warn!(
                template = %template.id,
                keys = ?unmatched,
                "placeholders without a payload value left in place"
            );
        }

        let mut deck = template.clone();
        for slide in &mut deck.slides {
            for text in slide_texts_mut(slide) {
                *text = fill(text, payload, name);
            }
        }
        deck
    }

    /// Splice one quiz slide per question into a copy of `template`.
    ///
    /// Positions are clamped into `[0, len]`; the deck always grows by exactly
    /// `questions.len()` slides and slide ids stay unique.
    pub fn insert_question_slides(&self, template: &Template, questions: &[QuestionSpec]) -> Template {
        splice_questions(template, questions).0
    }

    /// Validate the payload, substitute fields, and insert question slides
    /// when the level is advanced.
    pub fn create_customized_presentation(
        &self,
        template: &Template,
        payload: &CustomizationPayload,
    ) -> CustomizeResult<CustomizationRecord> {
        payload.validate(&self.config)?;
        if payload.inserts_questions() {
            payload.check_question_ids(template)?;
        }

        let substituted = self.apply_field_substitution(template, payload);
        let (deck, inserted) = if payload.inserts_questions() {
            splice_questions(&substituted, &payload.questions)
        } else {
            if !payload.questions.is_empty() {
                debug!(
                    template = %template.id,
                    questions = payload.questions.len(),
                    "basic customization, questions ignored"
                );
            }
            (substituted, Vec::new())
        };

        debug!(
            template = %template.id,
            slides = deck.len(),
            inserted = inserted.len(),
            "customized presentation created"
        );

        Ok(CustomizationRecord {
            template: deck,
            request: payload.clone(),
            inserted,
            answers: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Resolve `template_id` in `catalog` and customize it.
    pub fn customize(
        &self,
        catalog: &TemplateCatalog,
        template_id: &str,
        payload: &CustomizationPayload,
    ) -> CustomizeResult<CustomizationRecord> {
        let template = catalog.require(template_id)?;
        self.create_customized_presentation(template, payload)
    }

    /// Marker keys in `template` that `payload` cannot resolve.
    pub fn unmatched_placeholders(
        &self,
        template: &Template,
        payload: &CustomizationPayload,
    ) -> BTreeSet<String> {
        template
            .slides
            .iter()
            .flat_map(slide_texts)
            .flat_map(placeholder::keys)
            .filter(|key| *key != RECIPIENT_NAME && !payload.fields.contains_key(*key))
            .map(str::to_string)
            .collect()
    }
}

fn fill(text: &str, payload: &CustomizationPayload, name: &str) -> String {
    placeholder::render(text, |key| {
        if key == RECIPIENT_NAME {
            Some(name)
        } else {
            payload.fields.get(key).map(String::as_str)
        }
    })
}

fn slide_texts(slide: &Slide) -> impl Iterator<Item = &str> {
    [&slide.title, &slide.subtitle, &slide.body]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .chain(
            slide
                .features
                .iter()
                .flat_map(|f| [f.title.as_str(), f.description.as_str()]),
        )
        .chain(slide.questions.iter().map(|q| q.text.as_str()))
}

fn slide_texts_mut(slide: &mut Slide) -> Vec<&mut String> {
    let mut texts: Vec<&mut String> = Vec::new();
    texts.extend(slide.title.as_mut());
    texts.extend(slide.subtitle.as_mut());
    texts.extend(slide.body.as_mut());
    for feature in &mut slide.features {
        texts.push(&mut feature.title);
        texts.push(&mut feature.description);
    }
    for question in &mut slide.questions {
        texts.push(&mut question.text);
    }
    texts
}

fn splice_questions(
    template: &Template,
    questions: &[QuestionSpec],
) -> (Template, Vec<InsertedQuestion>) {
    let mut deck = template.clone();
    let len = deck.slides.len();
    let mut taken: HashSet<String> = deck.slides.iter().map(|s| s.id.clone()).collect();
    let question_ids = assign_question_ids(template, questions);

    // Ids are assigned in payload order so synthetic ids do not depend on
    // target positions.
    let mut planned = Vec::with_capacity(questions.len());
    let mut inserted = Vec::with_capacity(questions.len());
    for (i, (spec, question_id)) in questions.iter().zip(question_ids).enumerate() {
        let slide_id = unique_id(format!("question-{question_id}"), &mut taken);

        inserted.push(InsertedQuestion {
            question_id: question_id.clone(),
            slide_id: slide_id.clone(),
            text: spec.text.clone(),
            required: spec.required,
        });
        planned.push((spec.position, i, question_slide(slide_id, question_id, spec)));
    }

    // Highest target first so earlier insertions never shift later targets;
    // equal targets keep payload order.
    planned.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
    for (position, _, slide) in planned {
        let at = clamp_position(position, len);
        if usize::try_from(position).ok() != Some(at) {
            debug!(requested = position, clamped = at, slide = %slide.id, "question position clamped");
        }
        deck.slides.insert(at, slide);
    }

    (deck, inserted)
}

/// Question ids for `questions`, unique among themselves and among the
/// questions already in `template`.
///
/// Explicit ids are reserved first, so a synthetic `custom-<n>` never takes
/// an id the operator chose.
fn assign_question_ids(template: &Template, questions: &[QuestionSpec]) -> Vec<String> {
    let mut taken: HashSet<String> = template
        .slides
        .iter()
        .flat_map(|s| s.questions.iter().map(|q| q.id.clone()))
        .collect();

    let mut ids: Vec<Option<String>> = questions
        .iter()
        .map(|spec| spec.id.clone().map(|id| unique_id(id, &mut taken)))
        .collect();
    for (i, id) in ids.iter_mut().enumerate() {
        if id.is_none() {
            *id = Some(unique_id(format!("custom-{}", i + 1), &mut taken));
        }
    }
    ids.into_iter().flatten().collect()
}

fn question_slide(slide_id: String, question_id: String, spec: &QuestionSpec) -> Slide {
    let mut question = SlideQuestion::new(question_id, spec.text.clone(), spec.kind)
        .with_choices(spec.choices.iter().cloned());
    question.required = spec.required;

    Slide::new(slide_id, SlideVariant::Quiz)
        .with_title(spec.text.clone())
        .with_question(question)
        .with_duration(0)
        .with_extra("origin", "custom")
}

fn clamp_position(position: i64, len: usize) -> usize {
    usize::try_from(position.max(0)).map_or(len, |p| p.min(len))
}

fn unique_id(base: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
