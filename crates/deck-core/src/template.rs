use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DeckError, DeckResult};
use crate::slide::Slide;

/// A named, ordered slide deck definition.
///
/// Templates registered in a [`TemplateCatalog`](crate::TemplateCatalog) are
/// never mutated; customization always works on a clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Stable key, also used to select the flow family.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional operator-facing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Slides in document order.
    pub slides: Vec<Slide>,
    /// Opaque metadata carried along untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl Template {
    /// Create an empty template.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            slides: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a slide.
    pub fn with_slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Returns true if the template has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Position of a slide in document order.
    pub fn position_of(&self, slide_id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == slide_id)
    }

    /// Look up a slide by id.
    pub fn slide(&self, slide_id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == slide_id)
    }

    /// Returns true if a slide with this id exists.
    pub fn contains(&self, slide_id: &str) -> bool {
        self.position_of(slide_id).is_some()
    }

    /// Slide ids in document order.
    pub fn slide_ids(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|s| s.id.as_str())
    }

    /// The first slide, if any.
    pub fn first(&self) -> Option<&Slide> {
        self.slides.first()
    }

    /// Check the structural invariants: a non-empty id and unique slide ids.
    pub fn validate(&self) -> DeckResult<()> {
        if self.id.trim().is_empty() {
            return Err(DeckError::Validation(format!(
                "template \"{}\" has an empty id",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for slide in &self.slides {
            if !seen.insert(slide.id.as_str()) {
                return Err(DeckError::DuplicateSlide {
                    template: self.id.clone(),
                    slide: slide.id.clone(),
                });
            }
        }
        Ok(())
    }
}
