//! Core types for Deckhand: templates, slides, answers, and the template catalog.
//!
//! This crate defines the data model the customization engine, the flow
//! controller and the share layer all work on. It holds no session state; the
//! only shared mutable piece is the [`TemplateCatalog`], which builds itself
//! once and is read-only afterwards.

/// Recipient answers to slide questions.
pub mod answer;
/// Static template definitions shipped with the crate.
pub mod builtin;
/// Lazily built, read-only index of templates.
pub mod catalog;
/// Error types used throughout the crate.
pub mod error;
/// Slides, slide variants, features, and slide questions.
pub mod slide;
/// Templates: named, ordered slide decks.
pub mod template;

/// Re-export answer types.
pub use answer::{Answer, AnswerValue};
/// Re-export the catalog.
pub use catalog::TemplateCatalog;
/// Re-export error types.
pub use error::{DeckError, DeckResult};
/// Re-export slide types.
pub use slide::{Feature, QuestionKind, Slide, SlideQuestion, SlideVariant};
/// Re-export the template type.
pub use template::Template;
