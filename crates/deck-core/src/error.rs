/// Alias for `Result<T, DeckError>`.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur when building or querying templates.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// No template is registered under the requested id.
    #[error("template not found: \"{0}\"")]
    TemplateNotFound(String),

    /// Two templates in one source share an id.
    #[error("template already registered: \"{0}\"")]
    DuplicateTemplate(String),

    /// Two slides in one template share an id.
    #[error("duplicate slide \"{slide}\" in template \"{template}\"")]
    DuplicateSlide {
        /// The template containing the duplicate.
        template: String,
        /// The repeated slide id.
        slide: String,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
