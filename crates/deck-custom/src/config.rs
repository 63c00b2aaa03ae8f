//! Configuration for the customization engine.

/// Label substituted for `{{recipientName}}` when the payload has no name.
pub const DEFAULT_FALLBACK_NAME: &str = "Friend";

/// Configuration for a [`CustomizationEngine`](crate::CustomizationEngine).
#[derive(Debug, Clone)]
pub struct CustomizeConfig {
    /// Generic label used when no recipient name is supplied.
    pub fallback_recipient_name: String,
    /// Payload fields that must be present and non-blank.
    pub required_fields: Vec<String>,
}

impl Default for CustomizeConfig {
    fn default() -> Self {
        Self {
            fallback_recipient_name: DEFAULT_FALLBACK_NAME.to_string(),
            required_fields: Vec::new(),
        }
    }
}

impl CustomizeConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback recipient label. A blank label keeps the default.
    pub fn with_fallback_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.fallback_recipient_name = name;
        }
        self
    }

    /// Require a payload field.
    pub fn with_required_field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !self.required_fields.contains(&field) {
            self.required_fields.push(field);
        }
        self
    }
}
