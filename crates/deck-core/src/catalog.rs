use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, error};

use crate::builtin;
use crate::error::{DeckError, DeckResult};
use crate::template::Template;

type TemplateSource = Box<dyn Fn() -> Vec<Template> + Send + Sync>;

/// In-memory index from template id to immutable template.
///
/// The index is built from the template source on first use and never
/// changes afterwards. Concurrent first accesses are serialized so the source
/// runs at most once per build; reads after that take no lock.
pub struct TemplateCatalog {
    source: TemplateSource,
    index: OnceLock<CatalogIndex>,
    build_lock: Mutex<()>,
}

struct CatalogIndex {
    templates: Vec<Template>,
    by_id: HashMap<String, usize>,
}

impl CatalogIndex {
    fn build(templates: Vec<Template>) -> DeckResult<Self> {
        let mut by_id = HashMap::with_capacity(templates.len());
        for (i, template) in templates.iter().enumerate() {
            template.validate()?;
            if by_id.insert(template.id.clone(), i).is_some() {
                return Err(DeckError::DuplicateTemplate(template.id.clone()));
            }
        }
        Ok(Self { templates, by_id })
    }

    fn get(&self, id: &str) -> Option<&Template> {
        self.by_id.get(id).map(|&i| &self.templates[i])
    }
}

impl TemplateCatalog {
    /// Create a catalog that builds itself from `source` on first use.
    pub fn new(source: impl Fn() -> Vec<Template> + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
            index: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    /// Create a catalog over a fixed list of templates.
    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self::new(move || templates.clone())
    }

    /// Create a catalog over the built-in decks.
    pub fn builtin() -> Self {
        Self::new(builtin::templates)
    }

    /// Build the index if it has not been built yet.
    ///
    /// Idempotent: after the first successful call this is a no-op. A failed
    /// build leaves the catalog unbuilt, so the next call tries again.
    pub fn load(&self) -> DeckResult<()> {
        self.index().map(|_| ())
    }

    /// Returns true once the index has been built.
    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    /// Look up a template. Missing ids (and a failed build) yield `None`.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.built()?.get(id)
    }

    /// Look up a template, reporting a missing id as an error.
    pub fn require(&self, id: &str) -> DeckResult<&Template> {
        self.index()?
            .get(id)
            .ok_or_else(|| DeckError::TemplateNotFound(id.to_string()))
    }

    /// Returns true if a template with this id is registered.
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All templates in registration order.
    pub fn list(&self) -> &[Template] {
        self.built().map(|i| i.templates.as_slice()).unwrap_or(&[])
    }

    /// Drop the built index; the next access rebuilds it from the source.
    pub fn clear(&mut self) {
        if self.index.take().is_some() {
            debug!("template catalog cleared");
        }
    }

    fn built(&self) -> Option<&CatalogIndex> {
        match self.index() {
            Ok(index) => Some(index),
            Err(e) => {
                error!(error = %e, "template catalog failed to build");
                None
            }
        }
    }

    fn index(&self) -> DeckResult<&CatalogIndex> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }

        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = self.index.get() {
            return Ok(index);
        }

        let index = CatalogIndex::build((self.source)())?;
        debug!(templates = index.templates.len(), "template catalog built");
        Ok(self.index.get_or_init(|| index))
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for TemplateCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCatalog")
            .field("loaded", &self.is_loaded())
            .field(
                "templates",
                &self.index.get().map(|i| i.templates.len()).unwrap_or(0),
            )
            .finish()
    }
}
