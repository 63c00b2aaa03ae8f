//! Publishing customized decks.

use deck_core::{Answer, AnswerValue, TemplateCatalog};
use deck_custom::{CustomizationEngine, CustomizationPayload, CustomizationRecord};
use deck_flow::FlowController;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::ShareConfig;
use crate::error::{ShareError, ShareResult};
use crate::issuer::TokenIssuer;
use crate::store::{DeckStore, InstanceId, SharedDeck};
use crate::token::ShareToken;

/// Where a published deck can be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Stored instance id.
    pub id: InstanceId,
    /// The share token.
    pub token: ShareToken,
    /// The link handed to the recipient.
    pub link: String,
}

/// Issues tokens for customized decks and saves them in a [`DeckStore`].
#[derive(Debug)]
pub struct Publisher<S> {
    store: S,
    issuer: TokenIssuer,
    config: ShareConfig,
    flow: FlowController,
}

impl<S: DeckStore> Publisher<S> {
    /// Create a publisher over `store`.
    pub fn new(store: S, config: ShareConfig) -> Self {
        Self {
            store,
            issuer: TokenIssuer::new(&config),
            config,
            flow: FlowController::builtin(),
        }
    }

    /// Check customized decks against these flow families instead of the
    /// built-in ones.
    pub fn with_flow(mut self, flow: FlowController) -> Self {
        self.flow = flow;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The share configuration.
    pub fn config(&self) -> &ShareConfig {
        &self.config
    }

    /// Save `record` under a fresh token and build its share link.
    ///
    /// A token taken between the existence check and the save is retried
    /// with a new one, within the same attempt bound as issuance.
    pub async fn publish(&self, record: CustomizationRecord) -> ShareResult<Publication> {
        let store = &self.store;
        let attempts = self.issuer.max_attempts();

        for attempt in 1..=attempts {
            let token = self
                .issuer
                .issue_unique(|candidate| async move { store.exists(&candidate).await })
                .await?;
            match store.save(token.clone(), record.clone()).await {
                Ok(id) => {
                    let link = self.config.share_link(&token);
                    info!(instance = %id, token = %token, template = %record.template.id, "deck published");
                    return Ok(Publication { id, token, link });
                }
                Err(ShareError::Conflict(_)) => {
                    warn!(attempt, token = %token, "share token taken at save time");
                }
                Err(e) => return Err(e),
            }
        }

        error!(attempts, template = %record.template.id, "deck not published");
        Err(ShareError::ExhaustedRetries { attempts })
    }

    /// Customize `template_id` from `catalog` and publish the result.
    ///
    /// Refuses to publish when an inserted question slide sits where the
    /// template's flow never goes.
    pub async fn publish_customized(
        &self,
        engine: &CustomizationEngine,
        catalog: &TemplateCatalog,
        template_id: &str,
        payload: &CustomizationPayload,
    ) -> ShareResult<(CustomizationRecord, Publication)> {
        let record = engine.customize(catalog, template_id, payload)?;
        self.check_reachable(template_id, &record)?;
        let publication = self.publish(record.clone()).await?;
        Ok((record, publication))
    }

    fn check_reachable(&self, template_id: &str, record: &CustomizationRecord) -> ShareResult<()> {
        if !self.flow.has_family(template_id) {
            debug!(template = template_id, "no flow family, reachability not checked");
            return Ok(());
        }

        let unreachable = self.flow.unreachable(template_id, &record.template)?;
        let slides: Vec<String> = record
            .inserted
            .iter()
            .filter(|q| unreachable.contains(&q.slide_id.as_str()))
            .map(|q| q.slide_id.clone())
            .collect();
        if slides.is_empty() {
            return Ok(());
        }

        error!(template = template_id, slides = ?slides, "inserted question slides are unreachable");
        Err(ShareError::UnreachableQuestions {
            template: template_id.to_string(),
            slides,
        })
    }

    /// Open the deck behind a token as typed by the recipient.
    pub async fn open(&self, token: &str) -> ShareResult<SharedDeck> {
        let token = ShareToken::parse(token)?;
        self.store.load_by_token(&token).await
    }

    /// Record an answer for the deck behind `token`.
    pub async fn answer(
        &self,
        token: &str,
        question_id: &str,
        value: AnswerValue,
    ) -> ShareResult<Answer> {
        let deck = self.open(token).await?;
        self.store.record_answer(deck.id, question_id, value).await
    }
}
