//! Persistence of shared decks.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deck_core::{Answer, AnswerValue};
use deck_custom::CustomizationRecord;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ShareError, ShareResult};
use crate::token::ShareToken;

/// Identifier of one stored deck instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A customized deck as stored behind its share token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedDeck {
    /// Instance id.
    pub id: InstanceId,
    /// The token recipients open it with.
    pub token: ShareToken,
    /// The customization, including answers collected so far.
    pub record: CustomizationRecord,
    /// When the deck was saved.
    pub shared_at: DateTime<Utc>,
}

/// Storage for shared decks.
///
/// Implementations must refuse to save two decks under the same token and
/// report that as [`ShareError::Conflict`].
#[async_trait]
pub trait DeckStore: Send + Sync {
    /// Whether a deck is already stored under `token`.
    async fn exists(&self, token: &ShareToken) -> ShareResult<bool>;

    /// Store `record` under `token`.
    async fn save(&self, token: ShareToken, record: CustomizationRecord) -> ShareResult<InstanceId>;

    /// Rehydrate the deck stored under `token`.
    async fn load_by_token(&self, token: &ShareToken) -> ShareResult<SharedDeck>;

    /// Append an answer to a stored deck.
    async fn record_answer(
        &self,
        instance: InstanceId,
        question_id: &str,
        value: AnswerValue,
    ) -> ShareResult<Answer>;
}

#[derive(Debug, Default)]
struct Decks {
    by_token: HashMap<ShareToken, InstanceId>,
    by_id: HashMap<InstanceId, SharedDeck>,
}

/// An in-process [`DeckStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    decks: RwLock<Decks>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored decks.
    pub async fn len(&self) -> usize {
        self.decks.read().await.by_id.len()
    }

    /// Returns true if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.decks.read().await.by_id.is_empty()
    }

    /// Look up a deck by instance id.
    pub async fn get(&self, id: InstanceId) -> ShareResult<SharedDeck> {
        self.decks
            .read()
            .await
            .by_id
            .get(&id)
            .cloned()
            .ok_or(ShareError::InstanceNotFound(id))
    }
}

#[async_trait]
impl DeckStore for MemoryStore {
    async fn exists(&self, token: &ShareToken) -> ShareResult<bool> {
        Ok(self.decks.read().await.by_token.contains_key(token))
    }

    async fn save(&self, token: ShareToken, record: CustomizationRecord) -> ShareResult<InstanceId> {
        let mut decks = self.decks.write().await;
        if decks.by_token.contains_key(&token) {
            return Err(ShareError::Conflict(token.to_string()));
        }

        let id = InstanceId::new();
        debug!(instance = %id, token = %token, template = %record.template.id, "deck saved");
        decks.by_token.insert(token.clone(), id);
        decks.by_id.insert(
            id,
            SharedDeck {
                id,
                token,
                record,
                shared_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn load_by_token(&self, token: &ShareToken) -> ShareResult<SharedDeck> {
        let decks = self.decks.read().await;
        decks
            .by_token
            .get(token)
            .and_then(|id| decks.by_id.get(id))
            .cloned()
            .ok_or_else(|| ShareError::TokenNotFound(token.to_string()))
    }

    async fn record_answer(
        &self,
        instance: InstanceId,
        question_id: &str,
        value: AnswerValue,
    ) -> ShareResult<Answer> {
        let mut decks = self.decks.write().await;
        let deck = decks
            .by_id
            .get_mut(&instance)
            .ok_or(ShareError::InstanceNotFound(instance))?;

        let answer = Answer::new(question_id, value);
        deck.record.answers.push(answer.clone());
        debug!(instance = %instance, question = question_id, "answer recorded");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use deck_core::{Slide, SlideVariant, Template};
    use deck_custom::CustomizationPayload;

    use super::*;

    fn record() -> CustomizationRecord {
        CustomizationRecord {
            template: Template::new("demo", "Demo").with_slide(Slide::new("s1", SlideVariant::Hero)),
            request: CustomizationPayload::new().with_recipient("Ada"),
            inserted: Vec::new(),
            answers: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn token(s: &str) -> ShareToken {
        ShareToken::parse(s).unwrap()
    }

    #[tokio::test]
    async fn save_and_load() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        let t = token("ABCDEFGHJK23");

        assert!(!store.exists(&t).await.unwrap());
        let id = store.save(t.clone(), record()).await.unwrap();
        assert!(store.exists(&t).await.unwrap());
        assert_eq!(store.len().await, 1);

        let deck = store.load_by_token(&t).await.unwrap();
        assert_eq!(deck.id, id);
        assert_eq!(deck.token, t);
        assert_eq!(deck.record.template.id, "demo");
        assert_eq!(store.get(id).await.unwrap(), deck);
    }

    #[tokio::test]
    async fn duplicate_token_conflicts() {
        let store = MemoryStore::new();
        let t = token("ABCDEFGHJK23");
        store.save(t.clone(), record()).await.unwrap();
        let err = store.save(t, record()).await.unwrap_err();
        assert!(matches!(err, ShareError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_token_and_instance() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.load_by_token(&token("ZZZZZZZZZZZZ")).await,
            Err(ShareError::TokenNotFound(_))
        ));
        assert!(matches!(
            store
                .record_answer(InstanceId::new(), "q", AnswerValue::Bool(true))
                .await,
            Err(ShareError::InstanceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn answers_are_appended() {
        let store = MemoryStore::new();
        let t = token("MNPQRSTUVWXY");
        let id = store.save(t.clone(), record()).await.unwrap();

        store
            .record_answer(id, "q1", AnswerValue::Text("first".into()))
            .await
            .unwrap();
        store
            .record_answer(id, "q1", AnswerValue::Text("second".into()))
            .await
            .unwrap();

        let deck = store.load_by_token(&t).await.unwrap();
        assert_eq!(deck.record.answers.len(), 2);
        assert_eq!(
            deck.record.answer_for("q1").map(|a| &a.value),
            Some(&AnswerValue::Text("second".into()))
        );
    }

    #[test]
    fn instance_id_serializes_as_uuid() {
        let id = InstanceId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
    }
}
