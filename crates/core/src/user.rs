//! User identity and the token-resolution capability.
//!
//! The gateway never authenticates credentials itself: it holds an opaque
//! access token and asks an injected [`UserStore`] to resolve it. The
//! production store is backed by configuration; tests inject their own.

use std::collections::HashMap;

use uuid::Uuid;

/// Identity resolved from an access token.
///
/// Read-only to the gateway; created and owned by the user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub access_token: String,
}

/// Capability for resolving access tokens into user identities.
///
/// Every authorized request carries exactly one resolved [`User`]; a `None`
/// here is the only thing standing between a request and business logic.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn resolve(&self, access_token: &str) -> Option<User>;
}

/// In-memory token table, the production [`UserStore`].
///
/// Loaded at startup from configuration (`API_TOKENS`), never mutated
/// afterwards, so concurrent lookups need no locking.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    tokens: HashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(access_token, user_id)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Uuid)>,
    {
        let tokens = pairs
            .into_iter()
            .map(|(token, id)| {
                let user = User {
                    id,
                    access_token: token.clone(),
                };
                (token, user)
            })
            .collect();
        Self { tokens }
    }

    pub fn insert(&mut self, token: impl Into<String>, id: Uuid) {
        let token = token.into();
        self.tokens.insert(
            token.clone(),
            User {
                id,
                access_token: token,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn resolve(&self, access_token: &str) -> Option<User> {
        self.tokens.get(access_token).cloned()
    }
}
