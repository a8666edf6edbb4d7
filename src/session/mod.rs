//! Session identity: who owns the scan records.
//!
//! Before sign-in, records belong to a locally generated anonymous id
//! that is stable across launches. Signing in re-owns those records to
//! the authenticated user; the engines never read identity implicitly,
//! they are handed an owner key explicitly.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::records::{RecordStore, StoreError};
use crate::storage::kv::{KvError, KvStore};

/// Key under which the anonymous device id is persisted.
const ANONYMOUS_ID_KEY: &str = "anonymous_id";

/// Owner of a record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OwnerKey {
    /// Locally generated device identity, used before sign-in
    Anonymous(String),
    /// Authenticated user id
    User(String),
}

impl OwnerKey {
    /// A fresh anonymous identity.
    pub fn anonymous() -> Self {
        OwnerKey::Anonymous(format!("anon-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            OwnerKey::Anonymous(id) | OwnerKey::User(id) => id,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, OwnerKey::Anonymous(_))
    }
}

/// Current session context, passed explicitly to anything that needs
/// to know the owner.
#[derive(Debug, Clone)]
pub struct Session {
    owner: OwnerKey,
}

impl Session {
    /// Resolve the session from local storage, generating and
    /// persisting a stable anonymous id on first use.
    pub fn resolve(kv: &KvStore) -> Result<Self, SessionError> {
        if let Some(id) = kv.get::<String>(ANONYMOUS_ID_KEY)? {
            return Ok(Self {
                owner: OwnerKey::Anonymous(id),
            });
        }

        let owner = OwnerKey::anonymous();
        kv.set(ANONYMOUS_ID_KEY, &owner.as_str().to_string())?;
        Ok(Self { owner })
    }

    /// A session for an already-authenticated user.
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            owner: OwnerKey::User(user_id.into()),
        }
    }

    pub fn owner(&self) -> &OwnerKey {
        &self.owner
    }

    /// Sign in: adopt the anonymous records into the user's collection
    /// and switch the session owner.
    ///
    /// Adoption is additive and idempotent; signing in twice neither
    /// duplicates nor loses records.
    pub fn sign_in(
        &mut self,
        user_id: impl Into<String>,
        records: &RecordStore,
    ) -> Result<usize, SessionError> {
        let user = OwnerKey::User(user_id.into());

        let adopted = if self.owner.is_anonymous() {
            records.adopt_anonymous(&self.owner, &user)?
        } else {
            0
        };

        self.owner = user;
        Ok(adopted)
    }
}

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("local storage error: {0}")]
    Kv(#[from] KvError),

    #[error("record store error: {0}")]
    Store(#[from] StoreError),
}
