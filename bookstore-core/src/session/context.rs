//! Typed session lifecycle over a [`SessionStore`]

use super::{MemorySessionStore, SessionStore};
use crate::error::{SessionError, SessionResult};
use crate::types::{Role, SessionCredentials, UserProfile};
use std::sync::Arc;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";
pub const ROLE_KEY: &str = "role";

/// Every persisted session key; they are always cleared together
pub const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY, ROLE_KEY];

/// Handle to the persisted session
///
/// Cheap to clone; every clone shares the same store. Only login, refresh
/// and logout should mutate it.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Open a persisted session, clearing it if the stored identity is unreadable
    pub async fn load(store: Arc<dyn SessionStore>) -> SessionResult<Self> {
        let session = Self::new(store);
        if let Err(e) = session.check().await {
            tracing::warn!(error = %e, "Discarding unreadable session");
            session.clear().await?;
        }
        Ok(session)
    }

    async fn check(&self) -> SessionResult<()> {
        self.user().await?;
        self.role().await?;
        Ok(())
    }

    pub async fn access_token(&self) -> SessionResult<Option<String>> {
        self.store.get(ACCESS_TOKEN_KEY).await
    }

    pub async fn refresh_token(&self) -> SessionResult<Option<String>> {
        self.store.get(REFRESH_TOKEN_KEY).await
    }

    pub async fn user(&self) -> SessionResult<Option<UserProfile>> {
        match self.store.get(USER_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn role(&self) -> SessionResult<Option<Role>> {
        match self.store.get(ROLE_KEY).await? {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e: crate::error::ValidationError| SessionError::Corrupt(e.to_string())),
            None => Ok(None),
        }
    }

    pub async fn credentials(&self) -> SessionResult<Option<SessionCredentials>> {
        let access_token = self.access_token().await?;
        let refresh_token = self.refresh_token().await?;
        Ok(match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => Some(SessionCredentials {
                access_token,
                refresh_token,
            }),
            _ => None,
        })
    }

    pub async fn is_authenticated(&self) -> SessionResult<bool> {
        Ok(self.access_token().await?.is_some())
    }

    /// Persist a fresh login
    pub async fn store_login(
        &self,
        credentials: &SessionCredentials,
        user: &UserProfile,
        role: Role,
    ) -> SessionResult<()> {
        let user = serde_json::to_string(user).map_err(|e| SessionError::Backend(e.to_string()))?;
        self.store
            .set_all(vec![
                (ACCESS_TOKEN_KEY, credentials.access_token.clone()),
                (REFRESH_TOKEN_KEY, credentials.refresh_token.clone()),
                (USER_KEY, user),
                (ROLE_KEY, role.as_str().to_string()),
            ])
            .await
    }

    /// Replace the access token, and the refresh token when the server rotated it
    pub async fn update_tokens(
        &self,
        access_token: String,
        refresh_token: Option<String>,
    ) -> SessionResult<()> {
        let mut entries = vec![(ACCESS_TOKEN_KEY, access_token)];
        if let Some(refresh_token) = refresh_token {
            entries.push((REFRESH_TOKEN_KEY, refresh_token));
        }
        self.store.set_all(entries).await
    }

    /// Drop every persisted session key
    pub async fn clear(&self) -> SessionResult<()> {
        self.store.remove_all(&SESSION_KEYS).await
    }
}
