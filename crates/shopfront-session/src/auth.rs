//! Pluggable authentication with a local mock provider.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, SessionError};
use crate::storage::{LocalStore, AUTH_TOKEN_KEY, USER_DATA_KEY};

pub const LOGIN_TOKEN: &str = "mock-jwt-token";
pub const SIGNUP_TOKEN: &str = "mock-jwt-token-signup";

/// Profile persisted under `userData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
}

/// A signed-in user and the bearer token for their requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, AuthError>;

    /// Clears the stored session. Logging out while signed out is a no-op.
    async fn logout(&self) -> Result<(), AuthError>;

    /// The stored session, if both the token and the profile are present.
    fn current_session(&self) -> Result<Option<Session>, AuthError>;
}

/// Accepts any non-empty credentials and issues a fixed token.
///
/// No credential is verified against any backend.
pub struct MockAuthProvider {
    store: Arc<dyn LocalStore>,
}

impl MockAuthProvider {
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    fn persist(&self, token: &str, user: UserProfile) -> Result<Session, AuthError> {
        let user_json = serde_json::to_string(&user).map_err(|source| SessionError::Encode {
            context: "user profile",
            source,
        })?;
        self.store.set(AUTH_TOKEN_KEY, token)?;
        self.store.set(USER_DATA_KEY, &user_json)?;
        tracing::info!(user_id = user.id, email = %user.email, "session stored");
        Ok(Session {
            token: token.to_owned(),
            user,
        })
    }
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::MissingCredentials(field));
    }
    Ok(())
}

/// Display name derived from the e-mail's local part.
fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_owned()
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        require(email, "email")?;
        require(password, "password")?;

        let user = UserProfile {
            id: 1,
            email: email.to_owned(),
            name: name_from_email(email),
            avatar: None,
        };
        self.persist(LOGIN_TOKEN, user)
    }

    async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<Session, AuthError> {
        require(email, "email")?;
        require(password, "password")?;
        require(full_name, "full name")?;

        let user = UserProfile {
            id: chrono::Utc::now().timestamp_millis(),
            email: email.to_owned(),
            name: full_name.to_owned(),
            avatar: None,
        };
        self.persist(SIGNUP_TOKEN, user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_DATA_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }

    fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let (Some(token), Some(user_json)) = (
            self.store.get(AUTH_TOKEN_KEY)?,
            self.store.get(USER_DATA_KEY)?,
        ) else {
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }
        let user = serde_json::from_str(&user_json).map_err(AuthError::CorruptUserData)?;
        Ok(Some(Session { token, user }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn provider() -> (MockAuthProvider, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (MockAuthProvider::new(store.clone()), store)
    }

    #[tokio::test]
    async fn login_stores_token_and_profile() {
        let (auth, store) = provider();

        let session = auth.login("jane.doe@example.com", "secret").await.unwrap();

        assert_eq!(session.token, LOGIN_TOKEN);
        assert_eq!(
            session.user,
            UserProfile {
                id: 1,
                email: "jane.doe@example.com".to_owned(),
                name: "jane.doe".to_owned(),
                avatar: None,
            }
        );
        assert_eq!(
            store.get(AUTH_TOKEN_KEY).unwrap().as_deref(),
            Some(LOGIN_TOKEN)
        );
        let stored: serde_json::Value =
            serde_json::from_str(&store.get(USER_DATA_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(
            stored,
            serde_json::json!({
                "id": 1,
                "email": "jane.doe@example.com",
                "name": "jane.doe",
                "avatar": null
            })
        );
    }

    #[tokio::test]
    async fn login_rejects_empty_fields_without_storing() {
        let (auth, store) = provider();

        let err = auth.login("", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials("email")));
        let err = auth.login("a@b.c", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials("password")));

        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
        assert!(auth.current_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn signup_uses_full_name_and_timestamp_id() {
        let (auth, _store) = provider();
        let before = chrono::Utc::now().timestamp_millis();

        let session = auth
            .signup("sam@example.com", "pw", "Sam Carter")
            .await
            .unwrap();

        assert_eq!(session.token, SIGNUP_TOKEN);
        assert_eq!(session.user.name, "Sam Carter");
        assert!(session.user.id >= before);
    }

    #[tokio::test]
    async fn signup_requires_full_name() {
        let (auth, _store) = provider();
        let err = auth.signup("sam@example.com", "pw", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials("full name")));
    }

    #[tokio::test]
    async fn current_session_round_trips_and_logout_clears() {
        let (auth, store) = provider();
        assert!(auth.current_session().unwrap().is_none());

        let session = auth.login("kim@example.com", "pw").await.unwrap();
        assert_eq!(auth.current_session().unwrap(), Some(session));

        auth.logout().await.unwrap();
        assert!(auth.current_session().unwrap().is_none());
        assert_eq!(store.get(USER_DATA_KEY).unwrap(), None);

        auth.logout().await.unwrap();
    }

    #[test]
    fn current_session_requires_both_keys() {
        let (auth, store) = provider();
        store.set(AUTH_TOKEN_KEY, "mock-jwt-token").unwrap();
        assert!(auth.current_session().unwrap().is_none());
    }

    #[test]
    fn current_session_reports_corrupt_profile() {
        let (auth, store) = provider();
        store.set(AUTH_TOKEN_KEY, "mock-jwt-token").unwrap();
        store.set(USER_DATA_KEY, "{not json").unwrap();
        assert!(matches!(
            auth.current_session(),
            Err(AuthError::CorruptUserData(_))
        ));
    }
}
