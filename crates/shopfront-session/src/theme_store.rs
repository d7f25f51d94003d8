//! App-wide theme state reconciled between local storage and the user's
//! profile on the content API.

use std::sync::Arc;

use async_trait::async_trait;
use shopfront_content::{ContentClient, ContentError};
use shopfront_core::Theme;

use crate::error::SessionError;
use crate::storage::{LocalStore, THEME_KEY};

/// Remote source of truth for a signed-in user's theme.
#[async_trait]
pub trait ThemeRemote: Send + Sync {
    async fn fetch_theme(&self, token: &str) -> Result<Theme, ContentError>;

    async fn push_theme(&self, theme: Theme, token: &str) -> Result<Theme, ContentError>;
}

#[async_trait]
impl ThemeRemote for ContentClient {
    async fn fetch_theme(&self, token: &str) -> Result<Theme, ContentError> {
        self.get_user_theme(token).await
    }

    async fn push_theme(&self, theme: Theme, token: &str) -> Result<Theme, ContentError> {
        self.set_user_theme(theme, token).await
    }
}

/// Holds the current theme.
///
/// Starts as `light` with `loading == true` until [`ThemeStore::load`]
/// completes.
pub struct ThemeStore {
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn ThemeRemote>,
    token: Option<String>,
    theme: Theme,
    loading: bool,
}

impl ThemeStore {
    #[must_use]
    pub fn new(local: Arc<dyn LocalStore>, remote: Arc<dyn ThemeRemote>) -> Self {
        Self {
            local,
            remote,
            token: None,
            theme: Theme::default(),
            loading: true,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Resolves the theme for the session identified by `token`.
    ///
    /// Order: the remote value when a token is given and the call succeeds
    /// (mirrored into local storage), then a valid locally stored value,
    /// then `light`. Never fails; storage and remote errors are logged.
    pub async fn load(&mut self, token: Option<&str>) -> Theme {
        self.loading = true;
        self.token = token.map(str::to_owned);

        let remote = match token {
            Some(token) => match self.remote.fetch_theme(token).await {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch remote theme, using local value");
                    None
                }
            },
            None => None,
        };

        self.theme = if let Some(theme) = remote {
            if let Err(e) = self.local.set(THEME_KEY, theme.as_str()) {
                tracing::warn!(error = %e, "failed to mirror remote theme locally");
            }
            theme
        } else {
            self.local_theme().unwrap_or_default()
        };

        self.loading = false;
        tracing::debug!(theme = %self.theme, from_remote = remote.is_some(), "theme loaded");
        self.theme
    }

    /// Applies `theme` immediately, persists it locally, then pushes it to
    /// the user's profile when signed in. A failed push is logged and
    /// otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] only if the local write fails.
    pub async fn set(&mut self, theme: Theme) -> Result<(), SessionError> {
        self.theme = theme;
        self.local.set(THEME_KEY, theme.as_str())?;

        if let Some(token) = self.token.as_deref() {
            if let Err(e) = self.remote.push_theme(theme, token).await {
                tracing::warn!(error = %e, %theme, "failed to sync theme to profile");
            }
        }
        Ok(())
    }

    /// Flips light/dark through [`ThemeStore::set`] and returns the new theme.
    ///
    /// # Errors
    ///
    /// Same as [`ThemeStore::set`].
    pub async fn toggle(&mut self) -> Result<Theme, SessionError> {
        let next = self.theme.toggled();
        self.set(next).await?;
        Ok(next)
    }

    fn local_theme(&self) -> Option<Theme> {
        match self.local.get(THEME_KEY) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read local theme");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "theme_store_test.rs"]
mod tests;
