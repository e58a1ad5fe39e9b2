//! Session context owning the credential pair and the signed-in user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::application::dto::LoginOutcome;
use crate::domain::entities::{AccessToken, RefreshToken, SessionUser, TokenClaims, TokenPair};
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

#[derive(Debug, Default)]
struct SessionState {
    access: Option<AccessToken>,
    refresh: Option<RefreshToken>,
    user: Option<SessionUser>,
    expires_at: Option<DateTime<Utc>>,
    /// Bumped on every login, restore and logout.
    generation: u64,
}

impl SessionState {
    fn begin(&mut self) {
        self.generation += 1;
    }

    fn close(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    fn install_access(&mut self, access: AccessToken, claims: Option<&TokenClaims>) {
        self.expires_at = claims.and_then(|c| c.expires_at);
        self.access = Some(access);
    }
}

/// Owns login, logout and renewal of the credential pair.
///
/// The in-memory state is authoritative while the process runs; durable
/// storage is a mirror written on every transition and read once by
/// [`CredentialStore::initialize`].
pub struct CredentialStore {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
    state: RwLock<SessionState>,
    renewal: Mutex<()>,
    /// Held while a transition is mirrored to durable storage.
    persistence: Mutex<()>,
}

impl CredentialStore {
    /// Creates a logged-out store.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self {
            auth_port,
            storage_port,
            state: RwLock::new(SessionState::default()),
            renewal: Mutex::new(()),
            persistence: Mutex::new(()),
        }
    }

    /// Restores a session from durable storage without touching the network.
    ///
    /// Returns whether a session was restored.
    pub async fn initialize(&self) -> bool {
        let access = self
            .storage_port
            .get_access_token()
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to read stored access token");
                None
            });
        let refresh = self
            .storage_port
            .get_refresh_token()
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to read stored refresh token");
                None
            });

        let Some(access) = access else {
            debug!("No stored session");
            return false;
        };

        let claims = decode_claims(&access);
        let user = claims.as_ref().map(SessionUser::from_claims);

        {
            let _persisting = self.persistence.lock().await;
            let mut state = self.state.write();
            state.begin();
            state.install_access(access, claims.as_ref());
            state.refresh = refresh;
            state.user = user.clone();
        }

        info!(
            username = user.as_ref().map_or("<unknown>", SessionUser::username),
            "Restored session from storage"
        );
        true
    }

    /// Logs in and reports the outcome for display.
    ///
    /// A failed attempt leaves any prior session untouched.
    pub async fn login(&self, identifier: &str, secret: &str) -> LoginOutcome {
        match self.try_login(identifier, secret).await {
            Ok(user) => LoginOutcome::succeeded(user),
            Err(e) => LoginOutcome::failed(e.login_message()),
        }
    }

    /// Logs in, surfacing failures as typed errors.
    ///
    /// Returns the session user when the access token's claims could be decoded.
    ///
    /// # Errors
    /// Returns error if the backend rejects the credentials or is unreachable.
    pub async fn try_login(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Option<SessionUser>, AuthError> {
        debug!(username = identifier, "Attempting login");

        let pair = self
            .auth_port
            .obtain_tokens(identifier, secret)
            .await
            .map_err(|e| {
                warn!(error = %e, "Login failed");
                e
            })?;

        let claims = decode_claims(&pair.access);
        let user = claims.as_ref().map(SessionUser::from_claims);

        let _persisting = self.persistence.lock().await;
        {
            let mut state = self.state.write();
            state.begin();
            state.install_access(pair.access.clone(), claims.as_ref());
            state.refresh = Some(pair.refresh.clone());
            state.user = user.clone();
        }

        self.persist_pair(&pair).await;

        info!(
            username = user.as_ref().map_or(identifier, SessionUser::username),
            "Successfully authenticated"
        );
        Ok(user)
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Any failure ends the session. Each call is an independent attempt; use
    /// [`CredentialStore::renew_shared`] to coalesce concurrent callers.
    ///
    /// A result arriving after the session was closed or replaced is
    /// discarded; the return value then reports whether a session is present.
    pub async fn renew(&self) -> bool {
        let (stored, generation) = {
            let state = self.state.read();
            (state.refresh.clone(), state.generation)
        };
        let Some(refresh) = stored else {
            warn!("No refresh token stored, ending session");
            self.logout().await;
            return false;
        };

        debug!(refresh = %refresh, "Renewing access token");
        let outcome = self.auth_port.refresh(&refresh).await;

        let persisting = self.persistence.lock().await;
        let renewed = match outcome {
            Ok(renewed) => renewed,
            Err(e) => {
                let superseded = self.state.read().generation != generation;
                if superseded {
                    debug!(error = %e, "Renewal failed for a session that already ended");
                    return self.is_authenticated();
                }
                warn!(error = %e, "Token renewal failed, ending session");
                drop(persisting);
                self.logout().await;
                return false;
            }
        };

        let claims = decode_claims(&renewed.access);
        {
            let mut state = self.state.write();
            if state.generation != generation {
                debug!("Session changed during renewal, discarding renewed token");
                return state.access.is_some();
            }
            state.install_access(renewed.access.clone(), claims.as_ref());
            if let Some(rotated) = &renewed.refresh {
                state.refresh = Some(rotated.clone());
            }
        }

        if let Err(e) = self.storage_port.store_access_token(&renewed.access).await {
            error!(error = %e, "Failed to persist renewed access token");
        }
        if let Some(rotated) = &renewed.refresh {
            if let Err(e) = self.storage_port.store_refresh_token(rotated).await {
                error!(error = %e, "Failed to persist rotated refresh token");
            }
        }

        info!("Access token renewed");
        true
    }

    /// Renews at most once for all callers that observed the same stale token.
    ///
    /// A caller that waited while another renewal replaced `stale` returns
    /// `true` without contacting the backend.
    pub async fn renew_shared(&self, stale: Option<&AccessToken>) -> bool {
        let _guard = self.renewal.lock().await;

        let current = self.state.read().access.clone();
        if current.is_some() && current.as_ref() != stale {
            debug!("Access token already renewed by a concurrent request");
            return true;
        }

        self.renew().await
    }

    /// Clears the session from memory and durable storage. Idempotent.
    pub async fn logout(&self) {
        let _persisting = self.persistence.lock().await;
        let was_authenticated = {
            let mut state = self.state.write();
            let was = state.access.is_some();
            state.close();
            was
        };

        if let Err(e) = self.storage_port.clear().await {
            error!(error = %e, "Failed to clear stored tokens");
        }

        if was_authenticated {
            info!("Logged out");
        } else {
            debug!("Logout on an already closed session");
        }
    }

    /// Returns whether an access token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().access.is_some()
    }

    /// Returns the signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.state.read().user.clone()
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<AccessToken> {
        self.state.read().access.clone()
    }

    /// Returns the `Authorization` header value for outgoing requests.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.state.read().access.as_ref().map(AccessToken::bearer)
    }

    /// Returns the access token's `exp` claim.
    #[must_use]
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().expires_at
    }

    async fn persist_pair(&self, pair: &TokenPair) {
        let persisted = match self.storage_port.store_access_token(&pair.access).await {
            Ok(()) => self.storage_port.store_refresh_token(&pair.refresh).await,
            Err(e) => Err(e),
        };

        match persisted {
            Ok(()) => debug!("Tokens persisted to storage"),
            Err(e) => error!(error = %e, "Failed to persist tokens to storage"),
        }
    }
}

fn decode_claims(token: &AccessToken) -> Option<TokenClaims> {
    TokenClaims::decode(token)
        .map_err(|e| warn!(error = %e, "Failed to decode access token claims"))
        .ok()
}
