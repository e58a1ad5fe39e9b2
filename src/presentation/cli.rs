//! Command runner behind the `datum` binary.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info};

use super::navigation::{GateDecision, LOGIN_PATH, NavigationGate};
use crate::application::pipeline::RequestPipeline;
use crate::application::session::CredentialStore;
use crate::application::stores::{ListQuery, ResourceStore};
use crate::domain::entities::{Endpoint, Record, ResourceId};
use crate::domain::errors::ApiError;
use crate::domain::ports::{HttpTransport, NavigationPort, TokenStoragePort};
use crate::infrastructure::api::ApiAuthClient;
use crate::infrastructure::config::{AppConfig, Command, StorageBackend};
use crate::infrastructure::http::ReqwestTransport;
use crate::infrastructure::storage::{FileTokenStorage, KeyringTokenStorage};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("not signed in; run `datum login` first (requested {redirect})")]
    SignInRequired { redirect: String },

    #[error("{0}")]
    LoginFailed(String),

    #[error("invalid resource `{0}`, expected <module>/<collection>")]
    InvalidResource(String),

    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("failed to determine token file location")]
    TokenPathNotFound,

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Wires the session, gate and pipeline together and runs one command.
pub struct Cli {
    session: Arc<CredentialStore>,
    gate: Arc<NavigationGate>,
    pipeline: Arc<RequestPipeline>,
    api_version: String,
}

impl Cli {
    #[must_use]
    pub fn new(
        session: Arc<CredentialStore>,
        transport: Arc<dyn HttpTransport>,
        api_version: impl Into<String>,
    ) -> Self {
        let gate = Arc::new(NavigationGate::new(Arc::clone(&session)));
        let pipeline = Arc::new(RequestPipeline::new(
            transport,
            Arc::clone(&session),
            Arc::clone(&gate) as Arc<dyn NavigationPort>,
        ));

        Self {
            session,
            gate,
            pipeline,
            api_version: api_version.into(),
        }
    }

    /// Builds the real adapters from `config` and restores any stored session.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or no token path exists.
    pub async fn from_config(config: &AppConfig) -> Result<Self, CliError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(
            config.api.base_url.clone(),
            config.api.timeout(),
        )?);

        let storage: Arc<dyn TokenStoragePort> = match config.storage.backend {
            StorageBackend::Keyring => Arc::new(KeyringTokenStorage::new()),
            StorageBackend::File => Arc::new(FileTokenStorage::new(
                config
                    .effective_token_path()
                    .ok_or(CliError::TokenPathNotFound)?,
            )),
        };

        let auth = Arc::new(ApiAuthClient::new(Arc::clone(&transport)));
        let session = Arc::new(CredentialStore::new(auth, storage));
        session.initialize().await;

        Ok(Self::new(session, transport, config.api.version.clone()))
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<CredentialStore> {
        &self.session
    }

    #[must_use]
    pub const fn gate(&self) -> &Arc<NavigationGate> {
        &self.gate
    }

    /// Runs one command, writing its result to `out`.
    ///
    /// # Errors
    /// Returns error if the command fails or its output cannot be written.
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<(), CliError> {
        match command {
            Command::Login { username, password } => self.login(&username, &password, out).await,
            Command::Logout => {
                self.session.logout().await;
                writeln!(out, "Signed out")?;
                Ok(())
            }
            Command::Status => self.status(out),
            Command::List { resource, filters } => {
                let store = self.open(&resource, None)?;
                let query: ListQuery = filters.into_iter().collect();
                let items = store.fetch_list(&query).await?;
                print_json(out, &items)
            }
            Command::Get { resource, id } => {
                let store = self.open(&resource, Some(&id))?;
                let record = store.fetch_one(&ResourceId::parse(&id)).await?;
                print_json(out, &record)
            }
            Command::Create { resource, data } => {
                let payload: Value = serde_json::from_str(&data)?;
                let store = self.open(&resource, None)?;
                let record = store.create(&payload).await?;
                print_json(out, &record)
            }
            Command::Update {
                resource,
                id,
                data,
                partial,
            } => {
                let payload: Value = serde_json::from_str(&data)?;
                let store = self.open(&resource, Some(&id))?;
                let id = ResourceId::parse(&id);
                let record = if partial {
                    store.patch(&id, &payload).await?
                } else {
                    store.update(&id, &payload).await?
                };
                print_json(out, &record)
            }
            Command::Delete { resource, id } => {
                let store = self.open(&resource, Some(&id))?;
                store.delete(&ResourceId::parse(&id)).await?;
                writeln!(out, "Deleted {resource} {id}")?;
                Ok(())
            }
        }
    }

    async fn login<W: Write>(
        &self,
        username: &str,
        password: &str,
        out: &mut W,
    ) -> Result<(), CliError> {
        if self.gate.navigate(LOGIN_PATH) == GateDecision::RedirectHome {
            writeln!(out, "Already signed in as {}", self.display_name())?;
            return Ok(());
        }

        let outcome = self.session.login(username, password).await;
        if !outcome.success {
            return Err(CliError::LoginFailed(
                outcome.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        if let Some(destination) = self.gate.take_pending_redirect() {
            debug!(%destination, "Discarding post-login destination");
        }
        info!(username, "Signed in");
        writeln!(out, "Signed in as {}", self.display_name())?;
        Ok(())
    }

    fn status<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let status = json!({
            "authenticated": self.session.is_authenticated(),
            "user": self.session.current_user(),
            "access_expires_at": self.session.access_expires_at(),
        });
        print_json(out, &status)
    }

    fn display_name(&self) -> String {
        self.session
            .current_user()
            .map_or_else(|| "User".to_string(), |u| u.username().to_string())
    }

    /// Passes the gate for `resource` and opens an untyped store on it.
    fn open(&self, resource: &str, id: Option<&str>) -> Result<ResourceStore<Record>, CliError> {
        let endpoint = Endpoint::parse(&self.api_version, resource)
            .ok_or_else(|| CliError::InvalidResource(resource.to_string()))?;

        let location = match id {
            Some(id) => format!("/{}/{}/{id}", endpoint.module(), endpoint.collection()),
            None => format!("/{}/{}", endpoint.module(), endpoint.collection()),
        };

        match self.gate.navigate(&location) {
            GateDecision::RedirectToLogin { redirect } => Err(CliError::SignInRequired { redirect }),
            GateDecision::Proceed | GateDecision::RedirectHome => {
                Ok(ResourceStore::at(Arc::clone(&self.pipeline), endpoint))
            }
        }
    }
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
