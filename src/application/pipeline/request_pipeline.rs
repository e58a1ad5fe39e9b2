//! Credential-attaching request pipeline with renew-and-replay on 401.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::application::session::CredentialStore;
use crate::domain::entities::AccessToken;
use crate::domain::errors::ApiError;
use crate::domain::ports::{ApiRequest, ApiResponse, HttpTransport, NavigationPort};

const AUTHORIZATION: &str = "Authorization";

/// Renewals one request may trigger before a 401 is final.
const MAX_RENEWALS_PER_REQUEST: u8 = 1;

/// A caller's request together with how many renewals it has triggered.
#[derive(Debug, Clone)]
pub struct TrackedRequest {
    request: ApiRequest,
    renewals: u8,
}

impl TrackedRequest {
    /// Wraps a fresh request.
    #[must_use]
    pub const fn new(request: ApiRequest) -> Self {
        Self {
            request,
            renewals: 0,
        }
    }

    /// Returns the caller's request, without credentials.
    #[must_use]
    pub const fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Returns whether this request already went through a renewal.
    #[must_use]
    pub const fn is_retried(&self) -> bool {
        self.renewals > 0
    }

    const fn can_renew(&self) -> bool {
        self.renewals < MAX_RENEWALS_PER_REQUEST
    }

    fn retried(mut self) -> Self {
        self.renewals += 1;
        self
    }
}

enum Inbound {
    Done(Result<ApiResponse, ApiError>),
    Replay(TrackedRequest),
}

/// Every resource call passes through here.
///
/// The outbound stage attaches the session's bearer credential; the inbound
/// stage turns a first 401 into one shared renewal and one replay, and
/// escalates a failed renewal to a redirect to the login entry point.
pub struct RequestPipeline {
    transport: Arc<dyn HttpTransport>,
    session: Arc<CredentialStore>,
    navigator: Arc<dyn NavigationPort>,
}

impl RequestPipeline {
    /// Creates new pipeline.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: Arc<CredentialStore>,
        navigator: Arc<dyn NavigationPort>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    /// Returns the session this pipeline reads credentials from.
    #[must_use]
    pub const fn session(&self) -> &Arc<CredentialStore> {
        &self.session
    }

    /// Sends `request`, renewing and replaying it once on 401.
    ///
    /// # Errors
    /// Returns the transport failure or the classified error of the final response.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut tracked = TrackedRequest::new(request);

        loop {
            let (wire, credential) = self.outbound(&tracked);

            debug!(
                method = %wire.method,
                path = %wire.path,
                retried = tracked.is_retried(),
                authenticated = credential.is_some(),
                "Sending request"
            );

            let outcome = match self.transport.send(&wire).await {
                Ok(response) => response.error_for_status(),
                Err(e) => Err(e),
            };

            match self.inbound(tracked, credential, outcome).await {
                Inbound::Done(result) => return result,
                Inbound::Replay(next) => tracked = next,
            }
        }
    }

    /// Sends `request` and decodes the JSON response body.
    ///
    /// # Errors
    /// Returns error if the call fails or the body does not match `T`.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.execute(request).await?.json()
    }

    fn outbound(&self, tracked: &TrackedRequest) -> (ApiRequest, Option<AccessToken>) {
        let credential = self.session.access_token();
        let wire = match &credential {
            Some(token) => tracked.request().clone().with_header(AUTHORIZATION, token.bearer()),
            None => tracked.request().clone(),
        };
        (wire, credential)
    }

    async fn inbound(
        &self,
        tracked: TrackedRequest,
        credential: Option<AccessToken>,
        outcome: Result<ApiResponse, ApiError>,
    ) -> Inbound {
        match outcome {
            Err(err) if err.is_unauthorized() && tracked.can_renew() => {
                let tracked = tracked.retried();
                debug!(path = %tracked.request().path, "Unauthorized, renewing credential");

                if self.session.renew_shared(credential.as_ref()).await {
                    Inbound::Replay(tracked)
                } else {
                    let return_to = self.navigator.current_location();
                    warn!(return_to = ?return_to, "Session lost, redirecting to login");
                    self.navigator.redirect_to_login(return_to);
                    Inbound::Done(Err(err))
                }
            }
            Err(err) => {
                if err.is_unauthorized() {
                    debug!(path = %tracked.request().path, "Unauthorized after renewal, giving up");
                }
                Inbound::Done(Err(err))
            }
            Ok(response) => Inbound::Done(Ok(response)),
        }
    }
}
