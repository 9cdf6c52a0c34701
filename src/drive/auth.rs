use std::sync::{
    Arc,
    Mutex,
};

use base64::{
    engine::general_purpose::URL_SAFE_NO_PAD,
    Engine as _,
};
use chrono::{
    Duration,
    Utc,
};
use rand::{
    distr::Alphanumeric,
    Rng,
};
use reqwest::{
    Client,
    Url,
};
use serde::Deserialize;
use sha2::{
    Digest,
    Sha256,
};
use axum::{
    extract::{
        Query,
        State,
    },
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use tokio::{
    net::TcpListener,
    sync::oneshot,
    time::sleep,
};
use tracing::{
    debug,
    info,
    warn,
};

use super::types::Credential;
use crate::core::{
    config::DriveSettings,
    http::ensure_success,
    AuthError,
};

const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;
const VERIFIER_LEN: usize = 64;

const SUCCESS_PAGE: &str = "<html><body><h2>LinguaSpark is connected to Google Drive.</h2>\
                            <p>You can close this tab.</p></body></html>";
const FAILURE_PAGE: &str = "<html><body><h2>Sign-in was not completed.</h2>\
                            <p>Return to LinguaSpark to try again.</p></body></html>";

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEndpoints {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Ready-to-use OAuth client for an installed application.
#[derive(Clone)]
pub struct TokenClient {
    http: Client,
    endpoints: IdentityEndpoints,
    client_id: String,
    client_secret: Option<String>,
    scope: String,
}

impl TokenClient {
    /// Waits for the identity provider to answer its discovery document,
    /// giving up after `init_attempts` tries.
    pub async fn initialize(http: Client, settings: &DriveSettings) -> Result<Self, AuthError> {
        let client_id = settings
            .client_id
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or(AuthError::MissingClientId)?;

        let attempts = settings.init_attempts.max(1);
        let endpoints =
            wait_ready(&http, &settings.discovery_url, attempts, settings.init_retry_delay())
                .await?;

        info!("identity provider ready");
        Ok(Self {
            http,
            endpoints,
            client_id,
            client_secret: settings.client_secret.clone(),
            scope: settings.scope.clone(),
        })
    }

    pub fn endpoints(&self) -> &IdentityEndpoints {
        &self.endpoints
    }

    /// Starts an interactive consent request. The returned value is the point where the
    /// caller shows `authorize_url` and then awaits the redirect.
    pub async fn request_access_token(&self) -> Result<PendingConsent, AuthError> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://127.0.0.1:{port}");

        let verifier = random_token(VERIFIER_LEN);
        let state = random_token(24);
        let challenge = pkce_challenge(&verifier);

        let authorize_url = Url::parse_with_params(
            &self.endpoints.authorization_endpoint,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", self.scope.as_str()),
                ("code_challenge", challenge.as_str()),
                ("code_challenge_method", "S256"),
                ("state", state.as_str()),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| AuthError::Endpoint(e.to_string()))?
        .to_string();

        debug!(%redirect_uri, "waiting for consent redirect");
        Ok(PendingConsent {
            listener,
            authorize_url,
            redirect_uri,
            state,
            verifier,
            client: self.clone(),
        })
    }

    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
        verifier: &str,
    ) -> Result<Credential, AuthError> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("code_verifier", verifier),
        ];
        if let Some(secret) = self.client_secret.as_deref() {
            form.push(("client_secret", secret));
        }

        let resp = self.http.post(&self.endpoints.token_endpoint).form(&form).send().await?;
        let resp = ensure_success(resp)
            .await
            .map_err(|(status, body)| AuthError::TokenExchange { status, body })?;
        let token: TokenResponse = resp.json().await?;

        let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        let scope = token.scope.or_else(|| Some(self.scope.clone()));
        Ok(Credential::new(token.access_token, scope, Utc::now() + Duration::seconds(lifetime)))
    }
}

/// An outstanding consent prompt, listening on a loopback port for the redirect.
pub struct PendingConsent {
    listener: TcpListener,
    authorize_url: String,
    redirect_uri: String,
    state: String,
    verifier: String,
    client: TokenClient,
}

impl PendingConsent {
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Resolves once the provider redirects back and the code is exchanged.
    /// Connections that never carry a redirect (preconnects, favicon requests) are ignored.
    pub async fn wait_for_token(self) -> Result<Credential, AuthError> {
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let redirect = RedirectState {
            expected_state: Arc::new(self.state),
            outcome: Arc::new(Mutex::new(Some(outcome_tx))),
        };
        let router = Router::new().route("/", get(receive_redirect)).with_state(redirect);

        let server = axum::serve(self.listener, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        tokio::spawn(async move {
            if let Err(e) = server.await {
                warn!(error = %e, "redirect listener stopped");
            }
        });

        let outcome = outcome_rx
            .await
            .map_err(|_| AuthError::Redirect("redirect listener closed".to_string()));
        let _ = shutdown_tx.send(());
        let code = outcome??;

        let credential =
            self.client.exchange_code(&code, &self.redirect_uri, &self.verifier).await?;
        info!(expires_at = %credential.expires_at(), "access token received");
        Ok(credential)
    }
}

type RedirectOutcome = Result<String, AuthError>;

#[derive(Clone)]
struct RedirectState {
    expected_state: Arc<String>,
    outcome: Arc<Mutex<Option<oneshot::Sender<RedirectOutcome>>>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RedirectParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

impl RedirectParams {
    /// `None` when the request carries neither a code nor an error.
    pub(crate) fn outcome(self, expected_state: &str) -> Option<RedirectOutcome> {
        if let Some(error) = self.error {
            warn!(%error, "consent rejected");
            return Some(Err(AuthError::ConsentDenied(error)));
        }
        let code = self.code?;
        if self.state.as_deref() != Some(expected_state) {
            return Some(Err(AuthError::StateMismatch));
        }
        Some(Ok(code))
    }
}

async fn receive_redirect(
    State(redirect): State<RedirectState>,
    Query(params): Query<RedirectParams>,
) -> (StatusCode, Html<&'static str>) {
    let Some(outcome) = params.outcome(&redirect.expected_state) else {
        return (StatusCode::NOT_FOUND, Html(""));
    };

    let page = if outcome.is_ok() {
        (StatusCode::OK, Html(SUCCESS_PAGE))
    } else {
        (StatusCode::BAD_REQUEST, Html(FAILURE_PAGE))
    };
    let sender = redirect.outcome.lock().ok().and_then(|mut slot| slot.take());
    match sender {
        Some(sender) => {
            let _ = sender.send(outcome);
        }
        None => debug!("redirect received after sign-in already resolved"),
    }
    page
}

async fn wait_ready(
    http: &Client,
    discovery_url: &str,
    attempts: u32,
    delay: std::time::Duration,
) -> Result<IdentityEndpoints, AuthError> {
    for attempt in 1..=attempts {
        let result = async {
            let resp = http.get(discovery_url).send().await?.error_for_status()?;
            resp.json::<IdentityEndpoints>().await
        }
        .await;

        match result {
            Ok(endpoints) => return Ok(endpoints),
            Err(err) => {
                debug!(attempt, attempts, error = %err, "identity provider not ready");
                if attempt < attempts {
                    sleep(delay).await;
                }
            }
        }
    }

    warn!(attempts, "identity provider failed to load");
    Err(AuthError::IdentityUnavailable { attempts })
}

fn random_token(len: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

pub(crate) fn pkce_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
