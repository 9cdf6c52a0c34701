mod common;

use std::{
    collections::HashMap,
    sync::atomic::Ordering,
    time::Duration,
};

use base64::{
    engine::general_purpose::URL_SAFE_NO_PAD,
    Engine as _,
};
use common::{
    google_fakes,
    GOOD_CODE,
    TEST_CLIENT_ID,
};
use linguaspark::{
    core::{
        AuthError,
        BackupSnapshot,
    },
    drive::{
        BackupClient,
        BackupState,
        TokenClient,
    },
};
use reqwest::Url;
use sha2::{
    Digest,
    Sha256,
};
use tokio::net::TcpStream;

fn query_of(url: &str) -> HashMap<String, String> {
    Url::parse(url).unwrap().query_pairs().into_owned().collect()
}

/// Plays the browser: follows the consent URL straight back to the loopback redirect.
fn approve_with(code: &'static str) -> impl FnOnce(&str) {
    move |authorize_url: &str| {
        let params = query_of(authorize_url);
        let redirect = format!(
            "{}/?code={}&state={}",
            params["redirect_uri"],
            urlencode(code),
            params["state"]
        );
        tokio::spawn(async move {
            let _ = reqwest::get(redirect).await;
        });
    }
}

fn urlencode(value: &str) -> String {
    value.replace('/', "%2F")
}

#[tokio::test]
async fn initialize_retries_until_provider_is_ready() {
    let (base, drive, oauth) = google_fakes().await;
    oauth.fail_discovery(2);

    let client = TokenClient::initialize(reqwest::Client::new(), &drive.settings(&base))
        .await
        .unwrap();

    assert_eq!(oauth.discovery_hits.load(Ordering::SeqCst), 3);
    assert_eq!(client.endpoints().token_endpoint, format!("{base}/token"));
}

#[tokio::test]
async fn initialize_gives_up_after_configured_attempts() {
    let (base, drive, oauth) = google_fakes().await;
    oauth.fail_discovery(10);

    let mut backup = BackupClient::new(reqwest::Client::new(), drive.settings(&base));
    let err = backup.initialize().await.unwrap_err();

    assert!(matches!(err, AuthError::IdentityUnavailable { attempts: 3 }));
    assert_eq!(oauth.discovery_hits.load(Ordering::SeqCst), 3);
    assert_eq!(backup.state(), BackupState::Uninitialized);
}

#[tokio::test]
async fn consent_url_carries_pkce_and_state() {
    let (base, drive, _oauth) = google_fakes().await;
    let client = TokenClient::initialize(reqwest::Client::new(), &drive.settings(&base))
        .await
        .unwrap();

    let pending = client.request_access_token().await.unwrap();
    let params = query_of(pending.authorize_url());

    assert!(pending.authorize_url().starts_with(&format!("{base}/authorize?")));
    assert_eq!(params["client_id"], TEST_CLIENT_ID);
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["code_challenge_method"], "S256");
    assert_eq!(params["scope"], "https://www.googleapis.com/auth/drive.file");
    assert_eq!(params["redirect_uri"], pending.redirect_uri());
    assert!(pending.redirect_uri().starts_with("http://127.0.0.1:"));
    assert!(!params["state"].is_empty());
}

#[tokio::test]
async fn login_exchanges_code_and_enables_backup() {
    let (base, drive, oauth) = google_fakes().await;
    let mut backup = BackupClient::new(reqwest::Client::new(), drive.settings(&base));

    let mut consent_url = String::new();
    let approve = approve_with(GOOD_CODE);
    backup
        .login(|url| {
            consent_url = url.to_string();
            approve(url);
        })
        .await
        .unwrap();

    assert_eq!(backup.state(), BackupState::Authenticated);

    let params = query_of(&consent_url);
    let form = oauth.token_requests.lock().unwrap()[0].clone();
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["code"], GOOD_CODE);
    assert_eq!(form["client_id"], TEST_CLIENT_ID);
    assert_eq!(form["redirect_uri"], params["redirect_uri"]);
    assert!(!form.contains_key("client_secret"));
    let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(form["code_verifier"].as_bytes()));
    assert_eq!(challenge, params["code_challenge"]);

    backup.back_up(&BackupSnapshot::new(vec![], None, vec![])).await.unwrap();
    assert_eq!(drive.file_count(), 1);
}

#[tokio::test]
async fn rejected_code_leaves_client_signed_out() {
    let (base, drive, _oauth) = google_fakes().await;
    let mut backup = BackupClient::new(reqwest::Client::new(), drive.settings(&base));

    let err = backup.login(approve_with("4/bad-code")).await.unwrap_err();

    assert!(matches!(err, AuthError::TokenExchange { status: 400, .. }));
    assert_eq!(backup.state(), BackupState::TokenClientReady);
}

#[tokio::test]
async fn stray_connections_do_not_abort_login() {
    let (base, drive, _oauth) = google_fakes().await;
    let mut backup = BackupClient::new(reqwest::Client::new(), drive.settings(&base));

    let login = backup.login(|authorize_url| {
        let params = query_of(authorize_url);
        let redirect_uri = params["redirect_uri"].clone();
        let redirect = format!(
            "{redirect_uri}/?code={}&state={}",
            urlencode(GOOD_CODE),
            params["state"]
        );
        tokio::spawn(async move {
            // Browser preconnect: open a socket and close it without a request
            let addr = redirect_uri.trim_start_matches("http://").to_string();
            drop(TcpStream::connect(&addr).await.unwrap());

            let favicon = reqwest::get(format!("{redirect_uri}/favicon.ico")).await.unwrap();
            assert_eq!(favicon.status(), reqwest::StatusCode::NOT_FOUND);
            let unrelated = reqwest::get(format!("{redirect_uri}/?authuser=0")).await.unwrap();
            assert_eq!(unrelated.status(), reqwest::StatusCode::NOT_FOUND);

            tokio::time::sleep(Duration::from_millis(100)).await;
            let page = reqwest::get(redirect).await.unwrap();
            assert!(page.status().is_success());
        });
    });
    tokio::time::timeout(Duration::from_secs(10), login).await.expect("login timed out").unwrap();

    assert_eq!(backup.state(), BackupState::Authenticated);
}
