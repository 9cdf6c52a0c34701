#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{
            AtomicU32,
            Ordering,
        },
        Arc,
        Mutex,
    },
};

use axum::{
    extract::{
        Multipart,
        Path,
        Query,
        State,
    },
    http::{
        header,
        HeaderMap,
        StatusCode,
    },
    response::{
        IntoResponse,
        Response,
    },
    routing::{
        get,
        patch,
        post,
    },
    Form,
    Json,
    Router,
};
use linguaspark::core::config::{
    DriveSettings,
    GenerationSettings,
};
use serde_json::{
    json,
    Value,
};
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_API_KEY: &str = "test-key";
pub const TEST_CLIENT_ID: &str = "test-client.apps.googleusercontent.com";
pub const GOOD_CODE: &str = "4/good-code";

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Gemini

#[derive(Clone, Default)]
pub struct GeminiFake {
    reply: Arc<Mutex<(u16, String)>>,
    pub requests: Arc<Mutex<Vec<(String, Value)>>>, // (path, body)
    pub api_keys: Arc<Mutex<Vec<String>>>,
}

impl GeminiFake {
    /// Answers every request with `text` as the first candidate's only part.
    pub fn reply_with(&self, text: impl Into<String>) {
        *self.reply.lock().unwrap() = (200, text.into());
    }

    pub fn fail_with(&self, status: u16, body: impl Into<String>) {
        *self.reply.lock().unwrap() = (status, body.into());
    }

    pub fn last_request(&self) -> Option<(String, Value)> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn router(&self) -> Router {
        Router::new().route("/v1beta/models/*rest", post(gemini_generate)).with_state(self.clone())
    }

    pub fn settings(&self, base: &str) -> GenerationSettings {
        GenerationSettings {
            api_key: Some(TEST_API_KEY.to_string()),
            model: "gemini-test".to_string(),
            api_base: format!("{base}/v1beta"),
            ..GenerationSettings::default()
        }
    }
}

async fn gemini_generate(
    State(fake): State<GeminiFake>,
    Path(rest): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(key) = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
        fake.api_keys.lock().unwrap().push(key.to_string());
    }
    fake.requests.lock().unwrap().push((rest, body));

    let (status, text) = fake.reply.lock().unwrap().clone();
    if status != 200 {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, text).into_response();
    }

    Json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}

// ---------------------------------------------------------------------------
// Drive

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub name: String,
    pub content: String,
    pub modified_time: String,
}

#[derive(Clone, Default)]
pub struct DriveFake {
    pub files: Arc<Mutex<HashMap<String, StoredFile>>>,
    pub creates: Arc<AtomicU32>,
    pub replaces: Arc<AtomicU32>,
    pub queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    next_id: Arc<AtomicU32>,
}

impl DriveFake {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/drive/v3/files", get(drive_list))
            .route("/drive/v3/files/:id", get(drive_get))
            .route("/upload/drive/v3/files", post(drive_create))
            .route("/upload/drive/v3/files/:id", patch(drive_replace))
            .with_state(self.clone())
    }

    pub fn settings(&self, base: &str) -> DriveSettings {
        DriveSettings {
            client_id: Some(TEST_CLIENT_ID.to_string()),
            api_base: format!("{base}/drive/v3"),
            upload_base: format!("{base}/upload/drive/v3"),
            discovery_url: format!("{base}/.well-known/openid-configuration"),
            init_attempts: 3,
            init_retry_ms: 10,
            ..DriveSettings::default()
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn content_of(&self, id: &str) -> Option<String> {
        self.files.lock().unwrap().get(id).map(|f| f.content.clone())
    }

    fn touch(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("2024-05-01T10:00:{:02}.000Z", n % 60)
    }
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {TEST_TOKEN}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "code": 401, "message": "Invalid Credentials" } })),
        )
            .into_response()),
    }
}

fn file_json(id: &str, file: &StoredFile) -> Value {
    json!({ "id": id, "name": file.name, "modifiedTime": file.modified_time })
}

async fn drive_list(
    State(fake): State<DriveFake>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let q = query.get("q").cloned().unwrap_or_default();
    fake.queries.lock().unwrap().push(query);

    let files = fake.files.lock().unwrap();
    let mut matches: Vec<Value> = files
        .iter()
        .filter(|(_, f)| q.contains(&format!("name = '{}'", f.name)))
        .map(|(id, f)| file_json(id, f))
        .collect();
    matches.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));

    Json(json!({ "files": matches })).into_response()
}

async fn drive_get(
    State(fake): State<DriveFake>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    if query.get("alt").map(String::as_str) != Some("media") {
        return (StatusCode::BAD_REQUEST, "alt=media required").into_response();
    }
    match fake.files.lock().unwrap().get(&id) {
        Some(file) => {
            ([(header::CONTENT_TYPE, "application/json")], file.content.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "File not found").into_response(),
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<(String, String), Response> {
    let mut name = None;
    let mut content = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let text = field.text().await.unwrap_or_default();
        match field_name.as_str() {
            "metadata" => {
                let meta: Value = serde_json::from_str(&text).unwrap_or_default();
                name = meta["name"].as_str().map(str::to_string);
            }
            "file" => content = Some(text),
            _ => {}
        }
    }
    match (name, content) {
        (Some(name), Some(content)) => Ok((name, content)),
        _ => Err((StatusCode::BAD_REQUEST, "metadata and file parts required").into_response()),
    }
}

async fn drive_create(
    State(fake): State<DriveFake>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    mut multipart: Multipart,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    if query.get("uploadType").map(String::as_str) != Some("multipart") {
        return (StatusCode::BAD_REQUEST, "uploadType=multipart required").into_response();
    }
    let (name, content) = match read_upload(&mut multipart).await {
        Ok(parts) => parts,
        Err(rejected) => return rejected,
    };

    fake.creates.fetch_add(1, Ordering::SeqCst);
    let id = format!("file-{}", fake.creates.load(Ordering::SeqCst));
    let file = StoredFile { name, content, modified_time: fake.touch() };
    let body = file_json(&id, &file);
    fake.files.lock().unwrap().insert(id, file);
    Json(body).into_response()
}

async fn drive_replace(
    State(fake): State<DriveFake>,
    headers: HeaderMap,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let (name, content) = match read_upload(&mut multipart).await {
        Ok(parts) => parts,
        Err(rejected) => return rejected,
    };
    if !fake.files.lock().unwrap().contains_key(&id) {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    fake.replaces.fetch_add(1, Ordering::SeqCst);
    let file = StoredFile { name, content, modified_time: fake.touch() };
    let body = file_json(&id, &file);
    fake.files.lock().unwrap().insert(id, file);
    Json(body).into_response()
}

// ---------------------------------------------------------------------------
// OAuth

#[derive(Clone, Default)]
pub struct OAuthFake {
    base: Arc<Mutex<String>>,
    failures_left: Arc<AtomicU32>,
    pub discovery_hits: Arc<AtomicU32>,
    pub token_requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl OAuthFake {
    /// The discovery document answers 503 for the first `n` requests.
    pub fn fail_discovery(&self, n: u32) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    pub fn set_base(&self, base: &str) {
        *self.base.lock().unwrap() = base.to_string();
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/.well-known/openid-configuration", get(discovery))
            .route("/token", post(token))
            .with_state(self.clone())
    }
}

async fn discovery(State(fake): State<OAuthFake>) -> Response {
    fake.discovery_hits.fetch_add(1, Ordering::SeqCst);
    let left = fake.failures_left.load(Ordering::SeqCst);
    if left > 0 {
        fake.failures_left.store(left - 1, Ordering::SeqCst);
        return (StatusCode::SERVICE_UNAVAILABLE, "warming up").into_response();
    }

    let base = fake.base.lock().unwrap().clone();
    Json(json!({
        "issuer": "https://accounts.example.test",
        "authorization_endpoint": format!("{base}/authorize"),
        "token_endpoint": format!("{base}/token"),
    }))
    .into_response()
}

async fn token(
    State(fake): State<OAuthFake>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let code_ok = form.get("code").map(String::as_str) == Some(GOOD_CODE);
    let grant_ok = form.get("grant_type").map(String::as_str) == Some("authorization_code");
    fake.token_requests.lock().unwrap().push(form);

    if !(code_ok && grant_ok) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "invalid_grant" })))
            .into_response();
    }
    Json(json!({
        "access_token": TEST_TOKEN,
        "expires_in": 3599,
        "scope": "https://www.googleapis.com/auth/drive.file",
        "token_type": "Bearer"
    }))
    .into_response()
}

/// One server carrying the Drive and OAuth fakes.
pub async fn google_fakes() -> (String, DriveFake, OAuthFake) {
    let drive = DriveFake::default();
    let oauth = OAuthFake::default();
    let base = serve(drive.router().merge(oauth.router())).await;
    oauth.set_base(&base);
    (base, drive, oauth)
}
