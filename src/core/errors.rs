use thiserror::Error;

/// Which generation round-trip failed. Each one surfaces a single fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOperation {
    WordList,
    WordDetails,
    Quiz,
}

impl GenerationOperation {
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationOperation::WordList => "Failed to generate words. Please try again.",
            GenerationOperation::WordDetails => {
                "Failed to find word details. Please check the spelling."
            }
            GenerationOperation::Quiz => "Failed to generate quiz.",
        }
    }
}

#[derive(Error, Debug)]
pub enum GenerationCause {
    #[error("generation API key is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("response contained no text payload")]
    EmptyResponse,

    #[error("response is not valid JSON for the requested schema: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response failed validation: {0}")]
    Invalid(String),
}

/// Opaque "generation failed" condition. The cause is kept for logs only.
#[derive(Error, Debug)]
#[error("{}", .operation.user_message())]
pub struct GenerationError {
    pub operation: GenerationOperation,
    #[source]
    pub cause: GenerationCause,
}

impl GenerationError {
    pub fn new(operation: GenerationOperation, cause: impl Into<GenerationCause>) -> Self {
        Self { operation, cause: cause.into() }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("identity provider did not become ready after {attempts} attempts")]
    IdentityUnavailable { attempts: u32 },

    #[error("Google service not initialized")]
    NotInitialized,

    #[error("OAuth client id is not configured")]
    MissingClientId,

    #[error("consent was denied: {0}")]
    ConsentDenied(String),

    #[error("OAuth state parameter did not match")]
    StateMismatch,

    #[error("invalid redirect: {0}")]
    Redirect(String),

    #[error("invalid identity endpoint: {0}")]
    Endpoint(String),

    #[error("token exchange failed with HTTP {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No access token available")]
    NotAuthenticated,

    #[error("Access token expired, please sign in again")]
    TokenExpired,

    #[error("Drive API Error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backup file is not a valid snapshot: {0}")]
    InvalidSnapshot(String),
}

#[derive(Error, Debug)]
pub enum LinguaError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LinguaError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LinguaError {
    fn from(error: std::io::Error) -> Self {
        LinguaError::Io(Box::new(error))
    }
}
