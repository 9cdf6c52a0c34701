pub mod api;
pub mod auth;
pub mod state;
pub mod types;

pub use api::DriveClient;
pub use auth::{
    PendingConsent,
    TokenClient,
};
pub use state::{
    parse_snapshot,
    BackupClient,
    BackupState,
};
pub use types::{
    AuthSession,
    Credential,
    DriveFile,
    SessionState,
};

pub const BACKUP_FILE_NAME: &str = "lingua_spark_backup_v1.json";
