use crate::{
    core::{
        AuthError,
        BackupSnapshot,
        GenerationError,
        QuizQuestion,
        StorageError,
        VocabularyEntry,
    },
    drive::{
        BackupState,
        DriveFile,
    },
};

#[derive(Debug)]
pub enum TaskResult {
    WordsGenerated(Result<Vec<VocabularyEntry>, GenerationError>),
    WordLookedUp(Result<VocabularyEntry, GenerationError>),
    QuizGenerated(Result<Vec<QuizQuestion>, GenerationError>),

    DriveReady(Result<(), AuthError>),
    ConsentRequired(String),
    DriveConnected(Result<(), AuthError>),
    BackupSaved(Result<DriveFile, StorageError>),
    BackupRestored(Result<Option<BackupSnapshot>, StorageError>),
    DriveState(BackupState),

    LoadingMessage(String),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::WordsGenerated(_) => "words_generated",
            TaskResult::WordLookedUp(_) => "word_looked_up",
            TaskResult::QuizGenerated(_) => "quiz_generated",
            TaskResult::DriveReady(_) => "drive_ready",
            TaskResult::ConsentRequired(_) => "consent_required",
            TaskResult::DriveConnected(_) => "drive_connected",
            TaskResult::BackupSaved(_) => "backup_saved",
            TaskResult::BackupRestored(_) => "backup_restored",
            TaskResult::DriveState(_) => "drive_state",
            TaskResult::LoadingMessage(_) => "loading_message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_types_name_the_operation() {
        assert_eq!(TaskResult::ConsentRequired(String::new()).task_type(), "consent_required");
        assert_eq!(
            TaskResult::BackupRestored(Err(StorageError::TokenExpired)).task_type(),
            "backup_restored"
        );
        assert_eq!(
            TaskResult::DriveState(BackupState::Uninitialized).task_type(),
            "drive_state"
        );
    }
}
