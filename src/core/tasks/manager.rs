use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::{
    runtime::Runtime,
    sync::Mutex,
};
use tracing::{
    info,
    warn,
};

use super::TaskResult;
use crate::{
    core::{
        http::http_client,
        AuthError,
        BackupSnapshot,
        LinguaError,
        Settings,
        VocabularyEntry,
    },
    drive::BackupClient,
    generation::GenerationClient,
};

/// Runs network work off the UI thread. Results come back through `poll_results`.
/// Requests are never cancelled; overlapping ones complete in arrival order.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    generation: GenerationClient,
    backup: Arc<Mutex<BackupClient>>,
    open_browser: bool,
}

impl TaskManager {
    pub fn new(settings: &Settings) -> Result<Self, LinguaError> {
        let runtime = Arc::new(Runtime::new()?);
        let http = http_client()?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            runtime,
            receiver,
            sender,
            generation: GenerationClient::new(http.clone(), settings.generation.clone()),
            backup: Arc::new(Mutex::new(BackupClient::new(http, settings.drive.clone()))),
            open_browser: true,
        })
    }

    /// Leaves the consent URL to the caller instead of launching a browser.
    pub fn without_browser(mut self) -> Self {
        self.open_browser = false;
        self
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    /// Blocks until the next result arrives. Used by tests and shutdown paths.
    pub fn wait_result(&self) -> Option<TaskResult> {
        self.receiver.recv().ok()
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn generate_words(&self, topic: String, count: u32) {
        let (sender, runtime) = self.task_context();
        let generation = self.generation.clone();

        thread::spawn(move || {
            let result = runtime.block_on(generation.generate_word_list(&topic, Some(count)));
            let _ = sender.send(TaskResult::WordsGenerated(result));
        });
    }

    pub fn lookup_word(&self, term: String) {
        let (sender, runtime) = self.task_context();
        let generation = self.generation.clone();

        thread::spawn(move || {
            let result = runtime.block_on(generation.generate_word_details(&term));
            let _ = sender.send(TaskResult::WordLookedUp(result));
        });
    }

    pub fn generate_quiz(&self, entries: Vec<VocabularyEntry>) {
        let (sender, runtime) = self.task_context();
        let generation = self.generation.clone();

        thread::spawn(move || {
            let result = runtime.block_on(generation.generate_quiz(&entries));
            let _ = sender.send(TaskResult::QuizGenerated(result));
        });
    }

    pub fn init_drive(&self) {
        let (sender, runtime) = self.task_context();
        let backup = self.backup.clone();

        thread::spawn(move || {
            let state = runtime.block_on(async {
                let mut client = backup.lock().await;
                let result = client.initialize().await;
                let _ = sender.send(TaskResult::DriveReady(result));
                client.state()
            });

            let _ = sender.send(TaskResult::DriveState(state));
        });
    }

    /// Initialises if needed, then waits for the user to finish consent in the browser.
    /// The client lock is released while waiting so other drive calls are not held up.
    pub fn connect_drive(&self) {
        let (sender, runtime) = self.task_context();
        let backup = self.backup.clone();
        let open_browser = self.open_browser;

        thread::spawn(move || {
            let state = runtime.block_on(async {
                let pending = backup.lock().await.begin_login().await;

                let result = match pending {
                    Ok(pending) => {
                        let url = pending.authorize_url().to_string();
                        let _ = sender.send(TaskResult::ConsentRequired(url.clone()));
                        if open_browser {
                            if let Err(e) = open::that(&url) {
                                warn!(error = %e, "could not open browser for sign-in");
                            }
                        }

                        let token = pending.wait_for_token().await;
                        backup.lock().await.finish_login(token)
                    }
                    Err(e) => Err(e),
                };

                if let Err(AuthError::IdentityUnavailable { attempts }) = &result {
                    warn!(attempts, "Google sign-in never became available");
                }
                let _ = sender.send(TaskResult::DriveConnected(result));
                backup.lock().await.state()
            });

            let _ = sender.send(TaskResult::DriveState(state));
        });
    }

    pub fn back_up(&self, snapshot: BackupSnapshot) {
        let (sender, runtime) = self.task_context();
        let backup = self.backup.clone();

        thread::spawn(move || {
            let state = runtime.block_on(async {
                let mut client = backup.lock().await;
                let result = client.back_up(&snapshot).await;
                if let Ok(file) = &result {
                    info!(file_id = %file.id, words = snapshot.words.len(), "backup saved");
                }
                let _ = sender.send(TaskResult::BackupSaved(result));
                client.state()
            });

            let _ = sender.send(TaskResult::DriveState(state));
        });
    }

    pub fn restore(&self) {
        let (sender, runtime) = self.task_context();
        let backup = self.backup.clone();

        thread::spawn(move || {
            let _ = sender.send(TaskResult::LoadingMessage("Restoring backup...".to_string()));

            let state = runtime.block_on(async {
                let mut client = backup.lock().await;
                let result = client.restore().await;
                let _ = sender.send(TaskResult::BackupRestored(result));
                client.state()
            });

            let _ = sender.send(TaskResult::DriveState(state));
        });
    }
}
