use eframe::egui;
use tracing::{
    debug,
    error,
    info,
    warn,
};

use super::{
    backup_panel::{
        BackupAction,
        BackupPanel,
    },
    dashboard::dashboard_view,
    error_modal::ErrorModal,
    flashcards::flashcard_view,
    generator::generator_view,
    message_overlay::MessageOverlay,
    quiz::{
        quiz_view,
        QuizAction,
    },
    theme::{
        apply_dark_mode,
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
    word_list::word_list_view,
};
use crate::{
    core::{
        stats,
        tasks::{
            TaskManager,
            TaskResult,
        },
        AppView,
        BackupSnapshot,
        GenerationError,
        LinguaError,
        Settings,
        StatsTracker,
        StorageError,
        VocabularyEntry,
        WordCollection,
    },
    drive::BackupState,
    persistence::JsonStore,
    speech::Speaker,
    views::{
        CardEvent,
        DashboardSummary,
        FlashcardSession,
        GenerateRequest,
        GeneratorForm,
        ListAction,
        QuizSession,
    },
};

/// System fonts that cover the CJK definition languages, tried in order.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:\\Windows\\Fonts\\msjh.ttc",
];

pub struct LinguaApp {
    store: JsonStore,
    settings: Settings,

    // Owned data, views only read it and report changes back
    collection: WordCollection,
    stats: StatsTracker,

    // UI State
    view: AppView,
    theme: Theme,
    flashcards: FlashcardSession,
    quiz: Option<QuizSession>,
    generator: GeneratorForm,
    backup_panel: BackupPanel,
    drive_state: BackupState,
    message_overlay: MessageOverlay,
    error_modal: ErrorModal,

    speaker: Speaker,
    task_manager: TaskManager,
}

impl LinguaApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: JsonStore,
        settings: Settings,
    ) -> Result<Self, LinguaError> {
        let task_manager = TaskManager::new(&settings)?;
        if settings.drive_configured() {
            task_manager.init_drive();
        }

        let collection = WordCollection::load(&store);
        let stats = StatsTracker::load(&store);
        info!(words = collection.len(), "collection loaded");

        let theme = Theme::spark();
        setup_fonts(&cc.egui_ctx);
        set_theme(&cc.egui_ctx, &theme);
        apply_dark_mode(&cc.egui_ctx, settings.dark_mode);

        Ok(Self {
            generator: GeneratorForm::new(settings.generation.default_word_count),
            speaker: Speaker::new(&settings.generation.study_language),
            store,
            settings,
            collection,
            stats,
            view: AppView::default(),
            theme,
            flashcards: FlashcardSession::new(),
            quiz: None,
            backup_panel: BackupPanel::default(),
            drive_state: BackupState::Uninitialized,
            message_overlay: MessageOverlay::default(),
            error_modal: ErrorModal::new(),
            task_manager,
        })
    }
}

impl eframe::App for LinguaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        if let Some(action) = TopBar::show(
            ctx,
            self.view,
            self.settings.dark_mode,
            self.settings.generation_configured(),
            &self.drive_state,
        ) {
            match action {
                TopBarAction::SwitchView(view) => self.switch_view(view),
                TopBarAction::OpenBackup => self.backup_panel.open(),
                TopBarAction::ToggleDarkMode(dark_mode) => {
                    self.settings.dark_mode = dark_mode;
                    apply_dark_mode(ctx, dark_mode);
                    self.save_settings();
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().id_salt("main_scroll").show(ui, |ui| {
                ui.add_space(12.0);
                self.show_view(ui);
            });
        });

        if let Some(action) = self.backup_panel.show(
            ctx,
            &self.theme,
            &self.drive_state,
            self.settings.drive_configured(),
        ) {
            self.handle_backup_action(action);
        }

        self.message_overlay.show(ctx);
        self.error_modal.show(ctx);

        // Background results arrive without input events
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

impl LinguaApp {
    fn show_view(&mut self, ui: &mut egui::Ui) {
        match self.view {
            AppView::Dashboard => {
                let summary = DashboardSummary::build(
                    self.collection.entries(),
                    &self.stats,
                    stats::today(),
                );
                if let Some(view) = dashboard_view(ui, &self.theme, &summary) {
                    self.switch_view(view);
                }
            }
            AppView::Study => {
                if let Some(event) = flashcard_view(
                    ui,
                    &self.theme,
                    &mut self.flashcards,
                    self.collection.entries(),
                    self.speaker.is_available(),
                ) {
                    self.handle_card_event(event);
                }
            }
            AppView::Quiz => {
                let Some(session) = self.quiz.as_mut() else {
                    self.start_quiz();
                    return;
                };
                match quiz_view(ui, &self.theme, session) {
                    Some(QuizAction::Finished(outcome)) => {
                        info!(score = outcome.score, total = outcome.total, "quiz finished");
                        self.stats.record_quiz(stats::today(), outcome.score, outcome.total);
                        self.save_stats();
                    }
                    Some(QuizAction::Restart) => self.start_quiz(),
                    None => {}
                }
            }
            AppView::List => {
                if let Some(action) = word_list_view(
                    ui,
                    &self.theme,
                    self.collection.entries(),
                    self.speaker.is_available(),
                ) {
                    self.handle_list_action(action);
                }
            }
            AppView::Generate => {
                if let Some(request) = generator_view(ui, &self.theme, &mut self.generator) {
                    self.handle_generate_request(request);
                }
            }
        }
    }

    fn switch_view(&mut self, view: AppView) {
        if view == self.view {
            return;
        }
        self.view = view;
        match view {
            AppView::Quiz => self.start_quiz(),
            AppView::Study => self.flashcards = FlashcardSession::new(),
            _ => {}
        }
    }

    fn start_quiz(&mut self) {
        let session = QuizSession::start(self.collection.entries());
        if session.needs_questions() {
            self.task_manager.generate_quiz(self.collection.entries().to_vec());
        }
        self.quiz = Some(session);
    }

    fn handle_card_event(&mut self, event: CardEvent) {
        match event {
            CardEvent::Reviewed(_) => {
                self.stats.record_review(stats::today());
                self.save_stats();
            }
            CardEvent::Learned(id) => self.toggle_learned(&id),
            CardEvent::Speak(term) => self.speaker.speak(&term),
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Delete(id) => {
                if let Some(entry) = self.collection.delete(&id) {
                    info!(term = %entry.term, "word deleted");
                    self.save_words();
                }
            }
            ListAction::ToggleLearned(id) => self.toggle_learned(&id),
            ListAction::Speak(term) => self.speaker.speak(&term),
        }
    }

    fn toggle_learned(&mut self, id: &str) {
        let Some(learned) = self.collection.toggle_learned(id) else {
            return;
        };
        if learned {
            self.stats.record_learned(stats::today());
        } else {
            self.stats.record_unlearned(stats::today());
        }
        self.save_words();
        self.save_stats();
    }

    fn handle_generate_request(&mut self, request: GenerateRequest) {
        match request {
            GenerateRequest::Topic { topic, count } => {
                self.task_manager.generate_words(topic, count)
            }
            GenerateRequest::Word { term } => self.task_manager.lookup_word(term),
        }
    }

    fn add_words(&mut self, result: Result<Vec<VocabularyEntry>, GenerationError>) {
        self.generator.finish(&result);
        if let Ok(words) = result {
            let added = self.collection.add(words);
            info!(added, total = self.collection.len(), "words added");
            self.save_words();
            self.view = AppView::List;
        }
    }

    fn handle_backup_action(&mut self, action: BackupAction) {
        match action {
            BackupAction::Connect => self.task_manager.connect_drive(),
            BackupAction::BackUp => {
                let snapshot = BackupSnapshot::new(
                    self.collection.entries().to_vec(),
                    Some(self.stats.lifetime.clone()),
                    self.stats.daily.clone(),
                );
                self.task_manager.back_up(snapshot);
            }
            BackupAction::Restore => self.task_manager.restore(),
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        debug!(task = result.task_type(), "task result received");
        match result {
            TaskResult::WordsGenerated(result) => self.add_words(result),
            TaskResult::WordLookedUp(result) => self.add_words(result.map(|word| vec![word])),
            TaskResult::QuizGenerated(result) => {
                if let Some(session) = self.quiz.as_mut() {
                    session.on_questions(result);
                }
            }

            TaskResult::DriveReady(result) => {
                if let Err(e) = result {
                    warn!(error = %e, "Google Drive unavailable");
                }
            }
            TaskResult::ConsentRequired(url) => self.backup_panel.set_consent_url(Some(url)),
            TaskResult::DriveConnected(result) => {
                self.backup_panel.set_consent_url(None);
                match result {
                    Ok(()) => self.backup_panel.report(true, "Connected to Google Drive."),
                    Err(e) => self.backup_panel.report(false, e.to_string()),
                }
            }
            TaskResult::BackupSaved(result) => match result {
                Ok(_) => self.backup_panel.report(
                    true,
                    format!("Backed up {} words.", self.collection.len()),
                ),
                Err(e) => self.backup_panel.report(false, e.to_string()),
            },
            TaskResult::BackupRestored(result) => {
                self.message_overlay.clear_message();
                match apply_restore(&mut self.collection, &mut self.stats, result) {
                    Ok(Some(count)) => self.after_restore(count),
                    Ok(None) => self.backup_panel.report(false, "No backup found in your Drive."),
                    Err(e) => {
                        self.backup_panel.report(false, "Restore failed.");
                        self.error_modal.show_error(
                            "Restore Error",
                            "The backup could not be restored. Your local words were not changed.",
                            Some(e.to_string()),
                        );
                    }
                }
            }
            TaskResult::DriveState(state) => self.drive_state = state,

            TaskResult::LoadingMessage(message) => self.message_overlay.set_message(message),
        }
    }

    fn after_restore(&mut self, count: usize) {
        self.flashcards = FlashcardSession::new();
        self.quiz = None;
        if self.view == AppView::Quiz {
            self.start_quiz();
        }

        self.save_words();
        self.save_stats();
        info!(words = count, "backup restored");
        self.backup_panel.report(true, format!("Restored {count} words."));
    }

    fn save_words(&mut self) {
        if let Err(e) = self.collection.save(&self.store) {
            error!(error = %e, "failed to save words");
            self.error_modal.show_error(
                "Save Error",
                "Your word list could not be saved.",
                Some(e.to_string()),
            );
        }
    }

    fn save_stats(&self) {
        if let Err(e) = self.stats.save(&self.store) {
            error!(error = %e, "failed to save stats");
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.store) {
            error!(error = %e, "failed to save settings");
        }
    }
}

/// Local words and stats are replaced only when a snapshot arrived.
/// Returns the number of restored words.
fn apply_restore(
    collection: &mut WordCollection,
    stats: &mut StatsTracker,
    result: Result<Option<BackupSnapshot>, StorageError>,
) -> Result<Option<usize>, StorageError> {
    let Some(snapshot) = result? else {
        return Ok(None);
    };
    let count = snapshot.words.len();
    collection.replace_all(snapshot.words);
    stats.restore(snapshot.stats, snapshot.daily_stats);
    Ok(Some(count))
}

fn setup_fonts(ctx: &egui::Context) {
    let Some((path, bytes)) =
        CJK_FONT_CANDIDATES.iter().find_map(|path| std::fs::read(path).ok().map(|b| (path, b)))
    else {
        warn!("no CJK font found, definitions may not render");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), std::sync::Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
    info!(path = *path, "loaded CJK font");
}
