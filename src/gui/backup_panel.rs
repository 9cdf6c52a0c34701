use eframe::egui;

use super::theme::Theme;
use crate::drive::BackupState;

pub enum BackupAction {
    Connect,
    BackUp,
    Restore,
}

#[derive(Default)]
pub struct BackupPanel {
    pub open: bool,
    busy: bool,
    consent_url: Option<String>,
    status: Option<(bool, String)>,
}

impl BackupPanel {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn set_consent_url(&mut self, url: Option<String>) {
        self.consent_url = url;
    }

    pub fn report(&mut self, ok: bool, message: impl Into<String>) {
        self.busy = false;
        self.status = Some((ok, message.into()));
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: &Theme,
        state: &BackupState,
        configured: bool,
    ) -> Option<BackupAction> {
        let mut action = None;
        let mut open = self.open;

        egui::Window::new("Cloud Backup")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                if !configured {
                    ui.label(theme.muted(
                        ui.ctx(),
                        "Set LINGUASPARK_GOOGLE_CLIENT_ID to enable Google Drive backup.",
                    ));
                    return;
                }

                ui.label(status_line(state));
                if let BackupState::Located(file) = state {
                    if let Some(modified) = &file.modified_time {
                        ui.label(theme.muted(ui.ctx(), &format!("Last backup: {modified}")));
                    }
                }

                if let (BackupState::AwaitingConsent, Some(url)) = (state, &self.consent_url) {
                    ui.add_space(6.0);
                    ui.label("Finish signing in from your browser.");
                    ui.hyperlink_to("Open the Google sign-in page", url);
                }

                ui.add_space(10.0);
                let signed_in = matches!(
                    state,
                    BackupState::Authenticated | BackupState::Located(_) | BackupState::Idle
                );

                ui.horizontal(|ui| {
                    if !signed_in {
                        let enabled = !self.busy && *state != BackupState::AwaitingConsent;
                        if ui.add_enabled(enabled, egui::Button::new("Connect Google Drive")).clicked() {
                            action = Some(BackupAction::Connect);
                        }
                    } else {
                        if ui.add_enabled(!self.busy, egui::Button::new("Back up now")).clicked() {
                            action = Some(BackupAction::BackUp);
                        }
                        if ui.add_enabled(!self.busy, egui::Button::new("Restore")).clicked() {
                            action = Some(BackupAction::Restore);
                        }
                    }
                    if self.busy {
                        ui.spinner();
                    }
                });

                if let Some((ok, message)) = &self.status {
                    ui.add_space(6.0);
                    let color = if *ok { theme.green(ui.ctx()) } else { theme.red(ui.ctx()) };
                    ui.colored_label(color, message);
                }
            });

        self.open = open;
        if action.is_some() {
            self.busy = true;
            self.status = None;
        }
        action
    }
}

fn status_line(state: &BackupState) -> &'static str {
    match state {
        BackupState::Uninitialized => "Not connected.",
        BackupState::TokenClientReady => "Google sign-in is ready.",
        BackupState::AwaitingConsent => "Waiting for sign-in...",
        BackupState::Authenticated => "Connected to Google Drive.",
        BackupState::Located(_) => "Connected. A backup exists in your Drive.",
        BackupState::Idle => "Connected. Backup is up to date with the last transfer.",
        BackupState::SessionExpired => "Your Google session expired. Connect again.",
    }
}
