use eframe::egui::{
    self,
    containers,
};

use crate::{
    core::AppView,
    drive::BackupState,
};

pub enum TopBarAction {
    SwitchView(AppView),
    OpenBackup,
    ToggleDarkMode(bool),
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        current: AppView,
        dark_mode: bool,
        ai_configured: bool,
        drive_state: &BackupState,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                ui.label(egui::RichText::new("LinguaSpark").strong());
                ui.separator();

                for view in AppView::ALL {
                    if ui.selectable_label(current == view, view.label()).clicked() {
                        action = Some(TopBarAction::SwitchView(view));
                    }
                }

                ui.separator();
                ui.menu_button("File", |ui| {
                    if ui.button("Cloud Backup…").clicked() {
                        action = Some(TopBarAction::OpenBackup);
                    }
                    let mut dark = dark_mode;
                    if ui.checkbox(&mut dark, "Dark mode").changed() {
                        action = Some(TopBarAction::ToggleDarkMode(dark));
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicators(ui, ai_configured, drive_state);
                });
            });
        });

        action
    }

    fn show_status_indicators(ui: &mut egui::Ui, ai_configured: bool, drive_state: &BackupState) {
        let (drive_connected, drive_tooltip) = match drive_state {
            BackupState::Uninitialized => (false, "Google Drive not set up"),
            BackupState::TokenClientReady => (false, "Google Drive ready, not signed in"),
            BackupState::AwaitingConsent => (false, "Waiting for Google sign-in"),
            BackupState::SessionExpired => (false, "Google session expired, sign in again"),
            BackupState::Authenticated | BackupState::Located(_) | BackupState::Idle => {
                (true, "Signed in to Google Drive")
            }
        };
        indicator(ui, "Drive", drive_connected, drive_tooltip);

        ui.add_space(3.0);

        let ai_tooltip =
            if ai_configured { "Gemini API key found" } else { "No Gemini API key configured" };
        indicator(ui, "AI", ai_configured, ai_tooltip);
    }
}

fn indicator(ui: &mut egui::Ui, name: &str, ok: bool, tooltip: &str) {
    let color =
        if ok { egui::Color32::from_rgb(0, 200, 0) } else { egui::Color32::from_rgb(200, 80, 80) };

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
        ui.small(name).on_hover_text(tooltip);
    });
}
