use eframe::egui;

use super::theme::Theme;
use crate::{
    core::VocabularyEntry,
    views::{
        word_list::{
            self,
            EMPTY_MESSAGE,
        },
        ListAction,
    },
};

pub fn word_list_view(
    ui: &mut egui::Ui,
    theme: &Theme,
    entries: &[VocabularyEntry],
    can_speak: bool,
) -> Option<ListAction> {
    if entries.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(theme.muted(ui.ctx(), EMPTY_MESSAGE));
        });
        return None;
    }

    let mut action = None;
    ui.heading(word_list::header(entries));
    ui.add_space(8.0);

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        for row in word_list::rows(entries) {
            let entry = row.entry;
            egui::Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&entry.term).size(18.0).strong());
                    ui.label(theme.muted(ui.ctx(), &entry.part_of_speech.to_uppercase()));
                    if let Some(pronunciation) = &entry.pronunciation {
                        ui.label(egui::RichText::new(pronunciation).monospace().small());
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🗑").on_hover_text("Delete word").clicked() {
                            action = Some(ListAction::Delete(entry.id.clone()));
                        }
                        let (mark, hint) = if row.learned {
                            (egui::RichText::new("✔").color(theme.green(ui.ctx())), "Learned")
                        } else {
                            (egui::RichText::new("○"), "Mark learned")
                        };
                        if ui.button(mark).on_hover_text(hint).clicked() {
                            action = Some(ListAction::ToggleLearned(entry.id.clone()));
                        }
                        let listen = ui
                            .add_enabled(can_speak, egui::Button::new("🔊"))
                            .on_hover_text("Play pronunciation")
                            .on_disabled_hover_text("Speech playback is not available");
                        if listen.clicked() {
                            action = Some(ListAction::Speak(entry.term.clone()));
                        }
                    });
                });
                ui.label(&entry.definition);
                ui.label(
                    egui::RichText::new(format!("\"{}\"", entry.example_sentence))
                        .italics()
                        .color(theme.accent(ui.ctx())),
                );
            });
            ui.add_space(6.0);
        }
    });

    action
}
