use std::time::Instant;

use eframe::egui;

use super::theme::Theme;
use crate::{
    core::VocabularyEntry,
    views::{
        flashcards::{
            EMPTY_MESSAGE,
            FLIP_BACK_DELAY,
        },
        CardEvent,
        CardFace,
        FlashcardSession,
    },
};

const CARD_SIZE: egui::Vec2 = egui::vec2(420.0, 260.0);

pub fn flashcard_view(
    ui: &mut egui::Ui,
    theme: &Theme,
    session: &mut FlashcardSession,
    entries: &[VocabularyEntry],
    can_speak: bool,
) -> Option<CardEvent> {
    let now = Instant::now();
    if session.tick(now, entries.len()) {
        ui.ctx().request_repaint();
    } else if session.is_moving() {
        ui.ctx().request_repaint_after(FLIP_BACK_DELAY);
    }

    let Some(entry) = session.current(entries) else {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(theme.muted(ui.ctx(), EMPTY_MESSAGE));
        });
        return None;
    };

    let mut event = None;
    ui.vertical_centered(|ui| {
        ui.set_max_width(CARD_SIZE.x);
        ui.horizontal(|ui| {
            ui.label(theme.muted(
                ui.ctx(),
                &format!("Card {} of {}", session.index().min(entries.len() - 1) + 1, entries.len()),
            ));
            if entry.is_learned() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new("Learned").color(theme.green(ui.ctx())).strong());
                });
            }
        });

        ui.add_space(8.0);
        let card = egui::Frame::new()
            .fill(theme.card(ui.ctx()))
            .corner_radius(16.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_min_size(CARD_SIZE);
                ui.vertical_centered(|ui| match session.face() {
                    CardFace::Front => {
                        ui.label(theme.heading(ui.ctx(), &entry.part_of_speech.to_uppercase()));
                        ui.add_space(12.0);
                        ui.label(theme.term(ui.ctx(), &entry.term));
                        if let Some(pronunciation) = &entry.pronunciation {
                            ui.label(egui::RichText::new(pronunciation).monospace());
                        }
                        ui.add_space(24.0);
                        ui.label(theme.muted(ui.ctx(), "Click to flip"));
                    }
                    CardFace::Back => {
                        ui.label(
                            egui::RichText::new(&entry.definition)
                                .size(22.0)
                                .color(theme.accent(ui.ctx())),
                        );
                        ui.separator();
                        ui.label(egui::RichText::new(format!("\"{}\"", entry.example_sentence)).italics());
                    }
                });
            });

        if card.response.interact(egui::Sense::click()).clicked() {
            event = session.flip(entries);
        }

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if ui.button("⬅").clicked() {
                session.prev(Instant::now());
            }

            if session.face() == CardFace::Back {
                let listen = ui
                    .add_enabled(can_speak, egui::Button::new("🔊 Listen"))
                    .on_hover_text("Play pronunciation")
                    .on_disabled_hover_text("Speech playback is not available");
                if listen.clicked() {
                    event = session.speak(entries);
                }
            }

            let label = if entry.is_learned() { "✔ Learned" } else { "Mark Learned" };
            if ui.button(label).clicked() {
                event = session.mark_learned(entries);
            }

            if ui.button("➡").clicked() {
                session.next(Instant::now());
            }
        });
    });

    event
}
