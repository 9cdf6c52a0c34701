use eframe::egui;

use super::theme::Theme;
use crate::views::{
    QuizOutcome,
    QuizPhase,
    QuizSession,
};

pub enum QuizAction {
    Finished(QuizOutcome),
    Restart,
}

pub fn quiz_view(ui: &mut egui::Ui, theme: &Theme, session: &mut QuizSession) -> Option<QuizAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.set_max_width(520.0);
        match session.phase().clone() {
            QuizPhase::Loading => {
                ui.add_space(80.0);
                ui.add(egui::Spinner::new().size(40.0));
                ui.label(theme.muted(ui.ctx(), "AI is crafting your quiz..."));
            }
            QuizPhase::Error(message) => {
                ui.add_space(80.0);
                ui.label(egui::RichText::new("⚠").size(40.0).color(theme.red(ui.ctx())));
                ui.label(message);
                ui.add_space(12.0);
                if ui.button("Try again").clicked() {
                    action = Some(QuizAction::Restart);
                }
            }
            QuizPhase::Active => action = active_question(ui, theme, session),
            QuizPhase::Finished => {
                if finished(ui, theme, session) {
                    action = Some(QuizAction::Restart);
                }
            }
        }
    });

    action
}

fn active_question(ui: &mut egui::Ui, theme: &Theme, session: &mut QuizSession) -> Option<QuizAction> {
    let question = session.question()?.clone();
    let selected = session.selected();

    ui.horizontal(|ui| {
        ui.label(theme.heading(
            ui.ctx(),
            &format!("QUESTION {}/{}", session.question_number(), session.total()),
        ));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(theme.muted(ui.ctx(), &format!("Score: {}", session.score())));
        });
    });

    ui.add_space(8.0);
    ui.label(egui::RichText::new(&question.question).size(20.0).strong());
    ui.add_space(12.0);

    for (idx, option) in question.options.iter().enumerate() {
        let mut text = egui::RichText::new(option);
        if let Some(chosen) = selected {
            if question.is_correct(idx) {
                text = text.color(theme.green(ui.ctx())).strong();
            } else if idx == chosen {
                text = text.color(theme.red(ui.ctx())).strikethrough();
            }
        }

        let button = egui::Button::new(text).min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add_enabled(selected.is_none(), button).clicked() {
            session.select(idx);
        }
    }

    if selected.is_some() {
        ui.add_space(12.0);
        ui.label(egui::RichText::new(format!("Explanation: {}", question.explanation)).italics());
        ui.add_space(8.0);

        let label = if session.question_number() == session.total() {
            "Finish Quiz"
        } else {
            "Next Question"
        };
        if ui.button(label).clicked() {
            return session.advance().map(QuizAction::Finished);
        }
    }

    None
}

/// Returns true when the user asks for another round.
fn finished(ui: &mut egui::Ui, theme: &Theme, session: &QuizSession) -> bool {
    let outcome = session.outcome();
    let (correct, incorrect) = session.breakdown();

    ui.add_space(24.0);
    ui.label(egui::RichText::new("🏆").size(40.0).color(theme.amber(ui.ctx())));
    ui.label(egui::RichText::new("Quiz Complete!").size(26.0).strong());
    ui.label(format!("You scored {} out of {}", outcome.score, outcome.total));
    ui.add_space(12.0);

    let total = (correct + incorrect).max(1) as f32;
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 18.0), egui::Sense::hover());
    let split = rect.left() + rect.width() * correct as f32 / total;
    let painter = ui.painter();
    painter.rect_filled(rect, 6.0, ui.visuals().widgets.inactive.bg_fill);
    painter.rect_filled(
        egui::Rect::from_min_max(rect.min, egui::pos2(split, rect.max.y)),
        6.0,
        theme.accent(ui.ctx()),
    );
    ui.label(theme.muted(ui.ctx(), &format!("{correct} correct · {incorrect} incorrect")));

    ui.add_space(8.0);
    ui.label(
        egui::RichText::new(format!("{}%", outcome.percentage()))
            .size(36.0)
            .color(theme.accent(ui.ctx()))
            .strong(),
    );
    ui.add_space(12.0);
    ui.button("Start New Quiz").clicked()
}
