use eframe::egui;

use super::theme::Theme;
use crate::{
    core::AppView,
    views::DashboardSummary,
};

pub fn dashboard_view(
    ui: &mut egui::Ui,
    theme: &Theme,
    summary: &DashboardSummary,
) -> Option<AppView> {
    let mut jump = None;

    ui.heading("Welcome back!");
    ui.add_space(12.0);

    ui.columns(4, |cols| {
        stat_card(&mut cols[0], theme, "Total Words", summary.total_words.to_string());
        stat_card(&mut cols[1], theme, "Learned", summary.learned_words.to_string());
        stat_card(&mut cols[2], theme, "Reviewed Today", summary.today.words_reviewed.to_string());
        let today_quiz = if summary.today.quiz_total == 0 {
            "-".to_string()
        } else {
            format!("{}/{}", summary.today.quiz_correct, summary.today.quiz_total)
        };
        stat_card(&mut cols[3], theme, "Quiz Today", today_quiz);
    });

    ui.add_space(12.0);
    ui.add(
        egui::ProgressBar::new(summary.learned_ratio())
            .show_percentage()
            .fill(theme.green(ui.ctx())),
    );

    ui.add_space(16.0);
    ui.label(theme.heading(ui.ctx(), "Last 7 days"));
    activity_chart(ui, theme, summary);

    ui.add_space(16.0);
    ui.label(theme.heading(ui.ctx(), "Recent quizzes"));
    if summary.recent_quizzes.is_empty() {
        ui.label(theme.muted(ui.ctx(), "No quizzes taken yet."));
    } else {
        for record in &summary.recent_quizzes {
            ui.horizontal(|ui| {
                ui.label(theme.muted(ui.ctx(), &record.date));
                ui.label(egui::RichText::new(format!("{}%", record.score)).strong());
            });
        }
    }

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        for view in [AppView::Study, AppView::Quiz, AppView::Generate] {
            if ui.button(view.label()).clicked() {
                jump = Some(view);
            }
        }
    });

    jump
}

fn stat_card(ui: &mut egui::Ui, theme: &Theme, label: &str, value: String) {
    egui::Frame::new().fill(theme.card(ui.ctx())).corner_radius(12.0).inner_margin(12.0).show(
        ui,
        |ui| {
            ui.set_width(ui.available_width());
            ui.label(theme.muted(ui.ctx(), label));
            ui.label(egui::RichText::new(value).size(24.0).strong());
        },
    );
}

fn activity_chart(ui: &mut egui::Ui, theme: &Theme, summary: &DashboardSummary) {
    const HEIGHT: f32 = 90.0;

    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), HEIGHT + 16.0), egui::Sense::hover());
    let peak = summary.peak_activity().max(1) as f32;
    let slot = rect.width() / summary.activity.len().max(1) as f32;
    let painter = ui.painter_at(rect);

    for (i, day) in summary.activity.iter().enumerate() {
        let value = (day.words_reviewed + day.words_learned) as f32;
        let x = rect.left() + slot * i as f32;
        let bar_height = HEIGHT * value / peak;
        let bar = egui::Rect::from_min_max(
            egui::pos2(x + slot * 0.2, rect.top() + HEIGHT - bar_height),
            egui::pos2(x + slot * 0.8, rect.top() + HEIGHT),
        );
        painter.rect_filled(bar, 3.0, theme.accent(ui.ctx()));
        painter.text(
            egui::pos2(x + slot * 0.5, rect.bottom()),
            egui::Align2::CENTER_BOTTOM,
            day.date.get(5..).unwrap_or(&day.date),
            egui::FontId::proportional(10.0),
            ui.visuals().weak_text_color(),
        );
    }
}
