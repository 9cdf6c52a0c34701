use eframe::egui;

use super::theme::Theme;
use crate::views::{
    generator::{
        MAX_COUNT,
        MIN_COUNT,
        TOPIC_PRESETS,
    },
    GenerateRequest,
    GeneratorForm,
    GeneratorMode,
};

pub fn generator_view(
    ui: &mut egui::Ui,
    theme: &Theme,
    form: &mut GeneratorForm,
) -> Option<GenerateRequest> {
    let mut request = None;

    ui.vertical_centered(|ui| {
        ui.set_max_width(560.0);
        ui.horizontal(|ui| {
            let mut mode = form.mode;
            ui.selectable_value(&mut mode, GeneratorMode::Topic, "Topic Generator");
            ui.selectable_value(&mut mode, GeneratorMode::Single, "Word Lookup");
            form.set_mode(mode);
        });
        ui.add_space(12.0);

        let loading = form.is_loading();
        let (title, blurb, hint, idle_label, busy_label) = match form.mode {
            GeneratorMode::Topic => (
                "AI Vocabulary Builder",
                "Enter a topic and get a list of useful words with definitions and examples.",
                "e.g. Travel, Business, Cooking",
                "Create",
                "Creating...",
            ),
            GeneratorMode::Single => (
                "Smart Dictionary",
                "Look up a single word and add it to your collection.",
                "e.g. serendipity",
                "Look up",
                "Searching...",
            ),
        };

        ui.label(theme.heading(ui.ctx(), title));
        ui.label(theme.muted(ui.ctx(), blurb));
        ui.add_space(8.0);

        let input = match form.mode {
            GeneratorMode::Topic => &mut form.topic,
            GeneratorMode::Single => &mut form.term,
        };
        let response = ui.add_enabled(
            !loading,
            egui::TextEdit::singleline(input).hint_text(hint).desired_width(f32::INFINITY),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.horizontal(|ui| {
            if form.mode == GeneratorMode::Topic {
                ui.label("Words:");
                ui.add_enabled(
                    !loading,
                    egui::DragValue::new(&mut form.count).range(MIN_COUNT..=MAX_COUNT),
                );
            }

            let label = if loading { busy_label } else { idle_label };
            let clicked = ui.add_enabled(form.can_submit(), egui::Button::new(label)).clicked();
            if loading {
                ui.spinner();
            }
            if clicked || entered {
                request = form.submit();
            }
        });

        if let Some(error) = form.error() {
            ui.add_space(6.0);
            ui.colored_label(theme.red(ui.ctx()), error);
        }

        if form.mode == GeneratorMode::Topic {
            ui.add_space(16.0);
            ui.horizontal_wrapped(|ui| {
                for preset in TOPIC_PRESETS {
                    if ui.add_enabled(!loading, egui::Button::new(format!("Try \"{preset}\""))).clicked()
                    {
                        form.apply_preset(preset);
                    }
                }
            });
        } else {
            ui.add_space(16.0);
            ui.label(theme.muted(
                ui.ctx(),
                "Tip: This is great for adding specific words you encounter while reading.",
            ));
        }
    });

    request
}
