use eframe::egui::{
    self,
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    RichText,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::spark()
    }
}

impl Theme {
    pub fn spark() -> Self {
        Theme { dark: Palette::spark_night(), light: Palette::spark_day() }
    }

    fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).accent).strong()
    }

    pub fn term(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).foreground).size(30.0).strong()
    }

    pub fn muted(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).muted)
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).accent
    }

    pub fn green(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).green
    }

    pub fn red(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).red
    }

    pub fn amber(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).amber
    }

    pub fn card(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).surface
    }
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    surface: Color32,
    raised: Color32,
    foreground: Color32,
    muted: Color32,
    selection: Color32,
    accent: Color32,
    green: Color32,
    red: Color32,
    amber: Color32,
}

impl Palette {
    fn spark_night() -> Self {
        Self {
            background: Color32::from_rgb(17, 24, 39),
            surface: Color32::from_rgb(31, 41, 55),
            raised: Color32::from_rgb(55, 65, 81),
            foreground: Color32::from_rgb(243, 244, 246),
            muted: Color32::from_rgb(156, 163, 175),
            selection: Color32::from_rgb(67, 56, 202),
            accent: Color32::from_rgb(129, 140, 248),
            green: Color32::from_rgb(52, 211, 153),
            red: Color32::from_rgb(248, 113, 113),
            amber: Color32::from_rgb(251, 191, 36),
        }
    }

    fn spark_day() -> Self {
        Self {
            background: Color32::from_rgb(249, 250, 251),
            surface: Color32::from_rgb(255, 255, 255),
            raised: Color32::from_rgb(229, 231, 235),
            foreground: Color32::from_rgb(17, 24, 39),
            muted: Color32::from_rgb(107, 114, 128),
            selection: Color32::from_rgb(199, 210, 254),
            accent: Color32::from_rgb(79, 70, 229),
            green: Color32::from_rgb(5, 150, 105),
            red: Color32::from_rgb(220, 38, 38),
            amber: Color32::from_rgb(217, 119, 6),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

pub fn apply_dark_mode(ctx: &egui::Context, dark_mode: bool) {
    let (theme, preference) = if dark_mode {
        (egui::Theme::Dark, egui::ThemePreference::Dark)
    } else {
        (egui::Theme::Light, egui::ThemePreference::Light)
    };
    ctx.set_theme(theme);
    ctx.options_mut(|o| o.theme_preference = preference);
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let widget = |base: WidgetVisuals, fill: Color32, outline: Color32| WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: outline, ..base.bg_stroke },
        fg_stroke: Stroke { color: palette.foreground, ..base.fg_stroke },
        ..base
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(
                    default.widgets.noninteractive,
                    palette.surface,
                    palette.raised,
                ),
                inactive: widget(default.widgets.inactive, palette.raised, palette.raised),
                hovered: widget(default.widgets.hovered, palette.selection, palette.accent),
                active: widget(default.widgets.active, palette.selection, palette.accent),
                open: widget(default.widgets.open, palette.surface, palette.accent),
            },
            selection: Selection {
                bg_fill: palette.selection,
                stroke: Stroke { color: palette.foreground, ..default.selection.stroke },
            },
            hyperlink_color: palette.accent,
            faint_bg_color: palette.surface,
            extreme_bg_color: palette.background,
            error_fg_color: palette.red,
            warn_fg_color: palette.amber,
            window_shadow: Shadow { color: palette.background, ..default.window_shadow },
            window_fill: palette.surface,
            window_stroke: Stroke { color: palette.raised, ..default.window_stroke },
            panel_fill: palette.background,
            ..default
        },
    );
}
