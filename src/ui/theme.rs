//! Color themes and styling utilities.
//!
//! # Surface Hierarchy
//!
//! - `surface[0]`: App background
//! - `surface[1]`: Toolbar and panel backgrounds
//! - `surface[2]`: List and chat backgrounds
//! - `surface[3]`: Hover states
//! - `surface[4]`: Cards and elevated panels
//!
//! Semantic colors (accent, success, warning, error) are shared by both
//! themes; text and border colors flip with the mode.

use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct TruthDareTheme {
    pub dark: bool,
    pub surface: [Color32; 5],
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border_subtle: Color32,
    pub border_medium: Color32,
}

impl TruthDareTheme {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn dark() -> Self {
        Self {
            dark: true,
            surface: [
                Color32::from_rgb(10, 10, 15),
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(28, 28, 38),
                Color32::from_rgb(37, 37, 50),
                Color32::from_rgb(46, 46, 62),
            ],
            accent: Color32::from_rgb(236, 72, 153),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(185, 187, 190),
            text_muted: Color32::from_rgb(114, 118, 125),
            border_subtle: Color32::from_rgb(32, 34, 37),
            border_medium: Color32::from_rgb(47, 49, 54),
        }
    }

    pub fn light() -> Self {
        Self {
            dark: false,
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::from_rgb(242, 243, 245),
                Color32::from_rgb(227, 229, 232),
                Color32::from_rgb(255, 240, 246),
            ],
            accent: Color32::from_rgb(219, 39, 119),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_secondary: Color32::from_rgb(79, 86, 96),
            text_muted: Color32::from_rgb(116, 127, 141),
            border_subtle: Color32::from_rgb(230, 232, 236),
            border_medium: Color32::from_rgb(210, 213, 219),
        }
    }
}

/// Text hierarchy: small for timestamps, body for entries and chat,
/// heading for section titles, plus a large style for the reveal card.
pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(10.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(13.0, Proportional)),
        (TextStyle::Heading, FontId::new(18.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
        (TextStyle::Name("reveal".into()), FontId::new(22.0, Proportional)),
        (TextStyle::Name("chat_user".into()), FontId::new(13.0, Proportional)),
    ]
    .into()
}

/// Apply visuals, spacing and widget styling for the given mode. Called at
/// startup and whenever dark mode is toggled.
pub fn apply_app_style(ctx: &egui::Context, dark: bool) {
    let theme = TruthDareTheme::for_mode(dark);
    let mut style = (*ctx.style()).clone();
    style.visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    style.text_styles = configure_text_styles();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);

    let (inactive, hovered) = if dark {
        (Color32::from_rgb(55, 60, 70), Color32::from_rgb(70, 76, 88))
    } else {
        (Color32::from_rgb(225, 228, 233), Color32::from_rgb(210, 214, 221))
    };
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::NONE;
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);

    style.visuals.widgets.hovered.bg_fill = hovered;
    style.visuals.widgets.hovered.weak_bg_fill = hovered;
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::NONE;
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);

    style.visuals.widgets.active.bg_fill = theme.accent;
    style.visuals.widgets.active.weak_bg_fill = theme.accent;
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    style.visuals.panel_fill = theme.surface[0];
    style.visuals.selection.bg_fill = theme.accent.linear_multiply(0.4);

    ctx.set_style(style);
}

const USER_COLORS: [Color32; 8] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(46, 204, 113),
    Color32::from_rgb(52, 152, 219),
    Color32::from_rgb(155, 89, 182),
    Color32::from_rgb(241, 196, 15),
    Color32::from_rgb(230, 126, 34),
    Color32::from_rgb(26, 188, 156),
    Color32::from_rgb(236, 100, 166),
];

/// Stable color for a chat username (FNV-1a over the bytes).
pub fn user_color(name: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603u64;
    for b in name.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211u64);
    }
    USER_COLORS[(hash as usize) % USER_COLORS.len()]
}
