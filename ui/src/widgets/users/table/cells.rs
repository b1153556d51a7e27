//! Cell rendering for the user activity table.
//!
//! Styling is decided by pure tone functions so the thresholds can be tested without
//! a UI; the render functions only map a tone to colors.

use egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui, Visuals};

use crate::utils::colors::{COLOR_AMBER, COLOR_GREEN, COLOR_RED};

/// Password older than this many days is flagged.
pub const PASSWORD_AGE_LIMIT_DAYS: i64 = 365;

/// Account idle for longer than this many days is flagged.
pub const ACCESS_AGE_LIMIT_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTone {
    Neutral,
    Alert,
    Warning,
    Positive,
}

impl CellTone {
    /// Accent color; `None` keeps the theme's text color.
    pub fn accent(self) -> Option<Color32> {
        match self {
            Self::Neutral => None,
            Self::Alert => Some(COLOR_RED),
            Self::Warning => Some(COLOR_AMBER),
            Self::Positive => Some(COLOR_GREEN),
        }
    }
}

#[inline]
pub fn password_age_tone(days: i64) -> CellTone {
    if days > PASSWORD_AGE_LIMIT_DAYS {
        CellTone::Alert
    } else {
        CellTone::Neutral
    }
}

#[inline]
pub fn access_age_tone(days: i64) -> CellTone {
    if days > ACCESS_AGE_LIMIT_DAYS {
        CellTone::Warning
    } else {
        CellTone::Neutral
    }
}

#[inline]
pub fn mfa_tone(enabled: bool) -> CellTone {
    if enabled {
        CellTone::Positive
    } else {
        CellTone::Neutral
    }
}

pub fn mfa_label(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Disabled" }
}

#[inline]
pub fn render_text_cell(ui: &mut Ui, text: &str) {
    ui.label(text);
}

/// Day counter chip, colored by tone.
#[inline]
pub fn render_days_cell(ui: &mut Ui, days: i64, tone: CellTone) {
    let color = chip_color(ui.visuals(), tone);
    render_chip(ui, &days.to_string(), color);
}

/// MFA status badge.
#[inline]
pub fn render_mfa_cell(ui: &mut Ui, enabled: bool) {
    let color = chip_color(ui.visuals(), mfa_tone(enabled));
    render_chip(ui, mfa_label(enabled), color);
}

/// Neutral chips use the theme's weak text color.
fn chip_color(visuals: &Visuals, tone: CellTone) -> Color32 {
    tone.accent().unwrap_or_else(|| visuals.weak_text_color())
}

fn render_chip(ui: &mut Ui, text: &str, color: Color32) {
    Frame::NONE
        .fill(color.gamma_multiply(0.15))
        .stroke(Stroke::new(1.0, color))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(8, 1))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(color).monospace());
        });
}
