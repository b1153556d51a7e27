//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for positive status (MFA enabled).
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for stale credentials.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for inactive accounts.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);
