//! Dark theme for the native preview window

use egui::Color32;

use crate::core::Rgba;

/// Preview palette, approximating the site's dark hero section
pub mod colors {
    use super::Color32;

    pub const BG_PRIMARY: Color32 = Color32::from_rgb(7, 12, 24);         // hero backdrop
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(14, 22, 40);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 238, 255);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(90, 110, 140);
    pub const BORDER: Color32 = Color32::from_rgb(30, 42, 64);
}

/// Convert a field colour to egui's 8-bit unmultiplied form
pub fn to_color32(color: Rgba) -> Color32 {
    let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

pub fn preview_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    // No shadows - flat design
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_conversion() {
        assert_eq!(to_color32(Rgba::new([1, 2, 3], 1.0)).a(), 255);
        assert_eq!(to_color32(Rgba::new([1, 2, 3], 0.0)).a(), 0);
        assert_eq!(to_color32(Rgba::new([1, 2, 3], 2.0)).a(), 255);
    }
}
