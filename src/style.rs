use eframe::egui::{Color32, CornerRadius, FontFamily, FontId, Stroke};
use tracing::warn;

use crate::settings::{Settings, DEFAULT_BACKGROUND_COLOR, DEFAULT_TEXT_COLOR};

pub const OVERLAY_TEXT: &str = "Ticky";
pub const OVERLAY_SIZE: f32 = 12.0;
pub const OVERLAY_COLOR: Color32 = Color32::from_rgb(0, 255, 0);

/// Settings resolved into the values the painter uses.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerStyle {
    pub font: FontId,
    pub text_color: Color32,
    pub background: Color32,
    pub border: Option<Stroke>,
    pub corner_radius: CornerRadius,
    pub show_overlay: bool,
}

impl TickerStyle {
    /// `family` is whatever the font loader managed to install for
    /// `settings.font_name`.
    pub fn resolve(settings: &Settings, family: FontFamily) -> Self {
        let border = settings.show_border.then(|| {
            Stroke::new(
                settings.border_thickness as f32,
                color_or_default(&settings.border_color, DEFAULT_TEXT_COLOR, "border_color"),
            )
        });
        let corner_radius = if settings.use_rounded_corners {
            CornerRadius::same(settings.border_radius.min(u8::MAX as u32) as u8)
        } else {
            CornerRadius::ZERO
        };

        Self {
            font: FontId::new(settings.font_size as f32, family),
            text_color: color_or_default(&settings.font_color, DEFAULT_TEXT_COLOR, "font_color"),
            background: color_or_default(
                &settings.background_color,
                DEFAULT_BACKGROUND_COLOR,
                "background_color",
            ),
            border,
            corner_radius,
            show_overlay: settings.show_overlay_text,
        }
    }
}

impl Default for TickerStyle {
    fn default() -> Self {
        Self::resolve(&Settings::default(), FontFamily::Monospace)
    }
}

/// Parse a `#rgb`/`#rrggbb` style value, warning and using `default` when it
/// isn't one.
pub fn color_or_default(value: &str, default: &str, key: &str) -> Color32 {
    Color32::from_hex(value.trim()).unwrap_or_else(|e| {
        warn!("Invalid {key} {value:?} ({e:?}), using {default}");
        Color32::from_hex(default).unwrap_or(Color32::WHITE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        let green = Color32::from_rgb(0, 255, 0);
        assert_eq!(color_or_default("#00ff00", "#000000", "c"), green);
        assert_eq!(color_or_default("#00FF00", "#000000", "c"), green);
        assert_eq!(color_or_default("#0f0", "#000000", "c"), green);
        assert_eq!(
            color_or_default(" #102030 ", "#000000", "c"),
            Color32::from_rgb(16, 32, 48)
        );
    }

    #[test]
    fn test_garbage_colors_use_default() {
        let fallback = Color32::from_rgb(1, 2, 3);
        for value in ["00ff00", "#gg0000", "lime", "#ÿÿÿ", "#12345", ""] {
            assert_eq!(color_or_default(value, "#010203", "c"), fallback, "{value:?}");
        }
    }

    #[test]
    fn test_default_style() {
        let style = TickerStyle::default();
        assert_eq!(style.text_color, Color32::from_rgb(0, 255, 0));
        assert_eq!(style.background, Color32::BLACK);
        assert_eq!(style.border, None);
        assert_eq!(style.corner_radius, CornerRadius::ZERO);
        assert_eq!(style.font.size, 24.0);
        assert!(!style.show_overlay);
    }

    #[test]
    fn test_border_and_rounding_applied() {
        let settings = Settings {
            show_border: true,
            border_thickness: 3,
            border_color: "#ff0000".into(),
            use_rounded_corners: true,
            border_radius: 12,
            show_overlay_text: true,
            ..Settings::default()
        };
        let style = TickerStyle::resolve(&settings, FontFamily::Proportional);
        assert_eq!(style.border, Some(Stroke::new(3.0, Color32::from_rgb(255, 0, 0))));
        assert_eq!(style.corner_radius, CornerRadius::same(12));
        assert_eq!(style.font.family, FontFamily::Proportional);
        assert!(style.show_overlay);
    }

    #[test]
    fn test_radius_ignored_without_rounded_corners() {
        let settings = Settings {
            border_radius: 40,
            use_rounded_corners: false,
            ..Settings::default()
        };
        let style = TickerStyle::resolve(&settings, FontFamily::Monospace);
        assert_eq!(style.corner_radius, CornerRadius::ZERO);
    }

    #[test]
    fn test_invalid_colors_fall_back() {
        let settings = Settings {
            font_color: "not a color".into(),
            background_color: "".into(),
            ..Settings::default()
        };
        let style = TickerStyle::resolve(&settings, FontFamily::Monospace);
        assert_eq!(style.text_color, Color32::from_rgb(0, 255, 0));
        assert_eq!(style.background, Color32::BLACK);
    }
}
