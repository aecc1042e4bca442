use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT: &str = "PressStart2P.ttf";
pub const DEFAULT_TEXT_COLOR: &str = "#00ff00";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#000000";

pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 8..=72;
pub const BORDER_THICKNESS_RANGE: std::ops::RangeInclusive<u32> = 0..=20;
pub const BORDER_RADIUS_RANGE: std::ops::RangeInclusive<u32> = 0..=50;

/// Appearance options persisted in `settings.json`. Keys missing from the
/// file take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File name inside the fonts directory.
    pub font_name: String,
    pub font_size: u32,
    pub font_color: String,
    pub background_color: String,
    pub show_border: bool,
    pub border_thickness: u32,
    pub border_color: String,
    pub use_rounded_corners: bool,
    pub border_radius: u32,
    pub show_overlay_text: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT.to_string(),
            font_size: 24,
            font_color: DEFAULT_TEXT_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            show_border: false,
            border_thickness: 1,
            border_color: DEFAULT_TEXT_COLOR.to_string(),
            use_rounded_corners: false,
            border_radius: 10,
            show_overlay_text: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "font_size": 40, "show_border": true }"#).unwrap();
        assert_eq!(settings.font_size, 40);
        assert!(settings.show_border);
        assert_eq!(settings.font_name, DEFAULT_FONT);
        assert_eq!(settings.border_thickness, 1);
        assert_eq!(settings.border_radius, 10);
        assert_eq!(settings.background_color, DEFAULT_BACKGROUND_COLOR);
    }

    #[test]
    fn test_empty_object_is_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_serialized_keys_match_file_format() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "font_name",
            "font_size",
            "font_color",
            "background_color",
            "show_border",
            "border_thickness",
            "border_color",
            "use_rounded_corners",
            "border_radius",
            "show_overlay_text",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object.len(), 10);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{ "font_size": 12, "legacy_option": 3 }"#).unwrap();
        assert_eq!(settings.font_size, 12);
    }
}
