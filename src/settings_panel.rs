use eframe::egui::{self, ecolor::HexColor, Color32};

use crate::settings::{
    Settings, BORDER_RADIUS_RANGE, BORDER_THICKNESS_RANGE, DEFAULT_BACKGROUND_COLOR,
    DEFAULT_TEXT_COLOR, FONT_SIZE_RANGE,
};
use crate::style::color_or_default;

pub const TITLE: &str = "RSS Ticker Settings";

/// Editable copy of the settings shown in the settings window. Nothing is
/// written until "Save & Close".
#[derive(Debug, Clone)]
pub struct SettingsEditor {
    fonts: Vec<String>,
    font_name: String,
    font_size: u32,
    font_color: Color32,
    background_color: Color32,
    show_border: bool,
    border_thickness: u32,
    border_color: Color32,
    use_rounded_corners: bool,
    border_radius: u32,
    show_overlay_text: bool,
}

impl SettingsEditor {
    pub fn new(settings: &Settings, fonts: Vec<String>) -> Self {
        Self {
            fonts,
            font_name: settings.font_name.clone(),
            font_size: settings.font_size,
            font_color: color_or_default(&settings.font_color, DEFAULT_TEXT_COLOR, "font_color"),
            background_color: color_or_default(
                &settings.background_color,
                DEFAULT_BACKGROUND_COLOR,
                "background_color",
            ),
            show_border: settings.show_border,
            border_thickness: settings.border_thickness,
            border_color: color_or_default(&settings.border_color, DEFAULT_TEXT_COLOR, "border_color"),
            use_rounded_corners: settings.use_rounded_corners,
            border_radius: settings.border_radius,
            show_overlay_text: settings.show_overlay_text,
        }
    }

    pub fn to_settings(&self) -> Settings {
        Settings {
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            font_color: to_hex(self.font_color),
            background_color: to_hex(self.background_color),
            show_border: self.show_border,
            border_thickness: self.border_thickness,
            border_color: to_hex(self.border_color),
            use_rounded_corners: self.use_rounded_corners,
            border_radius: self.border_radius,
            show_overlay_text: self.show_overlay_text,
        }
    }

    /// Draw the form. Returns `true` when "Save & Close" was clicked.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> bool {
        ui.label("Font:");
        let selected = if self.font_name.is_empty() {
            "(built-in)"
        } else {
            self.font_name.as_str()
        };
        egui::ComboBox::from_id_salt("font_name")
            .selected_text(selected)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for font in &self.fonts {
                    ui.selectable_value(&mut self.font_name, font.clone(), font);
                }
            });
        if self.fonts.is_empty() {
            ui.small("Put .ttf files in the fonts folder to choose them here.");
        }

        ui.add(egui::Slider::new(&mut self.font_size, FONT_SIZE_RANGE).text("Font Size"));

        color_row(ui, "Font Color", &mut self.font_color);
        color_row(ui, "Background Color", &mut self.background_color);

        ui.separator();
        ui.checkbox(&mut self.show_border, "Show Border");
        ui.add(
            egui::Slider::new(&mut self.border_thickness, BORDER_THICKNESS_RANGE)
                .text("Border Thickness"),
        );
        color_row(ui, "Border Color", &mut self.border_color);

        ui.separator();
        ui.checkbox(&mut self.use_rounded_corners, "Rounded Corners");
        ui.add(egui::Slider::new(&mut self.border_radius, BORDER_RADIUS_RANGE).text("Corner Radius"));

        ui.separator();
        ui.checkbox(&mut self.show_overlay_text, "Show \"Ticky\" Overlay Text");

        ui.add_space(8.0);
        ui.button("Save & Close").clicked()
    }
}

/// Saved as `#rrggbb`; alpha is not part of the settings file.
fn to_hex(color: Color32) -> String {
    HexColor::Hex6(color).to_string()
}

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Color32) {
    ui.horizontal(|ui| {
        ui.color_edit_button_srgba(color);
        ui.label(label);
    });
}
