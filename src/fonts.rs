use std::fs;
use std::path::Path;
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use tracing::{info, warn};

use crate::error::Result;

/// `.ttf` files in `dir`, sorted by name. Missing directory means no fonts.
pub fn list_fonts(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not list fonts in {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut fonts: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.to_lowercase().ends_with(".ttf"))
        .collect();
    fonts.sort();
    fonts
}

fn read_font(dir: &Path, name: &str) -> Result<Vec<u8>> {
    Ok(fs::read(dir.join(name))?)
}

/// egui panics on font data it can't parse, so run the same parser up front.
fn is_parsable_font(bytes: &[u8]) -> bool {
    ab_glyph::FontRef::try_from_slice(bytes).is_ok()
}

/// Register `name` from `dir` with egui under its own family and return that
/// family. Falls back to the built-in monospace font when the file can't be
/// read or parsed. Takes effect from the next frame.
pub fn install(ctx: &egui::Context, dir: &Path, name: &str) -> FontFamily {
    let mut definitions = FontDefinitions::default();
    let family = register(&mut definitions, dir, name);
    ctx.set_fonts(definitions);
    family
}

fn register(definitions: &mut FontDefinitions, dir: &Path, name: &str) -> FontFamily {
    if name.is_empty() {
        return FontFamily::Monospace;
    }
    match read_font(dir, name) {
        Ok(bytes) if !is_parsable_font(&bytes) => {
            warn!("{name} is not a TrueType/OpenType font, falling back to built-in monospace");
            FontFamily::Monospace
        }
        Ok(bytes) => {
            definitions
                .font_data
                .insert(name.to_string(), Arc::new(FontData::from_owned(bytes)));
            // Keep the default monospace glyphs as fallback for characters the font lacks.
            let mut chain = vec![name.to_string()];
            if let Some(mono) = definitions.families.get(&FontFamily::Monospace) {
                chain.extend(mono.iter().cloned());
            }
            let family = FontFamily::Name(name.into());
            definitions.families.insert(family.clone(), chain);
            info!("Loaded font {name}");
            family
        }
        Err(e) => {
            warn!("Font {name} not available ({e}), falling back to built-in monospace");
            FontFamily::Monospace
        }
    }
}
