use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::settings::Settings;

const APP_DIR: &str = "ticky";

/// Locations of every file the ticker reads or writes.
#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    /// On Windows: %APPDATA%/ticky
    /// On other platforms: dirs::config_dir()/ticky, or ./ticky if there is none.
    pub fn locate() -> Self {
        let root = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::new(root)
    }

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn feeds_file(&self) -> PathBuf {
        self.root.join("feeds.txt")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.root.join("fonts")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    pub fn icon_file(&self) -> PathBuf {
        self.assets_dir().join("icon.png")
    }
}

/// Create `dir` (and parents) unless it already exists. Failures are logged.
pub fn ensure_dir(dir: &Path) {
    if dir.is_dir() {
        return;
    }
    match fs::create_dir_all(dir) {
        Ok(()) => info!("Created {}", dir.display()),
        Err(e) => warn!("Could not create {}: {e}", dir.display()),
    }
}

/// Load settings from JSON. Returns defaults if the file doesn't exist or is corrupted.
pub fn load_settings(path: &Path) -> Settings {
    match try_load_settings(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(e) => {
            warn!("Error loading {}: {e}", path.display());
            Settings::default()
        }
    }
}

fn try_load_settings(path: &Path) -> Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

/// Save settings as pretty JSON. Creates parent directories if needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(settings)?;
    fs::write(path, data)?;
    info!("Settings saved to {}", path.display());
    Ok(())
}
