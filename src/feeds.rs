use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::error::Result;

pub const DEFAULT_FEEDS: [&str; 2] = [
    "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml",
    "https://feeds.bbci.co.uk/news/rss.xml",
];

const HEADER: &str = "# Add your RSS feed URLs below. Lines starting with '#' are ignored.";

/// Read the feed list, writing the default file first if none exists.
/// Falls back to the built-in defaults when the file can't be created or read.
pub fn load_or_create(path: &Path) -> Vec<String> {
    if !path.exists() {
        if let Err(e) = write_defaults(path) {
            error!("Error creating {}: {e}", path.display());
            return default_feeds();
        }
        info!("Created default {}", path.display());
    }

    match fs::read_to_string(path) {
        Ok(content) => {
            let feeds = parse(&content);
            info!("Loaded {} feeds from {}", feeds.len(), path.display());
            feeds
        }
        Err(e) => {
            error!("Error loading {}: {e}", path.display());
            default_feeds()
        }
    }
}

/// One URL per line; blank and `#` lines are skipped.
pub fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut content = format!("{HEADER}\n");
    for url in DEFAULT_FEEDS {
        content.push_str(url);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

fn default_feeds() -> Vec<String> {
    DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
}
