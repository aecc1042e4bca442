use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed could not be parsed: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    #[error("image could not be decoded: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid tray icon: {0}")]
    Icon(#[from] tray_icon::BadIcon),

    #[error("tray icon could not be created: {0}")]
    Tray(#[from] tray_icon::Error),

    #[error("tray menu error: {0}")]
    Menu(#[from] tray_icon::menu::Error),
}

pub type Result<T> = std::result::Result<T, TickyError>;
