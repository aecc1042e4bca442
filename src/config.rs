use std::time::Duration;

/// Fixed application parameters. User-editable appearance lives in
/// [`crate::settings::Settings`] instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub window_width: f32,
    pub window_height: f32,
    pub window_x: f32,
    pub window_y: f32,
    /// Pixels the headline moves left on every scroll tick.
    pub scroll_step: f32,
    pub scroll_interval_ms: u64,
    pub fade_ms: u64,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 50.0,
            window_x: 100.0,
            window_y: 100.0,
            scroll_step: 2.0,
            scroll_interval_ms: 30,
            fade_ms: 500,
            refresh_interval_secs: 600,
            request_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; RSS-Ticker/1.0; +https://example.com)".to_string(),
        }
    }
}

impl Config {
    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = Config::default();
        assert_eq!(config.scroll_interval(), Duration::from_millis(30));
        assert_eq!(config.fade_duration(), Duration::from_millis(500));
        assert_eq!(config.refresh_interval(), Duration::from_secs(600));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_window_is_a_thin_strip() {
        let config = Config::default();
        assert_eq!(config.window_width, 800.0);
        assert_eq!(config.window_height, 50.0);
        assert!(config.user_agent.contains("RSS-Ticker/1.0"));
    }
}
