//! Service configuration

use std::time::Duration;

use dishboard_carousel::CarouselConfig;

/// Marker left in unfilled credential templates
const PLACEHOLDER_MARKER: &str = "YOUR_";

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port (admin API, display WebSocket, health check)
    pub http_port: u16,
    /// Firestore project id
    pub firebase_project_id: String,
    /// Firestore web API key
    pub firebase_api_key: String,
    /// Collection holding dish documents
    pub dish_collection: String,
    /// How often the carousel re-reads the dish list
    pub store_poll_interval: Duration,
    /// Cloudinary cloud name
    pub cloudinary_cloud_name: String,
    /// Cloudinary unsigned upload preset
    pub cloudinary_upload_preset: String,
    /// Time between automatic slide advances
    pub autoplay_interval: Duration,
    pub log_level: String,
    /// Daily rolling log files go here when the directory exists
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 8080,
            firebase_project_id: String::new(),
            firebase_api_key: String::new(),
            dish_collection: "dishes".into(),
            store_poll_interval: Duration::from_secs(5),
            cloudinary_cloud_name: String::new(),
            cloudinary_upload_preset: String::new(),
            autoplay_interval: CarouselConfig::default().autoplay_interval,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |name: &str| var(name).map(|v| v.trim().to_string()).unwrap_or_default();
        let number = |name: &str| var(name).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            http_port: var("HTTP_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.http_port),
            firebase_project_id: text("FIREBASE_PROJECT_ID"),
            firebase_api_key: text("FIREBASE_API_KEY"),
            dish_collection: var("DISH_COLLECTION")
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.dish_collection),
            store_poll_interval: number("STORE_POLL_SECS")
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.store_poll_interval),
            cloudinary_cloud_name: text("CLOUDINARY_CLOUD_NAME"),
            cloudinary_upload_preset: text("CLOUDINARY_UPLOAD_PRESET"),
            autoplay_interval: number("AUTOPLAY_INTERVAL_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.autoplay_interval),
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: var("LOG_DIR").filter(|d| !d.is_empty()),
        }
    }

    /// Firestore credentials are present and not template placeholders
    pub fn firestore_ready(&self) -> bool {
        is_filled(&self.firebase_project_id) && is_filled(&self.firebase_api_key)
    }

    /// Cloudinary credentials are present and not template placeholders
    pub fn cloudinary_enabled(&self) -> bool {
        is_filled(&self.cloudinary_cloud_name) && is_filled(&self.cloudinary_upload_preset)
    }

    pub fn carousel(&self) -> CarouselConfig {
        CarouselConfig::default().with_autoplay_interval(self.autoplay_interval)
    }
}

fn is_filled(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.contains(PLACEHOLDER_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.dish_collection, "dishes");
        assert_eq!(config.store_poll_interval, Duration::from_secs(5));
        assert_eq!(config.autoplay_interval, Duration::from_millis(4500));
        assert_eq!(config.environment, "development");
        assert!(config.log_dir.is_none());
        assert!(!config.firestore_ready());
        assert!(!config.cloudinary_enabled());
    }

    #[test]
    fn placeholders_are_not_filled() {
        let config = config(&[
            ("FIREBASE_PROJECT_ID", "YOUR_PROJECT_ID"),
            ("FIREBASE_API_KEY", "AIza-real"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_UPLOAD_PRESET", "  "),
        ]);
        assert!(!config.firestore_ready());
        assert!(!config.cloudinary_enabled());
    }

    #[test]
    fn filled_credentials_enable_services() {
        let config = config(&[
            ("FIREBASE_PROJECT_ID", "restaurant-tv"),
            ("FIREBASE_API_KEY", "AIza-real"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_UPLOAD_PRESET", "unsigned_dishes"),
        ]);
        assert!(config.firestore_ready());
        assert!(config.cloudinary_enabled());
    }

    #[test]
    fn numeric_overrides_and_bad_values() {
        let config = config(&[
            ("HTTP_PORT", "9000"),
            ("STORE_POLL_SECS", "0"),
            ("AUTOPLAY_INTERVAL_MS", "6000"),
        ]);
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.store_poll_interval, Duration::from_secs(5));
        assert_eq!(config.carousel().autoplay_interval, Duration::from_millis(6000));

        let config = self::config(&[("HTTP_PORT", "not-a-port")]);
        assert_eq!(config.http_port, 8080);
    }
}
