//! Configuration management.
//!
//! Settings are loaded from a JSON document (a config file or anything else
//! the embedder supplies) under the `"iptrack"` key, merged with defaults,
//! validated and installed in a process-wide singleton. Consumers read the
//! current configuration with [`get_config`].

pub mod schema;

pub use schema::TrackerConfig;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Global configuration instance.
///
/// Lazily initialized on first access; replaced when settings are loaded.
static CONFIG: Lazy<RwLock<TrackerConfig>> =
    Lazy::new(|| RwLock::new(TrackerConfig::default()));

/// Loads configuration from a JSON settings document.
///
/// Reads the `"iptrack"` key of `settings_json`, fills missing fields with
/// defaults, validates the result and installs it globally. A malformed
/// settings block is logged and ignored, keeping the defaults.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value with user settings under the
///   `"iptrack"` key
///
/// # Returns
///
/// `Ok(TrackerConfig)` with the loaded configuration, or `Err` if
/// validation fails.
///
/// # Example
///
/// ```
/// use iptrack::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "iptrack": {
///         "geoBaseUrl": "https://geo.example.com",
///         "timeout": 10000
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 10000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<TrackerConfig, String> {
    let mut config = TrackerConfig::default();

    if let Some(settings) = settings_json {
        if let Some(tracker_settings) = settings.get("iptrack") {
            match serde_json::from_value::<TrackerConfig>(tracker_settings.clone()) {
                Ok(user_config) => config = user_config,
                Err(e) => {
                    log::warn!("Failed to parse iptrack settings: {}. Using defaults.", e);
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone of the installed configuration, or the defaults if
/// nothing has been loaded yet.
pub fn get_config() -> TrackerConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| TrackerConfig::default())
}

/// Updates specific configuration settings in place.
///
/// The update is validated; an invalid result is discarded and the defaults
/// reinstalled, with a warning logged.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut TrackerConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration invalid after update: {}. Resetting.", e);
            *config = TrackerConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = TrackerConfig::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        reset_config();
        let config = load_config(None).unwrap();
        assert_eq!(config.timeout, 30000);
        assert_eq!(config.geo_base_url, "https://ipinfo.io");
    }

    #[test]
    #[serial]
    fn test_load_config_with_user_settings() {
        let settings = json!({
            "iptrack": {
                "apiBaseUrl": "https://auth.example.com",
                "timeout": 10000
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.api_base_url, "https://auth.example.com");
        assert_eq!(config.timeout, 10000);
        // Untouched settings keep their defaults.
        assert_eq!(config.geo_base_url, "https://ipinfo.io");

        reset_config();
    }

    #[test]
    #[serial]
    fn test_load_config_invalid_settings_fall_back_to_defaults() {
        let settings = json!({
            "iptrack": {
                "timeout": "not-a-number"
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.timeout, 30000);
    }

    #[test]
    #[serial]
    fn test_load_config_validation_error() {
        let settings = json!({
            "iptrack": {
                "timeout": 0
            }
        });

        let result = load_config(Some(settings));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("timeout must be greater than 0"));
    }

    #[test]
    #[serial]
    fn test_get_config_reflects_loaded_settings() {
        reset_config();

        let settings = json!({
            "iptrack": {
                "timeout": 90000
            }
        });
        load_config(Some(settings)).unwrap();

        assert_eq!(get_config().timeout, 90000);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_update_config() {
        reset_config();

        update_config(|config| {
            config.timeout = 120000;
        });
        assert_eq!(get_config().timeout, 120000);

        reset_config();
    }

    #[test]
    #[serial]
    fn test_update_config_with_invalid_value_resets() {
        reset_config();

        update_config(|config| {
            config.timeout = 0;
        });

        assert_eq!(get_config().timeout, 30000);
    }

    #[test]
    #[serial]
    fn test_no_iptrack_key_uses_defaults() {
        reset_config();

        let settings = json!({"other-tool": {"timeout": 1}});
        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.timeout, 30000);
    }
}
