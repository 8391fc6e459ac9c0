use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Whether cancelling a ticket puts its seat back on the flight.
    /// Off by default: cancelled inventory is treated as forfeited.
    #[serde(default)]
    pub restore_seat_on_cancel: bool,

    /// Accept admin/admin as a Staff login when no credential row matches
    #[serde(default = "default_fallback_admin")]
    pub fallback_admin: bool,

    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_fallback_admin() -> bool {
    true
}

fn default_min_password_length() -> usize {
    6
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            restore_seat_on_cancel: false,
            fallback_admin: default_fallback_admin(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of APP)
            // Eg.. `APP_DEBUG=1` would set the `debug` key
            .add_source(config::Environment::with_prefix("AERODESK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rule_defaults() {
        let rules = BusinessRules::default();
        assert!(!rules.restore_seat_on_cancel);
        assert!(rules.fallback_admin);
        assert_eq!(rules.min_password_length, 6);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(
                "[database]\nurl = \"sqlite::memory:\"\n\n[business_rules]\nrestore_seat_on_cancel = true\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let parsed: Config = cfg.try_deserialize().unwrap();
        assert!(parsed.business_rules.restore_seat_on_cancel);
        assert!(parsed.business_rules.fallback_admin);
        assert_eq!(parsed.business_rules.min_password_length, 6);
    }
}
