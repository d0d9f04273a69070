use anyhow::Result;
use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_email: String,
    pub admin_password: String,
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
    pub default_page_size: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("CLUB"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_ttl_hours: 24,
            admin_email: "admin@club.local".to_string(),
            admin_password: "admin".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            default_page_size: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Config = ConfigLoader::builder()
            .set_override("port", 8080)
            .unwrap()
            .set_override("log_format", "JSON")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.json_logs());
        assert_eq!(config.jwt_ttl_hours, Config::default().jwt_ttl_hours);
        assert_eq!(config.default_page_size, 10);
    }
}
