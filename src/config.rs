use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.vietqr.io/v2/business";
pub const ENDPOINT_ENV: &str = "MST_LOOKUP_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub delay_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            delay_ms: 2000,  // API側のレート制限対策
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LookupError::Config("Không tìm thấy thư mục home".into()))?;
        Ok(home.join(".config").join("mst-lookup").join("config.json"))
    }

    /// 環境変数を優先
    pub fn endpoint(&self) -> String {
        match std::env::var(ENDPOINT_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.endpoint.clone(),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn set_endpoint(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(LookupError::Config(format!("URL không hợp lệ: {}", url)));
        }
        self.endpoint = url;
        Ok(())
    }

    pub fn set_timeout_seconds(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(LookupError::Config("Thời gian chờ phải lớn hơn 0".into()));
        }
        self.timeout_seconds = seconds;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.delay(), Duration::from_millis(2000));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"delay_ms": 500}"#).unwrap();
        assert_eq!(config.delay_ms, 500);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_set_endpoint_rejects_non_http() {
        let mut config = Config::default();
        assert!(config.set_endpoint("ftp://example.com".into()).is_err());
        assert!(config.set_endpoint("http://localhost:8080/v2/business".into()).is_ok());
        assert_eq!(config.endpoint, "http://localhost:8080/v2/business");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        assert!(matches!(config.set_timeout_seconds(0), Err(LookupError::Config(_))));
    }
}
