use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{MenuError, Result};
use crate::menu::{DEFAULT_NOISE_KEYWORDS, NoiseFilter};
use crate::store::DuplicatePolicy;

pub const MAX_SYNC_INTERVAL_HOURS: u64 = 24 * 365;

pub const DEFAULT_PDF_URL: &str = "https://lengauers-bistro.de/wp-content/uploads/Tageskarte.pdf";

#[derive(Debug, Clone)]
pub struct Config {
    pub pdf_url: String,
    pub sync_interval_hours: u64,
    pub api_host: String,
    pub api_port: u16,
    pub noise_keywords: Vec<String>,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_url: DEFAULT_PDF_URL.to_string(),
            sync_interval_hours: 6,
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            noise_keywords: DEFAULT_NOISE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let sync_interval_hours = match get("SYNC_INTERVAL_HOURS") {
            Some(raw) => parse_number("SYNC_INTERVAL_HOURS", &raw)?,
            None => defaults.sync_interval_hours,
        };
        if !(1..=MAX_SYNC_INTERVAL_HOURS).contains(&sync_interval_hours) {
            return Err(MenuError::Config {
                message: format!(
                    "SYNC_INTERVAL_HOURS must be between 1 and {MAX_SYNC_INTERVAL_HOURS}"
                ),
            });
        }

        let api_port = match get("API_PORT") {
            Some(raw) => parse_number("API_PORT", &raw)?,
            None => defaults.api_port,
        };

        let noise_keywords = match get("NOISE_KEYWORDS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.noise_keywords,
        };

        let duplicate_policy = match get("DUPLICATE_POLICY") {
            Some(raw) => raw.parse()?,
            None => defaults.duplicate_policy,
        };

        Ok(Self {
            pdf_url: get("PDF_URL").unwrap_or(defaults.pdf_url),
            sync_interval_hours,
            api_host: get("API_HOST").unwrap_or(defaults.api_host),
            api_port,
            noise_keywords,
            duplicate_policy,
        })
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_hours.saturating_mul(60 * 60))
    }

    pub fn noise_filter(&self) -> NoiseFilter {
        NoiseFilter::new(&self.noise_keywords)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.api_host, self.api_port);
        addr.parse().map_err(|_| MenuError::Config {
            message: format!("invalid bind address {addr}"),
        })
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| MenuError::Config {
        message: format!("{key} must be a number, got {raw:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.pdf_url, DEFAULT_PDF_URL);
        assert_eq!(config.sync_interval(), Duration::from_secs(6 * 3600));
        assert_eq!(config.bind_addr().unwrap().port(), 8000);
        assert_eq!(config.noise_filter(), NoiseFilter::default());
        assert_eq!(config.duplicate_policy, DuplicatePolicy::SkipExistingNames);
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("PDF_URL", "http://localhost/menu.pdf"),
            ("SYNC_INTERVAL_HOURS", "1"),
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "3000"),
            ("NOISE_KEYWORDS", "seite, ,Hinweis"),
            ("DUPLICATE_POLICY", "skip-date"),
        ])
        .unwrap();
        assert_eq!(config.pdf_url, "http://localhost/menu.pdf");
        assert_eq!(config.sync_interval(), Duration::from_secs(3600));
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.noise_keywords, ["seite", "Hinweis"]);
        assert!(config.noise_filter().is_noise("HINWEIS"));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::SkipExistingDate);
    }

    #[test]
    fn longest_sync_interval() {
        let config = config_from(&[("SYNC_INTERVAL_HOURS", "8760")]).unwrap();
        assert_eq!(config.sync_interval(), Duration::from_secs(8760 * 3600));

        let config = Config {
            sync_interval_hours: u64::MAX,
            ..Config::default()
        };
        assert_eq!(config.sync_interval(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = config_from(&[("API_PORT", "  "), ("PDF_URL", "")]).unwrap();
        assert_eq!(config.api_port, 8000);
        assert_eq!(config.pdf_url, DEFAULT_PDF_URL);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("API_PORT", "eighty")]),
            Err(MenuError::Config { .. })
        ));
        assert!(matches!(
            config_from(&[("SYNC_INTERVAL_HOURS", "0")]),
            Err(MenuError::Config { .. })
        ));
        assert!(matches!(
            config_from(&[("SYNC_INTERVAL_HOURS", "18446744073709551615")]),
            Err(MenuError::Config { .. })
        ));
        assert!(matches!(
            config_from(&[("DUPLICATE_POLICY", "overwrite")]),
            Err(MenuError::Config { .. })
        ));
        let config = config_from(&[("API_HOST", "not a host")]).unwrap();
        assert!(config.bind_addr().is_err());
    }
}
