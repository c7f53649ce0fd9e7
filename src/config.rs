//! Service configuration read from the environment.
//!
//! `main` loads `.env` through dotenvy before calling `AppConfig::from_env`,
//! so either source works.

use std::time::Duration;

use crate::error::ConfigError;
use crate::models::Tab;

pub const SOURCE_URL_VAR: &str = "SALES_SOURCE_URL";
pub const CACHE_TTL_VAR: &str = "SALES_CACHE_TTL_SECS";
pub const BIND_ADDR_VAR: &str = "SALES_BIND_ADDR";
pub const TABS_VAR: &str = "SALES_TABS";

pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/1iGN1gCZILFY1ejwz6IBhrOikC_aIMs5xUkEsCE2DW3U/export?format=csv";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source_url: String,
    pub cache_ttl: Duration,
    pub bind_addr: String,
    /// Tabs this deployment serves.
    pub tabs: Vec<Tab>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            tabs: Tab::ALL.to_vec(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup. Unset or blank variables
    /// take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let cache_ttl = match get(CACHE_TTL_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    return Err(ConfigError::InvalidTtl {
                        var: CACHE_TTL_VAR,
                        value,
                    })
                }
            },
            None => defaults.cache_ttl,
        };

        let tabs = match get(TABS_VAR) {
            Some(value) => parse_tabs(&value)?,
            None => defaults.tabs,
        };

        Ok(Self {
            source_url: get(SOURCE_URL_VAR).unwrap_or(defaults.source_url),
            cache_ttl,
            bind_addr: get(BIND_ADDR_VAR).unwrap_or(defaults.bind_addr),
            tabs,
        })
    }
}

fn parse_tabs(value: &str) -> Result<Vec<Tab>, ConfigError> {
    let mut tabs = Vec::new();
    for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let tab = Tab::parse(name).ok_or_else(|| ConfigError::UnknownTab(name.to_string()))?;
        if !tabs.contains(&tab) {
            tabs.push(tab);
        }
    }

    if tabs.is_empty() {
        return Err(ConfigError::NoTabs(TABS_VAR));
    }
    Ok(tabs)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            (SOURCE_URL_VAR, "http://sheet.local/export.csv"),
            (CACHE_TTL_VAR, "30"),
            (BIND_ADDR_VAR, "127.0.0.1:8080"),
            (TABS_VAR, "Marketing, overview,marketing"),
        ])
        .unwrap();

        assert_eq!(cfg.source_url, "http://sheet.local/export.csv");
        assert_eq!(cfg.cache_ttl, Duration::from_secs(30));
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.tabs, vec![Tab::Marketing, Tab::Overview]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config(&[(CACHE_TTL_VAR, "ten minutes")]),
            Err(ConfigError::InvalidTtl { .. })
        ));
        assert!(matches!(
            config(&[(TABS_VAR, "overview,charts")]),
            Err(ConfigError::UnknownTab(name)) if name == "charts"
        ));
        assert!(matches!(config(&[(TABS_VAR, " , ")]), Err(ConfigError::NoTabs(_))));
    }
}
