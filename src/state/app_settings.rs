use fpl_api::client::DEFAULT_BASE_URL;
use log::LevelFilter;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Matches the backend's bootstrap cache TTL; refreshing faster only returns cached data.
const DEFAULT_REFRESH_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub base_url: String,
    pub request_timeout: Duration,
    /// `None` disables the periodic refresh.
    pub refresh_interval: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: LevelFilter::Error,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            refresh_interval: Some(Duration::from_secs(DEFAULT_REFRESH_SECS)),
        }
    }
}

impl AppSettings {
    /// Read settings from the environment, after loading an optional `.env`.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = var("FPLTUI_BASE_URL").unwrap_or(defaults.base_url);
        let request_timeout = var("FPLTUI_REQUEST_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        let refresh_interval = match var("FPLTUI_REFRESH_SECS").and_then(|v| v.parse::<u64>().ok()) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.refresh_interval,
        };
        let log_level = var("FPLTUI_LOG")
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(defaults.log_level);

        Self {
            full_screen: false,
            log_level,
            base_url,
            request_timeout,
            refresh_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.request_timeout, Duration::from_secs(15));
        assert_eq!(s.refresh_interval, Some(Duration::from_secs(300)));
        assert_eq!(s.log_level, LevelFilter::Error);
    }

    #[test]
    fn environment_overrides_defaults() {
        let s = settings(&[
            ("FPLTUI_BASE_URL", "http://dash.local:8080"),
            ("FPLTUI_REQUEST_TIMEOUT", "5"),
            ("FPLTUI_REFRESH_SECS", "60"),
            ("FPLTUI_LOG", "debug"),
        ]);
        assert_eq!(s.base_url, "http://dash.local:8080");
        assert_eq!(s.request_timeout, Duration::from_secs(5));
        assert_eq!(s.refresh_interval, Some(Duration::from_secs(60)));
        assert_eq!(s.log_level, LevelFilter::Debug);
    }

    #[test]
    fn zero_refresh_disables_ticker_and_junk_is_ignored() {
        let s = settings(&[
            ("FPLTUI_REFRESH_SECS", "0"),
            ("FPLTUI_REQUEST_TIMEOUT", "soon"),
            ("FPLTUI_LOG", "loud"),
            ("FPLTUI_BASE_URL", "  "),
        ]);
        assert_eq!(s.refresh_interval, None);
        assert_eq!(s.request_timeout, Duration::from_secs(15));
        assert_eq!(s.log_level, LevelFilter::Error);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }
}
