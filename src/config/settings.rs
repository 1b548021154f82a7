use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_PORT: u16 = 8080;

fn default_origin() -> String {
    format!("http://localhost:{}", DEFAULT_API_PORT)
}
fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}
fn default_path() -> String {
    "/azan_time".to_string()
}
fn default_tick_millis() -> u64 {
    1000
}
fn default_refresh_secs() -> u64 {
    60
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Full endpoint URL. When set, `origin`, `api_port` and `path` are ignored.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Where the clock is "served from"; the endpoint is derived from it.
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default = "default_path")]
    pub path: String,
    /// Unset means the HTTP client's default (no timeout).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            origin: default_origin(),
            api_port: default_api_port(),
            path: default_path(),
            request_timeout_secs: None,
        }
    }
}

impl EndpointConfig {
    pub fn resolve(&self) -> Result<Url> {
        if let Some(endpoint) = &self.endpoint {
            return Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL {:?}", endpoint));
        }
        let origin =
            Url::parse(&self.origin).with_context(|| format!("Invalid origin URL {:?}", self.origin))?;
        resolve_endpoint(&origin, self.api_port, &self.path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Derive the endpoint from the origin the clock runs against.
///
/// An origin on an explicit port other than `api_port` is a separately
/// served front end, so the API is reached on `api_port` of the same host
/// over plain http. Otherwise the path is joined onto the origin.
pub fn resolve_endpoint(origin: &Url, api_port: u16, path: &str) -> Result<Url> {
    match origin.port() {
        Some(port) if port != api_port => {
            let host = origin
                .host_str()
                .with_context(|| format!("Origin {} has no host", origin))?;
            let url = format!("http://{}:{}{}", host, api_port, path);
            Url::parse(&url).with_context(|| format!("Invalid endpoint URL {:?}", url))
        }
        _ => origin
            .join(path)
            .with_context(|| format!("Cannot join {:?} onto {}", path, origin)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl ScheduleConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_hijri: bool,
    /// Days to add/subtract from Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind, +1 = one day ahead
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_hijri: true,
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "azan-clock").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("azan-clock.log"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schedule.tick_millis == 0 {
            bail!("schedule.tick_millis must be greater than 0");
        }
        if self.schedule.refresh_secs == 0 {
            bail!("schedule.refresh_secs must be greater than 0");
        }
        if self.endpoint.request_timeout_secs == Some(0) {
            bail!("endpoint.request_timeout_secs must be greater than 0 when set");
        }
        self.endpoint.resolve()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn same_port_origin_joins_path() {
        let endpoint = resolve_endpoint(&url("http://prayer.local:8080/"), 8080, "/azan_time").unwrap();
        assert_eq!(endpoint.as_str(), "http://prayer.local:8080/azan_time");
    }

    #[test]
    fn default_port_origin_joins_path() {
        let endpoint = resolve_endpoint(&url("https://masjid.example/clock/"), 8080, "/azan_time").unwrap();
        assert_eq!(endpoint.as_str(), "https://masjid.example/azan_time");
    }

    #[test]
    fn other_port_origin_falls_back_to_api_port() {
        let endpoint = resolve_endpoint(&url("https://192.168.1.20:8081/"), 8080, "/azan_time").unwrap();
        assert_eq!(endpoint.as_str(), "http://192.168.1.20:8080/azan_time");
    }

    #[test]
    fn explicit_endpoint_wins() {
        let config = EndpointConfig {
            endpoint: Some("http://10.0.0.5:9000/times".to_string()),
            origin: "http://localhost:8081".to_string(),
            ..EndpointConfig::default()
        };
        assert_eq!(config.resolve().unwrap().as_str(), "http://10.0.0.5:9000/times");
    }

    #[test]
    fn default_config_resolves_to_localhost() {
        let config = AppConfig::default();
        assert_eq!(
            config.endpoint.resolve().unwrap().as_str(),
            "http://localhost:8080/azan_time"
        );
        assert_eq!(config.schedule.tick_period(), Duration::from_secs(1));
        assert_eq!(config.schedule.refresh_period(), Duration::from_secs(60));
        assert!(config.endpoint.request_timeout().is_none());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.schedule.refresh_secs, 60);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[schedule]\nrefresh_secs = 30\n\n[endpoint]\norigin = \"http://pi.local:8081\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.schedule.refresh_secs, 30);
        assert_eq!(config.schedule.tick_millis, 1000);
        assert!(config.display.show_hijri);
        assert_eq!(
            config.endpoint.resolve().unwrap().as_str(),
            "http://pi.local:8080/azan_time"
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.display.hijri_offset = -1;
        config.endpoint.request_timeout_secs = Some(15);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.display.hijri_offset, -1);
        assert_eq!(loaded.endpoint.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_periods_are_rejected() {
        let mut config = AppConfig::default();
        config.schedule.tick_millis = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.schedule.refresh_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_origin_is_rejected() {
        let mut config = AppConfig::default();
        config.endpoint.origin = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
