use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Weather API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the API (e.g., "https://api.weatherapi.com/v1").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key. `WEATHER_API_KEY` takes precedence when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Days requested for a forecast, today included (default: 4).
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Local persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Favourites file. Defaults to `<data_dir>/weather-app/favourites.json`.
    #[serde(default)]
    pub favourites_path: Option<PathBuf>,
}

/// Store engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// States buffered per subscriber before it lags (default: 64).
    #[serde(default = "default_buffer")]
    pub state_buffer: usize,
    /// Labels buffered per subscriber before it lags (default: 64).
    #[serde(default = "default_buffer")]
    pub label_buffer: usize,
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_forecast_days() -> u32 {
    4
}

fn default_buffer() -> usize {
    64
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_buffer: default_buffer(),
            label_buffer: default_buffer(),
        }
    }
}

impl ApiConfig {
    /// API key from the environment, falling back to the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var("WEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.is_empty()))
    }
}

impl StorageConfig {
    pub fn resolve_favourites_path(&self) -> PathBuf {
        self.favourites_path.clone().unwrap_or_else(|| {
            let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            data_dir.join("weather-app").join("favourites.json")
        })
    }
}
