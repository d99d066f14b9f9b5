//! CLI configuration.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use parts_commerce::Currency;
use parts_data::{BackendConfig, TimeoutConfig, DEFAULT_REGIONS_URL};
use serde::{Deserialize, Serialize};

pub const ENV_BACKEND_URL: &str = "PARTS_BACKEND_URL";
pub const ENV_BACKEND_KEY: &str = "PARTS_BACKEND_KEY";
pub const ENV_STATE_DIR: &str = "PARTS_STATE_DIR";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Hosted backend connection.
    #[serde(default)]
    pub backend: BackendSection,

    /// Administrative-division API.
    #[serde(default)]
    pub regions: RegionsSection,

    /// Local cart and garage.
    #[serde(default)]
    pub state: StateSection,

    #[serde(default)]
    pub shop: ShopSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `PARTS_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|name| std::env::var(name).ok());
        self
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            self.backend.url = Some(url);
        }
        if let Some(key) = var(ENV_BACKEND_KEY).filter(|v| !v.is_empty()) {
            self.backend.anon_key = Some(key);
        }
        if let Some(dir) = var(ENV_STATE_DIR).filter(|v| !v.is_empty()) {
            self.state.dir = Some(PathBuf::from(dir));
        }
    }

    /// Connection settings, or an error naming what is missing.
    pub fn backend_config(&self) -> Result<BackendConfig> {
        let (Some(url), Some(key)) = (&self.backend.url, &self.backend.anon_key) else {
            bail!(
                "Backend is not configured. Set [backend] url and anon_key, or {} and {}.",
                ENV_BACKEND_URL,
                ENV_BACKEND_KEY
            );
        };
        Ok(BackendConfig::new(url.clone(), key.clone()).with_timeouts(self.backend.timeouts()))
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.shop.currency)
            .with_context(|| format!("Unknown currency: {}", self.shop.currency))
    }
}

/// Hosted backend connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSection {
    /// Project URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Public anonymous key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,

    /// Total request timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

impl BackendSection {
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_millis(self.connect_timeout_ms, self.timeout_ms)
    }
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsSection {
    #[serde(default = "default_regions_url")]
    pub base_url: String,
}

fn default_regions_url() -> String {
    DEFAULT_REGIONS_URL.to_string()
}

impl Default for RegionsSection {
    fn default() -> Self {
        Self {
            base_url: default_regions_url(),
        }
    }
}

/// Where the cart and garage are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSection {
    /// Defaults to `.parts` in the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSection {
    /// ISO currency code for prices read from the backend.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Products per catalog page.
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_currency() -> String {
    "PHP".to_string()
}

fn default_per_page() -> i64 {
    parts_commerce::search::DEFAULT_PER_PAGE
}

impl Default for ShopSection {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            per_page: default_per_page(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Filter directive, e.g. `info` or `parts_data=debug`. `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default parts.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Auto-parts shop configuration

[backend]
# url = "https://your-project.supabase.co"
# anon_key = "public-anon-key"
timeout_ms = {timeout}
connect_timeout_ms = {connect}

[regions]
base_url = "{regions}"

[state]
# dir = ".parts"

[shop]
currency = "PHP"
per_page = {per_page}

[logging]
level = "warn"
format = "compact"
"#,
        timeout = default_timeout_ms(),
        connect = default_connect_timeout_ms(),
        regions = DEFAULT_REGIONS_URL,
        per_page = default_per_page(),
    )
}
