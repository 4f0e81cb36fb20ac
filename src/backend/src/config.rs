use anyhow::{Context, Result};
use std::{env, path::PathBuf, sync::OnceLock};

/// Application configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// UI server configuration
    pub ui: UiConfig,

    /// Gateway device API configuration
    pub gateway: GatewayConfig,

    /// Status poll cadence handed to the frontend
    pub poll: PollConfig,

    /// Path configuration
    pub paths: PathConfig,
}

#[derive(Clone, Debug)]
pub struct UiConfig {
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Base address of the gateway's device API
    pub api_base_url: String,
    /// Address of the gateway's own web console, where the PIN can be
    /// entered out-of-band
    pub console_url: String,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct PollConfig {
    pub interval_ms: u32,
}

#[derive(Clone, Debug)]
pub struct PathConfig {
    pub static_dir: PathBuf,
    pub index_html: PathBuf,
}

impl AppConfig {
    /// Get or load the application configuration
    ///
    /// Returns a reference to the cached configuration. On first call, it
    /// loads and validates all configuration from environment variables.
    /// Subsequent calls return the cached instance.
    ///
    /// # Panics
    /// Panics if configuration loading fails. This is intentional as the
    /// application cannot function without valid configuration.
    pub fn get() -> &'static Self {
        static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
        APP_CONFIG.get_or_init(|| {
            Self::load_internal().expect("failed to load application configuration")
        })
    }

    fn load_internal() -> Result<Self> {
        Ok(AppConfig {
            ui: UiConfig::load()?,
            gateway: GatewayConfig::load()?,
            poll: PollConfig::load()?,
            paths: PathConfig::load(),
        })
    }
}

impl UiConfig {
    fn load() -> Result<Self> {
        let port = env_or("UI_PORT", "8080")
            .parse::<u16>()
            .context("UI_PORT must be a valid port number")?;

        Ok(UiConfig { port })
    }
}

impl GatewayConfig {
    fn load() -> Result<Self> {
        let api_base_url = env_or("GATEWAY_API_URL", "http://192.168.8.1");
        let console_url = env_or("GATEWAY_CONSOLE_URL", "http://192.168.8.1/");
        let request_timeout_secs = env_or("GATEWAY_REQUEST_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .context("GATEWAY_REQUEST_TIMEOUT_SECS must be a number of seconds")?;

        anyhow::ensure!(
            request_timeout_secs > 0,
            "GATEWAY_REQUEST_TIMEOUT_SECS must be greater than zero"
        );

        Ok(GatewayConfig {
            api_base_url,
            console_url,
            request_timeout_secs,
        })
    }
}

impl PollConfig {
    fn load() -> Result<Self> {
        let interval_ms = env_or("POLL_INTERVAL_MS", "3000")
            .parse::<u32>()
            .context("POLL_INTERVAL_MS must be a number of milliseconds")?;

        // Anything faster than this hammers the modem service for no gain
        anyhow::ensure!(
            interval_ms >= 250,
            "POLL_INTERVAL_MS must be at least 250ms"
        );

        Ok(PollConfig { interval_ms })
    }
}

impl PathConfig {
    fn load() -> Self {
        let static_dir = PathBuf::from(env_or("STATIC_DIR", "static"));
        let index_html = static_dir.join("index.html");

        PathConfig {
            static_dir,
            index_html,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
