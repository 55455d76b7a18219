use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub bookings: BookingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow any origin to call the API (the web frontend is served elsewhere)
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_permissive: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Duration applied when a booking request omits `durationHours`
    #[serde(default = "default_duration_hours")]
    pub default_duration_hours: u32,
    /// Re-check the slot inside the write lock that stores a new booking.
    /// When disabled, `/api/availability/check` is the only guard and two
    /// clients can book the same slot.
    #[serde(default = "default_true")]
    pub reject_double_booking: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_duration_hours: default_duration_hours(),
            reject_double_booking: true,
        }
    }
}

fn default_duration_hours() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Share of the base price paid by the municipality (0.0 - 1.0)
    #[serde(default = "default_subsidy_rate")]
    pub subsidy_rate: f64,
    /// Hourly rate for professionals missing from the catalog
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            subsidy_rate: default_subsidy_rate(),
            default_hourly_rate: default_hourly_rate(),
        }
    }
}

fn default_subsidy_rate() -> f64 {
    0.7
}

fn default_hourly_rate() -> f64 {
    50.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Load the demo bookings, projects, help requests and professionals on startup
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&content)?
        } else {
            info!("No config file found, using defaults");
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse configuration file")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup("HELPMEANYTIME_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HELPMEANYTIME_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid HELPMEANYTIME_PORT: {}", port))?;
        }
        Ok(())
    }

    /// Reject values the booking flow cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.pricing.subsidy_rate) {
            anyhow::bail!(
                "pricing.subsidy_rate must be between 0.0 and 1.0 (got {})",
                self.pricing.subsidy_rate
            );
        }
        if self.pricing.default_hourly_rate <= 0.0 {
            anyhow::bail!("pricing.default_hourly_rate must be positive");
        }
        if self.bookings.default_duration_hours == 0 {
            anyhow::bail!("bookings.default_duration_hours must be at least 1");
        }
        Ok(())
    }

    pub fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            bookings: BookingConfig::default(),
            pricing: PricingConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.bookings.default_duration_hours, 2);
        assert!(config.bookings.reject_double_booking);
        assert_eq!(config.pricing.subsidy_rate, 0.7);
        assert!(config.seed.enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8088

            [bookings]
            reject_double_booking = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.bookings.reject_double_booking);
        assert_eq!(config.bookings.default_duration_hours, 2);
        assert_eq!(config.pricing.default_hourly_rate, 50.0);
    }

    #[test]
    fn test_invalid_subsidy_rate_rejected() {
        let config = Config::from_toml("[pricing]\nsubsidy_rate = 1.5\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_host_and_port() {
        let mut config = Config::default();
        config
            .apply_overrides(|key| match key {
                "HELPMEANYTIME_HOST" => Some("127.0.0.1".to_string()),
                "HELPMEANYTIME_PORT" => Some("8081".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);

        let mut config = Config::default();
        config.apply_overrides(|_| None).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_invalid_port_override_is_an_error() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == "HELPMEANYTIME_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid HELPMEANYTIME_PORT: http"));

        let mut config = Config::default();
        assert!(config
            .apply_overrides(|key| (key == "HELPMEANYTIME_PORT").then(|| "70000".to_string()))
            .is_err());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Config::from_toml("[server\nport = ").is_err());
    }
}
