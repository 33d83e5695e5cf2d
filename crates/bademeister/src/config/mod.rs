use crate::auction::{AuctionCalendar, InvalidWeeklyMoment, WeeklyMoment};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Endpoint of the group's spreadsheet script.
pub const DEFAULT_API_URL: &str = "https://script.google.com/macros/s/AKfycbwNztV3o25lGbDdCX8ziUI6ruJPuY6XcPcfJPHV3qiKMGyjf5q4RkGlOzbxt4xsYGQD/exec";
pub const DEFAULT_PASSWORD: &str = "Sieger";
pub const DEFAULT_KEY_PREFIX: &str = "tb";
pub const DEFAULT_PORTRAIT_HOST: &str = "wikipedia.org";
pub const DEFAULT_DEADLINE: &str = "thu 23:00";
pub const DEFAULT_RESET: &str = "fri 15:00";

/// Distinguishes runtime behavior for different stages of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub auction: AuctionConfig,
    pub portraits: PortraitConfig,
    pub store: StoreConfig,
    pub calendar: AuctionCalendar,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&var_or("BADEMEISTER_ENV", "development"));

        let host = var_or("BADEMEISTER_HOST", "127.0.0.1");
        let port = var_or("BADEMEISTER_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = var_or("BADEMEISTER_LOG_LEVEL", "info");

        let timeout = Duration::from_secs(parse_seconds("BADEMEISTER_HTTP_TIMEOUT_SECS", 10)?);
        let poll_interval = Duration::from_secs(parse_seconds("BADEMEISTER_POLL_SECS", 30)?);

        let key_prefix = var_or("BADEMEISTER_KEY_PREFIX", DEFAULT_KEY_PREFIX);

        let calendar = AuctionCalendar {
            deadline: parse_moment("BADEMEISTER_DEADLINE", DEFAULT_DEADLINE)?,
            reset: parse_moment("BADEMEISTER_RESET", DEFAULT_RESET)?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            auction: AuctionConfig {
                api_url: var_or("BADEMEISTER_API_URL", DEFAULT_API_URL),
                default_password: var_or("BADEMEISTER_PASSWORD", DEFAULT_PASSWORD),
                timeout,
                poll_interval,
            },
            portraits: PortraitConfig {
                host: var_or("BADEMEISTER_PORTRAIT_HOST", DEFAULT_PORTRAIT_HOST),
                timeout,
            },
            store: StoreConfig {
                path: PathBuf::from(var_or("BADEMEISTER_STORE_PATH", ".bademeister/store.json")),
                key_prefix,
            },
            calendar,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_seconds(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Err(ConfigError::InvalidSeconds { name, value: raw }),
        },
        Err(_) => Ok(default),
    }
}

fn parse_moment(name: &'static str, default: &str) -> Result<WeeklyMoment, ConfigError> {
    var_or(name, default)
        .parse()
        .map_err(|source| ConfigError::InvalidSchedule { name, source })
}

/// Settings controlling the local HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Remote auction service endpoint and credentials.
#[derive(Debug, Clone)]
pub struct AuctionConfig {
    pub api_url: String,
    pub default_password: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

/// Portrait source settings.
#[derive(Debug, Clone)]
pub struct PortraitConfig {
    /// Host suffix; requests go to `{locale}.{host}`.
    pub host: String,
    pub timeout: Duration,
}

/// Location of the persistent key-value store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub key_prefix: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSeconds { name: &'static str, value: String },
    InvalidSchedule { name: &'static str, source: InvalidWeeklyMoment },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "BADEMEISTER_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "BADEMEISTER_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSeconds { name, value } => {
                write!(f, "{name} must be a positive number of seconds, got '{value}'")
            }
            ConfigError::InvalidSchedule { name, source } => write!(f, "{name}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidSeconds { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidSchedule { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::{AuctionCalendar, InvalidWeeklyMoment, WeeklyMoment};
use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "BADEMEISTER_ENV",
            "BADEMEISTER_HOST",
            "BADEMEISTER_PORT",
            "BADEMEISTER_LOG_LEVEL",
            "BADEMEISTER_API_URL",
            "BADEMEISTER_PASSWORD",
            "BADEMEISTER_STORE_PATH",
            "BADEMEISTER_KEY_PREFIX",
            "BADEMEISTER_PORTRAIT_HOST",
            "BADEMEISTER_HTTP_TIMEOUT_SECS",
            "BADEMEISTER_POLL_SECS",
            "BADEMEISTER_DEADLINE",
            "BADEMEISTER_RESET",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.auction.api_url, DEFAULT_API_URL);
        assert_eq!(config.auction.default_password, "Sieger");
        assert_eq!(config.auction.poll_interval, Duration::from_secs(30));
        assert_eq!(config.portraits.host, "wikipedia.org");
        assert_eq!(config.portraits.timeout, Duration::from_secs(10));
        assert_eq!(config.store.key_prefix, "tb");
        assert_eq!(config.store.path, PathBuf::from(".bademeister/store.json"));
        assert_eq!(config.calendar, AuctionCalendar::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BADEMEISTER_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BADEMEISTER_POLL_SECS", "0");
        let err = AppConfig::load().expect_err("zero interval rejected");
        assert!(err.to_string().contains("BADEMEISTER_POLL_SECS"));
        reset_env();
    }

    #[test]
    fn production_environment_and_prefix_override() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BADEMEISTER_ENV", "prod");
        env::set_var("BADEMEISTER_KEY_PREFIX", "tb2");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.store.key_prefix, "tb2");
        reset_env();
    }

    #[test]
    fn calendar_moments_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BADEMEISTER_DEADLINE", "sat 18:30");
        env::set_var("BADEMEISTER_RESET", "Monday 09:00");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.calendar.deadline,
            "sat 18:30".parse::<WeeklyMoment>().expect("moment")
        );
        assert_eq!(config.calendar.reset.time.to_string(), "09:00:00");
        reset_env();
    }

    #[test]
    fn rejects_unreadable_deadline() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("BADEMEISTER_DEADLINE", "donnerstag 23 Uhr");
        let err = AppConfig::load().expect_err("bad deadline rejected");
        assert!(err.to_string().starts_with("BADEMEISTER_DEADLINE"));
        reset_env();
    }
}
