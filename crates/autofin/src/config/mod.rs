use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::financing::{DefaultFinancing, FinancingKind, FinancingOption, MAX_TERM_MONTHS};

/// Distinguishes runtime behavior for different stages of the service.
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
    pub financing: FinancingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            financing: FinancingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
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

/// Quote terms offered when a buyer has not customised them, and an optional
/// catalog file replacing the built-in vehicle list.
#[derive(Debug, Clone, Default)]
pub struct FinancingConfig {
    pub defaults: DefaultFinancing,
    pub catalog_path: Option<PathBuf>,
}

impl FinancingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let lease = FinancingOption::default_lease();
        let finance = FinancingOption::default_finance();

        let defaults = DefaultFinancing {
            lease: FinancingOption::new(
                FinancingKind::Lease,
                env_number("APP_LEASE_TERM_MONTHS", lease.term_months)?,
                env_number("APP_LEASE_DOWN_PAYMENT", lease.down_payment)?,
                env_number("APP_LEASE_RATE", lease.annual_interest_rate_percent)?,
            ),
            finance: FinancingOption::new(
                FinancingKind::Finance,
                env_number("APP_FINANCE_TERM_MONTHS", finance.term_months)?,
                env_number("APP_FINANCE_DOWN_PAYMENT", finance.down_payment)?,
                env_number("APP_FINANCE_RATE", finance.annual_interest_rate_percent)?,
            ),
        };

        for option in [&defaults.lease, &defaults.finance] {
            if option.term_months == 0 || option.term_months > MAX_TERM_MONTHS {
                return Err(ConfigError::InvalidFinancing {
                    key: match option.kind {
                        FinancingKind::Lease => "APP_LEASE_TERM_MONTHS",
                        FinancingKind::Finance => "APP_FINANCE_TERM_MONTHS",
                    },
                    value: option.term_months.to_string(),
                });
            }
        }

        let catalog_path = env::var("APP_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            defaults,
            catalog_path,
        })
    }
}

fn env_number<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidFinancing { key, value }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFinancing { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFinancing { key, value } => {
                write!(f, "{key} has an invalid value `{value}`")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidFinancing { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    const KEYS: [&str; 11] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "APP_LEASE_TERM_MONTHS",
        "APP_LEASE_DOWN_PAYMENT",
        "APP_LEASE_RATE",
        "APP_FINANCE_TERM_MONTHS",
        "APP_FINANCE_DOWN_PAYMENT",
        "APP_FINANCE_RATE",
        "APP_CATALOG_PATH",
    ];

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in KEYS {
            env::remove_var(key);
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
        assert_eq!(config.financing.defaults, DefaultFinancing::default());
        assert!(config.financing.catalog_path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn financing_defaults_follow_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LEASE_TERM_MONTHS", "24");
        env::set_var("APP_FINANCE_RATE", "4.25");
        env::set_var("APP_CATALOG_PATH", "data/dealer.csv");

        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.financing.defaults.lease.term_months, 24);
        assert_eq!(config.financing.defaults.lease.down_payment, 3000.0);
        assert_eq!(
            config.financing.defaults.finance.annual_interest_rate_percent,
            4.25
        );
        assert_eq!(
            config.financing.catalog_path,
            Some(PathBuf::from("data/dealer.csv"))
        );
        reset_env();
    }

    #[test]
    fn rejects_unparseable_or_out_of_range_terms() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_FINANCE_DOWN_PAYMENT", "lots");
        let err = AppConfig::load().expect_err("bad number rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidFinancing {
                key: "APP_FINANCE_DOWN_PAYMENT",
                ..
            }
        ));

        reset_env();
        env::set_var("APP_LEASE_TERM_MONTHS", "0");
        let err = AppConfig::load().expect_err("zero term rejected");
        assert_eq!(err.to_string(), "APP_LEASE_TERM_MONTHS has an invalid value `0`");

        reset_env();
        env::set_var("APP_FINANCE_TERM_MONTHS", "5000");
        let err = AppConfig::load().expect_err("oversized term rejected");
        assert_eq!(
            err.to_string(),
            "APP_FINANCE_TERM_MONTHS has an invalid value `5000`"
        );
        reset_env();
    }

    #[test]
    fn environment_aliases() {
        assert_eq!(AppEnvironment::from_str("PROD"), AppEnvironment::Production);
        assert_eq!(AppEnvironment::from_str(" ci "), AppEnvironment::Test);
        assert_eq!(AppEnvironment::from_str("staging"), AppEnvironment::Development);
    }
}
