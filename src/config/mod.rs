use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Deployment stage, read from `ADMISSION_ENV` and echoed in startup logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the service reads from its environment: where to bind and how
/// verbosely to log. The scoring tables themselves are compiled in.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub log_level: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&env_or("ADMISSION_ENV", "development"));
        let host = env_or("ADMISSION_HOST", "127.0.0.1");

        let port_raw = env_or("ADMISSION_PORT", "8088");
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::Port { value: port_raw })?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            log_level: env_or("ADMISSION_LOG", "info"),
        })
    }
}

/// HTTP listener binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        // "localhost" is accepted as a convenience spelling of the loopback
        // address; anything else must be a literal IP.
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host.parse().map_err(|source| ConfigError::Host {
                value: self.host.clone(),
                source,
            })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Port { value: String },
    Host {
        value: String,
        source: std::net::AddrParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Port { value } => {
                write!(f, "ADMISSION_PORT '{value}' is not a valid port number")
            }
            ConfigError::Host { value, .. } => {
                write!(f, "ADMISSION_HOST '{value}' is neither an IP address nor 'localhost'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Port { .. } => None,
            ConfigError::Host { source, .. } => Some(source),
        }
    }
}
