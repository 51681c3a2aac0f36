use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub resources: ResourceConfig,
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
        let format = match environment {
            AppEnvironment::Production => LogFormat::Full,
            _ => LogFormat::Compact,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            resources: ResourceConfig {
                criteria_path: optional_path("CRITERIA_PATH"),
                dictionary_path: optional_path("DICTIONARY_PATH"),
                references_path: optional_path("REFERENCES_PATH"),
                data_dir: optional_path("DATA_DIR"),
            },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
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
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

/// Locations of the reference data. An explicit path must exist; otherwise
/// the data directory is searched before the built-in copy is used.
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    pub criteria_path: Option<PathBuf>,
    pub dictionary_path: Option<PathBuf>,
    pub references_path: Option<PathBuf>,
    /// Directory searched for the default file names. Defaults to the
    /// working directory.
    pub data_dir: Option<PathBuf>,
}

/// Fatal configuration problems. Any of these stops the service before it
/// accepts assessment requests.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    SourceUnavailable {
        resource: &'static str,
        source: std::io::Error,
    },
    NoSource {
        resource: &'static str,
    },
    MalformedCriteria(serde_json::Error),
    UnknownLevel(String),
    MissingField {
        level: String,
        field: &'static str,
    },
    InvalidRange {
        level: String,
        min: i64,
        max: i64,
    },
    Discontinuous {
        previous: String,
        previous_max: u8,
        next: String,
        next_min: u8,
    },
    NotCovering {
        lowest: u8,
        highest: u8,
    },
    EmptyCriteria,
    MalformedWordList(csv::Error),
    MalformedReferences(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::SourceUnavailable { resource, source } => {
                write!(f, "unable to read {resource}: {source}")
            }
            ConfigError::NoSource { resource } => {
                write!(f, "no configured source produced {resource}")
            }
            ConfigError::MalformedCriteria(err) => {
                write!(f, "proficiency criteria are not valid JSON: {err}")
            }
            ConfigError::UnknownLevel(key) => {
                write!(f, "unknown proficiency level key '{key}'")
            }
            ConfigError::MissingField { level, field } => {
                write!(f, "level '{level}' is missing required field '{field}'")
            }
            ConfigError::InvalidRange { level, min, max } => write!(
                f,
                "level '{level}' has invalid score range [{min}, {max}] (expected 0 <= min <= max <= 100)"
            ),
            ConfigError::Discontinuous {
                previous,
                previous_max,
                next,
                next_min,
            } => write!(
                f,
                "score ranges must be contiguous: '{previous}' ends at {previous_max} but '{next}' starts at {next_min}"
            ),
            ConfigError::NotCovering { lowest, highest } => write!(
                f,
                "score ranges cover [{lowest}, {highest}] instead of [0, 100]"
            ),
            ConfigError::EmptyCriteria => write!(f, "no proficiency levels are configured"),
            ConfigError::MalformedWordList(err) => {
                write!(f, "word frequency list is malformed: {err}")
            }
            ConfigError::MalformedReferences(err) => {
                write!(f, "reference phrases are not valid JSON: {err}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::SourceUnavailable { source, .. } => Some(source),
            ConfigError::MalformedCriteria(err) | ConfigError::MalformedReferences(err) => {
                Some(err)
            }
            ConfigError::MalformedWordList(err) => Some(err),
            _ => None,
        }
    }
}
