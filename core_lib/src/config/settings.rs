use crate::{error::AppError, submission::DEFAULT_FAULT_SENTINEL};
use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub submission: SubmissionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Request bodies above this size are answered with 413.
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub fault_injection: bool,
    pub fault_sentinel: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
            submission: SubmissionConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            fault_injection: true,
            fault_sentinel: DEFAULT_FAULT_SENTINEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` if it exists, then `APP_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        Self::load_from(path.exists().then_some(path))
    }

    /// Nested keys in environment variables use a double underscore, e.g.
    /// `APP_SERVER__PORT=8080` or `APP_SUBMISSION__FAULT_INJECTION=false`.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(file, environment())
    }

    fn load_with_env(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(env);

        let app_config: AppConfig = builder.build()?.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Message(
                "Server max_body_bytes cannot be 0".to_string(),
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Message("Server host cannot be empty".to_string()));
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Message(format!(
                "Unknown log level '{}'",
                self.logging.level
            )));
        }

        for origin in &self.cors.allowed_origins {
            if origin != "*" && origin.parse::<HeaderValue>().is_err() {
                return Err(ConfigError::Message(format!(
                    "Invalid CORS origin '{}'",
                    origin
                )));
            }
        }

        if self.submission.fault_injection && self.submission.fault_sentinel.is_empty() {
            return Err(ConfigError::Message(
                "Fault sentinel cannot be empty while fault injection is enabled".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn socket_addr(&self) -> crate::Result<SocketAddr> {
        self.bind_address()
            .parse()
            .map_err(|_| AppError::InvalidAddress(self.bind_address()))
    }
}

fn environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.submission.fault_injection);
        assert_eq!(config.submission.fault_sentinel, "error");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.server.port = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.server.max_body_bytes = 0;
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.server.host = " ".to_string();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.cors.allowed_origins = vec!["http://bad\norigin".to_string()];
        assert!(config.validate().is_err());

        config = AppConfig::default();
        config.submission.fault_sentinel = String::new();
        assert!(config.validate().is_err());

        config.submission.fault_injection = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.socket_addr().unwrap().port(), 3000);

        let mut config = AppConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(config.bind_address(), "0.0.0.0:8080");

        config.server.host = "not a host".to_string();
        assert!(matches!(config.socket_addr(), Err(AppError::InvalidAddress(_))));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8081

[logging]
format = "json"

[cors]
allowed_origins = ["*"]

[submission]
fault_injection = false
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).expect("Should load config file");

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert!(!config.submission.fault_injection);
    }

    #[test]
    fn test_invalid_config_file_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        assert!(AppConfig::load_from(Some(file.path())).is_err());
    }

    #[test]
    fn test_environment_variable_support() {
        let config = AppConfig::load_from(None).expect("Should load configuration");

        assert!(!config.server.host.is_empty());
        assert!(config.server.port > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        let mut vars = config::Map::new();
        vars.insert("APP_SERVER__PORT".to_string(), "8088".to_string());
        vars.insert("APP_SERVER__MAX_BODY_BYTES".to_string(), "4096".to_string());
        vars.insert("APP_SUBMISSION__FAULT_SENTINEL".to_string(), "explode".to_string());
        vars.insert("APP_SUBMISSION__FAULT_INJECTION".to_string(), "false".to_string());

        let config = AppConfig::load_with_env(None, environment().source(Some(vars)))
            .expect("Should load configuration");

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.max_body_bytes, 4096);
        assert_eq!(config.submission.fault_sentinel, "explode");
        assert!(!config.submission.fault_injection);
    }
}
