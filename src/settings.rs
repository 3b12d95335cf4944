use config::{Config, ConfigError, Environment, File};
use derive_more::Display;
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Which configuration provider ended up supplying the store credentials.
/// Resolved exactly once at startup and logged; the rest of the system only
/// sees the resolved value.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default, Display)]
pub enum CredentialsSource {
    #[display("environment")]
    Environment,
    #[display("local config file")]
    LocalFile,
    #[default]
    #[display("missing")]
    Missing,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Connection string for the shared profile store. May be empty: the
    /// server then starts in a degraded mode where only the shell responds.
    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Placeholder identity used when a request carries no identity header.
    #[serde(default = "default_user_id")]
    pub default_user_id: String,

    /// Identity allowed to edit any profile.
    #[serde(default = "default_user_id")]
    pub admin_user_id: String,

    #[serde(skip)]
    pub credentials_source: CredentialsSource,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "CVBank-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_user_id() -> String {
    "admin_456".to_string()
}

/// Identity placeholders handed to the identity middleware. Swapping in real
/// authentication replaces the middleware, not this shape.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub default_user_id: String,
    pub admin_user_id: String,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        IdentitySettings {
            default_user_id: default_user_id(),
            admin_user_id: default_user_id(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Resolve the store credential provider once, in order: environment
        // variable, then whatever the config files supplied.
        let env_url = env::var("APP_DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        config.credentials_source = match env_url {
            Some(url) => {
                config.database_url = url;
                CredentialsSource::Environment
            }
            None if !config.database_url.trim().is_empty() => CredentialsSource::LocalFile,
            None => CredentialsSource::Missing,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.default_user_id.trim().is_empty() {
            errors.push("DEFAULT_USER_ID cannot be empty");
        }
        if self.admin_user_id.trim().is_empty() {
            errors.push("ADMIN_USER_ID cannot be empty");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    /// The resolved store connection string, `None` when no provider
    /// supplied one.
    pub fn store_credentials(&self) -> Option<&str> {
        let url = self.database_url.trim();
        if url.is_empty() { None } else { Some(url) }
    }

    pub fn identity_settings(&self) -> IdentitySettings {
        IdentitySettings {
            default_user_id: self.default_user_id.clone(),
            admin_user_id: self.admin_user_id.clone(),
        }
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() { "[MISSING]" } else { "[REDACTED]" }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("credentials_source", &self.credentials_source)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("default_user_id", &self.default_user_id)
            .field("admin_user_id", &self.admin_user_id)
            .finish()
    }
}
