use serde::Deserialize;

use std::{env, fmt, fs, path::Path, time::Duration};

/// Name of the variable pointing at an optional YAML config file.
pub const CONFIG_PATH_VAR: &str = "EMAIL_SERVICE_CONFIG";

#[derive(Clone, Deserialize)]
pub struct Config {
    pub owner_email: String,
    pub email_password: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_smtp_timeout", with = "humantime_serde")]
    pub smtp_timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("EMAIL_PASSWORD must be set to a non-empty value")]
    MissingSecret,

    #[error("Owner email '{address}' is not a valid address: {source}")]
    InvalidOwner {
        address: String,
        source: lettre::address::AddressError,
    },

    #[error("SMTP timeout must be greater than zero")]
    InvalidTimeout,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

const fn default_smtp_port() -> u16 {
    587
}

const fn default_port() -> u16 {
    5000
}

const fn default_smtp_timeout() -> Duration {
    Duration::from_secs(10)
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("owner_email", &self.owner_email)
            .field("email_password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("port", &self.port)
            .field("smtp_timeout", &self.smtp_timeout)
            .finish()
    }
}

impl Config {
    /// Reads `OWNER_EMAIL`, `EMAIL_PASSWORD`, `SMTP_HOST`, `SMTP_PORT`, `PORT`
    /// and `SMTP_TIMEOUT` from the given key/value pairs.
    pub fn from_env_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Checks the invariants the server relies on at start-up.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email_password.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        self.owner_email
            .parse::<lettre::Address>()
            .map_err(|source| ConfigError::InvalidOwner {
                address: self.owner_email.clone(),
                source,
            })?;

        if self.smtp_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(())
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config = match env::var(CONFIG_PATH_VAR) {
        Ok(path) if Path::new(&path).exists() => {
            tracing::info!("Loading email service config from '{}'", path);
            let contents = fs::read_to_string(&path)?;
            Config::from_yaml_str(&contents)?
        }
        Ok(path) => {
            tracing::warn!(
                "Config file '{}' not found, falling back to environment variables",
                path
            );
            Config::from_env_vars(env::vars())?
        }
        Err(_) => {
            tracing::info!("Loading email service config from environment variables");
            Config::from_env_vars(env::vars())?
        }
    };

    config.validate()?;
    Ok(config)
}
