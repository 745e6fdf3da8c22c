use crate::error::{AppError, AppResult};
use serde::Deserialize;

const PLACEHOLDER_JWT_SECRET: &str = "your-secret-key";
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Process configuration, read from the environment (and `.env`). Every
/// field maps to the upper-cased variable of the same name.
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    /// Seconds to wait for a pooled connection.
    #[serde(default = "default_connection_timeout")]
    pub database_connection_timeout: u64,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    /// Comma-separated; `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_expires")]
    pub jwt_access_token_expires_in: u64,
    #[serde(default = "default_refresh_token_expires")]
    pub jwt_refresh_token_expires_in: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// `json` or `pretty`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

/// Signing key and lifetimes handed to the token service.
#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub jwt_secret: String,
    pub access_token_expires_in: u64,
    pub refresh_token_expires_in: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connection_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}
fn default_access_token_expires() -> u64 {
    3600
}
fn default_refresh_token_expires() -> u64 {
    7 * 24 * 3600
}
fn default_bcrypt_cost() -> u32 {
    12
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::checked(envy::from_env::<Config>())
    }

    /// Same as [`Config::from_env`] over an explicit set of variables.
    pub fn from_pairs<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::checked(envy::from_iter::<_, Config>(vars))
    }

    fn checked(loaded: Result<Config, envy::Error>) -> AppResult<Self> {
        let config = loaded.map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        let problem = if self.database_max_connections == 0 {
            "DATABASE_MAX_CONNECTIONS must be > 0"
        } else if self.database_min_connections > self.database_max_connections {
            "DATABASE_MIN_CONNECTIONS cannot be greater than DATABASE_MAX_CONNECTIONS"
        } else if self.jwt_secret.is_empty() || self.jwt_secret == PLACEHOLDER_JWT_SECRET {
            "JWT_SECRET must be set to a secure value"
        } else if self.jwt_access_token_expires_in == 0 || self.jwt_refresh_token_expires_in == 0 {
            "JWT token lifetimes must be > 0"
        } else if !BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            "BCRYPT_COST must be between 4 and 31"
        } else {
            return Ok(());
        };
        Err(AppError::Config(problem.to_string()))
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn tokens(&self) -> TokenConfig {
        TokenConfig {
            jwt_secret: self.jwt_secret.clone(),
            access_token_expires_in: self.jwt_access_token_expires_in,
            refresh_token_expires_in: self.jwt_refresh_token_expires_in,
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
        }
    }
}
