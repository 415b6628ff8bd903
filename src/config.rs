use crate::domain::DeltaPolicy;
use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub admin_token: String,
    pub delta_policy: DeltaPolicy,
    pub pot_history_limit: i64,
    pub seed_sample_data: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("5000")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .unwrap_or_else(|| "poker_tracker.db".to_string());

        let admin_token = env_map
            .get("ADMIN_TOKEN")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("ADMIN_TOKEN".to_string()))?;
        if admin_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "ADMIN_TOKEN".to_string(),
                "must not be blank".to_string(),
            ));
        }

        let delta_policy = if parse_flag(&env_map, "ALLOW_ZERO_POINTS")? {
            DeltaPolicy::AllowZero
        } else {
            DeltaPolicy::RejectZero
        };

        let pot_history_limit = env_map
            .get("POT_HISTORY_LIMIT")
            .map(|s| s.as_str())
            .unwrap_or("200")
            .parse::<i64>()
            .ok()
            .filter(|limit| *limit >= 1)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "POT_HISTORY_LIMIT".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let seed_sample_data = parse_flag(&env_map, "SEED_SAMPLE_DATA")?;

        Ok(Config {
            host,
            port,
            database_path,
            admin_token,
            delta_policy,
            pot_history_limit,
            seed_sample_data,
        })
    }
}

fn parse_flag(env_map: &HashMap<String, String>, key: &str) -> Result<bool, ConfigError> {
    match env_map
        .get(key)
        .map(|s| s.trim().to_ascii_lowercase())
        .as_deref()
    {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(other) => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("must be true or false, got {}", other),
        )),
    }
}
