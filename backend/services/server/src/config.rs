use std::env;
use std::fmt::Display;
use std::str::FromStr;

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub database_url: Option<String>,
    pub admin: Option<AdminSeed>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = optional("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let admin = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                name: optional("ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8000".to_string()),
            jwt_secret,
            jwt_ttl_hours: parse_or("JWT_TTL_HOURS", 24)?,
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            database_url: optional("DATABASE_URL"),
            admin,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match optional(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
