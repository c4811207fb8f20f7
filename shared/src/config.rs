use anyhow::{Context, Result};
use std::str::FromStr;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // 環境変数の取得元を差し替えられるようにしておく（テスト用）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = DatabaseConfig {
            host: required(&lookup, "DATABASE_HOST")?,
            port: parsed(&lookup, "DATABASE_PORT")?,
            username: required(&lookup, "DATABASE_USERNAME")?,
            password: required(&lookup, "DATABASE_PASSWORD")?,
            database: required(&lookup, "DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: required(&lookup, "REDIS_HOST")?,
            port: parsed(&lookup, "REDIS_PORT")?,
        };
        let auth = AuthConfig {
            ttl: parsed(&lookup, "AUTH_TOKEN_TTL")?,
        };
        let server = ServerConfig {
            port: match lookup("PORT") {
                Some(port) => port.parse().context("PORT must be a port number")?,
                None => DEFAULT_PORT,
            },
        };
        Ok(Self {
            database,
            redis,
            auth,
            server,
        })
    }
}

const DEFAULT_PORT: u16 = 8080;

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("environment variable {key} is not set"))
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    required(lookup, key)?
        .parse()
        .with_context(|| format!("environment variable {key} is malformed"))
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    // アクセストークンの有効期限（秒）
    pub ttl: u64,
}

pub struct ServerConfig {
    pub port: u16,
}
