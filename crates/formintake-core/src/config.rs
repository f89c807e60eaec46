//! Configuration module
//!
//! This module provides configuration for the form service: HTTP server,
//! database connection, and file intake settings.

use std::env;

// Common constants
const SERVER_PORT: u16 = 45;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DATABASE_URL: &str = "postgresql://localhost:5432/form";
const UPLOADS_DIR: &str = "uploads";
const UPLOADS_URL_PREFIX: &str = "/uploads";
const PUBLIC_DIR: &str = "public";
const MAX_UPLOAD_SIZE_MB: usize = 10;

/// Base configuration shared by HTTP services
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Form service configuration
#[derive(Clone, Debug)]
pub struct FormServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
    // File intake
    pub uploads_dir: String,
    pub uploads_url_prefix: String,
    pub public_dir: String,
    pub max_upload_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<FormServiceConfig>);

impl Config {
    fn as_form(&self) -> &FormServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_form().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = FormServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_form().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_form().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_form().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_form().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_form().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_form().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> &str {
        &self.as_form().database_url
    }

    pub fn uploads_dir(&self) -> &str {
        &self.as_form().uploads_dir
    }

    pub fn uploads_url_prefix(&self) -> &str {
        &self.as_form().uploads_url_prefix
    }

    pub fn public_dir(&self) -> &str {
        &self.as_form().public_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_form().max_upload_size_bytes
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

impl FormServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        };

        let config = FormServiceConfig {
            base,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string()),
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| UPLOADS_DIR.to_string()),
            uploads_url_prefix: env::var("UPLOADS_URL_PREFIX")
                .unwrap_or_else(|_| UPLOADS_URL_PREFIX.to_string()),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| PUBLIC_DIR.to_string()),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than 0"));
        }

        if !self.database_url.starts_with("postgresql://")
            && !self.database_url.starts_with("postgres://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.uploads_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("UPLOADS_DIR must not be empty"));
        }

        if !self.uploads_url_prefix.starts_with('/')
            || self.uploads_url_prefix.trim_end_matches('/').is_empty()
        {
            return Err(anyhow::anyhow!(
                "UPLOADS_URL_PREFIX must start with '/' and name a sub-path (e.g. /uploads)"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        Ok(())
    }
}
