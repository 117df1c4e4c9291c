//! Configuration for the Shop API

use axum_helpers::JwtConfig;
use core_config::{
    app_info, env_flag, env_or_default, env_parse_or, server::ServerConfig, AppInfo, ConfigError,
    FromEnv,
};
use database::mongodb::MongoConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Largest accepted image upload unless `MAX_UPLOAD_BYTES` says otherwise (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Where uploaded product images live and how large they may be.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl FromEnv for UploadConfig {
    /// - `UPLOADS_DIR` (default: `uploads`)
    /// - `MAX_UPLOAD_BYTES` (default: 10485760)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dir: PathBuf::from(env_or_default("UPLOADS_DIR", "uploads")),
            max_bytes: env_parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub uploads: UploadConfig,
    /// Guard `POST /api/users/promote` behind an admin token
    pub promote_requires_admin: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(env!("CARGO_PKG_NAME"));
        }
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let uploads = UploadConfig::from_env()?;
        let promote_requires_admin = env_flag("PROMOTE_REQUIRES_ADMIN", false)?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            jwt,
            uploads,
            promote_requires_admin,
        })
    }
}
