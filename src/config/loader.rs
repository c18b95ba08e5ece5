use crate::config::config::{AppConfig, DatabaseBackend};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀，层级用 `__` 分隔，如 `PERSON_SERVER__PORT`
pub const ENV_PREFIX: &str = "PERSON_";

/// 兼容的数据库连接串变量
pub const DSN_ENV: &str = "DB_DSN";

/// 选择默认配置档的环境变量
pub const ENVIRONMENT_ENV: &str = "PERSON_ENVIRONMENT";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 按 `PERSON_ENVIRONMENT` 选择的默认配置档
    /// 2. ./config.toml, ./config.yaml
    /// 3. `PERSON_` 前缀环境变量
    /// 4. `DB_DSN`
    pub fn load() -> Result<AppConfig, figment::Error> {
        dotenvy::dotenv().ok();
        let toml_path = default_config_path();
        let figment = Self::defaults()
            .merge(Toml::file(&toml_path))
            .merge(Yaml::file(toml_path.with_extension("yaml")));

        Self::extract(Self::with_env(figment))
    }

    /// 从指定路径加载配置
    pub fn load_from(path: &Path) -> Result<AppConfig, figment::Error> {
        dotenvy::dotenv().ok();
        let base = Self::defaults();
        let figment = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => base.merge(Yaml::file(path)),
            _ => base.merge(Toml::file(path)),
        };

        Self::extract(Self::with_env(figment))
    }

    /// 当前环境的默认配置档
    fn defaults() -> Figment {
        let environment = std::env::var(ENVIRONMENT_ENV).unwrap_or_default();
        Self::profile(&environment)
    }

    /// 指定环境的默认配置档
    pub fn profile(environment: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::for_environment(environment)))
    }

    /// 叠加环境变量
    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&[DSN_ENV]).map(|_| "database.url".into()))
    }

    /// 提取配置
    pub fn extract(figment: Figment) -> Result<AppConfig, figment::Error> {
        figment.extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.server.request_timeout == 0 {
            return Err(ConfigValidationError::InvalidTimeout("server.request_timeout"));
        }

        if config.database.backend == DatabaseBackend::Postgres {
            if config.database.url.trim().is_empty() {
                return Err(ConfigValidationError::MissingDatabaseUrl);
            }
            if config.database.connection_timeout == 0 {
                return Err(ConfigValidationError::InvalidTimeout(
                    "database.connection_timeout",
                ));
            }
            if config.database.max_connections == 0
                || config.database.min_connections > config.database.max_connections
            {
                return Err(ConfigValidationError::InvalidPoolSize {
                    min: config.database.min_connections,
                    max: config.database.max_connections,
                });
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("server port must be greater than 0")]
    InvalidPort,

    #[error("database url is not configured (set database.url or DB_DSN)")]
    MissingDatabaseUrl,

    #[error("{0} must be greater than 0")]
    InvalidTimeout(&'static str),

    #[error("invalid connection pool size: min={min}, max={max}")]
    InvalidPoolSize { min: u32, max: u32 },
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
