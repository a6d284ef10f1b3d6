mod app_config;

pub use app_config::{
    AppConfig, DatabaseConfig, LogFormat, LoggingConfig, ServerConfig, SessionConfig,
    StorageBackend, DEFAULT_SESSION_SECRET,
};
