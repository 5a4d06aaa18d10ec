pub mod app_config;
pub mod config;
pub mod record;
pub mod resorts;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::ResortRecord;
pub use resorts::{load_resorts, ResortTarget, ResortsFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read resorts file {path}: {source}")]
    ResortsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse resorts file: {0}")]
    ResortsFileParse(#[from] serde_yaml::Error),

    #[error("resorts file validation failed: {0}")]
    Validation(String),
}
