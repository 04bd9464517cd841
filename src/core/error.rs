use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttritionError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config not found: {0}")]
    ConfigNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AttritionError>;
