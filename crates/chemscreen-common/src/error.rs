use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChemscreenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ChemscreenError>;
