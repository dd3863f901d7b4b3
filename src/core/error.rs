use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    #[error("Invalid field dimensions: {depth}x{width}")]
    InvalidDimensions { depth: usize, width: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
