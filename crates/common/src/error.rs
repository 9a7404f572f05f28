use thiserror::Error;

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Convert anyhow errors to SafetyError
impl From<anyhow::Error> for SafetyError {
    fn from(err: anyhow::Error) -> Self {
        SafetyError::Unknown(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SafetyError>;
