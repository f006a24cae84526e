use thiserror::Error;

#[derive(Error, Debug)]
pub enum RolodexError {
    #[error("Contact name cannot be empty")]
    InvalidName,

    #[error("Invalid phone number '{0}': expected 10-15 digits")]
    InvalidPhone(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Contact '{0}' already exists")]
    AlreadyExists(String),

    #[error("Contact '{0}' not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RolodexError>;
