use thiserror::Error;

#[derive(Error, Debug)]
pub enum SatchelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to decode resource '{resource}': {message}")]
    Decode { resource: String, message: String },
    #[error("Failed to encode '{resource}': {message}")]
    Encode { resource: String, message: String },
    #[error("Can't find bundle for base name '{base_name}', locale {locale}")]
    BundleNotFound { base_name: String, locale: String },
    #[error("Config key '{key}' is not present in '{resource}'")]
    UnknownKey { key: String, resource: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Plugin error: {0}")]
    Plugin(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for SatchelError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        SatchelError::Plugin(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SatchelError>;
