use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Materialize error: {0}")]
    MaterializeError(String),

    #[error("VCS error: {0}")]
    VcsError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Listing error: {0}")]
    ListingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Plugin error: {0}")]
    PluginError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn materialize(msg: impl Into<String>) -> Self {
        Self::MaterializeError(msg.into())
    }

    pub fn vcs(msg: impl Into<String>) -> Self {
        Self::VcsError(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    pub fn listing(msg: impl Into<String>) -> Self {
        Self::ListingError(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn plugin(msg: impl Into<String>) -> Self {
        Self::PluginError(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn is_materialize_error(&self) -> bool {
        matches!(self, Self::MaterializeError(_))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::StorageError(_))
    }
}
