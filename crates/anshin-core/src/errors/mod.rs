mod config_error;
mod pipeline_error;
mod source_error;
mod storage_error;

pub use config_error::ConfigError;
pub use pipeline_error::PipelineError;
pub use source_error::SourceError;
pub use storage_error::StorageError;

/// Root error type for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum AnshinError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("source error: {0}")]
    SourceError(#[from] SourceError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("pipeline error: {0}")]
    PipelineError(#[from] PipelineError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

pub type AnshinResult<T> = Result<T, AnshinError>;
