use thiserror::Error;

/// Errors produced anywhere in Time Weaver. Every failure is absorbed at an
/// orchestrator boundary; none of these ever crash the application.
#[derive(Debug, Error)]
pub enum TimeWeaverError {
    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("input error: {0}")]
    Input(String),
}

impl TimeWeaverError {
    pub fn gateway_error(msg: impl Into<String>) -> Self {
        TimeWeaverError::Gateway(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        TimeWeaverError::Config(msg.into())
    }

    pub fn image_error(msg: impl Into<String>) -> Self {
        TimeWeaverError::Image(msg.into())
    }

    pub fn input_error(msg: impl Into<String>) -> Self {
        TimeWeaverError::Input(msg.into())
    }
}

pub type TimeWeaverResult<T> = Result<T, TimeWeaverError>;
