use thiserror::Error;

use crate::{LD_ERR_INTERNAL, LD_ERR_INVALID_ARG, LD_ERR_UNSUPPORTED};

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("host vtable unavailable")]
    HostUnavailable,
    #[error("host callback `{0}` unavailable")]
    HostCallbackUnavailable(&'static str),
    #[error("{operation} failed (code={code}){details}")]
    HostOperationFailed {
        operation: &'static str,
        code: i32,
        /// Either empty or `": <host message>"`.
        details: String,
    },
    #[error("invalid argument: {0}")]
    InvalidArg(String),
    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

impl SdkError {
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        Self::InvalidArg(message.into())
    }

    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Status code reported across the ABI for this error.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::HostCallbackUnavailable(_) => LD_ERR_UNSUPPORTED,
            Self::InvalidArg(_) => LD_ERR_INVALID_ARG,
            _ => LD_ERR_INTERNAL,
        }
    }
}

impl From<String> for SdkError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for SdkError {
    fn from(value: &str) -> Self {
        Self::Message(value.to_string())
    }
}
