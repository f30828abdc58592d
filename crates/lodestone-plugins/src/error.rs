use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid plugin: {message}")]
    InvalidPlugin { message: String },
    #[error("missing entry symbol `{symbol}` in {path}")]
    MissingEntrySymbol {
        symbol: &'static str,
        path: PathBuf,
    },
    #[error("plugin `{path}` api_version mismatch: plugin={plugin}, host={host}")]
    ApiVersionMismatch {
        path: PathBuf,
        plugin: u32,
        host: u32,
    },
    #[error("invalid metadata_json_utf8 for plugin at {path}: {source}")]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{operation} failed: {details}")]
    Operation {
        operation: &'static str,
        details: String,
    },
    #[error(transparent)]
    Library(#[from] libloading::Error),
}

impl Error {
    pub fn invalid_plugin(message: impl Into<String>) -> Self {
        Self::InvalidPlugin {
            message: message.into(),
        }
    }

    pub fn operation(operation: &'static str, details: impl Into<String>) -> Self {
        Self::Operation {
            operation,
            details: details.into(),
        }
    }
}
