use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::suggestions::FileProfile;

/// Raised when shared editor state is requested outside the scope that provides it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("editor context is not provisioned (attempted to {operation}); provide a workspace before use")]
    NotProvisioned { operation: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse suggestion catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("suggestion catalog has no entries for the {0:?} profile")]
    EmptySet(FileProfile),
}
