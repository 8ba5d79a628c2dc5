// filepath: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("can't open display {display}: {source}")]
    Connect {
        display: String,
        #[source]
        source: xcb::ConnError,
    },

    #[error("can't query window tree of {window}: {reason}")]
    QueryTree { window: String, reason: String },

    #[error("lost connection to the X server: {0}")]
    Connection(String),

    #[error("pointer request failed: {0}")]
    Pointer(String),

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
