//! Error types for Clara.
//!
//! The query path is infallible by design: loading degrades to fewer entries
//! and matching falls back to the configured response. Errors only surface
//! from explicit strict operations such as reading a config file.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClaraError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
