//! Error types for Pantry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Empty response from AI")]
    EmptyResponse,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
