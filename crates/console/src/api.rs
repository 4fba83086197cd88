//! Remote service contract consumed by the terminal.
//!
//! The terminal never talks HTTP itself. Whatever owns the transport (and the
//! bearer credential) implements [`ConsoleApi`] and is injected into the
//! dispatcher, which keeps the command core testable without a server.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub build_id: String,
    pub filename: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub uuid: String,
    pub build_id: String,
    pub timestamp: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub computer_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub city_name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BuildsResponse {
    #[serde(default)]
    pub builds: Vec<Build>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TriggerResponse {
    pub build_id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Http { status: u16 },
    #[error("session expired")]
    Unauthorized,
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-2xx status onto the error taxonomy; 401 is kept apart so the
    /// session owner can react to it.
    pub fn from_status(status: u16) -> Self {
        if status == 401 {
            ApiError::Unauthorized
        } else {
            ApiError::Http { status }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn fetch_builds(&self) -> ApiResult<BuildsResponse>;
    async fn fetch_logs(&self) -> ApiResult<LogsResponse>;
    async fn trigger_build(&self) -> ApiResult<TriggerResponse>;
    async fn download_build(&self, build_id: &str) -> ApiResult<Bytes>;
    async fn download_logs(&self, uuid: &str) -> ApiResult<Bytes>;
}

/// Decodes a JSON body the way transports hand it over.
pub fn decode_body<T: serde::de::DeserializeOwned>(body: &str) -> ApiResult<T> {
    Ok(serde_json::from_str(body)?)
}
