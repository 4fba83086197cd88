use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::api::{
    ApiError, ApiResult, Build, BuildsResponse, ConsoleApi, Log, LogsResponse, TriggerResponse,
};
use crate::dispatch::{EventReceiver, TerminalEvent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiCall {
    FetchBuilds,
    FetchLogs,
    TriggerBuild,
    DownloadBuild(String),
    DownloadLogs(String),
}

/// Scripted [`ConsoleApi`] that records every call. Unset responses default to
/// empty collections; downloads and triggers default to a network error.
#[derive(Default)]
pub(crate) struct MockApi {
    calls: Mutex<Vec<ApiCall>>,
    builds: Mutex<Option<ApiResult<BuildsResponse>>>,
    logs: Mutex<Option<ApiResult<LogsResponse>>>,
    trigger: Mutex<Option<ApiResult<TriggerResponse>>>,
    download: Mutex<Option<ApiResult<Bytes>>>,
}

impl MockApi {
    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn set_builds(&self, response: ApiResult<BuildsResponse>) {
        *self.builds.lock().expect("builds lock") = Some(response);
    }

    pub(crate) fn set_logs(&self, response: ApiResult<LogsResponse>) {
        *self.logs.lock().expect("logs lock") = Some(response);
    }

    pub(crate) fn set_trigger(&self, response: ApiResult<TriggerResponse>) {
        *self.trigger.lock().expect("trigger lock") = Some(response);
    }

    pub(crate) fn set_download(&self, response: ApiResult<Bytes>) {
        *self.download.lock().expect("download lock") = Some(response);
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

fn replay<T: Clone>(slot: &Mutex<Option<ApiResult<T>>>, fallback: ApiResult<T>) -> ApiResult<T> {
    match slot.lock().expect("response lock").as_ref() {
        Some(Ok(value)) => Ok(value.clone()),
        Some(Err(err)) => Err(clone_error(err)),
        None => fallback,
    }
}

fn clone_error(err: &ApiError) -> ApiError {
    match err {
        ApiError::Network(message) => ApiError::Network(message.clone()),
        ApiError::Http { status } => ApiError::Http { status: *status },
        ApiError::Unauthorized => ApiError::Unauthorized,
        ApiError::Decode(message) => ApiError::Decode(message.clone()),
    }
}

fn unreachable_service() -> ApiError {
    ApiError::Network("no response scripted".to_string())
}

#[async_trait]
impl ConsoleApi for MockApi {
    async fn fetch_builds(&self) -> ApiResult<BuildsResponse> {
        self.record(ApiCall::FetchBuilds);
        replay(&self.builds, Ok(BuildsResponse::default()))
    }

    async fn fetch_logs(&self) -> ApiResult<LogsResponse> {
        self.record(ApiCall::FetchLogs);
        replay(&self.logs, Ok(LogsResponse::default()))
    }

    async fn trigger_build(&self) -> ApiResult<TriggerResponse> {
        self.record(ApiCall::TriggerBuild);
        replay(&self.trigger, Err(unreachable_service()))
    }

    async fn download_build(&self, build_id: &str) -> ApiResult<Bytes> {
        self.record(ApiCall::DownloadBuild(build_id.to_string()));
        replay(&self.download, Err(unreachable_service()))
    }

    async fn download_logs(&self, uuid: &str) -> ApiResult<Bytes> {
        self.record(ApiCall::DownloadLogs(uuid.to_string()));
        replay(&self.download, Err(unreachable_service()))
    }
}

pub(crate) fn sample_build(build_id: &str) -> Build {
    Build {
        build_id: build_id.to_string(),
        filename: format!("app-{build_id}"),
        timestamp: "2024-05-01T10:30:00Z".to_string(),
    }
}

pub(crate) fn sample_log(uuid: &str) -> Log {
    Log {
        uuid: uuid.to_string(),
        build_id: "b-1".to_string(),
        timestamp: "2024-05-02T08:00:00Z".to_string(),
        path: format!("uploads/{uuid}"),
        computer_name: format!("host-{uuid}"),
        user_name: "operator".to_string(),
        country_name: "Norway".to_string(),
        city_name: "Oslo".to_string(),
    }
}

/// Collect the text of every line event, skipping state updates.
pub(crate) fn drain_lines(rx: &mut EventReceiver) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let TerminalEvent::Line(line) = event {
            lines.push(line);
        }
    }
    lines
}
