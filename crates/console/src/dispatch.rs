//! Command execution.
//!
//! Each submission echoes the line, then runs the command against the injected
//! [`ConsoleApi`]. Output travels as [`TerminalEvent`]s over an unbounded
//! channel, so overlapping commands land in the order they finish. Every
//! collaborator failure is turned into a transcript line here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Build, ConsoleApi, Log};
use crate::command::{command_help_lines, parse_command, Command};
use crate::session::Session;

pub const READY_LINE: &str = "System initialized. Ready for commands.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalEvent {
    Line(String),
    /// Replace the whole transcript with the "cleared" line.
    Cleared,
    BuildsLoaded(Vec<Build>),
    LogsLoaded(Vec<Log>),
}

pub type EventSender = mpsc::UnboundedSender<TerminalEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<TerminalEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

#[derive(Debug, Error)]
enum DownloadError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to save {path}: {source}")]
    Save {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn ConsoleApi>,
    session: Session,
    download_dir: PathBuf,
    events: EventSender,
}

impl Dispatcher {
    pub fn new(
        api: Arc<dyn ConsoleApi>,
        session: Session,
        download_dir: PathBuf,
        events: EventSender,
    ) -> Self {
        Self {
            api,
            session,
            download_dir,
            events,
        }
    }

    /// Load both collections once at startup.
    pub async fn initialize(&self) {
        let (logs, builds) = tokio::join!(self.api.fetch_logs(), self.api.fetch_builds());
        match (logs, builds) {
            (Ok(logs), Ok(builds)) => {
                self.send(TerminalEvent::LogsLoaded(logs.logs));
                self.send(TerminalEvent::BuildsLoaded(builds.builds));
                self.line(READY_LINE);
            }
            (Err(err), _) | (_, Err(err)) => {
                self.note_failure("initialize", &err).await;
                self.line(format!("Error: {err}"));
            }
        }
    }

    /// Echo `raw`, classify it and run it.
    pub async fn submit(&self, raw: &str) {
        self.line(format!("> {raw}"));
        debug!(command = %raw, "command submitted");
        match parse_command(raw) {
            Ok(command) => self.dispatch(command).await,
            Err(err) => self.line(format!("Error: {err}")),
        }
    }

    pub async fn dispatch(&self, command: Command) {
        match command {
            Command::Help => {
                for line in command_help_lines() {
                    self.line(line);
                }
            }
            Command::TriggerBuild => self.trigger_build().await,
            Command::ListRecentLogs => self.recent_logs().await,
            Command::ListRecentBuilds => self.recent_builds().await,
            Command::ListAllBuilds => self.list_builds().await,
            Command::ListAllLogs => self.list_logs().await,
            Command::DownloadBuild(build_id) => self.download_build(&build_id).await,
            Command::DownloadLog(uuid) => self.download_log(&uuid).await,
            Command::Clear => self.send(TerminalEvent::Cleared),
            Command::Unknown(raw) => self.line(format!("Unknown command: {raw}")),
        }
    }

    async fn trigger_build(&self) {
        self.line("Triggering new build...");
        let build_id = match self.api.trigger_build().await {
            Ok(response) => response.build_id,
            Err(err) => {
                self.note_failure("trigger build", &err).await;
                self.line(format!("Build failed: {err}"));
                return;
            }
        };
        info!(build_id = %build_id, "build triggered");
        self.line(format!("Build successful: {build_id}"));
        match self.api.fetch_builds().await {
            Ok(builds) => self.send(TerminalEvent::BuildsLoaded(builds.builds)),
            Err(err) => {
                self.note_failure("refresh builds", &err).await;
                self.line(format!("Failed to fetch builds: {err}"));
            }
        }
    }

    async fn recent_logs(&self) {
        self.line("Fetching recent logs...");
        match self.api.fetch_logs().await {
            Ok(response) => {
                let count = response.count;
                self.send(TerminalEvent::LogsLoaded(response.logs));
                self.line(format!("Retrieved {count} logs"));
            }
            Err(err) => {
                self.note_failure("fetch logs", &err).await;
                self.line(format!("Failed to fetch logs: {err}"));
            }
        }
    }

    async fn recent_builds(&self) {
        self.line("Fetching recent builds...");
        match self.api.fetch_builds().await {
            Ok(response) => {
                let count = response.count;
                self.send(TerminalEvent::BuildsLoaded(response.builds));
                self.line(format!("Retrieved {count} builds"));
            }
            Err(err) => {
                self.note_failure("fetch builds", &err).await;
                self.line(format!("Failed to fetch builds: {err}"));
            }
        }
    }

    async fn list_builds(&self) {
        self.line("Listing available builds:");
        match self.api.fetch_builds().await {
            Ok(response) if response.builds.is_empty() => self.line("No builds available"),
            Ok(response) => {
                for (index, build) in response.builds.iter().enumerate() {
                    self.line(format_build_entry(index + 1, build));
                }
            }
            Err(err) => {
                self.note_failure("list builds", &err).await;
                self.line(format!("Failed to fetch builds: {err}"));
            }
        }
    }

    async fn list_logs(&self) {
        self.line("Listing available logs:");
        match self.api.fetch_logs().await {
            Ok(response) if response.logs.is_empty() => self.line("No logs available"),
            Ok(response) => {
                for (index, log) in response.logs.iter().enumerate() {
                    self.line(format_log_entry(index + 1, log));
                }
            }
            Err(err) => {
                self.note_failure("list logs", &err).await;
                self.line(format!("Failed to fetch logs: {err}"));
            }
        }
    }

    async fn download_build(&self, build_id: &str) {
        self.line(format!("Downloading build {build_id}..."));
        let file_name = format!("build-{}", file_component(build_id));
        let result = match self.api.download_build(build_id).await {
            Ok(payload) => self.save(&file_name, payload).await,
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(path) => {
                info!(build_id = %build_id, path = %path.display(), "build downloaded");
                self.line(format!("Build {build_id} downloaded successfully"));
            }
            Err(err) => {
                self.note_download_failure("download build", &err).await;
                self.line(format!("Error downloading build: {err}"));
            }
        }
    }

    async fn download_log(&self, uuid: &str) {
        self.line(format!("Downloading logs for {uuid}..."));
        let file_name = format!("logs-{}.zip", file_component(uuid));
        let result = match self.api.download_logs(uuid).await {
            Ok(payload) => self.save(&file_name, payload).await,
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(path) => {
                info!(uuid = %uuid, path = %path.display(), "logs downloaded");
                self.line(format!("Logs for {uuid} downloaded successfully"));
            }
            Err(err) => {
                self.note_download_failure("download logs", &err).await;
                self.line(format!("Error downloading logs: {err}"));
            }
        }
    }

    async fn save(&self, file_name: &str, payload: Bytes) -> Result<PathBuf, DownloadError> {
        let path = self.download_dir.join(file_name);
        let to_save_error = |source| DownloadError::Save {
            path: path.display().to_string(),
            source,
        };
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(to_save_error)?;
        tokio::fs::write(&path, &payload)
            .await
            .map_err(to_save_error)?;
        Ok(path)
    }

    async fn note_download_failure(&self, action: &str, err: &DownloadError) {
        match err {
            DownloadError::Api(err) => self.note_failure(action, err).await,
            DownloadError::Save { path, source } => {
                warn!(action, path = %path, error = %source, "failed to save download");
            }
        }
    }

    async fn note_failure(&self, action: &str, err: &ApiError) {
        warn!(action, error = %err, "api call failed");
        if matches!(err, ApiError::Unauthorized) {
            self.session.clear().await;
        }
    }

    fn line(&self, line: impl Into<String>) {
        self.send(TerminalEvent::Line(line.into()));
    }

    fn send(&self, event: TerminalEvent) {
        let _ = self.events.send(event);
    }
}

pub fn format_build_entry(position: usize, build: &Build) -> String {
    format!(
        "{position}. ID: {} | File: {} | Date: {}",
        build.build_id,
        build.filename,
        format_timestamp(&build.timestamp)
    )
}

pub fn format_log_entry(position: usize, log: &Log) -> String {
    format!(
        "{position}. UUID: {} | Computer: {} | Location: {}, {}",
        log.uuid, log.computer_name, log.country_name, log.city_name
    )
}

/// `YYYY-MM-DD HH:MM:SS` for RFC 3339 timestamps, anything else verbatim.
pub fn format_timestamp(raw: &str) -> String {
    match humantime::parse_rfc3339_weak(raw.trim()) {
        Ok(time) => humantime::format_rfc3339_seconds(time)
            .to_string()
            .trim_end_matches('Z')
            .replacen('T', " ", 1),
        Err(_) => raw.to_string(),
    }
}

/// Keeps identifiers from escaping the download directory.
fn file_component(value: &str) -> String {
    let name = Path::new(value)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download");
    name.replace(['/', '\\'], "_")
}
