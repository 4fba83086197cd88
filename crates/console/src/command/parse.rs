//! Command parsing.
//!
//! Keywords match ASCII case-insensitively against the trimmed line. Arguments
//! are sliced from the original text so ids keep their casing.

use thiserror::Error;

const DOWNLOAD_BUILD: &str = "download build";
const DOWNLOAD_LOG: &str = "download log";

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    TriggerBuild,
    ListRecentLogs,
    ListRecentBuilds,
    ListAllBuilds,
    ListAllLogs,
    DownloadBuild(String),
    DownloadLog(String),
    Clear,
    /// Anything else, carried verbatim for the "not recognized" line.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Please provide a {0}")]
    MissingArgument(&'static str),
}

/// Classify a raw input line.
///
/// Unrecognized input is `Ok(Command::Unknown)`; the only error is a download
/// keyword with nothing after it.
pub fn parse_command(raw: &str) -> Result<Command, CommandError> {
    let trimmed = raw.trim();
    if let Some(build_id) = strip_keyword(trimmed, DOWNLOAD_BUILD) {
        return require_argument(build_id, "build ID").map(Command::DownloadBuild);
    }
    if let Some(uuid) = strip_keyword(trimmed, DOWNLOAD_LOG) {
        return require_argument(uuid, "log UUID").map(Command::DownloadLog);
    }

    let command = match trimmed.to_ascii_lowercase().as_str() {
        "help" => Command::Help,
        "build" => Command::TriggerBuild,
        "logs" => Command::ListRecentLogs,
        "builds" => Command::ListRecentBuilds,
        "list builds" => Command::ListAllBuilds,
        "list logs" => Command::ListAllLogs,
        "clear" => Command::Clear,
        _ => Command::Unknown(raw.to_string()),
    };
    Ok(command)
}

/// Returns the trimmed remainder when `input` starts with `keyword` followed by
/// a space or the end of input.
fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let head = input.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &input[keyword.len()..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some(rest.trim())
    } else {
        None
    }
}

fn require_argument(value: &str, name: &'static str) -> Result<String, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(value.to_string())
    }
}
