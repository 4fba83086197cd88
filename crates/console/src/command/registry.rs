//! Command registry and metadata.
//!
//! The order here is the order shown by `help`.

/// Specification for a single command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        usage: "help",
        description: "Show this help message",
    },
    CommandSpec {
        usage: "build",
        description: "Trigger a new build",
    },
    CommandSpec {
        usage: "logs",
        description: "Show recent logs",
    },
    CommandSpec {
        usage: "builds",
        description: "Show recent builds",
    },
    CommandSpec {
        usage: "list builds",
        description: "List all available builds with details",
    },
    CommandSpec {
        usage: "list logs",
        description: "List all available logs with details",
    },
    CommandSpec {
        usage: "download build <build_id>",
        description: "Download a specific build",
    },
    CommandSpec {
        usage: "download log <uuid>",
        description: "Download logs for a specific UUID",
    },
    CommandSpec {
        usage: "clear",
        description: "Clear terminal",
    },
];

/// Tab-completion candidates. Download entries keep their trailing space so a
/// completed line is ready for the argument.
pub const COMPLETIONS: &[&str] = &[
    "help",
    "build",
    "logs",
    "builds",
    "clear",
    "download build ",
    "download log ",
    "list builds",
    "list logs",
];

/// Roots that expand to `"<root> "` when they match several candidates.
pub const COMPLETION_GROUP_ROOTS: &[&str] = &["download", "list"];

pub const HELP_HEADER: &str = "Available commands:";

/// Generate the help block shown by `help`.
pub fn command_help_lines() -> Vec<String> {
    let mut lines = Vec::with_capacity(COMMANDS.len() + 1);
    lines.push(HELP_HEADER.to_string());
    lines.extend(
        COMMANDS
            .iter()
            .map(|command| format!("  {} - {}", command.usage, command.description)),
    );
    lines
}
