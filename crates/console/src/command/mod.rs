//! Command grammar for the terminal input line.
//!
//! - Registry: keyword table, help text and completion candidates (registry.rs)
//! - Parsing: classifying a raw line into a [`Command`] (parse.rs)

mod parse;
mod registry;

pub use parse::{parse_command, Command, CommandError};
pub use registry::{
    command_help_lines, CommandSpec, COMMANDS, COMPLETIONS, COMPLETION_GROUP_ROOTS, HELP_HEADER,
};
