//! Command terminal for the build console.
//!
//! Lines typed by the operator are classified by [`command`], executed by
//! [`dispatch`] against an injected [`api::ConsoleApi`], and collected in a
//! [`transcript::Transcript`] that [`render`] turns into styled lines.

pub mod api;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod input;
pub mod logging;
pub mod render;
pub mod session;
pub mod state;
pub mod transcript;

#[cfg(test)]
mod test_utils;

pub use api::{ApiError, Build, ConsoleApi, Log};
pub use command::{parse_command, Command, CommandError};
pub use config::{load_terminal_config, TerminalConfig};
pub use dispatch::{event_channel, Dispatcher, TerminalEvent};
pub use input::{complete_input, InputLine, Key, KeyOutcome};
pub use session::Session;
pub use state::{Action, Console, TerminalState};
pub use transcript::{classify_line, LineKind, Transcript};
