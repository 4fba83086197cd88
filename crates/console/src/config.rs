use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PROMPT: &str = "$";
const DEFAULT_DOWNLOAD_DIR: &str = ".";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub banner: Vec<String>,
    pub download_dir: PathBuf,
    pub prompt: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            banner: default_banner(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

pub fn load_terminal_config(path: &Path) -> anyhow::Result<TerminalConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_terminal_config(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

pub fn parse_terminal_config(raw: &str) -> anyhow::Result<TerminalConfig> {
    let config: TerminalConfig = toml::from_str(raw)?;
    if config.prompt.trim().is_empty() {
        anyhow::bail!("prompt must not be empty");
    }
    Ok(config)
}

fn default_banner() -> Vec<String> {
    vec![
        format!("Build Console v{}", env!("CARGO_PKG_VERSION")),
        "Type 'help' for available commands".to_string(),
        "Initializing system...".to_string(),
    ]
}
