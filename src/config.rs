//! Runtime configuration, parsed from flags or environment

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Args, Clone, Debug, PartialEq)]
pub struct Config {
    /// PokeAPI base URL (without trailing `/pokemon`)
    #[arg(long, env = "POKEDETAIL_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Request timeout in seconds (minimum 1)
    #[arg(
        long,
        env = "POKEDETAIL_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Append logs to this file (the terminal is owned by the UI)
    #[arg(long, env = "POKEDETAIL_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with any trailing slash removed.
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}
