use std::path::PathBuf;

use crate::catalog::ApiEndpoint;
use crate::sync::SyncOptions;
use crate::types::{DetailFailurePolicy, LogLevel};

/// Application configuration.
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub account: String,
    pub api_host: String,
    pub directory: PathBuf,

    pub max_results: u32,

    pub on_detail_error: DetailFailurePolicy,
    pub log_level: LogLevel,

    pub no_progress_bar: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("account", &self.account)
            .field("api_host", &self.api_host)
            .field("directory", &self.directory)
            .field("max_results", &self.max_results)
            .field("on_detail_error", &self.on_detail_error)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_cli(cli: crate::cli::Cli) -> anyhow::Result<Self> {
        for (flag, value) in [
            ("--api-key", &cli.api_key),
            ("--api-secret", &cli.api_secret),
            ("--account", &cli.account),
            ("--api-host", &cli.api_host),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", flag);
            }
        }
        if cli.max_results == 0 {
            anyhow::bail!("--max-results must be at least 1");
        }
        if cli.directory.trim().is_empty() {
            anyhow::bail!("--directory must not be empty");
        }

        Ok(Self {
            api_key: cli.api_key,
            api_secret: cli.api_secret,
            account: cli.account.trim_matches('/').to_string(),
            api_host: cli.api_host.trim_end_matches('/').to_string(),
            directory: expand_tilde(&cli.directory),
            max_results: cli.max_results,
            on_detail_error: cli.on_detail_error,
            log_level: cli.log_level,
            no_progress_bar: cli.no_progress_bar,
        })
    }

    pub fn endpoint(&self) -> ApiEndpoint {
        ApiEndpoint::new(&self.api_host, &self.account)
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            max_results: self.max_results,
            on_detail_error: self.on_detail_error,
            no_progress_bar: self.no_progress_bar,
        }
    }
}
