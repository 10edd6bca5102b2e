use clap::Parser;

use crate::types::{DetailFailurePolicy, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "albumsync-rs",
    version,
    about = "Rebuild a local JSON content tree from a hosted media library"
)]
pub struct Cli {
    /// API key of the media account
    #[arg(long, env = "ALBUMSYNC_API_KEY")]
    pub api_key: String,

    /// API secret of the media account.
    /// WARNING: passing via --api-secret is visible in process listings.
    /// Prefer the ALBUMSYNC_API_SECRET environment variable instead.
    #[arg(long, env = "ALBUMSYNC_API_SECRET", hide_env_values = true)]
    pub api_secret: String,

    /// Account (cloud) name the API routes on
    #[arg(long, env = "ALBUMSYNC_ACCOUNT")]
    pub account: String,

    /// API host, without the account segment
    #[arg(
        long,
        env = "ALBUMSYNC_API_HOST",
        default_value = "https://api.cloudinary.com/v1_1"
    )]
    pub api_host: String,

    /// Output root; wiped and rebuilt on every run
    #[arg(short = 'd', long, default_value = "./albums")]
    pub directory: String,

    /// Maximum number of photos requested in the bulk listing
    #[arg(long, default_value_t = crate::sync::DEFAULT_MAX_RESULTS)]
    pub max_results: u32,

    /// What a failed per-photo detail fetch does
    #[arg(long, value_enum, default_value = "skip")]
    pub on_detail_error: DetailFailurePolicy,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,
}
