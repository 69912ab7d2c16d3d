//! Runtime configuration
//!
//! Every value resolves from a command-line flag first, then the
//! environment, then a compiled default. Only the vision API key file has
//! no default; without it the analyze endpoint stays disabled.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Service configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "safesight", version, about = "Image safe-search analysis backend")]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind_addr: SocketAddr,

    /// SQLite database file; created with its schema if absent
    #[arg(long, env = "DB_PATH", default_value = "safesight.db")]
    pub db_path: PathBuf,

    /// Base URL of the vision annotation API
    #[arg(
        long,
        env = "VISION_API_URL",
        default_value = "https://vision.googleapis.com/v1"
    )]
    pub vision_api_url: String,

    /// File holding the vision API key; required for /analyze to function
    #[arg(long, env = "VISION_API_KEY_FILE")]
    pub vision_api_key_file: Option<PathBuf>,

    /// Timeout for the outbound classification call, in seconds
    #[arg(long, env = "VISION_TIMEOUT_SECS", default_value_t = 30)]
    pub vision_timeout_secs: u64,

    /// Username accepted for admin endpoints
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Password accepted for admin endpoints
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "changeme123")]
    pub admin_password: String,
}
