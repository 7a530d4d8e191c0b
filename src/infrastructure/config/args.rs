use super::app_config::LogLevel;
use crate::domain::entities::ChannelId;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments of the demo binary.
#[derive(Debug, Parser)]
#[command(
    name = "chatcache",
    version,
    about = "Render a channel's message rows from a JSON message dump",
    long_about = None
)]
pub struct CliArgs {
    /// JSON file holding an array of messages.
    #[arg(short, long, value_name = "PATH")]
    pub messages: PathBuf,

    /// Channel the messages belong to.
    #[arg(long, default_value = "messaging:demo")]
    pub channel: ChannelId,

    /// Download author avatars after rendering.
    #[arg(long)]
    pub fetch_avatars: bool,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// CDN resize width in pixels.
    #[arg(long)]
    pub cdn_width: Option<u32>,

    /// CDN resize height in pixels.
    #[arg(long)]
    pub cdn_height: Option<u32>,
}
