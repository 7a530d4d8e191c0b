use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chatcache::domain::entities::Message;
use chatcache::infrastructure::{
    AppConfig, CliArgs, ConfigSource, ConfigStore, HttpImageFetcher, StreamImageCdn,
};
use chatcache::presentation::{ChannelScreen, MessageRow, ScreenEvent};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(AppConfig, ConfigSource)> {
    let store = ConfigStore::new()?;
    let (mut config, source) = store.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, source))
}

async fn load_messages(args: &CliArgs) -> Result<Vec<Message>> {
    let content = tokio::fs::read_to_string(&args.messages)
        .await
        .wrap_err_with(|| format!("reading {}", args.messages.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("parsing messages from {}", args.messages.display()))
}

fn format_row(message: &Message, row: &MessageRow) -> String {
    let mut line = format!("{:<10} {:<16}", row.message_id.as_str(), row.author_name);
    if let Some(quoted) = &row.quoted {
        line.push_str(&format!(" > {}: {} |", quoted.author_name, quoted.text));
    }
    line.push(' ');
    line.push_str(message.text());
    if row.has_attachments {
        line.push_str(" [attachments]");
    }
    if let Some(avatar) = &row.avatar {
        line.push_str(&format!(" avatar={}", avatar.url()));
    }
    line
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let (config, config_source) = load_config(&args)?;
    init_logging(&config)?;
    config_source.report();

    info!(
        version = chatcache::VERSION,
        config = ?config.effective_config_path(),
        "Starting chatcache"
    );

    let messages = load_messages(&args).await?;
    let cdn = Arc::new(StreamImageCdn::new(config.image_cdn.clone()));
    let mut screen = ChannelScreen::new(args.channel.clone(), cdn);

    screen.handle_event(ScreenEvent::Appeared);
    let rows = screen.rows(&messages);
    for (message, row) in messages.iter().zip(&rows) {
        println!("{}", format_row(message, row));
    }

    if args.fetch_avatars {
        let fetcher = HttpImageFetcher::new(config.image_loader.clone())?;
        let fetched = screen.prefetch_avatars(&messages, &fetcher).await;
        println!("fetched {fetched} avatar(s)");
    }

    info!(stats = %screen.cache_stats(), "Closing channel screen");
    screen.handle_event(ScreenEvent::Dismissed);

    Ok(())
}
