// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::time::Duration;

use statusfeed::app_config::{self, Config};
use statusfeed::feed::TextSurface;
use statusfeed::{AppError, Controller, FeedMessage};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for statusfeed
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// statusfeed - translated status feed with typewriter reveal
///
/// Publishes the given messages, translates them and plays the reveal
/// animation in the terminal until every entry is fully visible.
#[derive(Parser, Debug)]
#[command(name = "statusfeed")]
#[command(version)]
#[command(about = "Translated status feed with typewriter reveal")]
#[command(long_about = "statusfeed publishes messages to a three-line feed, translates each one and reveals it character by character.

EXAMPLES:
    statusfeed \"Ship launched\" \"Signal found\"       # Publish two messages
    statusfeed -i \"Hull breach\" \"Oxygen low\"        # Mark one message as important
    statusfeed --offline \"Hello\"                     # Use the built-in mock backend
    statusfeed completions bash > statusfeed.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Messages to publish, in order
    #[arg(value_name = "MESSAGE")]
    messages: Vec<String>,

    /// Message to publish as important (repeatable)
    #[arg(short, long, value_name = "MESSAGE")]
    important: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Use the in-process mock backend instead of the network
    #[arg(long, env = "STATUSFEED_OFFLINE")]
    offline: bool,

    /// Frames rendered per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Give up after this many frames
    #[arg(long, default_value_t = 3000)]
    max_frames: usize,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Color code and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept every record; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "statusfeed", &mut std::io::stdout());
        return Ok(());
    }

    run(cli).await?;
    Ok(())
}

async fn run(options: CommandLineOptions) -> Result<(), AppError> {
    if options.messages.is_empty() && options.important.is_empty() {
        return Err(AppError::Config("At least one MESSAGE or --important MESSAGE is required".to_string()));
    }

    let mut config = Config::load_or_create(&options.config_path)
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config, options.offline)?;

    let messages: Vec<FeedMessage> = options.messages.iter()
        .map(|text| FeedMessage::new(text.as_str(), false))
        .chain(options.important.iter().map(|text| FeedMessage::new(text.as_str(), true)))
        .collect();

    controller.publish_all(&messages).await;

    let frame_interval = Duration::from_millis((1000 / u64::from(options.fps.max(1))).max(1));
    let mut surface = TextSurface::new();
    let frames = controller
        .run_until_revealed(&mut surface, frame_interval, options.max_frames, |frame, _| {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "\x1B[2J\x1B[H{}", frame.to_text());
            let _ = stdout.flush();
        })
        .await;

    let stats = controller.feed().translator().cache_stats();
    info!("Rendered {} frame(s); translation cache: {} entries, hit rate {:.0}%", frames, stats.entries, stats.hit_rate() * 100.0);

    Ok(())
}
