// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::errors::AppError;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod subtitle_processor;

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

// @returns: log::LevelFilter for a config log level
fn level_filter(level: app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shift subtitle timestamps by a fixed delay (default command)
    Shift(ShiftArgs),

    /// Generate shell completions for subdelay
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ShiftArgs {
    /// Subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Delay in seconds (decimal values down to the millisecond)
    #[arg(short, long, allow_negative_numbers = true)]
    seconds: Option<f64>,

    /// Delay in milliseconds (integer value)
    #[arg(short, long, allow_negative_numbers = true)]
    milliseconds: Option<i64>,

    /// Create a new file with shifted subtitles instead of overwriting
    #[arg(short, long)]
    new_file: bool,

    /// Prevent timestamps from going negative
    #[arg(short = 'z', long)]
    prevent_underflow: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subdelay - shift subtitle timestamps by a fixed delay
///
/// Rewrites every timestamp-range line of an SRT or WebVTT file, adding a
/// signed millisecond delay to both endpoints.
#[derive(Parser, Debug)]
#[command(name = "subdelay")]
#[command(version = "0.1.0")]
#[command(about = "Shift SRT and WebVTT subtitle timestamps by a fixed delay")]
#[command(long_about = "subdelay rewrites every timestamp-range line of a subtitle file, adding a
signed delay to both endpoints. The format (SRT or WebVTT) is selected from
the file extension and every other line is passed through untouched.

EXAMPLES:
    subdelay -m 500 movie.srt               # Delay all subtitles by 500ms
    subdelay -s -1.5 movie.vtt              # Advance all subtitles by 1.5s
    subdelay -m 500 -n movie.srt            # Write to delay_500ms_movie.srt
    subdelay -s -30 -z movie.srt            # Clamp negative results to zero
    subdelay -m 250 /media/subs/            # Shift every subtitle file in a directory
    subdelay completions bash > subdelay.bash

CONFIGURATION:
    Persistent defaults for --new-file, --prevent-underflow and the log
    level are stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Delay in seconds (decimal values down to the millisecond)
    #[arg(short, long, allow_negative_numbers = true)]
    seconds: Option<f64>,

    /// Delay in milliseconds (integer value)
    #[arg(short, long, allow_negative_numbers = true)]
    milliseconds: Option<i64>,

    /// Create a new file with shifted subtitles instead of overwriting
    #[arg(short, long)]
    new_file: bool,

    /// Prevent timestamps from going negative
    #[arg(short = 'z', long)]
    prevent_underflow: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\u{274c} ",
            Level::Warn => "\u{1f6a7} ",
            Level::Info => " ",
            Level::Debug => "\u{1f50d} ",
            Level::Trace => "\u{1f4cb} ",
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
            let color = Self::get_color_for_level(record.level());
            let emoji = Self::get_emoji_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subdelay", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Shift(args)) => run_shift(args),
        None => {
            // Default behavior - use top-level args so `subdelay file.srt -m 500`
            // works without naming the subcommand
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let shift_args = ShiftArgs {
                input_path,
                seconds: cli.seconds,
                milliseconds: cli.milliseconds,
                new_file: cli.new_file,
                prevent_underflow: cli.prevent_underflow,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_shift(shift_args)
        }
    }
}

fn run_shift(options: ShiftArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(cmd_log_level.clone().into()));
    }

    // Resolve the delay before touching anything else; milliseconds wins
    // when both options are given. Truncation toward zero mirrors the
    // integer cast of the seconds value.
    let delay_ms = match (options.milliseconds, options.seconds) {
        (Some(ms), _) => ms,
        (None, Some(s)) => (s * 1000.0) as i64,
        (None, None) => return Err(AppError::MissingDelay.into()),
    };

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(config.log_level.clone()));
    }

    // Create controller and merge flags with configured defaults
    let controller = Controller::with_config(config)?;
    let request =
        controller.resolve_request(delay_ms, options.new_file, options.prevent_underflow);

    // Run the controller with the input file or directory
    if options.input_path.is_file() {
        controller.run(&options.input_path, &request)?;
    } else if options.input_path.is_dir() {
        controller.run_folder(&options.input_path, &request)?;
    } else {
        return Err(AppError::FileNotFound(options.input_path.clone()).into());
    }

    Ok(())
}
