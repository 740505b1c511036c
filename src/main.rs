// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};
use std::io::Write;
use std::path::PathBuf;

use jsonlate::app_config::{Config, LogLevel};
use jsonlate::app_controller::{Controller, RunOutcome, StdinConfirm};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for jsonlate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// jsonlate - translate the strings of a JSON document
///
/// Translates every string value of a JSON file with DeepL, keeping
/// `{{placeholders}}` intact and sending each distinct string only once.
#[derive(Parser, Debug)]
#[command(name = "jsonlate")]
#[command(version)]
#[command(about = "Translate the strings of a JSON document")]
#[command(long_about = "jsonlate translates the string values of a JSON file using DeepL.

EXAMPLES:
    jsonlate                                   # First .json file in the current directory to French
    jsonlate -i en.json -t DE                  # Translate en.json to German (writes en.de.json)
    jsonlate -i en.json -o fr.json -s EN -f    # Explicit output, source language, formal register
    jsonlate -i en.json -p -c                  # Translate keys too, confirm before submitting
    jsonlate -i en.json -u 400000              # Stop if the run would exceed 400000 billed characters
    jsonlate completions bash > jsonlate.bash  # Generate bash completions

The API key is read from --key or the DEEPL_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input JSON file (default: first file in the current directory containing .json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file (default: input name with `<target>.json` as extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source language code (default: detected by the provider)
    #[arg(short, long)]
    source: Option<String>,

    /// Target language code [default: FR]
    #[arg(short, long)]
    target: Option<String>,

    /// DeepL API key
    #[arg(short, long, env = "DEEPL_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Prefer a more formal register
    #[arg(short, long)]
    formal: bool,

    /// Translate object keys (properties) too
    #[arg(short, long)]
    properties: bool,

    /// Ask for confirmation before submitting
    #[arg(short, long)]
    confirm: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Abort if used plus requested characters would exceed this limit
    #[arg(short = 'u', long = "usagelimit")]
    usage_limit: Option<u64>,

    /// Maximum number of texts per request
    #[arg(long)]
    batch_size: Option<usize>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

impl CommandLineOptions {
    /// Build the configuration: config file first, then command line overrides
    fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(source) = &self.source {
            config.source_language = Some(source.clone());
        }
        if let Some(target) = &self.target {
            config.target_language = target.clone();
        }
        if let Some(key) = &self.key {
            config.api_key = key.clone();
        }
        if let Some(limit) = self.usage_limit {
            config.usage_limit = Some(limit);
        }
        if let Some(batch_size) = self.batch_size {
            config.max_batch_size = batch_size;
        }

        config.formal |= self.formal;
        config.translate_keys |= self.properties;
        config.confirm |= self.confirm;

        if let Some(level) = &self.log_level {
            config.log_level = level.clone().into();
        } else if self.debug {
            config.log_level = LogLevel::Debug;
        }

        Ok(config)
    }
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()), now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is updated after the configuration is built
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "jsonlate", &mut std::io::stdout());
        return Ok(());
    }

    let config = cli.to_config()?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Configuration: target={}, source={:?}, formal={}, keys={}, batch size={}",
           config.target_language, config.source_language, config.formal,
           config.translate_keys, config.max_batch_size);

    let controller = Controller::with_config(config)?;

    // Declining the prompt is a normal exit, not an error
    if let RunOutcome::Written { report, .. } = controller.run(cli.input, cli.output, &StdinConfirm).await? {
        debug!("{} entries, {} characters, {} requests", report.entries, report.characters, report.batches);
    }

    Ok(())
}
