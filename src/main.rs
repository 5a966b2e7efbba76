// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::{Config, TranslationProvider};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod caption;
mod directionality;
mod errors;
mod file_utils;
mod language_utils;
mod pipeline;
mod prefixer;
mod providers;
mod translation_service;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    OpenAI,
    Gemini,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
        }
    }
}

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
    /// Extract dialogue texts from a caption file into a text file
    Extract {
        /// Caption file to extract from (.ass, .ssa or .srt)
        #[arg(value_name = "CAPTION_FILE")]
        input: PathBuf,

        /// Prepend sequential '1-', '2-', ... prefixes to the extracted lines
        #[arg(short, long)]
        prefix: bool,
    },

    /// Reinsert translated lines into the original caption file
    Reinsert {
        /// Text file with one translated line per row
        #[arg(value_name = "TRANSLATIONS_FILE")]
        translations: PathBuf,

        /// Original caption file the translations came from
        #[arg(value_name = "CAPTION_FILE")]
        caption: PathBuf,
    },

    /// Fix right-to-left display issues in a text or caption file
    FixRtl {
        /// File to fix
        #[arg(value_name = "INPUT_FILE")]
        input: PathBuf,

        /// Insert directional-embedding markers instead of reordering
        /// trailing punctuation
        #[arg(short, long)]
        embed: bool,
    },

    /// Remove sequential '1-', '2-', ... prefixes from a text file
    StripPrefix {
        /// Text file with prefixed lines
        #[arg(value_name = "INPUT_FILE")]
        input: PathBuf,
    },

    /// Run the full extract-translate-reinsert pipeline on a caption file
    Translate(TranslateArgs),

    /// Generate shell completions for subloc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Caption file to translate (.ass, .ssa or .srt)
    #[arg(value_name = "CAPTION_FILE")]
    input: PathBuf,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the provider (overrides the config file)
    #[arg(short = 'k', long)]
    api_key: Option<String>,

    /// Source language code (e.g. 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'fa', 'ar', 'he')
    #[arg(short, long)]
    target_language: Option<String>,
}

/// subloc - subtitle localization pipeline
///
/// Extracts dialogue from caption files, translates it through an AI
/// provider, and reinserts the result with timing and styling intact,
/// including right-to-left display fixes for RTL target languages.
#[derive(Parser, Debug)]
#[command(name = "subloc")]
#[command(version = "0.3.0")]
#[command(about = "Caption extraction, AI translation and RTL fixing")]
#[command(long_about = "subloc extracts dialogue text from ASS/SSA and SRT caption files, sends it \
to a translation provider, and reinserts the translated lines while preserving all timing and \
styling metadata.

EXAMPLES:
    subloc extract movie.ass --prefix          # Dialogue lines to movie_extracted.txt
    subloc translate movie.ass                 # Full pipeline using conf.json
    subloc translate -p gemini movie.srt       # Use a specific provider
    subloc fix-rtl movie_extracted.txt         # Move trailing punctuation for RTL display
    subloc fix-rtl movie.ass --embed           # Insert RTL embedding markers instead
    subloc strip-prefix translated.txt         # Remove '1-', '2-', ... prefixes
    subloc reinsert translated.txt movie.ass   # Write movie_translated.ass

CONFIGURATION:
    Languages, provider settings and the prompt tone live in conf.json next to
    the invocation. A default config is created on the first translate run.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

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

    // @returns: ANSI color code and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "\u{274C} "),
            Level::Warn => ("\x1B[1;33m", "\u{1F6A7} "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "\u{1F50D} "),
            Level::Trace => ("\x1B[1;35m", "\u{1F4CB} "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the configuration file, creating a default one if it does not exist
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if std::path::Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        Ok(config)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Map the config log level to the log crate's filter
fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default;
    // the level is updated after the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(log_level) = &cli.log_level {
        let config_level: app_config::LogLevel = log_level.clone().into();
        log::set_max_level(level_filter(&config_level));
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subloc", &mut std::io::stdout());
            Ok(())
        }
        Commands::Extract { input, prefix } => {
            let controller = Controller::with_config(Config::default())?;
            controller.extract(&input, prefix)?;
            Ok(())
        }
        Commands::Reinsert { translations, caption } => {
            let controller = Controller::with_config(Config::default())?;
            controller.reinsert(&translations, &caption)?;
            Ok(())
        }
        Commands::FixRtl { input, embed } => {
            let controller = Controller::with_config(Config::default())?;
            controller.fix_directionality(&input, embed)?;
            Ok(())
        }
        Commands::StripPrefix { input } => {
            let controller = Controller::with_config(Config::default())?;
            controller.strip_prefixes(&input)?;
            Ok(())
        }
        Commands::Translate(args) => {
            let mut config = load_or_create_config(&cli.config_path)?;

            // Apply command line overrides
            if let Some(provider) = args.provider {
                config.translation.provider = provider.into();
            }
            if let Some(model) = args.model {
                let provider_type = config.translation.provider.to_lowercase_string();
                if let Some(provider_config) = config
                    .translation
                    .available_providers
                    .iter_mut()
                    .find(|p| p.provider_type == provider_type)
                {
                    provider_config.model = model;
                }
            }
            if let Some(api_key) = args.api_key {
                let provider_type = config.translation.provider.to_lowercase_string();
                if let Some(provider_config) = config
                    .translation
                    .available_providers
                    .iter_mut()
                    .find(|p| p.provider_type == provider_type)
                {
                    provider_config.api_key = api_key;
                }
            }
            if let Some(source_lang) = args.source_language {
                config.source_language = source_lang;
            }
            if let Some(target_lang) = args.target_language {
                config.target_language = target_lang;
            }
            if cli.log_level.is_none() {
                log::set_max_level(level_filter(&config.log_level));
            }

            let controller = Controller::with_config(config)?;
            controller.translate(&args.input).await?;
            Ok(())
        }
    }
}
