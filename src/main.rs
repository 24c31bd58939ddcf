// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::too_many_arguments)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::app_controller::Controller;

mod alignment;
mod app_config;
mod app_controller;
mod caption_builder;
mod errors;
mod file_utils;
mod media_probe;
mod providers;
mod story;
mod subtitle_builder;

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
    /// Generate a story video end to end (default command)
    #[command(alias = "generate")]
    Generate(GenerateArgs),

    /// Build an SRT subtitle file from a word-level alignment JSON
    Subtitles {
        /// Alignment JSON file produced by the speech service
        #[arg(value_name = "ALIGNMENT_JSON")]
        alignment: PathBuf,

        /// Output SRT path (defaults to the alignment path with .srt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Words per subtitle cue
        #[arg(short, long)]
        words_per_cue: Option<usize>,

        /// Seconds added to every cue boundary
        #[arg(short, long)]
        time_offset: Option<f64>,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Build a length-bounded caption from a title and hashtags
    Caption {
        /// Story title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Space-delimited hashtag string (defaults to the configured set)
        #[arg(long)]
        hashtags: Option<String>,

        /// Maximum caption length in characters
        #[arg(short, long)]
        max_length: Option<usize>,

        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: String,
    },

    /// Generate shell completions for storyreel
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Story post URL, story file, or directory of story files
    #[arg(value_name = "STORY")]
    story: String,

    /// Background video file
    #[arg(short, long)]
    background: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Narrator voice name (e.g. 'heart', 'adam')
    #[arg(short, long)]
    voice: Option<String>,

    /// Narrator gender marker ('f' or 'm')
    #[arg(short, long)]
    gender: Option<String>,

    /// Words per subtitle cue
    #[arg(short, long)]
    words_per_cue: Option<usize>,

    /// Hashtag string for the caption
    #[arg(long)]
    hashtags: Option<String>,

    /// Output directory for generated artifacts
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// storyreel - automated short-form story video assembly
///
/// Takes a text story, narrates it, aligns the narration to word-level
/// timestamps, builds fast burned-in subtitles and a length-bounded caption,
/// and assembles the final vertical video through an editing automation API.
#[derive(Parser, Debug)]
#[command(name = "storyreel")]
#[command(author = "storyreel team")]
#[command(version = "1.0.0")]
#[command(about = "Automated story video generator")]
#[command(long_about = "storyreel narrates a text story and assembles a vertical video with
word-synced subtitles, a title card, and a background clip.

EXAMPLES:
    storyreel story.txt -b gameplay.mp4                  # Generate from a local story file
    storyreel https://reddit.com/r/.../post -b bg.mp4    # Generate from a post URL
    storyreel stories/ -b bg.mp4 -f                      # Process a folder, overwriting outputs
    storyreel subtitles alignment.json -w 1              # Only build the SRT file
    storyreel caption \"My story title\" --max-length 150   # Only build the caption
    storyreel completions bash > storyreel.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

SERVICES:
    editor  - video-editing automation API (default: http://localhost:9001)
    speech  - narration synthesis and alignment (default: http://localhost:8880)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Story post URL, story file, or directory of story files
    #[arg(value_name = "STORY")]
    story: Option<String>,

    /// Background video file
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Narrator voice name (e.g. 'heart', 'adam')
    #[arg(short, long)]
    voice: Option<String>,

    /// Narrator gender marker ('f' or 'm')
    #[arg(short, long)]
    gender: Option<String>,

    /// Words per subtitle cue
    #[arg(short, long)]
    words_per_cue: Option<usize>,

    /// Hashtag string for the caption
    #[arg(long)]
    hashtags: Option<String>,

    /// Output directory for generated artifacts
    #[arg(short, long)]
    output_dir: Option<String>,

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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
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

            let mut stderr = std::io::stderr();
            let emoji = Self::get_emoji_for_level(record.level());
            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "storyreel", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Subtitles { alignment, output, words_per_cue, time_offset, config_path }) => {
            run_subtitles(alignment, output, words_per_cue, time_offset, &config_path)
        }
        Some(Commands::Caption { title, hashtags, max_length, config_path }) => {
            run_caption(&title, hashtags.as_deref(), max_length, &config_path)
        }
        Some(Commands::Generate(args)) => {
            // Use the explicit generate subcommand args
            run_generate(args).await
        }
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let story = cli.story.ok_or_else(|| {
                anyhow!("STORY is required when no subcommand is specified")
            })?;
            let background = cli.background.ok_or_else(|| {
                anyhow!("--background is required when no subcommand is specified")
            })?;

            let generate_args = GenerateArgs {
                story,
                background,
                force_overwrite: cli.force_overwrite,
                voice: cli.voice,
                gender: cli.gender,
                words_per_cue: cli.words_per_cue,
                hashtags: cli.hashtags,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args).await
        }
    }
}

/// Load the configuration file, creating a default one if it does not exist
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        Ok(config)
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Apply a configured log level unless the command line already set one
fn apply_log_level(config: &Config, cli_level: &Option<CliLogLevel>) {
    if cli_level.is_none() {
        let log_level = match config.log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };

        // Just update the max level without reinitializing the logger
        log::set_max_level(log_level);
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        let log_level = match config_log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(log_level);
    }

    // Load or create configuration
    let mut config = load_or_create_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(voice) = &options.voice {
        config.speech.voice = voice.clone();
    }

    if let Some(gender) = &options.gender {
        config.speech.gender = gender.clone();
    }

    if let Some(words_per_cue) = options.words_per_cue {
        config.subtitle.words_per_cue = words_per_cue;
    }

    if let Some(hashtags) = &options.hashtags {
        config.caption.hashtags = hashtags.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        config.output_dir = output_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    apply_log_level(&config, &options.log_level);

    // Create controller
    let controller = Controller::with_config(config)?;

    // Run the controller against a single story or a folder of them
    let story_path = Path::new(&options.story);
    if story_path.is_dir() {
        controller.run_folder(
            story_path.to_path_buf(),
            options.background.clone(),
            options.force_overwrite,
        ).await?;
    } else {
        controller.run(
            &options.story,
            options.background.clone(),
            options.force_overwrite,
        ).await?;
    }

    Ok(())
}

/// Build an SRT file from an alignment JSON without running the full pipeline
fn run_subtitles(
    alignment_path: PathBuf,
    output: Option<PathBuf>,
    words_per_cue: Option<usize>,
    time_offset: Option<f64>,
    config_path: &str,
) -> Result<()> {
    let config = load_or_create_config(config_path)?;
    config.validate().context("Configuration validation failed")?;

    let transcription = alignment::Transcription::from_file(&alignment_path)?;
    let words = transcription.flatten_words();

    let track = subtitle_builder::SubtitleTrack::from_words(
        &words,
        words_per_cue.unwrap_or(config.subtitle.words_per_cue),
        time_offset.unwrap_or(0.0),
    )?;

    let output_path = output.unwrap_or_else(|| alignment_path.with_extension("srt"));
    track.write_to_srt(&output_path)?;

    info!("Wrote {} cues to {}", track.len(), output_path.display());
    Ok(())
}

/// Build a caption and print it to stdout
fn run_caption(
    title: &str,
    hashtags: Option<&str>,
    max_length: Option<usize>,
    config_path: &str,
) -> Result<()> {
    let config = load_or_create_config(config_path)?;

    let caption = caption_builder::generate_caption(
        &config.caption.label,
        title,
        hashtags.unwrap_or(&config.caption.hashtags),
        max_length.unwrap_or(config.caption.max_length),
    );

    println!("{}", caption);
    Ok(())
}
