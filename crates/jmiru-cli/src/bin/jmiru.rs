use std::path::Path;

use clap::{Parser, Subcommand};

use jmiru_cli::commands::{align_ops, annotate_ops, classify_ops, config_ops};
use jmiru_engine::DEFAULT_DIVIDER;

#[derive(Parser)]
#[command(name = "jmiru", about = "Furigana annotation for Japanese lyrics")]
struct Cli {
    /// Custom settings TOML file
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom romaji TOML file
    #[arg(long, global = true)]
    romaji: Option<String>,
    /// Write JSON trace logs to this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate kanji lines with their readings
    Annotate {
        /// Input files, one or more blocks each (default: stdin)
        files: Vec<String>,
        /// String separating blocks within one input
        #[arg(long, default_value = DEFAULT_DIVIDER)]
        divider: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also bracket kana that do not match their reading
        #[arg(long)]
        debug: bool,
    },
    /// Align one kanji line against its reading
    Align {
        /// Source line (kanji and kana)
        kanji: String,
        /// Reading (kana or romaji)
        reading: String,
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the role of each input line
    Classify {
        /// Input file (default: stdin)
        file: Option<String>,
    },
    /// Export default romaji mappings as TOML
    RomajiExport,
    /// Validate a custom romaji TOML file
    RomajiValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        jmiru_engine::trace_init::init_tracing(Path::new(dir));
    }
    config_ops::install_custom(cli.settings.as_deref(), cli.romaji.as_deref());

    match cli.command {
        Command::Annotate {
            files,
            divider,
            json,
            debug,
        } => annotate_ops::annotate_cmd(&files, &divider, json, debug),
        Command::Align {
            kanji,
            reading,
            json,
        } => align_ops::align_cmd(&kanji, &reading, json),
        Command::Classify { file } => classify_ops::classify_cmd(file.as_deref()),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
