use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use xlit_cli::commands::{config_ops, convert_ops, method_ops, tmx_ops};
use xlit_engine::xlit_core::{settings, MethodRegistry};

#[derive(Parser)]
#[command(name = "xlit", about = "Cyrillic to Latin transliteration")]
struct Cli {
    /// Settings TOML overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<String>,

    /// Extra rule tables to register alongside the built-in ones
    #[arg(long = "rules", global = true)]
    rules: Vec<String>,

    /// Write JSON trace events into this directory (needs the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List transliteration methods
    Methods {
        /// Only methods for this language
        #[arg(long)]
        language: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List languages with a method count each
    Languages,
    /// Transliterate text (reads stdin when TEXT is omitted)
    Convert {
        /// Method identifier, e.g. "Russian (Cyrillic)-->English (IC)"
        method: String,
        text: Option<String>,
        /// Preserve the case pattern of each source span
        #[arg(long)]
        match_case: bool,
        /// Strip markup and control characters before converting
        #[arg(long)]
        sanitize: bool,
    },
    /// Transliterate JSON-lines requests in parallel
    Batch {
        /// File with one {"method", "text", "match_case"} object per line
        input: String,
        /// Worker threads (0 = available parallelism)
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Transliterate a file and export the pair as TMX
    Tmx {
        method: String,
        /// Source text file
        input: String,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output_dir: String,
        /// Target language code (default from settings)
        #[arg(long)]
        target_lang: Option<String>,
        #[arg(long)]
        match_case: bool,
    },
    /// Rule table utilities
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Settings utilities
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// Print the built-in rule table of a method
    Export { method: String },
    /// Check a rule table file for load errors
    Validate { file: String },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the default settings TOML
    Export,
    /// Check a settings TOML file
    Validate { file: String },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        xlit_engine::trace_init::init_tracing(dir);
    }
    if let Some(path) = &cli.config {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        });
        if let Err(e) = settings::init_custom(content) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
    if !cli.rules.is_empty() {
        let mut tables = Vec::with_capacity(cli.rules.len());
        for path in &cli.rules {
            match fs::read_to_string(path) {
                Ok(t) => tables.push(t),
                Err(e) => {
                    eprintln!("Error reading {path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        if let Err(e) = MethodRegistry::init_extra(tables) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    match cli.command {
        Command::Methods { language, json } => method_ops::methods(language.as_deref(), json),
        Command::Languages => method_ops::languages(),
        Command::Convert {
            method,
            text,
            match_case,
            sanitize,
        } => convert_ops::convert(&method, text.as_deref(), match_case, sanitize),
        Command::Batch { input, workers } => convert_ops::batch(&input, workers),
        Command::Tmx {
            method,
            input,
            output_dir,
            target_lang,
            match_case,
        } => tmx_ops::tmx(
            &method,
            &input,
            &output_dir,
            target_lang.as_deref(),
            match_case,
        ),
        Command::Rules { action } => match action {
            RulesAction::Export { method } => config_ops::rules_export(&method),
            RulesAction::Validate { file } => config_ops::rules_validate(&file),
        },
        Command::Settings { action } => match action {
            SettingsAction::Export => config_ops::settings_export(),
            SettingsAction::Validate { file } => config_ops::settings_validate(&file),
        },
    }
}
