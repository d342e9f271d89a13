//! # Saatmishaali CLI
//!
//! Terminal host for the Saatmishaali card generator.
//!
//! ## Usage
//!
//! ```bash
//! GEMINI_API_KEY=... saatmishaali categories --mode quote
//! GEMINI_API_KEY=... saatmishaali generate --category humayun-ahmed --download
//! GEMINI_API_KEY=... saatmishaali generate --mode meme --category 5 --share
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `AppConfig` - Resolved runtime configuration
//! - `Studio` - Owns the generation state, render surface, export and share pipelines
//! - `TerminalNotifier` / `SystemClipboard` - Host capabilities for the terminal

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod clipboard;
mod notice;
mod studio;

pub use clipboard::SystemClipboard;
pub use notice::TerminalNotifier;
pub use studio::Studio;

use std::path::PathBuf;

use card_core::{Category, Mode};
use card_gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for saatmishaali.
#[derive(Debug, Clone, Parser)]
#[command(name = "saatmishaali")]
#[command(about = "Bengali literary quotes and memes, as shareable cards")]
#[command(version)]
pub struct CliArgs {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "SAATMISHAALI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Directory downloaded cards are written to
    #[arg(long, env = "SAATMISHAALI_OUT_DIR", default_value = ".", global = true)]
    pub out: PathBuf,

    /// Link appended to shared text
    #[arg(long, env = "SAATMISHAALI_SHARE_URL", global = true)]
    pub share_url: Option<String>,

    /// Extra font directory (Bengali fonts)
    #[arg(long, env = "SAATMISHAALI_FONT_DIR", global = true)]
    pub font_dir: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the categories of a mode
    Categories {
        /// Quote or meme
        #[arg(long, value_enum, default_value_t = ModeArg::Quote)]
        mode: ModeArg,
    },

    /// Generate one card
    Generate {
        /// Quote or meme
        #[arg(long, value_enum, default_value_t = ModeArg::Quote)]
        mode: ModeArg,

        /// Category label, slug or 1-based index (defaults to হুমায়ূন আহমেদ for quotes, the first style for memes)
        #[arg(long)]
        category: Option<String>,

        /// Save the card as a PNG
        #[arg(long)]
        download: bool,

        /// Share the card text (copies to the clipboard)
        #[arg(long)]
        share: bool,

        /// Print the artifact as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

/// Mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Literary quotes in an author's style
    Quote,
    /// Bengali memes
    Meme,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Quote => Self::Quote,
            ModeArg::Meme => Self::Meme,
        }
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini client settings.
    pub gemini: GeminiConfig,
    /// Download directory.
    pub out_dir: PathBuf,
    /// Link appended to shared text.
    pub share_url: Option<String>,
    /// Extra font directories.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Configuration with default values and no API key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            out_dir: PathBuf::from("."),
            share_url: None,
            font_dirs: Vec::new(),
        }
    }
}

impl From<&CliArgs> for AppConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            gemini: GeminiConfig {
                api_key: args.api_key.clone(),
                model: args.model.clone(),
                base_url: args.base_url.clone(),
            },
            out_dir: args.out.clone(),
            share_url: args.share_url.clone(),
            font_dirs: args.font_dir.iter().cloned().collect(),
        }
    }
}

/// Pick the category for `mode` from a command-line value.
///
/// Without a value quotes use the default author and memes the first style.
/// Returns `None` when `input` names no category of `mode`.
#[must_use]
pub fn resolve_category(mode: Mode, input: Option<&str>) -> Option<Category> {
    match input {
        Some(input) => Category::parse(mode, input),
        None if Category::default().mode() == mode => Some(Category::default()),
        None => Category::all(mode).into_iter().next(),
    }
}
