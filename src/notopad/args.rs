use clap::{Args, Parser, Subcommand};
use notopad::search::SearchOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notopad", version)]
#[command(about = "A plain text editor with autosave and backups", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// File to open
    pub file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct SearchFlags {
    /// Only match text with the same case
    #[arg(short = 'c', long)]
    pub match_case: bool,

    /// Only match whole words
    #[arg(short, long)]
    pub whole_word: bool,
}

impl From<SearchFlags> for SearchOptions {
    fn from(flags: SearchFlags) -> Self {
        SearchOptions {
            match_case: flags.match_case,
            whole_word: flags.whole_word,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new, empty file
    #[command(alias = "n")]
    New { file: PathBuf },

    /// Show title and line/word/character counts
    #[command(alias = "s")]
    Stats { file: PathBuf },

    /// Find text in a file
    #[command(alias = "f")]
    Find {
        file: PathBuf,
        query: String,
        #[command(flatten)]
        flags: SearchFlags,
    },

    /// Replace every occurrence of text in a file, then save it
    #[command(alias = "r")]
    Replace {
        file: PathBuf,
        query: String,
        replacement: String,
        #[command(flatten)]
        flags: SearchFlags,
    },

    /// Export a file to PDF
    Export { file: PathBuf, out: PathBuf },

    /// Print a Python file with keywords, strings and comments colored
    Highlight { file: PathBuf },

    /// List recently opened files
    Recent {
        /// Forget all recent files
        #[arg(long)]
        clear: bool,
    },

    /// Restore a file from its autosave backup
    Recover { file: PathBuf },

    /// Get or set configuration
    Config {
        /// Setting key (e.g. editor.font_size)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}
