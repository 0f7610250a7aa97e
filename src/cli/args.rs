//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Islamic inheritance calculator: family trees, heir classification, and
/// exact estate division
#[derive(Parser, Debug)]
#[command(name = "mwareeth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (-d, -dd, -ddd for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the estate division for a family file
    Compute {
        /// TOML family file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Render the family tree of a family file
    Tree {
        /// TOML family file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Validate a family file without computing shares
    Check {
        /// TOML family file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
