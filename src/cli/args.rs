//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Seed;

/// Self-learning 20 Questions: a yes/no decision tree that grows while you play
#[derive(Parser, Debug)]
#[command(name = "twentyq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Additional config file (overrides the global config)
    #[arg(short = 'c', long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where a command gets its tree from.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeSource {
    /// Tree file (default: configured tree_file, else a built-in tree)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Built-in tree to use when no file is loaded: small or medium
    #[arg(short, long)]
    pub seed: Option<Seed>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively, learning from wrong guesses (default)
    Play {
        #[command(flatten)]
        source: TreeSource,
    },

    /// Play one round without learning
    Quiz {
        #[command(flatten)]
        source: TreeSource,
    },

    /// Print the tree
    Show {
        #[command(flatten)]
        source: TreeSource,

        /// Drawing style
        #[arg(long, value_enum, default_value_t = ShowStyle::Classic)]
        style: ShowStyle,
    },

    /// Validate a tree file and print its statistics
    Check {
        /// Tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowStyle {
    /// `+-Yes:` / `` `-No: `` connectors
    Classic,
    /// Box-drawing characters
    Unicode,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Write a config template to the global config path
    Init,

    /// Show config paths
    Path,
}
