use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use confinames_core::CellRef;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Codenames-style board kept in a spreadsheet document", long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    /// Document holding the board and the word list
    #[arg(short, long, default_value = "confinames.json", global = true)]
    pub document: PathBuf,

    /// TOML file overriding the board size, sheet layout and palette
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create a document from a word list file, one word per line
    Init {
        #[arg(short, long)]
        words: PathBuf,

        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// "Nouveau": reset the board, draw words and colors
    New,
    /// "RAZ": put the placeholders back and clear colors and reveals
    Reset,
    /// Reveal the card at a cell, e.g. C3
    Reveal {
        cell: CellRef,

        /// Answer the confirmation with yes
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the board
    Show {
        /// Also print the hidden affiliations
        #[arg(short, long)]
        key: bool,
    },
}
