//! For Command Line Interface for tonflow

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tonflow_types::AccountId;

/// Summarize a TON trace. To use: pass a JSON trace file, or pipe one in.
///
/// ```
/// <fetch trace> | tonflow --output json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppArgs {
    /// JSON trace to read. Reads stdin when absent.
    pub trace: Option<PathBuf>,
    /// Only show actions involving this account (raw form, e.g., 0:83df...)
    #[clap(short, long)]
    pub account: Option<AccountId>,
    /// JSON address book with account names and auction kinds
    #[clap(short, long)]
    pub book: Option<PathBuf>,
    /// Straw to disable, may be repeated (e.g., --disable nft_transfer)
    #[clap(short, long)]
    pub disable: Vec<String>,
    /// How to print the summary.
    #[clap(short, long, value_enum, default_value_t = ModeFlag::Pretty)]
    pub output: ModeFlag,
    /// Print the merged bubble tree before the summary.
    #[clap(long)]
    pub tree: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ModeFlag {
    /// One line per action, then the value flow
    Pretty,
    /// The whole summary as JSON
    Json,
    /// Dense information, useful for debugging
    Debug,
}
