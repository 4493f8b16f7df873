//! For printing a summary in the format requested on the command line.

use anyhow::Result;
use tonflow::{book::display_name, coins::to_coins_pretty, AddressBook, Summary};

use crate::cli::ModeFlag;

pub fn print_summary(summary: &Summary, mode: ModeFlag, book: &dyn AddressBook) -> Result<()> {
    match mode {
        ModeFlag::Pretty => print_pretty(summary, book),
        ModeFlag::Json => print_json(summary)?,
        ModeFlag::Debug => print_debug(summary),
    }
    Ok(())
}

/// Prints to stdout in a minimal, human readable format.
fn print_pretty(summary: &Summary, book: &dyn AddressBook) {
    for action in &summary.actions {
        let status = match action.success {
            true => "",
            false => " (failed)",
        };
        let preview = &action.simple_preview;
        match preview.value.is_empty() {
            true => println!("{}{status}", preview.name),
            false => println!("{}: {}{status}", preview.name, preview.value),
        }
    }
    if summary.actions.is_empty() {
        println!("No actions");
    }
    println!();
    for (account, flow) in &summary.value_flow.accounts {
        print!("{}: {}", display_name(book, account), to_coins_pretty(flow.ton));
        if flow.fees != 0 {
            print!(", fees {}", to_coins_pretty(flow.fees));
        }
        for (jetton, amount) in &flow.jettons {
            print!(", {amount} of {}", display_name(book, jetton));
        }
        for (nft, count) in &flow.nfts {
            print!(", {count:+} nft {}", display_name(book, nft));
        }
        println!();
    }
}

/// Prints the summary as JSON.
///
/// Useful if another system will ingest the output.
fn print_json(summary: &Summary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Prints dense information, useful for debugging.
fn print_debug(summary: &Summary) {
    for action in &summary.actions {
        println!("{action}");
    }
    println!("{:?}", summary.value_flow);
}
