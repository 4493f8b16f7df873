use std::{fs::File, io::BufReader};

use anyhow::{bail, Result};
use clap::Parser;
use log::{info, warn};
use tonflow::{AddressBook, EmptyBook, StaticBook, StrawSet, Summarizer, Trace};

use crate::{cli::AppArgs, output::print_summary};

mod cli;
mod output;

/// Produces a summary of a TON trace.
/// ```command
/// cargo run --release -p tonflow_cli -- trace.json --account 0:83df...
/// ```
fn main() -> Result<()> {
    env_logger::init();

    let args = AppArgs::parse();

    let trace = match &args.trace {
        Some(path) => Trace::from_reader(BufReader::new(File::open(path)?))?,
        None => Trace::from_reader(std::io::stdin().lock())?,
    };
    info!("Read trace with {} transactions", trace.transaction_count());

    let book: Box<dyn AddressBook> = match &args.book {
        Some(path) => Box::new(StaticBook::from_file(path)?),
        None => Box::new(EmptyBook),
    };

    let straws = StrawSet::default();
    let disabled: Vec<&str> = args.disable.iter().map(String::as_str).collect();
    for name in &disabled {
        if !straws.names().contains(name) {
            bail!("Unknown straw {name}, expected one of {:?}", straws.names());
        }
    }
    if !disabled.is_empty() {
        warn!("Straws disabled: {disabled:?}");
    }
    let summarizer = Summarizer::new(straws.without(&disabled));

    if args.tree {
        print!("{}", summarizer.merge(&trace));
    }
    let summary = summarizer.summarize(&trace, args.account.as_ref(), book.as_ref());
    print_summary(&summary, args.output, book.as_ref())?;
    Ok(())
}
