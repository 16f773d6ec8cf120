pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "takefare",
    about = "Takefare estimate CLI",
    long_about = "Price light-cargo estimates against the effective tariff and produce the \
                  LINE/mail copy block, the same arithmetic the booking form runs.",
    after_help = "Examples:\n  takefare quote --service haul --km 35 --pickup-floor 3\n  takefare price-table --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Price an estimate and print the breakdown plus the copyable summary")]
    Quote(commands::quote::QuoteArgs),
    #[command(name = "price-table", about = "Show the effective tariff after config layering")]
    PriceTable(commands::price_table::PriceTableArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Quote(args) => commands::quote::run(&args),
        Command::PriceTable(args) => commands::price_table::run(&args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
