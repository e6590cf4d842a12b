use clap::Parser;

use crate::cli::Cli;
use ticker_dither::run;

mod cli;

fn main() {
    let cli = Cli::parse();
    run(cli.into());
}
