//! csvlint CLI - validate tabular data against a schema.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Validate {
            file,
            schema,
            delimiter,
            max_rows,
            max_diagnostics,
            json,
        } => commands::validate::run(
            file,
            &schema,
            delimiter,
            max_rows,
            max_diagnostics,
            json,
        ),

        Commands::Schema { uri, json } => commands::schema::run(&uri, json),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
