//! Prosecheck CLI entry point.

use clap::Parser;
use prosecheck::cli::{self, Cli, Commands, EXIT_ERROR};
use tracing::Level;

fn init_logging(verbose: u8, json: bool) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let result = match &cli.command {
        Commands::Check(args) => cli::run_check(args),
        Commands::Init(args) => cli::run_init(args),
        Commands::Genres => cli::list_genres(),
        Commands::Categories => cli::list_categories(),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
