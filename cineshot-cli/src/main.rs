// cineshot-cli/src/main.rs
//
// Entry point: parses arguments, initializes logging, and dispatches to the
// subcommand modules. Exits with code 1 on any error.

use std::process;

use clap::Parser;
use log::error;

use cineshot_cli::output::print_error;
use cineshot_cli::{run_analyze, run_classify, run_eval, run_info, Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Classify(args) => run_classify(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(e) = result {
        error!("{e}");
        print_error(&e.to_string());
        process::exit(1);
    }
}
