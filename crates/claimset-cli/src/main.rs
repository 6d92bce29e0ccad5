//! Claimset CLI - Command-line interface for the claim parser.

use claimset_cli::commands;
use claimset_cli::{Cli, Command, Config, Formatter};
use claimset_parser::ClaimParser;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> claimset_cli::Result<()> {
    // Load config from the override path or the default location
    let path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&path)?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    let parser = || ClaimParser::new(config.parser.clone());

    match cli.command {
        Command::Parse(args) => commands::execute_parse(args, &parser()?, &formatter),
        Command::Tree(args) => commands::execute_tree(args, &parser()?, &formatter),
        Command::Check(args) => commands::execute_check(args, &parser()?, &formatter),
        Command::Config(args) => commands::execute_config(args, &config, &path, &formatter),
    }
}
