//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", formatter.info(&format!("Config file: {}", path.display())));
            println!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { preset, force } => {
            let config = init_config(path, preset.into(), force)?;
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Write a fresh configuration file with the given parser settings.
fn init_config(path: &Path, parser: claimset_parser::ParserConfig, force: bool) -> Result<Config> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = Config {
        parser,
        ..Config::default()
    };
    config.save_to(path)?;
    Ok(config)
}
