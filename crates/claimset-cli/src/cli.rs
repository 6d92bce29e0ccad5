//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};

/// Claimset CLI - Parse patent claim text into linked claim sets.
#[derive(Debug, Parser)]
#[command(name = "claimset")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLAIMSET_CONFIG")]
    pub config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (claim numbers only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a claim set and print its claims
    Parse(ParseArgs),

    /// Print the dependency tree of a claim set
    Tree(ParseArgs),

    /// Parse many documents and report which ones fail
    Check(CheckArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the parse and tree commands.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Claim text file (stdin when omitted or "-")
    pub file: Option<String>,

    /// Input is a JSON array of pre-segmented claims
    #[arg(short, long)]
    pub segmented: bool,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Claim text files to check
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Inputs are JSON arrays of pre-segmented claims
    #[arg(short, long)]
    pub segmented: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a configuration file
    Init {
        /// Parser preset to start from
        #[arg(short, long, value_enum, default_value = "default")]
        preset: PresetArg,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parser preset argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Case preserved, no reference range expansion
    Strict,
    /// Large inputs and wide ranges
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for claimset_parser::ParserConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => claimset_parser::ParserConfig::default(),
            PresetArg::Strict => claimset_parser::ParserConfig::strict(),
            PresetArg::Lenient => claimset_parser::ParserConfig::lenient(),
        }
    }
}
