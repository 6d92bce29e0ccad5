//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::input::FileSource;
use crate::output::Formatter;
use claimset_parser::ClaimParser;

/// Execute the check command.
///
/// Every file is parsed; a failing file never stops the others. The command
/// fails afterwards if any file did.
pub fn execute_check(args: CheckArgs, parser: &ClaimParser, formatter: &Formatter) -> Result<()> {
    let sources: Vec<FileSource> = args
        .files
        .iter()
        .map(|path| FileSource::new(path.as_str(), args.segmented))
        .collect();

    let report = parser.parse_batch(&sources);
    println!("{}", formatter.format_report(&report)?);

    match report.metadata.failed_documents {
        0 => Ok(()),
        failed => Err(CliError::CheckFailed(failed)),
    }
}
