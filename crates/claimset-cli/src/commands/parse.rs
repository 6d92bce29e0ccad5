//! Parse and tree command implementations.

use crate::cli::ParseArgs;
use crate::error::Result;
use crate::input::{claim_text, read_input};
use crate::output::Formatter;
use claimset_domain::{ClaimSet, ClaimText};
use claimset_parser::ClaimParser;

/// Execute the parse command.
pub fn execute_parse(args: ParseArgs, parser: &ClaimParser, formatter: &Formatter) -> Result<()> {
    let set = load_claim_set(&args, parser)?;
    println!("{}", formatter.format_claim_set(&set)?);
    Ok(())
}

/// Execute the tree command.
pub fn execute_tree(args: ParseArgs, parser: &ClaimParser, formatter: &Formatter) -> Result<()> {
    let set = load_claim_set(&args, parser)?;
    println!("{}", formatter.format_tree(&set)?);
    Ok(())
}

/// Read the input named by `args` and parse it.
pub fn load_claim_set(args: &ParseArgs, parser: &ClaimParser) -> Result<ClaimSet> {
    let contents = read_input(args.file.as_deref())?;
    parse_text(claim_text(contents, args.segmented)?, parser)
}

fn parse_text(text: ClaimText, parser: &ClaimParser) -> Result<ClaimSet> {
    let set = match text {
        ClaimText::Raw(text) => parser.parse(&text)?,
        ClaimText::Segmented(items) => parser.parse_segmented(items)?,
    };
    Ok(set)
}
