//! Command implementations.

pub mod check;
pub mod config;
pub mod parse;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::parse::{execute_parse, execute_tree};
