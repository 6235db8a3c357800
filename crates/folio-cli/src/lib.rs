//! Library components of the `folio` command-line tool.

pub mod logging;
pub mod script;
