//! help command implementation

use std::io::Write;

use crate::cli::HELP_TEXT;
use crate::error::Result;

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", HELP_TEXT)?;
    Ok(())
}
