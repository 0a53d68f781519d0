use colored::Colorize;
use log::debug;
use std::io::{self, Write};

use crate::types::DiscoveryResult;

pub fn print_count<W: Write>(writer: &mut W, result: &DiscoveryResult) -> io::Result<()> {
    writeln!(writer, "{}", result.count())?;
    writer.flush()
}

pub fn print_barrels<W: Write>(writer: &mut W, result: &DiscoveryResult) -> io::Result<()> {
    debug!("Printing {} barrel files", result.count());
    writeln!(writer, "{} barrel files found", result.count().to_string().yellow().bold())?;
    for barrel in &result.barrels {
        writeln!(writer, "{}", barrel.blue())?;
    }
    if result.files_skipped > 0 {
        writeln!(
            writer,
            "{} {} files could not be read",
            "⚠".yellow(),
            result.files_skipped.to_string().yellow()
        )?;
    }
    writer.flush()
}

pub fn print_json<W: Write>(writer: &mut W, result: &DiscoveryResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()
}
