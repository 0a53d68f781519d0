use colored::Colorize;
use log::debug;
use std::io::{self, Write};

use crate::types::ReplaceResult;

pub fn print_replace_summary<W: Write>(writer: &mut W, result: &ReplaceResult) -> io::Result<()> {
    debug!("Printing summary for {} updated files", result.files_updated);
    let verb = if result.dry_run { "would be updated" } else { "updated" };
    writeln!(writer, "{} files {}", result.files_updated.to_string().green().bold(), verb)?;
    for file in &result.updated_files {
        writeln!(writer, "  {} {}", "✓".green(), file.blue())?;
    }

    if !result.skipped_files.is_empty() {
        writeln!(
            writer,
            "\n{} {} files could not be processed",
            "⚠".yellow().bold(),
            result.skipped_files.len().to_string().yellow()
        )?;
        for file in &result.skipped_files {
            writeln!(writer, "  {} {}", "└──".dimmed(), file)?;
        }
    }
    writer.flush()
}

pub fn print_json<W: Write>(writer: &mut W, result: &ReplaceResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(dry_run: bool) -> ReplaceResult {
        ReplaceResult {
            files_scanned: 4,
            files_updated: 1,
            updated_files: vec!["src/app.ts".to_string()],
            skipped_files: vec![],
            bindings_relocated: 2,
            dry_run,
        }
    }

    #[test]
    fn test_summary_lists_updated_files() {
        let mut out = Vec::new();
        print_replace_summary(&mut out, &result(false)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("files updated"));
        assert!(text.contains("src/app.ts"));
        assert!(!text.contains("could not be processed"));
    }

    #[test]
    fn test_summary_dry_run_wording() {
        let mut out = Vec::new();
        print_replace_summary(&mut out, &result(true)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("files would be updated"));
    }

    #[test]
    fn test_summary_lists_skipped_files() {
        let mut out = Vec::new();
        let result = ReplaceResult { skipped_files: vec!["broken.ts".to_string()], ..result(false) };
        print_replace_summary(&mut out, &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("could not be processed"));
        assert!(text.contains("broken.ts"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        print_json(&mut out, &result(true)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["files_updated"], 1);
        assert_eq!(value["bindings_relocated"], 2);
        assert_eq!(value["dry_run"], true);
    }
}
