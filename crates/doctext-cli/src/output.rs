use std::io::Write;
use std::path::Path;

use doctext_core::{ACCEPTED_EXTENSIONS, ExtractionResult, Notice};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print non-fatal notices as warnings.
pub fn print_notices(w: &mut dyn Write, notices: &[Notice], color: ColorMode) -> std::io::Result<()> {
    for notice in notices {
        let msg = format!("warning: {}", notice);
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
    }
    Ok(())
}

/// Print the one-line summary after the text file has been written.
pub fn print_written(
    w: &mut dyn Write,
    result: &ExtractionResult,
    path: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    let chars = result.text.chars().count();
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({} chars, {} segment{}, {} strategy)",
            "Wrote".green().bold(),
            path.display(),
            chars,
            result.segments,
            if result.segments == 1 { "" } else { "s" },
            result.strategy
        )
    } else {
        writeln!(
            w,
            "Wrote {} ({} chars, {} segment{}, {} strategy)",
            path.display(),
            chars,
            result.segments,
            if result.segments == 1 { "" } else { "s" },
            result.strategy
        )
    }
}

/// Print the accepted extensions and the output suffix each produces.
pub fn print_formats(w: &mut dyn Write) -> std::io::Result<()> {
    for (ext, strategy) in ACCEPTED_EXTENSIONS {
        writeln!(w, ".{:<6} {:<6} <name>{}", ext, strategy.as_str(), strategy.suffix())?;
    }
    Ok(())
}
