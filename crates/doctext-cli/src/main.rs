use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// File Text Extractor - pull plain text out of PDF, DOCX and TXT files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the text of a .pdf, .docx, .doc or .txt file
    Extract {
        /// Path to the document
        file_path: PathBuf,

        /// Directory to write `<name>_<Loader>.txt` into (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the extracted text to stdout instead of writing a file
        #[arg(long, conflicts_with = "output_dir")]
        stdout: bool,

        /// Directory for the temporary copy of the input
        #[arg(long)]
        temp_dir: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List accepted extensions and the output suffix each produces
    Formats,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Formats => {
            output::print_formats(&mut std::io::stdout())?;
            Ok(())
        }
        Command::Extract {
            file_path,
            output_dir,
            stdout,
            temp_dir,
            no_color,
        } => {
            // Resolve configuration: CLI flags > env vars > config file
            let config = doctext_core::config_file::load_config();
            let temp_dir = temp_dir
                .or_else(|| std::env::var("DOCTEXT_TEMP_DIR").ok().map(PathBuf::from))
                .or_else(|| config.temp_dir());
            let color = ColorMode(!no_color);

            let target = if stdout {
                Target::Stdout
            } else {
                Target::Dir(output_dir.unwrap_or_else(|| PathBuf::from(".")))
            };
            extract(
                &file_path,
                target,
                temp_dir,
                color,
                &mut std::io::stdout(),
                &mut std::io::stderr(),
            )
            .map(|_| ())
        }
    }
}

/// Where the extracted text goes.
enum Target {
    Stdout,
    Dir(PathBuf),
}

/// Run one extraction. Returns the path written, if any.
fn extract(
    file_path: &Path,
    target: Target,
    temp_dir: Option<PathBuf>,
    color: ColorMode,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> anyhow::Result<Option<PathBuf>> {
    let data = std::fs::read(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;
    let filename = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    tracing::debug!(path = %file_path.display(), bytes = data.len(), "read input file");

    let extractor = doctext_ingest::default_extractor(temp_dir);
    let result = extractor
        .extract(&data, &filename)
        .with_context(|| format!("Failed to extract text from {}", file_path.display()))?;

    tracing::debug!(
        strategy = %result.strategy,
        segments = result.segments,
        output = %result.filename,
        "extraction finished"
    );
    output::print_notices(err, &result.notices, color)?;

    match target {
        Target::Stdout => {
            out.write_all(result.text.as_bytes())?;
            if !result.text.ends_with('\n') {
                writeln!(out)?;
            }
            Ok(None)
        }
        Target::Dir(dir) => {
            let path = dir.join(&result.filename);
            std::fs::write(&path, &result.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output::print_written(out, &result, &path, color)?;
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn stdout_conflicts_with_output_dir() {
        let parsed = Cli::try_parse_from(["doctext", "extract", "a.txt", "--stdout", "-o", "out"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn writes_suffixed_file_into_output_dir() {
        let input_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let input = input_dir.path().join("notes.txt");
        std::fs::write(&input, "hello\nworld").unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let written = extract(
            &input,
            Target::Dir(out_dir.path().to_path_buf()),
            None,
            ColorMode(false),
            &mut out,
            &mut err,
        )
        .unwrap()
        .unwrap();

        assert_eq!(written, out_dir.path().join("notes_TextLoader.txt"));
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "hello\nworld");
        assert!(err.is_empty());
    }

    #[test]
    fn stdout_target_prints_text_and_writes_nothing() {
        let input_dir = tempfile::tempdir().unwrap();
        let input = input_dir.path().join("notes.txt");
        std::fs::write(&input, "line").unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let written = extract(&input, Target::Stdout, None, ColorMode(false), &mut out, &mut err)
            .unwrap();
        assert!(written.is_none());
        assert_eq!(out, b"line\n");
    }

    #[test]
    fn fallback_notice_goes_to_stderr() {
        let input_dir = tempfile::tempdir().unwrap();
        let input = input_dir.path().join("dump.txt");
        std::fs::write(&input, "a\0b").unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        extract(&input, Target::Stdout, None, ColorMode(false), &mut out, &mut err).unwrap();
        assert!(String::from_utf8(err).unwrap().starts_with("warning: TextLoader encountered an issue"));
    }

    #[test]
    fn unsupported_file_is_an_error() {
        let input_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let input = input_dir.path().join("data.csv");
        std::fs::write(&input, "a,b").unwrap();

        let error = extract(
            &input,
            Target::Dir(out_dir.path().to_path_buf()),
            None,
            ColorMode(false),
            &mut Vec::new(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(format!("{error:#}").contains("unsupported file format: .csv"));
        assert!(std::fs::read_dir(out_dir.path()).unwrap().next().is_none());
    }
}
