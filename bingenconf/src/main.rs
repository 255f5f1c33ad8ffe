//! genconf command-line tool for checking, querying, and reformatting
//! genconf documents.
//!
//! Usage: genconf [OPTIONS] [FILE]
//!
//! Reads FILE (or stdin when FILE is absent or `-`) and prints the canonical
//! rendering. See `genconf --help` for the options.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use libgenconf::{parse_file, parse_reader, Document, ParseError, RenderOptions};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "genconf", version, about = "Check, query, and reformat genconf documents")]
struct Cli {
    /// Input file; stdin when absent or "-"
    file: Option<PathBuf>,

    /// Check that the input parses (exit 0 if valid, 1 if invalid)
    #[arg(long)]
    check: bool,

    /// Print the attribute at a slash-separated path, e.g. "database/main/host"
    #[arg(long, value_name = "PATH")]
    get: Option<String>,

    /// Spaces per nesting level [default: $GENCONF_INDENT or 4]
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Write the rendering back to the input file
    #[arg(short, long, conflicts_with = "output")]
    write: bool,

    /// Write the rendering to the given file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log parser activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Cannot write <{}>: {1}", .0.display())]
    Write(PathBuf, #[source] io::Error),

    #[error("{0}")]
    Usage(&'static str),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .with_target(true)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("Warning: could not install log subscriber");
        }
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = cli.file.as_ref().filter(|p| p.as_os_str() != "-");
    tracing::debug!(?input, "reading document");

    let doc = match input {
        Some(path) => parse_file(path)?,
        None => parse_reader(io::stdin().lock())?,
    };

    if cli.check {
        return Ok(());
    }

    if let Some(path) = &cli.get {
        println!("{}", doc.root().get_value_from_path(path));
        return Ok(());
    }

    let options = match cli.indent {
        Some(width) => RenderOptions::default().with_indent_width(width),
        None => RenderOptions::from_env(),
    };
    emit(cli, input, &doc, &options)
}

fn emit(
    cli: &Cli,
    input: Option<&PathBuf>,
    doc: &Document,
    options: &RenderOptions,
) -> Result<(), CliError> {
    let rendered = doc.render(options);

    let target = if cli.write {
        Some(input.ok_or(CliError::Usage("--write requires an input file"))?)
    } else {
        cli.output.as_ref()
    };

    match target {
        Some(path) => {
            tracing::debug!(path = %path.display(), "writing rendering");
            fs::write(path, rendered).map_err(|e| CliError::Write(path.clone(), e))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .map_err(|e| CliError::Write(PathBuf::from("stdout"), e))
        }
    }
}
