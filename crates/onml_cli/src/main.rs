//! ONML CLI
//!
//! Formats and minifies XML/SVG markup by round-tripping it through the
//! ONML tree representation.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use onml_parser::{ParseOptions, Parser as _, XmlParser};
use onml_tree::stringify;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// ONML - markup formatter built on an array-based tree representation
#[derive(Parser)]
#[command(name = "onml")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Tolerate mismatched and unclosed tags
    #[arg(long, global = true)]
    loose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print a markup file ("-" reads stdin)
    Fmt {
        /// Input file
        file: PathBuf,

        /// Indent width in spaces
        #[arg(short, long, default_value_t = 2)]
        indent: usize,

        /// Rewrite the file in place instead of printing
        #[arg(short, long)]
        write: bool,
    },

    /// Collapse a markup file onto a single line ("-" reads stdin)
    Min {
        /// Input file
        file: PathBuf,

        /// Rewrite the file in place instead of printing
        #[arg(short, long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ParseOptions {
        strict: !cli.loose,
        ..ParseOptions::default()
    };

    match cli.command {
        Commands::Fmt {
            file,
            indent,
            write,
        } => reformat(&file, options, indent, write),
        Commands::Min { file, write } => reformat(&file, options, 0, write),
    }
}

fn reformat(file: &Path, options: ParseOptions, indent: usize, write: bool) -> Result<()> {
    let source = read_input(file)?;
    let tree = XmlParser::with_options(options)
        .parse(&source)
        .into_diagnostic()?;
    let mut output = stringify(&tree, indent).into_diagnostic()?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    if write && file.as_os_str() != "-" {
        fs::write(file, &output).into_diagnostic()?;
        info!(file = %file.display(), bytes = output.len(), "rewrote file");
    } else {
        print!("{output}");
    }
    Ok(())
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .into_diagnostic()?;
        return Ok(source);
    }
    fs::read_to_string(file).into_diagnostic()
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
