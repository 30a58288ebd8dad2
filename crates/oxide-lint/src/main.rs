//! oxide-lint CLI
//!
//! Parses a SQL file with the selected dialect and prints the lossless
//! segment tree.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_lint_core::{DialectRegistry, ParseTree};

/// Parse SQL files into lossless, dialect-aware segment trees.
#[derive(Parser, Debug)]
#[command(name = "oxide-lint")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// SQL file to parse, or `-` to read standard input.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Dialect to parse with.
    #[arg(short, long, env = "OXIDE_LINT_DIALECT", default_value = "hive")]
    dialect: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// List the available dialects.
    Dialects,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Indented text, one segment per line.
    Tree,
    /// The tree as pretty-printed JSON.
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut stdout = io::stdout().lock();
    let unparsable = run(&cli, &mut stdout)?;
    stdout.flush()?;

    if unparsable > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Executes the command line and returns the number of unparsable regions.
fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<usize> {
    let registry = oxide_lint_hive::registry()?;

    if let Some(Commands::Dialects) = cli.command {
        list_dialects(&registry, out)?;
        return Ok(0);
    }

    let dialect = registry.get(&cli.dialect)?;
    let sql = read_input(&cli.file)?;
    debug!("Read {} bytes from {}", sql.len(), cli.file.display());

    let tree = oxide_lint_core::Parser::new(dialect)?.parse_str(&sql);
    let statements = tree.find_all("statement").len();
    let unparsable = tree.unparsable_count();
    info!(
        "Parsed {statements} statement(s) from {} with dialect '{}'",
        cli.file.display(),
        dialect.name()
    );
    if unparsable > 0 {
        warn!("{unparsable} unparsable region(s) in {}", cli.file.display());
    }

    render(&tree, cli.format, out)?;
    Ok(unparsable)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        return io::read_to_string(io::stdin()).context("Failed to read standard input");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render(tree: &ParseTree, format: Format, out: &mut impl Write) -> anyhow::Result<()> {
    match format {
        Format::Tree => write!(out, "{}", tree.to_tree_string())?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, tree)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn list_dialects(registry: &DialectRegistry, out: &mut impl Write) -> anyhow::Result<()> {
    for name in registry.names() {
        match registry.get(name)?.parent() {
            Some(parent) => writeln!(out, "{name}\t(derived from {parent})")?,
            None => writeln!(out, "{name}")?,
        }
    }
    Ok(())
}
