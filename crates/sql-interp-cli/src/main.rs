//! sql-interp CLI
//!
//! Renders a JSON argument list into a SQL statement and its bind values.
//!
//! ```text
//! $ sql-interp '["SELECT * FROM t WHERE id IN", [1, 2, 3], "AND name =", {"$esc": "John"}]'
//! {"sql":"SELECT * FROM t WHERE id IN (?, ?, ?) AND name = ?","bind":[1,2,3,"John"]}
//! ```

mod json;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use sql_interp::SqlInterp;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Context-sensitive SQL interpolation.
///
/// Strings in the argument array are SQL text. Any other JSON value is
/// rendered according to the SQL that precedes it. Wrap a value as
/// {"$esc": value} to bind a string.
#[derive(Parser)]
#[command(name = "sql-interp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON array of arguments (takes precedence over --file).
    input: Option<String>,

    /// Read the JSON array from a file instead of stdin.
    #[arg(short, long, env = "SQL_INTERP_FILE")]
    file: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(short, long)]
    pretty: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

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

    let input = read_input(&cli)?;
    println!("{}", render(&input, cli.pretty)?);

    Ok(())
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }
    if let Some(path) = &cli.file {
        return read_file(path);
    }
    debug!("Reading arguments from stdin");
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    debug!(path = %path.display(), "Reading arguments from file");
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render(input: &str, pretty: bool) -> anyhow::Result<String> {
    let args = json::args_from_str(input).context("Invalid argument list")?;
    let (sql, bind) = SqlInterp::new().interp(args)?;
    let output = json::Output::new(sql, &bind);
    let text = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(text)
}
