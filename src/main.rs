use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabchart::{generate_chart, inspect, load_path, ChartRequest};

#[derive(Parser, Debug)]
#[command(name = "tabchart")]
#[command(about = "Inspect tabular files and turn column selections into chart specs", long_about = None)]
struct Args {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print row/column counts and the numeric/categorical split
    Info {
        /// CSV, XLSX, XLS or JSON file
        file: PathBuf,
    },
    /// Print a chart spec (or an error) as JSON
    Chart {
        /// CSV, XLSX, XLS or JSON file
        file: PathBuf,
        /// bar, line, scatter, pie or histogram
        #[arg(short, long)]
        kind: String,
        /// Column for the x axis
        #[arg(short, long)]
        x: String,
        /// Column for the y axis
        #[arg(short, long, default_value = "")]
        y: String,
        /// Column to group and color by
        #[arg(short, long, default_value = "")]
        color: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Info { file } => {
            let table = load_path(&file).with_context(|| format!("Failed to load {}", file.display()))?;
            let info = inspect(&table).info(display_name(&file));
            info!(rows = info.rows, columns = info.columns, "dataset inspected");
            write_json(&info)?;
        }
        Command::Chart { file, kind, x, y, color } => {
            let table = load_path(&file).with_context(|| format!("Failed to load {}", file.display()))?;
            let request = ChartRequest::new(kind, x).with_y(y).with_color(color);
            let response = generate_chart(&table, &request);
            write_json(&response)?;
            if response.is_error() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).context("Failed to serialize output")?;
    writeln!(handle).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
