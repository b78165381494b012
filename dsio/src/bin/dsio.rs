use clap::{Parser, Subcommand};
use dsio::{DataType, FileFormat, LoadOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "DSIO CLI - Inspect and convert binary and text numeric datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Shape hints for files without a metadata artifact
#[derive(clap::Args)]
struct ShapeArgs {
    /// Number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Element type (int8 .. uint64, float32, float64)
    #[arg(long)]
    dtype: Option<DataType>,
}

impl ShapeArgs {
    fn options(&self) -> LoadOptions {
        let mut options = LoadOptions::new();
        if let Some(rows) = self.rows {
            options = options.with_rows(rows);
        }
        if let Some(cols) = self.cols {
            options = options.with_cols(cols);
        }
        if let Some(data_type) = self.dtype {
            options = options.with_data_type(data_type);
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Report which encoding a file holds
    Check {
        /// Dataset file, metadata artifact or text file
        path: PathBuf,
    },
    /// Show dataset shape and element type
    Info {
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        shape: ShapeArgs,
    },
    /// Rewrite a dataset in another encoding
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Target encoding
        #[arg(long, value_enum)]
        to: FileFormat,

        #[command(flatten)]
        shape: ShapeArgs,
    },
}

#[derive(Serialize)]
struct DatasetInfo {
    path: PathBuf,
    format: Option<FileFormat>,
    rows: usize,
    cols: usize,
    dtype: DataType,
    elements: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check { path } => handle_check(path)?,
        Commands::Info { path, json, shape } => handle_info(path, *json, shape)?,
        Commands::Convert {
            input,
            output,
            to,
            shape,
        } => handle_convert(input, output, *to, shape)?,
    }

    Ok(())
}

fn handle_check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match dsio::sniff(path)? {
        Some(format) => println!("{}: {format}", path.display()),
        None => println!("{}: unknown", path.display()),
    }
    Ok(())
}

fn handle_info(path: &Path, json: bool, shape: &ShapeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let format = dsio::sniff(path)?;
    let dataset = dsio::load(path, &shape.options())?;
    let info = DatasetInfo {
        path: path.to_path_buf(),
        format,
        rows: dataset.nrows(),
        cols: dataset.ncols(),
        dtype: dataset.data_type(),
        elements: dataset.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Dataset: {}", info.path.display());
    match info.format {
        Some(format) => println!("  Format: {format}"),
        None => println!("  Format: raw payload"),
    }
    println!("  Shape: {} x {}", info.rows, info.cols);
    println!("  Element type: {} ({} bytes)", info.dtype, info.dtype.size_bytes());
    println!("  Elements: {}", info.elements);
    Ok(())
}

fn handle_convert(
    input: &Path,
    output: &Path,
    to: FileFormat,
    shape: &ShapeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = std::time::Instant::now();
    let dataset = dsio::load(input, &shape.options())?;
    dsio::save(&dataset, output, to)?;

    let (rows, cols) = dataset.dimensions();
    println!(
        "Wrote {rows} x {cols} {} as {to} to {} in {:.2?}",
        dataset.data_type(),
        output.display(),
        start_time.elapsed()
    );
    Ok(())
}
