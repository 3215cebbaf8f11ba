use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tagpack::format::Format;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Convert a serialized file from one format to another.
#[derive(Parser)]
#[command(name = "tagpack", version, about)]
struct Cli {
    /// Input file
    #[arg(short = 'i', long = "input-file")]
    input_file: PathBuf,

    /// Output file
    #[arg(short = 'o', long = "output-file")]
    output_file: PathBuf,

    /// Input format: json, yaml or toml
    #[arg(long = "input-format", visible_alias = "if")]
    input_format: String,

    /// Output format: json, yaml or toml
    #[arg(long = "output-format", visible_alias = "of")]
    output_format: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let input_format: Format = cli.input_format.parse()?;
    let output_format: Format = cli.output_format.parse()?;

    if input_format == output_format {
        if cli.input_file == cli.output_file {
            info!(format = %input_format, "formats and files match, nothing to do");
            return Ok(());
        }
        fs::copy(&cli.input_file, &cli.output_file).with_context(|| {
            format!(
                "cannot copy {} to {}",
                cli.input_file.display(),
                cli.output_file.display()
            )
        })?;
        info!(format = %input_format, "formats match, copied file verbatim");
        return Ok(());
    }

    let input = File::open(&cli.input_file)
        .with_context(|| format!("cannot open {}", cli.input_file.display()))?;
    let value = input_format
        .serializer()
        .load(BufReader::new(input))
        .with_context(|| format!("cannot load {} as {}", cli.input_file.display(), input_format))?;

    let output = File::create(&cli.output_file)
        .with_context(|| format!("cannot create {}", cli.output_file.display()))?;
    output_format
        .serializer()
        .dump(&value, BufWriter::new(output))
        .with_context(|| format!("cannot write {} as {}", cli.output_file.display(), output_format))?;

    info!(
        from = %input_format,
        to = %output_format,
        kind = value.kind_name(),
        "converted"
    );
    Ok(())
}
