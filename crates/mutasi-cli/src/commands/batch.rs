//! Batch command - convert every statement PDF matching a pattern.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use mutasi_core::{suggested_filename, Bank, ExportFormat};

use super::convert::{BankArg, FormatArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input PDFs, e.g. "statements/*.pdf"
    #[arg(required = true)]
    pattern: String,

    /// Issuing bank for every matched file
    #[arg(short, long, value_enum)]
    bank: BankArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: FormatArg,

    /// Output directory (default: alongside each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Stop at the first failing file instead of continuing
    #[arg(long)]
    fail_fast: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let inputs: Vec<PathBuf> = glob::glob(&args.pattern)?
        .filter_map(|entry| entry.ok())
        .collect();
    if inputs.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.pattern);
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let bank: Bank = args.bank.into();
    let format: ExportFormat = args.format.into();

    let bar = ProgressBar::new(inputs.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut converted = 0usize;
    let mut failed = 0usize;
    for input in &inputs {
        bar.set_message(input.display().to_string());
        match convert_one(input, bank, format, &args.output_dir, &config) {
            Ok(output) => {
                converted += 1;
                info!(input = %input.display(), output = %output.display(), "converted");
            }
            Err(err) => {
                failed += 1;
                warn!(input = %input.display(), %err, "conversion failed");
                if args.fail_fast {
                    bar.abandon();
                    return Err(err);
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} {} converted, {} failed ({:.2}s)",
        style("Done:").green().bold(),
        converted,
        failed,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn convert_one(
    input: &PathBuf,
    bank: Bank,
    format: ExportFormat,
    output_dir: &Option<PathBuf>,
    config: &mutasi_core::ConvertConfig,
) -> anyhow::Result<PathBuf> {
    let data = fs::read(input)?;
    let document = mutasi_core::convert_bytes(&data, bank, format, config)?;

    let name = suggested_filename(bank, format);
    let output = match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    };
    fs::write(&output, &document.data)?;
    Ok(output)
}
