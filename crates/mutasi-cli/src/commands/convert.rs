//! Convert command - turn one statement PDF into a transaction table.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use mutasi_core::{suggested_filename, Bank, ExportFormat};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input statement PDF
    #[arg(required = true)]
    pub input: PathBuf,

    /// Issuing bank
    #[arg(short, long, value_enum)]
    pub bank: BankArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xlsx")]
    pub format: FormatArg,

    /// Output file (default: generated name next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BankArg {
    Bca,
    Bni,
    Mandiri,
    Bri,
}

impl From<BankArg> for Bank {
    fn from(value: BankArg) -> Self {
        match value {
            BankArg::Bca => Bank::Bca,
            BankArg::Bni => Bank::Bni,
            BankArg::Mandiri => Bank::Mandiri,
            BankArg::Bri => Bank::Bri,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// Styled spreadsheet
    Xlsx,
    /// Delimited text
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Xlsx => ExportFormat::Spreadsheet,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

pub async fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let bank: Bank = args.bank.into();
    let format: ExportFormat = args.format.into();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Converting {} statement...", bank));

    let data = fs::read(&args.input)?;
    debug!(bytes = data.len(), "statement read");

    let document = mutasi_core::convert_bytes(&data, bank, format, &config)?;

    let output_path = args.output.unwrap_or_else(|| {
        let name = suggested_filename(bank, format);
        args.input.with_file_name(name)
    });
    fs::write(&output_path, &document.data)?;

    spinner.finish_and_clear();
    info!(output = %output_path.display(), "conversion finished");
    println!(
        "{} {} ({}, {:.2}s)",
        style("Wrote").green().bold(),
        output_path.display(),
        document.media_type,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
