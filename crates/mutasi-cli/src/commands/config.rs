//! Config command - inspect and initialize the conversion config.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use mutasi_core::ConvertConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show {
        /// Path to an existing config file
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Write a default config file
    Init {
        /// Destination path
        #[arg(default_value = "mutasi.json")]
        path: PathBuf,
    },
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.action {
        ConfigAction::Show { path } => {
            let config = match path {
                Some(p) => ConvertConfig::from_file(&p)?,
                None => ConvertConfig::default(),
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init { path } => {
            if path.exists() {
                anyhow::bail!("Refusing to overwrite {}", path.display());
            }
            ConvertConfig::default().save(&path)?;
            println!("{} {}", style("Wrote").green().bold(), path.display());
        }
    }
    Ok(())
}
