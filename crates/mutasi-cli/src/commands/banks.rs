//! Banks command - list supported issuers and their profiles.

use clap::Args;
use console::style;

use mutasi_core::statement::profile_for;
use mutasi_core::Bank;

/// Arguments for the banks command.
#[derive(Args)]
pub struct BanksArgs {
    /// Show the output schema for each issuer
    #[arg(long)]
    schema: bool,
}

pub async fn run(args: BanksArgs) -> anyhow::Result<()> {
    for bank in Bank::ALL {
        let profile = profile_for(bank);
        println!(
            "{}  header threshold {}",
            style(bank.label()).green().bold(),
            profile.header_threshold
        );
        if args.schema {
            let titles: Vec<&str> = profile.schema.iter().map(|spec| spec.title).collect();
            println!("    columns: {}", titles.join(" | "));
        }
    }
    Ok(())
}
