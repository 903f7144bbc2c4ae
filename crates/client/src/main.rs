//! leavecal-client CLI entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leavecal_client::cli::{CheckArgs, Cli, Commands, OutputFormat};
use leavecal_client::output::{format_output, pretty};
use leavecal_client::{ClientConfig, LeavecalClient};
use leavecal_core::calendar::DateRange;
use leavecal_core::holiday::ConflictResult;
use leavecal_core::ports::{LeaveStore, RescheduleRequest};
use leavecal_engine::ConflictChecker;

#[derive(Serialize)]
struct CheckReport {
    range: DateRange,
    #[serde(flatten)]
    result: ConflictResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leavecal=debug,leavecal_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))
        .context("Invalid client configuration")?;
    let client = Arc::new(LeavecalClient::new(&config)?);

    match cli.command {
        Commands::Holidays { year } => {
            let holidays = client.holidays(year).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&holidays, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_holidays(year, &holidays)),
            }
        }
        Commands::Check(args) => {
            let report = check(&client, &args).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_conflicts(&report.range, &report.result))
                }
            }
        }
        Commands::Reschedule {
            id,
            check: args,
            skip_check,
        } => {
            if !skip_check {
                let report = check(&client, &args).await?;
                if report.result.blocked {
                    bail!(report.result.message());
                }
            }
            let range = range_of(&args)?;
            let event = client
                .reschedule(&id, &RescheduleRequest::new(range))
                .await
                .with_context(|| format!("Failed to reschedule leave request {id}"))?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&event, cli.format)),
                OutputFormat::Pretty => {
                    if !cli.quiet {
                        println!(
                            "Leave request updated successfully! ({} days)",
                            event.range.days()
                        );
                    }
                    println!("{}", pretty::format_event(&event));
                }
            }
        }
    }

    Ok(())
}

fn range_of(args: &CheckArgs) -> anyhow::Result<DateRange> {
    DateRange::new(args.start, args.end).context("Invalid date range")
}

async fn check(client: &Arc<LeavecalClient>, args: &CheckArgs) -> anyhow::Result<CheckReport> {
    let range = range_of(args)?;
    let checker = ConflictChecker::new(client.clone(), args.policy);
    let result = checker.check(&range).await;
    Ok(CheckReport { range, result })
}
