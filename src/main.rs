use std::path::Path;
use clap::Parser;
use futures::StreamExt;
use log::{debug, error, info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;
use shipping_address_report::record::Record;
use shipping_address_report::utils::RetryPolicy;
use shipping_address_report::{
    AddressEnricher, AddressSource, CsvAddressSource, GeoTaxLookup, HttpAddressSource, MemoryAddressSource,
    UserAddressAggregator, UserAddressReport,
};
use crate::config::{Cli, SourceKind};

mod config;

#[tokio::main]
async fn main() {
    if let Err(e) = install_tracing() {
        eprintln!("cannot set up logging: {:?}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn install_tracing() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .try_init()?;
    color_eyre::install()
}

async fn run() -> color_eyre::Result<()> {
    let cli = Cli::parse();
    let aggregator = UserAddressAggregator::new(AddressEnricher::new(cli.shipping_rules(), GeoTaxLookup::default()));

    let reports = match cli.source() {
        SourceKind::Http(url) => {
            let source = HttpAddressSource::new(url, RetryPolicy::new(cli.retries))?;
            build_reports(&aggregator, &source, &cli.users, cli.concurrency()).await
        }
        SourceKind::Csv(path) => {
            info!("reading addresses from [{}]", path.display());
            build_reports(&aggregator, &CsvAddressSource::new(path), &cli.users, cli.concurrency()).await
        }
        SourceKind::Sample => {
            info!("no address source given, using sample addresses");
            build_reports(&aggregator, &MemoryAddressSource::sample(), &cli.users, cli.concurrency()).await
        }
    };

    info!("finished, built [{}/{}] reports", reports.len(), cli.users.len());
    if reports.is_empty() && !cli.users.is_empty() {
        color_eyre::eyre::bail!("no address report could be built");
    }
    for report in &reports {
        log_summary(report);
    }

    let records = reports.into_iter()
        .flat_map(Record::from_report)
        .collect::<Vec<_>>();
    info!("saving [{}] addresses to [{}]", records.len(), cli.out.display());
    save_records(records, &cli.out)?;
    Ok(())
}

/// build reports for all users, skipping those whose addresses cannot be fetched
async fn build_reports<S: AddressSource>(
    aggregator: &UserAddressAggregator,
    source: &S,
    users: &[String],
    concurrency: usize,
) -> Vec<UserAddressReport> {
    let total = users.len();
    let reports = futures::stream::iter(users).enumerate().map(|(idx, user_id)| {
        async move {
            info!("[{}/{total}] building address report for [{}]", idx + 1, user_id);
            match aggregator.build_report(source, user_id).await {
                Ok(report) => Some(report),
                Err(e) => {
                    error!("cannot build address report for [{}]: {:?}", user_id, e);
                    None
                }
            }
        }
    })
        .buffer_unordered(concurrency)
        .collect::<Vec<_>>()
        .await;

    reports.into_iter().flatten().collect()
}

fn log_summary(report: &UserAddressReport) {
    let recommended = report.recommended_address.as_ref()
        .map(|a| a.formatted_address.as_str())
        .unwrap_or("none");
    info!(
        "[{}] {} addresses ({} domestic, {} international), recommended: {}",
        report.user_id,
        report.total_addresses,
        report.domestic_address_count,
        report.international_address_count,
        recommended,
    );
    for address in &report.addresses {
        if let Some(issue) = address.shipping_issue {
            debug!("[{}] address [{}] cannot be shipped to: {}", report.user_id, address.id(), issue);
        }
    }
    if !report.has_valid_shipping_address {
        warn!("[{}] has no address valid for shipping", report.user_id);
    }
}

/// write result to CSV file, grouped by user
fn save_records(mut records: Vec<Record>, save_path: impl AsRef<Path>) -> color_eyre::Result<()> {
    // stable, so every user's addresses keep their input order
    records.sort_by(|r1, r2| r1.user_id.cmp(&r2.user_id));
    if let Some(parent) = save_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::Writer::from_path(save_path)?;
    for record in &records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
