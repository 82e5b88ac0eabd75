mod cli;

use cli::{Args, Command, UnfixedVendor};
use cve_store::config::{self, Settings};
use cve_store::prelude::*;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\n{} {}", "Caused by:".yellow(), cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Logs go to stderr so stdout carries only JSON output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let file_config = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    let settings = Settings::resolve(
        args.dbpath.clone(),
        args.expire,
        args.command.ignore_will_not_fix(),
        file_config.as_ref(),
    );

    if args.dry_run {
        tracing::info!("Dry run: using an in-memory store");
        return execute(args.command, InMemoryStore::new(), &settings).await;
    }

    let store = RedisStore::open(&settings.dbpath).await?;
    let result = execute(args.command, store.clone(), &settings).await;
    store.close().await?;
    result
}

async fn execute<S>(command: Command, store: S, settings: &Settings) -> Result<ExitCode>
where
    S: RecordStore,
{
    match command {
        Command::Ping => {
            store.ping().await?;
            println!("PONG");
            Ok(ExitCode::Success)
        }
        Command::Load {
            vendor,
            file,
            products,
        } => load(store, settings, vendor, &file, products.as_deref()).await,
        Command::Get { vendor, cve_ids } => {
            let lookup = LookupCvesUseCase::new(store);
            match vendor {
                Vendor::RedHat => get_records::<S, RedHatCve>(&lookup, &cve_ids).await,
                Vendor::Debian => get_records::<S, DebianCve>(&lookup, &cve_ids).await,
                Vendor::Ubuntu => get_records::<S, UbuntuCve>(&lookup, &cve_ids).await,
                Vendor::Microsoft => get_records::<S, MicrosoftCve>(&lookup, &cve_ids).await,
            }
        }
        Command::Unfixed {
            vendor,
            release,
            package,
            ignore_will_not_fix,
        } => {
            if ignore_will_not_fix && vendor != UnfixedVendor::Redhat {
                tracing::warn!(
                    vendor = %Vendor::from(vendor),
                    "--ignore-will-not-fix only applies to redhat and was ignored"
                );
            }
            let filter = FilterCvesUseCase::new(store, CodenameTables::default());
            match vendor {
                UnfixedVendor::Redhat => {
                    let cves = filter
                        .unfixed_redhat(&release, &package, settings.ignore_will_not_fix)
                        .await?;
                    print_records(cves)
                }
                UnfixedVendor::Debian | UnfixedVendor::Ubuntu => {
                    let query = StatusQuery::unfixed(release, package);
                    filter_release_scoped(&filter, vendor.into(), &query).await
                }
            }
        }
        Command::Fixed {
            vendor,
            release,
            package,
        } => {
            let filter = FilterCvesUseCase::new(store, CodenameTables::default());
            let query = StatusQuery::fixed(release, package);
            filter_release_scoped(&filter, vendor.into(), &query).await
        }
    }
}

async fn load<S: RecordStore>(
    store: S,
    settings: &Settings,
    vendor: Vendor,
    file: &Path,
    products: Option<&Path>,
) -> Result<ExitCode> {
    if products.is_some() && vendor != Vendor::Microsoft {
        tracing::warn!(%vendor, "--products only applies to microsoft and was ignored");
    }

    let reader = RecordFileReader::new();
    let insert = InsertCvesUseCase::new(store, settings.retention, StderrProgressReporter::new());

    eprintln!("📖 Loading {} records from {}...", vendor, file.display());
    let summary = match vendor {
        Vendor::RedHat => {
            let records: Vec<RedHatCve> = reader.read_records(file)?;
            insert.insert(&records).await?
        }
        Vendor::Debian => {
            let records: Vec<DebianCve> = reader.read_records(file)?;
            insert.insert(&records).await?
        }
        Vendor::Ubuntu => {
            let records: Vec<UbuntuCve> = reader.read_records(file)?;
            insert.insert(&records).await?
        }
        Vendor::Microsoft => {
            let records: Vec<MicrosoftCve> = reader.read_records(file)?;
            let products: Vec<MicrosoftProduct> = match products {
                Some(path) => reader.read_records(path)?,
                None => Vec::new(),
            };
            insert.insert_microsoft(&records, &products).await?
        }
    };

    print_json(&summary)?;
    Ok(ExitCode::Success)
}

async fn get_records<S, D>(lookup: &LookupCvesUseCase<S>, cve_ids: &[String]) -> Result<ExitCode>
where
    S: RecordStore,
    D: VendorDocument,
{
    if let [cve_id] = cve_ids {
        return match lookup.get_one::<D>(cve_id).await? {
            Some(document) => {
                print_json(&document)?;
                Ok(ExitCode::Success)
            }
            None => {
                eprintln!("No {} record for {}", D::VENDOR, cve_id);
                Ok(ExitCode::NoRecords)
            }
        };
    }

    let documents = lookup.get_many::<D>(cve_ids).await?;
    if documents.is_empty() {
        eprintln!("No {} records found", D::VENDOR);
        return Ok(ExitCode::NoRecords);
    }
    print_records(documents)
}

/// Resolves the release first so an unknown major is reported with the
/// supported list instead of printing an empty result.
async fn filter_release_scoped<S: RecordStore>(
    filter: &FilterCvesUseCase<S>,
    vendor: Vendor,
    query: &StatusQuery,
) -> Result<ExitCode> {
    filter.resolve_codename(vendor, &query.major)?;
    match vendor {
        Vendor::Debian => print_records(filter.execute::<DebianCve>(query).await?),
        Vendor::Ubuntu => print_records(filter.execute::<UbuntuCve>(query).await?),
        Vendor::RedHat | Vendor::Microsoft => {
            anyhow::bail!("{} records are not scoped by release codename", vendor)
        }
    }
}

fn print_records<D: Serialize>(records: HashMap<String, D>) -> Result<ExitCode> {
    let sorted: BTreeMap<String, D> = records.into_iter().collect();
    print_json(&sorted)?;
    Ok(ExitCode::Success)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
