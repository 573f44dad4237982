use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clinbridge_core::{
    resolve_base_url, AssembledBundle, BundleAssembler, RepositoryClient, RowPolicy,
    SourceTables,
};
use fhir::ResourceType;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clinbridge")]
#[command(about = "Convert clinical tables to FHIR and exchange them with a FHIR repository")]
struct Cli {
    /// FHIR repository base URL (default: http://localhost:8080/fhir)
    #[arg(long, global = true, env = "CLINBRIDGE_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a collection bundle from a directory of CSV tables
    Bundle {
        /// Directory holding patients.csv, labs.csv, vitals.csv, ...
        dir: PathBuf,
        /// Write the bundle here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Leave out rows that cannot be converted instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Create every resource built from a directory of CSV tables on the repository
    Push {
        /// Directory holding patients.csv, labs.csv, vitals.csv, ...
        dir: PathBuf,
        /// Leave out rows that cannot be converted instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Print a stored resource as JSON
    Read {
        /// Resource type (Patient, Observation, Condition, Procedure, MedicationStatement)
        resource_type: ResourceType,
        /// Logical id on the repository
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinbridge=info".parse()?)
                .add_directive("clinbridge_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bundle {
            dir,
            output,
            skip_invalid,
        } => {
            let assembled = assemble(&dir, skip_invalid)?;
            let json = assembled.bundle.to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing bundle to {}", path.display()))?;
                    println!(
                        "Wrote {} resources to {}",
                        assembled.bundle.len(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
        Commands::Push { dir, skip_invalid } => {
            let client = RepositoryClient::new(&resolve_base_url(cli.base_url)?);
            let assembled = assemble(&dir, skip_invalid)?;

            for resource in assembled.bundle.resources() {
                let stored = client.create(resource).await.with_context(|| {
                    format!(
                        "creating {} {}",
                        resource.resource_type(),
                        resource.id().unwrap_or("(no id)")
                    )
                })?;
                println!(
                    "{} {} -> {}",
                    resource.resource_type(),
                    resource.id().unwrap_or("-"),
                    stored.id().unwrap_or("-")
                );
            }
            println!("Created {} resources", assembled.bundle.len());
        }
        Commands::Read { resource_type, id } => {
            let client = RepositoryClient::new(&resolve_base_url(cli.base_url)?);
            let resource = client.read(resource_type, &id).await?;
            println!("{}", resource.to_json_pretty()?);
        }
    }

    Ok(())
}

fn assemble(dir: &Path, skip_invalid: bool) -> anyhow::Result<AssembledBundle> {
    let policy = if skip_invalid {
        RowPolicy::Skip
    } else {
        RowPolicy::Abort
    };

    let loaded = SourceTables::load_dir_with_policy(dir, policy)
        .with_context(|| format!("loading tables from {}", dir.display()))?;
    let mut assembled = BundleAssembler::new(policy).assemble(&loaded.tables)?;

    let mut skipped = loaded.skipped;
    skipped.append(&mut assembled.skipped);
    if !skipped.is_empty() {
        eprintln!("Skipped {} invalid rows:", skipped.len());
        for row in &skipped {
            eprintln!("  {} row {}: {}", row.table, row.index, row.reason);
        }
    }

    Ok(assembled)
}
