use anyhow::Context;
use chrono::{DateTime, NaiveDate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinbridge_core::builders::{VitalSign, build_patient, vital_sign_observation};
use clinbridge_core::rows::PatientRow;
use clinbridge_core::{RepositoryClient, render_comparison, render_resource, resolve_base_url};
use clinbridge_types::SourceId;
use fhir::{Reference, Resource, ResourceType};

const DEMO_PATIENT: &str = "DEMO-001";
const DEMO_WEIGHT_KG: f64 = 70.5;
const DEMO_WEIGHT_AT: &str = "2024-06-01T08:30:00+08:00";

/// Demo round trip against a FHIR repository
///
/// Creates one sample patient and one body-weight observation for that patient,
/// printing what was sent next to what the repository stored, then reads each
/// back by its server-assigned id.
///
/// # Environment Variables
/// - `CLINBRIDGE_BASE_URL`: repository base URL (default: "http://localhost:8080/fhir")
/// - `RUST_LOG`: log filter (default: info for clinbridge crates)
///
/// # Returns
/// * `Ok(())` - if both resources were created and read back
/// * `Err(anyhow::Error)` - on the first failed request
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinbridge_run=info".parse()?)
                .add_directive("clinbridge_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = resolve_base_url(std::env::var("CLINBRIDGE_BASE_URL").ok())?;
    tracing::info!("++ Using FHIR repository at {}", cfg.base_url());
    let client = RepositoryClient::new(&cfg);

    let patient = Resource::from(build_patient(&PatientRow {
        uuid: SourceId::new(DEMO_PATIENT)?,
        gender: Some("1".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1960, 1, 1).context("invalid birth date")?,
    }));
    let patient_id = round_trip(&client, &patient).await?;

    let weight = Resource::from(vital_sign_observation(
        VitalSign::BodyWeight,
        Reference::to(ResourceType::Patient, &patient_id),
        &DateTime::parse_from_rfc3339(DEMO_WEIGHT_AT)?,
        DEMO_WEIGHT_KG,
    ));
    round_trip(&client, &weight).await?;

    Ok(())
}

/// Create `resource`, print the comparison, read it back and print that too.
///
/// Returns the server-assigned id.
async fn round_trip(client: &RepositoryClient, resource: &Resource) -> anyhow::Result<String> {
    let resource_type = resource.resource_type();

    let stored = client
        .create(resource)
        .await
        .with_context(|| format!("creating {resource_type}"))?;
    println!("{}", render_comparison(resource, &stored));

    let id = stored
        .id()
        .with_context(|| format!("repository returned {resource_type} without an id"))?
        .to_string();
    tracing::info!("Created {}/{}", resource_type, id);

    let read_back = client
        .read(resource_type, &id)
        .await
        .with_context(|| format!("reading {resource_type}/{id}"))?;
    println!(
        "{}",
        render_resource(&format!("{resource_type}/{id} (read back)"), &read_back)
    );

    Ok(id)
}
