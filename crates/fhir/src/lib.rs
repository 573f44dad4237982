//! FHIR R4 wire support for clinbridge.
//!
//! This crate provides **wire models** for the handful of FHIR resources clinbridge
//! produces and reads back from a repository:
//! - `Patient`, `Observation`, `Condition`, `Procedure`, `MedicationStatement`
//! - the `collection` flavour of `Bundle`
//!
//! This crate focuses on:
//! - JSON serialisation/deserialisation in the FHIR R4 shape
//! - the `Resource` envelope keyed by `resourceType`
//! - parse errors that point at the failing field
//!
//! It does not know how rows are mapped or how resources travel; that lives in
//! `clinbridge-core`.

pub mod bundle;
pub mod condition;
pub mod datatypes;
pub mod medication_statement;
pub mod observation;
pub mod patient;
pub mod procedure;
pub mod resource;

// Re-export resource models
pub use bundle::{Bundle, BundleEntry, BundleType};
pub use condition::Condition;
pub use medication_statement::{MedicationStatement, MedicationStatementStatus};
pub use observation::{Observation, ObservationComponent, ObservationStatus};
pub use patient::{AdministrativeGender, Patient};
pub use procedure::{EventStatus, Procedure};
pub use resource::{Resource, ResourceType};

// Re-export shared datatypes
pub use datatypes::{CodeableConcept, Coding, Dosage, Identifier, Meta, Period, Quantity, Reference};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Deserialize `json_text` into `T`, reporting the path of the first mismatching field.
pub(crate) fn from_json_with_path<T>(json_text: &str, what: &str) -> FhirResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(FhirError::Translation(format!(
                "{what} schema mismatch at {path}: {source}"
            )))
        }
    }
}
