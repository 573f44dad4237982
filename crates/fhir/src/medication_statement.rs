//! FHIR R4 `MedicationStatement` wire model (medication courses).

use serde::{Deserialize, Serialize};

use crate::datatypes::{CodeableConcept, Dosage, Meta, Period, Reference};

/// MedicationStatement status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MedicationStatementStatus {
    Active,
    Completed,
    EnteredInError,
    Intended,
    Stopped,
    OnHold,
    Unknown,
    NotTaken,
}

/// Record of a medication taken over a period.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MedicationStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    pub status: MedicationStatementStatus,

    #[serde(
        rename = "medicationCodeableConcept",
        skip_serializing_if = "Option::is_none"
    )]
    pub medication_codeable_concept: Option<CodeableConcept>,

    pub subject: Reference,

    #[serde(rename = "effectivePeriod", skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dosage: Vec<Dosage>,
}
