//! FHIR R4 `Observation` wire model.
//!
//! Covers the three shapes clinbridge produces: a quantity (labs, single vital
//! signs), an integer (cognitive scores) and a component panel (blood pressure).

use serde::{Deserialize, Serialize};

use crate::datatypes::{CodeableConcept, Meta, Quantity, Reference};

/// Observation status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Cancelled,
    EnteredInError,
    Unknown,
}

/// Measurement or assertion about a patient.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Observation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    pub status: ObservationStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    pub code: CodeableConcept,

    pub subject: Reference,

    #[serde(rename = "effectiveDateTime", skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,

    #[serde(rename = "valueQuantity", skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,

    #[serde(rename = "valueInteger", skip_serializing_if = "Option::is_none")]
    pub value_integer: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<ObservationComponent>,
}

/// One named reading inside a multi-value observation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ObservationComponent {
    pub code: CodeableConcept,

    #[serde(rename = "valueQuantity", skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,
}
