//! Typed source rows.
//!
//! One struct per source table. Optional columns are `Option`s so builders test for
//! presence through the type system. Column names match the source exports, which
//! lets the CSV loader deserialise straight into these types.
//!
//! Values that must be coerced to numbers (lab values, cognitive scores) are kept as
//! raw text; the builders coerce them and report a failure against the named field.

use chrono::NaiveDate;
use clinbridge_types::SourceId;
use serde::Deserialize;

/// One person from the subjects table.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PatientRow {
    pub uuid: SourceId,
    /// Raw sex code from the source (`M`, `F`, `0`, `1`, ...).
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
}

/// One laboratory result.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LabRow {
    pub uuid: SourceId,
    pub test_name: String,
    pub date: NaiveDate,
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// One vital-signs measurement occasion.
///
/// Every reading is independently optional; a `NaN` reading counts as absent.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VitalRow {
    pub uuid: SourceId,
    pub date: NaiveDate,
    #[serde(default)]
    pub systolic: Option<f64>,
    #[serde(default)]
    pub diastolic: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// One cognitive test result.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CognitiveRow {
    pub uuid: SourceId,
    pub date: NaiveDate,
    pub test_type: String,
    pub score: String,
}

/// One diagnosis.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DiagnosisRow {
    pub uuid: SourceId,
    pub icd10: String,
    #[serde(default)]
    pub display: Option<String>,
    pub diagnosis_date: NaiveDate,
}

/// One surgical procedure.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProcedureRow {
    pub uuid: SourceId,
    pub code: String,
    pub display: String,
    pub date: NaiveDate,
}

/// One chemotherapy course.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MedicationRow {
    pub uuid: SourceId,
    pub regimen: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub note: Option<String>,
}
