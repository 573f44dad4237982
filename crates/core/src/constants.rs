//! Constants used throughout the clinbridge core crate.
//!
//! Coding systems, fixed codes and file names live here so builders, tests and the
//! table loader agree on a single spelling.

/// Repository address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/fhir";

/// Media type for FHIR JSON request bodies.
pub const FHIR_JSON_CONTENT_TYPE: &str = "application/fhir+json;charset=utf-8";

/// Media type requested for FHIR JSON responses.
pub const FHIR_JSON_ACCEPT: &str = "application/fhir+json";

/// Offset applied to date-only observation timestamps (UTC+08:00).
pub const LOCAL_UTC_OFFSET_SECS: i32 = 8 * 3600;

// ----------------------------------------------------------------------------
// Resource id prefixes
// ----------------------------------------------------------------------------

pub const PATIENT_ID_PREFIX: &str = "pat-";
pub const CONDITION_ID_PREFIX: &str = "cond-";

// ----------------------------------------------------------------------------
// Coding systems
// ----------------------------------------------------------------------------

pub const SOURCE_ID_SYSTEM: &str = "https://example.org/uuid";
pub const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";
pub const CONDITION_CLINICAL_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-clinical";
pub const CONDITION_VER_STATUS_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-ver-status";
pub const LOINC_SYSTEM: &str = "http://loinc.org";
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";
pub const ICD10_SYSTEM: &str = "http://hl7.org/fhir/sid/icd-10";
pub const LOCAL_LAB_SYSTEM: &str = "https://example.org/fhir/CodeSystem/local-lab";
pub const COGNITIVE_TEST_SYSTEM: &str = "https://example.org/fhir/CodeSystem/cognitive-test";
pub const SURGERY_SYSTEM: &str = "https://example.org/fhir/CodeSystem/surgery";
pub const CHEMO_DRUG_SYSTEM: &str = "https://example.org/fhir/CodeSystem/chemo-drug";

// ----------------------------------------------------------------------------
// Observation categories
// ----------------------------------------------------------------------------

pub const CATEGORY_LABORATORY: &str = "laboratory";
pub const CATEGORY_VITAL_SIGNS: &str = "vital-signs";
pub const CATEGORY_SURVEY: &str = "survey";

// ----------------------------------------------------------------------------
// Blood pressure panel
// ----------------------------------------------------------------------------

pub const BP_PANEL_CODE: &str = "85354-9";
pub const BP_PANEL_DISPLAY: &str = "Blood pressure panel";
pub const BP_PANEL_TEXT: &str = "Blood pressure";
pub const MMHG_UNIT: &str = "mmHg";
pub const MMHG_UCUM: &str = "mm[Hg]";

// ----------------------------------------------------------------------------
// Source table file names
// ----------------------------------------------------------------------------

pub const PATIENTS_CSV: &str = "patients.csv";
pub const LABS_CSV: &str = "labs.csv";
pub const VITALS_CSV: &str = "vitals.csv";
pub const COGNITIVE_CSV: &str = "cognitive.csv";
pub const DIAGNOSES_CSV: &str = "diagnoses.csv";
pub const PROCEDURES_CSV: &str = "procedures.csv";
pub const MEDICATIONS_CSV: &str = "medications.csv";
