//! Deterministic resource ids and references derived from source identifiers.
//!
//! Ids are a fixed prefix plus the source identifier, so every resource belonging to
//! one person points at the same `Patient` before any repository has seen it.

use clinbridge_types::SourceId;
use fhir::{Reference, ResourceType};

use crate::constants::{CONDITION_ID_PREFIX, PATIENT_ID_PREFIX};

/// Logical id of the `Patient` for `source`.
pub fn patient_id(source: &SourceId) -> String {
    format!("{PATIENT_ID_PREFIX}{source}")
}

/// Logical id of the `Condition` for `source`.
pub fn condition_id(source: &SourceId) -> String {
    format!("{CONDITION_ID_PREFIX}{source}")
}

/// Subject reference used by every non-patient resource of `source`.
pub fn patient_reference(source: &SourceId) -> Reference {
    Reference::to(ResourceType::Patient, &patient_id(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_patient_reference_from_source_id() {
        let source = SourceId::new("DEMO-001").expect("valid id");
        assert_eq!(patient_id(&source), "pat-DEMO-001");
        assert_eq!(
            patient_reference(&source).as_str(),
            Some("Patient/pat-DEMO-001")
        );
    }

    #[test]
    fn derives_condition_id_from_source_id() {
        let source = SourceId::new("DEMO-001").expect("valid id");
        assert_eq!(condition_id(&source), "cond-DEMO-001");
    }

    #[test]
    fn derived_ids_fit_fhir_id_length() {
        let source = SourceId::new("x".repeat(SourceId::MAX_LEN)).expect("valid id");
        assert!(patient_id(&source).len() <= 64);
        assert!(condition_id(&source).len() <= 64);
    }
}
