use fhir::{CodeableConcept, Coding, Condition};

use super::non_blank;
use crate::constants::{CONDITION_CLINICAL_SYSTEM, CONDITION_VER_STATUS_SYSTEM, ICD10_SYSTEM};
use crate::ids::{condition_id, patient_reference};
use crate::rows::DiagnosisRow;

/// Build the `Condition` for one diagnosis row.
///
/// Clinical status is always `active` and verification status always `confirmed`.
/// Display text falls back to the ICD-10 code.
pub fn build_condition(row: &DiagnosisRow) -> Condition {
    let display = non_blank(row.display.as_deref()).unwrap_or(row.icd10.as_str());

    Condition {
        id: Some(condition_id(&row.uuid)),
        meta: None,
        clinical_status: Some(CodeableConcept::from_coding(Coding::new(
            CONDITION_CLINICAL_SYSTEM,
            "active",
        ))),
        verification_status: Some(CodeableConcept::from_coding(Coding::new(
            CONDITION_VER_STATUS_SYSTEM,
            "confirmed",
        ))),
        code: Some(CodeableConcept::from_coding(
            Coding::new(ICD10_SYSTEM, &row.icd10).with_display(display),
        )),
        subject: patient_reference(&row.uuid),
        onset_date_time: Some(row.diagnosis_date.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinbridge_types::SourceId;

    fn row(display: Option<&str>) -> DiagnosisRow {
        DiagnosisRow {
            uuid: SourceId::new("DEMO-001").expect("valid id"),
            icd10: "C34.1".into(),
            display: display.map(str::to_string),
            diagnosis_date: NaiveDate::from_ymd_opt(2022, 11, 3).expect("valid date"),
        }
    }

    #[test]
    fn builds_confirmed_active_condition() {
        let condition = build_condition(&row(Some("Malignant neoplasm of upper lobe")));

        assert_eq!(condition.id.as_deref(), Some("cond-DEMO-001"));
        assert_eq!(
            condition.clinical_status.as_ref().and_then(|c| c.first_code()),
            Some("active")
        );
        assert_eq!(
            condition.verification_status.as_ref().and_then(|c| c.first_code()),
            Some("confirmed")
        );

        let code = condition.code.expect("code");
        assert_eq!(code.coding[0].system.as_deref(), Some(ICD10_SYSTEM));
        assert_eq!(code.first_code(), Some("C34.1"));
        assert_eq!(
            code.coding[0].display.as_deref(),
            Some("Malignant neoplasm of upper lobe")
        );
        assert_eq!(condition.subject.as_str(), Some("Patient/pat-DEMO-001"));
        assert_eq!(condition.onset_date_time.as_deref(), Some("2022-11-03"));
    }

    #[test]
    fn display_defaults_to_code() {
        for display in [None, Some(""), Some("  ")] {
            let condition = build_condition(&row(display));
            let code = condition.code.expect("code");
            assert_eq!(code.coding[0].display.as_deref(), Some("C34.1"));
        }
    }
}
