use fhir::{CodeableConcept, Coding, Dosage, MedicationStatement, MedicationStatementStatus, Period};

use super::non_blank;
use crate::constants::CHEMO_DRUG_SYSTEM;
use crate::ids::patient_reference;
use crate::rows::MedicationRow;

/// Build the completed `MedicationStatement` for one chemotherapy course.
///
/// A missing note is treated as empty. FHIR forbids empty strings, so an empty
/// note produces no dosage entry rather than `{"text": ""}`: on the wire, an empty
/// note and no note are the same record.
pub fn build_medication_statement(row: &MedicationRow) -> MedicationStatement {
    let note = non_blank(row.note.as_deref()).unwrap_or_default();

    MedicationStatement {
        id: None,
        meta: None,
        status: MedicationStatementStatus::Completed,
        medication_codeable_concept: Some(CodeableConcept::from_coding(
            Coding::new(CHEMO_DRUG_SYSTEM, &row.regimen).with_display(&row.regimen),
        )),
        subject: patient_reference(&row.uuid),
        effective_period: Some(Period {
            start: Some(row.start_date.to_string()),
            end: row.end_date.map(|d| d.to_string()),
        }),
        dosage: if note.is_empty() {
            Vec::new()
        } else {
            vec![Dosage {
                text: Some(note.to_string()),
            }]
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinbridge_types::SourceId;

    fn row(end: Option<(i32, u32, u32)>, note: Option<&str>) -> MedicationRow {
        MedicationRow {
            uuid: SourceId::new("DEMO-001").expect("valid id"),
            regimen: "FOLFOX".into(),
            start_date: NaiveDate::from_ymd_opt(2023, 2, 1).expect("valid date"),
            end_date: end.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn builds_completed_course_with_period_and_note() {
        let statement = build_medication_statement(&row(Some((2023, 6, 30)), Some("cycle 1-12")));

        assert_eq!(statement.status, MedicationStatementStatus::Completed);
        let concept = statement.medication_codeable_concept.expect("medication");
        assert_eq!(concept.coding[0].system.as_deref(), Some(CHEMO_DRUG_SYSTEM));
        assert_eq!(concept.first_code(), Some("FOLFOX"));
        assert_eq!(statement.subject.as_str(), Some("Patient/pat-DEMO-001"));

        let period = statement.effective_period.expect("period");
        assert_eq!(period.start.as_deref(), Some("2023-02-01"));
        assert_eq!(period.end.as_deref(), Some("2023-06-30"));
        assert_eq!(statement.dosage[0].text.as_deref(), Some("cycle 1-12"));
    }

    #[test]
    fn missing_note_and_end_are_omitted() {
        let statement = build_medication_statement(&row(None, None));
        assert!(statement.dosage.is_empty());
        assert_eq!(statement.effective_period.and_then(|p| p.end), None);

        let json = serde_json::to_value(build_medication_statement(&row(None, Some(""))))
            .expect("render");
        assert!(json.get("dosage").is_none());
    }

    #[test]
    fn blank_note_is_the_same_record_as_no_note() {
        assert_eq!(
            build_medication_statement(&row(None, Some("   "))),
            build_medication_statement(&row(None, None))
        );
    }
}
