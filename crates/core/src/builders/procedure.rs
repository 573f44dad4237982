use fhir::{CodeableConcept, Coding, EventStatus, Procedure};

use crate::constants::SURGERY_SYSTEM;
use crate::ids::patient_reference;
use crate::rows::ProcedureRow;

/// Build the completed `Procedure` for one surgery row.
pub fn build_procedure(row: &ProcedureRow) -> Procedure {
    Procedure {
        id: None,
        meta: None,
        status: EventStatus::Completed,
        code: Some(
            CodeableConcept::from_coding(
                Coding::new(SURGERY_SYSTEM, &row.code).with_display(&row.display),
            )
            .with_text(&row.display),
        ),
        subject: patient_reference(&row.uuid),
        performed_date_time: Some(row.date.to_string()),
    }
}
