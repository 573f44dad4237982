use fhir::{CodeableConcept, Coding, Observation, ObservationStatus, Quantity};

use super::{
    coerce_decimal, effective_at_midnight, format_date_time, non_blank, observation_category,
};
use crate::constants::{CATEGORY_LABORATORY, LOCAL_LAB_SYSTEM, UCUM_SYSTEM};
use crate::ids::patient_reference;
use crate::rows::LabRow;
use crate::CoreResult;

/// Build the `Observation` for one laboratory row.
///
/// The test name is used as-is as a code in the local lab system; there is no
/// terminology lookup.
///
/// # Errors
///
/// Returns [`crate::CoreError::NotNumeric`] if the value is not a finite number.
pub fn build_lab_observation(row: &LabRow) -> CoreResult<Observation> {
    let value = coerce_decimal("value", &row.value)?;
    let effective = effective_at_midnight(row.date)?;
    let unit = non_blank(row.unit.as_deref());

    Ok(Observation {
        id: None,
        meta: None,
        status: ObservationStatus::Final,
        category: vec![observation_category(CATEGORY_LABORATORY)],
        code: CodeableConcept::from_coding(
            Coding::new(LOCAL_LAB_SYSTEM, &row.test_name).with_display(&row.test_name),
        )
        .with_text(&row.test_name),
        subject: patient_reference(&row.uuid),
        effective_date_time: Some(format_date_time(&effective)),
        value_quantity: Some(Quantity {
            value: Some(value),
            unit: unit.map(str::to_string),
            system: unit.map(|_| UCUM_SYSTEM.to_string()),
            code: None,
        }),
        value_integer: None,
        component: Vec::new(),
    })
}
