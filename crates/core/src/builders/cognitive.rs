use fhir::{CodeableConcept, Coding, Observation, ObservationStatus};

use super::{coerce_integer, effective_at_midnight, format_date_time, observation_category};
use crate::constants::{CATEGORY_SURVEY, COGNITIVE_TEST_SYSTEM};
use crate::ids::patient_reference;
use crate::rows::CognitiveRow;
use crate::CoreResult;

/// Build the `Observation` for one cognitive test row.
///
/// The test type doubles as code, display and text.
///
/// # Errors
///
/// Returns [`crate::CoreError::NotInteger`] if the score is not an integer.
pub fn build_cognitive_observation(row: &CognitiveRow) -> CoreResult<Observation> {
    let score = coerce_integer("score", &row.score)?;
    let effective = effective_at_midnight(row.date)?;

    Ok(Observation {
        id: None,
        meta: None,
        status: ObservationStatus::Final,
        category: vec![observation_category(CATEGORY_SURVEY)],
        code: CodeableConcept::from_coding(
            Coding::new(COGNITIVE_TEST_SYSTEM, &row.test_type).with_display(&row.test_type),
        )
        .with_text(&row.test_type),
        subject: patient_reference(&row.uuid),
        effective_date_time: Some(format_date_time(&effective)),
        value_quantity: None,
        value_integer: Some(score),
        component: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use chrono::NaiveDate;
    use clinbridge_types::SourceId;

    fn row(score: &str) -> CognitiveRow {
        CognitiveRow {
            uuid: SourceId::new("DEMO-001").expect("valid id"),
            date: NaiveDate::from_ymd_opt(2024, 2, 9).expect("valid date"),
            test_type: "MMSE".into(),
            score: score.into(),
        }
    }

    #[test]
    fn builds_integer_score() {
        let obs = build_cognitive_observation(&row("27")).expect("build cognitive");

        assert_eq!(obs.value_integer, Some(27));
        assert!(obs.value_quantity.is_none());
        assert_eq!(obs.category[0].first_code(), Some(CATEGORY_SURVEY));
        assert_eq!(obs.code.first_code(), Some("MMSE"));
        assert_eq!(obs.code.coding[0].display.as_deref(), Some("MMSE"));
        assert_eq!(obs.code.text.as_deref(), Some("MMSE"));
        assert_eq!(obs.subject.as_str(), Some("Patient/pat-DEMO-001"));
    }

    #[test]
    fn fractional_score_fails_loudly() {
        let err = build_cognitive_observation(&row("26.5")).expect_err("fractional score");
        match err {
            CoreError::NotInteger { field, value } => {
                assert_eq!(field, "score");
                assert_eq!(value, "26.5");
            }
            other => panic!("expected NotInteger error, got {other:?}"),
        }
    }
}
