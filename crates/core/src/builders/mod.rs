//! Record builders: one typed source row in, FHIR resources out.
//!
//! Each builder is a pure function of its row. Builders whose rows carry raw text
//! that must become a number return [`CoreResult`]; the others cannot fail.
//!
//! Observation timestamps built from a date-only column are pinned to midnight at
//! the fixed local offset (`+08:00`).

mod cognitive;
mod condition;
mod lab;
mod medication;
mod patient;
mod procedure;
mod vitals;

pub use cognitive::build_cognitive_observation;
pub use condition::build_condition;
pub use lab::build_lab_observation;
pub use medication::build_medication_statement;
pub use patient::{build_patient, gender_from_source_code};
pub use procedure::build_procedure;
pub use vitals::{build_vital_observations, vital_sign_observation, VitalSign};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use fhir::{CodeableConcept, Coding};

use crate::constants::{LOCAL_UTC_OFFSET_SECS, OBSERVATION_CATEGORY_SYSTEM};
use crate::{CoreError, CoreResult};

/// Midnight of `date` at the fixed local offset.
pub fn effective_at_midnight(date: NaiveDate) -> CoreResult<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(LOCAL_UTC_OFFSET_SECS).ok_or_else(|| {
        CoreError::InvalidInput(format!("invalid UTC offset: {LOCAL_UTC_OFFSET_SECS}s"))
    })?;

    date.and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| CoreError::InvalidInput(format!("no local midnight for {date}")))
}

/// FHIR `dateTime` text for `at`, second precision with explicit offset.
pub(crate) fn format_date_time(at: &DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Observation category concept with `code` from the HL7 category system.
pub(crate) fn observation_category(code: &str) -> CodeableConcept {
    CodeableConcept::from_coding(Coding::new(OBSERVATION_CATEGORY_SYSTEM, code))
}

/// A present reading, treating `NaN` as missing.
pub(crate) fn present(reading: Option<f64>) -> Option<f64> {
    reading.filter(|v| !v.is_nan())
}

/// Coerce raw cell text to a finite decimal.
pub(crate) fn coerce_decimal(field: &'static str, raw: &str) -> CoreResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::NotNumeric {
            field,
            value: raw.to_string(),
        })
}

/// Coerce raw cell text to an integer.
///
/// Integral decimal text (`27.0`) is accepted; fractional, non-finite or
/// non-numeric text is not.
pub(crate) fn coerce_integer(field: &'static str, raw: &str) -> CoreResult<i64> {
    // 2^53: largest range where every integer has an exact f64 representation.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT)
        .map(|v| v as i64)
        .ok_or_else(|| CoreError::NotInteger {
            field,
            value: raw.to_string(),
        })
}

/// Trimmed text, or `None` when blank.
pub(crate) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_uses_fixed_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        let at = effective_at_midnight(date).expect("midnight");
        assert_eq!(format_date_time(&at), "2024-06-01T00:00:00+08:00");
    }

    #[test]
    fn decimal_coercion_rejects_non_numbers() {
        assert_eq!(coerce_decimal("value", " 7.25 ").expect("number"), 7.25);
        for bad in ["not-a-number", "", "NaN", "inf", "1,5"] {
            match coerce_decimal("value", bad) {
                Err(CoreError::NotNumeric { field, value }) => {
                    assert_eq!(field, "value");
                    assert_eq!(value, bad);
                }
                other => panic!("expected NotNumeric for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn integer_coercion_accepts_integral_decimals_only() {
        assert_eq!(coerce_integer("score", "27").expect("int"), 27);
        assert_eq!(coerce_integer("score", "27.0").expect("int"), 27);
        assert_eq!(coerce_integer("score", "-3").expect("int"), -3);
        for bad in ["27.5", "twenty", "", "NaN"] {
            assert!(
                matches!(coerce_integer("score", bad), Err(CoreError::NotInteger { .. })),
                "expected NotInteger for {bad:?}"
            );
        }
    }

    #[test]
    fn nan_reading_is_absent() {
        assert_eq!(present(Some(f64::NAN)), None);
        assert_eq!(present(None), None);
        assert_eq!(present(Some(0.0)), Some(0.0));
    }
}
