use fhir::{AdministrativeGender, Identifier, Patient};

use crate::constants::SOURCE_ID_SYSTEM;
use crate::ids::patient_id;
use crate::rows::PatientRow;

/// Map a source sex code to administrative gender.
///
/// `M`/`1` are male and `F`/`0` are female. Anything else, including a missing
/// code, is `unknown`; an unrecognised code is never an error.
pub fn gender_from_source_code(code: Option<&str>) -> AdministrativeGender {
    match code.map(str::trim) {
        Some("M") | Some("1") => AdministrativeGender::Male,
        Some("F") | Some("0") => AdministrativeGender::Female,
        _ => AdministrativeGender::Unknown,
    }
}

/// Build the `Patient` for one subjects row.
pub fn build_patient(row: &PatientRow) -> Patient {
    Patient {
        id: Some(patient_id(&row.uuid)),
        meta: None,
        identifier: vec![Identifier {
            system: Some(SOURCE_ID_SYSTEM.to_string()),
            value: Some(row.uuid.to_string()),
        }],
        gender: Some(gender_from_source_code(row.gender.as_deref())),
        birth_date: Some(row.birth_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinbridge_types::SourceId;

    fn row(gender: Option<&str>) -> PatientRow {
        PatientRow {
            uuid: SourceId::new("DEMO-001").expect("valid id"),
            gender: gender.map(str::to_string),
            birth_date: NaiveDate::from_ymd_opt(1960, 1, 1).expect("valid date"),
        }
    }

    #[test]
    fn maps_known_sex_codes() {
        let cases = [
            ("M", AdministrativeGender::Male),
            ("F", AdministrativeGender::Female),
            ("0", AdministrativeGender::Female),
            ("1", AdministrativeGender::Male),
        ];
        for (code, expected) in cases {
            assert_eq!(gender_from_source_code(Some(code)), expected, "code {code}");
        }
    }

    #[test]
    fn unknown_or_missing_sex_code_is_unknown() {
        for code in [Some("m"), Some("2"), Some("X"), Some(""), None] {
            assert_eq!(
                gender_from_source_code(code),
                AdministrativeGender::Unknown,
                "code {code:?}"
            );
        }
    }

    #[test]
    fn builds_identified_patient() {
        let patient = build_patient(&row(Some("1")));

        assert_eq!(patient.id.as_deref(), Some("pat-DEMO-001"));
        assert_eq!(patient.first_identifier_value(), Some("DEMO-001"));
        assert_eq!(
            patient.identifier[0].system.as_deref(),
            Some(SOURCE_ID_SYSTEM)
        );
        assert_eq!(patient.gender, Some(AdministrativeGender::Male));
        assert_eq!(patient.birth_date, NaiveDate::from_ymd_opt(1960, 1, 1));
    }

    #[test]
    fn renders_birth_date_as_plain_date() {
        let json = serde_json::to_value(build_patient(&row(None))).expect("render");
        assert_eq!(json["birthDate"], "1960-01-01");
        assert_eq!(json["gender"], "unknown");
    }
}
