//! FHIR R4 `Patient` wire model.
//!
//! Responsibilities:
//! - Define the subject resource every other clinbridge resource points at
//! - Map administrative gender to and from its FHIR codes
//!
//! Notes:
//! - `birthDate` is a plain date; FHIR allows partial dates but clinbridge always
//!   writes full ones, so anything else from a repository is rejected

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datatypes::{Identifier, Meta};

/// Administrative gender of a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

impl AdministrativeGender {
    /// FHIR code for this gender.
    pub fn as_str(self) -> &'static str {
        match self {
            AdministrativeGender::Male => "male",
            AdministrativeGender::Female => "female",
            AdministrativeGender::Other => "other",
            AdministrativeGender::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AdministrativeGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demographics and identification of a person receiving care.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    #[serde(rename = "birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl Patient {
    /// Value of the first identifier, if any.
    pub fn first_identifier_value(&self) -> Option<&str> {
        self.identifier.first().and_then(|i| i.value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_json_with_path, FhirError};

    #[test]
    fn parses_repository_copy_with_extra_elements() {
        let input = r#"{
  "id": "1203",
  "meta": { "versionId": "1", "lastUpdated": "2025-02-11T09:12:44.120+00:00" },
  "text": { "status": "generated", "div": "<div/>" },
  "identifier": [ { "system": "https://example.org/uuid", "value": "DEMO-001" } ],
  "gender": "male",
  "birthDate": "1960-01-01"
}"#;

        let patient: Patient = from_json_with_path(input, "Patient").expect("parse patient");
        assert_eq!(patient.id.as_deref(), Some("1203"));
        assert_eq!(
            patient.meta.as_ref().and_then(|m| m.version_id.as_deref()),
            Some("1")
        );
        assert_eq!(patient.first_identifier_value(), Some("DEMO-001"));
        assert_eq!(patient.gender, Some(AdministrativeGender::Male));
        assert_eq!(
            patient.birth_date,
            NaiveDate::from_ymd_opt(1960, 1, 1)
        );
    }

    #[test]
    fn rejects_unknown_gender_code() {
        let input = r#"{ "gender": "M" }"#;

        let err = from_json_with_path::<Patient>(input, "Patient").expect_err("bad gender");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("gender")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn renders_without_absent_fields() {
        let patient = Patient {
            gender: Some(AdministrativeGender::Unknown),
            ..Patient::default()
        };

        let json = serde_json::to_string(&patient).expect("render patient");
        assert_eq!(json, r#"{"gender":"unknown"}"#);
    }
}
