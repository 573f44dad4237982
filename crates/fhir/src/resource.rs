//! The `Resource` envelope and resource type names.
//!
//! Every resource clinbridge sends or reads is one variant of [`Resource`], tagged
//! on the wire by its `resourceType` member.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    from_json_with_path, Condition, FhirError, FhirResult, MedicationStatement, Observation,
    Patient, Procedure, Reference,
};

/// Resource types clinbridge can create and read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Patient,
    Observation,
    Condition,
    Procedure,
    MedicationStatement,
}

impl ResourceType {
    /// The `resourceType` string, also used as the REST path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Patient => "Patient",
            ResourceType::Observation => "Observation",
            ResourceType::Condition => "Condition",
            ResourceType::Procedure => "Procedure",
            ResourceType::MedicationStatement => "MedicationStatement",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(ResourceType::Patient),
            "Observation" => Ok(ResourceType::Observation),
            "Condition" => Ok(ResourceType::Condition),
            "Procedure" => Ok(ResourceType::Procedure),
            "MedicationStatement" => Ok(ResourceType::MedicationStatement),
            other => Err(FhirError::UnknownResourceType(other.to_string())),
        }
    }
}

/// A single FHIR resource of any supported type.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    Observation(Observation),
    Condition(Condition),
    Procedure(Procedure),
    MedicationStatement(MedicationStatement),
}

impl Resource {
    /// Parse a resource from FHIR JSON text.
    ///
    /// Elements this crate does not model are ignored, so repository copies carrying
    /// `meta`, narrative `text` or extensions still parse.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] naming the failing path if the JSON does not
    /// match a supported resource, including an unsupported `resourceType`.
    pub fn from_json(json_text: &str) -> FhirResult<Self> {
        from_json_with_path(json_text, "Resource")
    }

    /// Parse a resource and require it to be of `expected` type.
    ///
    /// # Errors
    ///
    /// As [`Resource::from_json`], plus [`FhirError::InvalidInput`] when the parsed
    /// resource has a different type.
    pub fn from_json_as(expected: ResourceType, json_text: &str) -> FhirResult<Self> {
        let resource = Self::from_json(json_text)?;
        if resource.resource_type() != expected {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType '{}', got '{}'",
                expected,
                resource.resource_type()
            )));
        }
        Ok(resource)
    }

    /// Render as compact FHIR JSON.
    pub fn to_json(&self) -> FhirResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render as indented FHIR JSON.
    pub fn to_json_pretty(&self) -> FhirResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Patient(_) => ResourceType::Patient,
            Resource::Observation(_) => ResourceType::Observation,
            Resource::Condition(_) => ResourceType::Condition,
            Resource::Procedure(_) => ResourceType::Procedure,
            Resource::MedicationStatement(_) => ResourceType::MedicationStatement,
        }
    }

    /// Logical id, client- or server-assigned.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Patient(r) => r.id.as_deref(),
            Resource::Observation(r) => r.id.as_deref(),
            Resource::Condition(r) => r.id.as_deref(),
            Resource::Procedure(r) => r.id.as_deref(),
            Resource::MedicationStatement(r) => r.id.as_deref(),
        }
    }

    /// The patient this resource is about. `None` for a `Patient`.
    pub fn subject(&self) -> Option<&Reference> {
        match self {
            Resource::Patient(_) => None,
            Resource::Observation(r) => Some(&r.subject),
            Resource::Condition(r) => Some(&r.subject),
            Resource::Procedure(r) => Some(&r.subject),
            Resource::MedicationStatement(r) => Some(&r.subject),
        }
    }
}

impl From<Patient> for Resource {
    fn from(value: Patient) -> Self {
        Resource::Patient(value)
    }
}

impl From<Observation> for Resource {
    fn from(value: Observation) -> Self {
        Resource::Observation(value)
    }
}

impl From<Condition> for Resource {
    fn from(value: Condition) -> Self {
        Resource::Condition(value)
    }
}

impl From<Procedure> for Resource {
    fn from(value: Procedure) -> Self {
        Resource::Procedure(value)
    }
}

impl From<MedicationStatement> for Resource {
    fn from(value: MedicationStatement) -> Self {
        Resource::MedicationStatement(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AdministrativeGender, EventStatus};

    #[test]
    fn tags_output_with_resource_type() {
        let resource = Resource::from(Patient {
            id: Some("pat-A1".into()),
            gender: Some(AdministrativeGender::Female),
            ..Patient::default()
        });

        let json = resource.to_json().expect("render");
        assert_eq!(
            json,
            r#"{"resourceType":"Patient","id":"pat-A1","gender":"female"}"#
        );
    }

    #[test]
    fn dispatches_on_resource_type() {
        let input = r#"{
  "resourceType": "Procedure",
  "id": "88",
  "status": "completed",
  "subject": { "reference": "Patient/pat-A1" },
  "performedDateTime": "2023-04-02"
}"#;

        let resource = Resource::from_json(input).expect("parse procedure");
        assert_eq!(resource.resource_type(), ResourceType::Procedure);
        assert_eq!(resource.id(), Some("88"));
        assert_eq!(
            resource.subject().and_then(Reference::as_str),
            Some("Patient/pat-A1")
        );
        match resource {
            Resource::Procedure(p) => assert_eq!(p.status, EventStatus::Completed),
            other => panic!("expected Procedure, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unsupported_resource_type() {
        let input = r#"{ "resourceType": "Encounter", "status": "finished" }"#;

        let err = Resource::from_json(input).expect_err("unsupported type");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("Encounter")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn reports_path_of_missing_required_field() {
        let input = r#"{ "resourceType": "Observation", "status": "final", "code": {} }"#;

        let err = Resource::from_json(input).expect_err("missing subject");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("subject")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn from_json_as_checks_expected_type() {
        let input = r#"{ "resourceType": "Patient", "id": "1" }"#;

        assert!(Resource::from_json_as(ResourceType::Patient, input).is_ok());
        let err = Resource::from_json_as(ResourceType::Observation, input)
            .expect_err("type mismatch");
        match err {
            FhirError::InvalidInput(msg) => {
                assert!(msg.contains("Observation"));
                assert!(msg.contains("Patient"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn parses_resource_type_names() {
        assert_eq!(
            "MedicationStatement".parse::<ResourceType>().expect("known"),
            ResourceType::MedicationStatement
        );
        assert!(matches!(
            "patient".parse::<ResourceType>(),
            Err(FhirError::UnknownResourceType(_))
        ));
    }
}
