//! FHIR R4 `Bundle` wire model, `collection` type only.
//!
//! A collection bundle is a plain ordered list of resources; entries carry no
//! request envelope and no cross-entry transactional guarantee.

use serde::{Deserialize, Serialize};

use crate::{from_json_with_path, FhirError, FhirResult, Resource};

/// Bundle type codes clinbridge produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    Collection,
}

/// One resource inside a bundle.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BundleEntry {
    pub resource: Resource,
}

/// Ordered collection of heterogeneous resources.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    resource_type: String,

    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Collection bundle holding `resources` in the given order.
    pub fn collection(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            resource_type: "Bundle".to_string(),
            bundle_type: BundleType::Collection,
            entry: resources
                .into_iter()
                .map(|resource| BundleEntry { resource })
                .collect(),
        }
    }

    /// Parse a bundle from FHIR JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] on a schema mismatch and
    /// [`FhirError::InvalidInput`] if `resourceType` is not `Bundle`.
    pub fn from_json(json_text: &str) -> FhirResult<Self> {
        let bundle: Bundle = from_json_with_path(json_text, "Bundle")?;
        if bundle.resource_type != "Bundle" {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'Bundle', got '{}'",
                bundle.resource_type
            )));
        }
        Ok(bundle)
    }

    pub fn to_json_pretty(&self) -> FhirResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resources in entry order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entry.iter().map(|e| &e.resource)
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }
}
