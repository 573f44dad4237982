use fhir::{FhirError, ResourceType};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{field} is not numeric: {value:?}")]
    NotNumeric { field: &'static str, value: String },
    #[error("{field} is not an integer: {value:?}")]
    NotInteger { field: &'static str, value: String },
    #[error("{table} row {index}: {source}")]
    Row {
        table: &'static str,
        index: usize,
        #[source]
        source: Box<CoreError>,
    },

    #[error("FHIR error: {0}")]
    Fhir(#[from] FhirError),
    #[error("failed to read table {path}: {source}", path = path.display())]
    TableRead {
        path: std::path::PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("repository returned HTTP {status} for {url}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },
    #[error("{resource_type}/{id} not found")]
    NotFound {
        resource_type: ResourceType,
        id: String,
    },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
