//! Repository client for a FHIR REST endpoint.
//!
//! Two operations, issued one at a time:
//! - `create`: `POST {base}/{type}` with a FHIR JSON body
//! - `read`: `GET {base}/{type}/{id}`
//!
//! Any non-success status is returned as an error straight away. There are no
//! retries and no batching; the only connection reuse is `reqwest`'s pooling.

use fhir::{Resource, ResourceType};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};

use crate::config::CoreConfig;
use crate::constants::{FHIR_JSON_ACCEPT, FHIR_JSON_CONTENT_TYPE};
use crate::{CoreError, CoreResult};

/// HTTP client for one FHIR repository.
///
/// Holds the base URL from [`CoreConfig`] (no trailing slash) and a
/// `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct RepositoryClient {
    client: Client,
    base_url: String,
}

impl RepositoryClient {
    /// Create a client for the repository configured in `cfg`.
    pub fn new(cfg: &CoreConfig) -> Self {
        Self::with_client(Client::new(), cfg)
    }

    /// Create a client around a preconfigured `reqwest::Client` (proxies, auth
    /// headers, TLS roots).
    pub fn with_client(client: Client, cfg: &CoreConfig) -> Self {
        Self {
            client,
            base_url: cfg.base_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `resource` to the repository as a new record.
    ///
    /// Returns the repository's copy, which usually carries a server-assigned id and
    /// `meta` and may otherwise differ from what was sent.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Transport`] if the request could not be sent or the body read
    /// - [`CoreError::Http`] on a non-success status
    /// - [`CoreError::Fhir`] if the response is not a resource of the sent type
    pub async fn create(&self, resource: &Resource) -> CoreResult<Resource> {
        let resource_type = resource.resource_type();
        let url = format!("{}/{}", self.base_url, resource_type);
        let body = resource.to_json()?;

        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, FHIR_JSON_CONTENT_TYPE)
            .header(ACCEPT, FHIR_JSON_ACCEPT)
            .body(body)
            .send()
            .await
            .map_err(|source| CoreError::Transport {
                url: url.clone(),
                source,
            })?;

        let text = success_body(&url, response).await?;
        Ok(Resource::from_json_as(resource_type, &text)?)
    }

    /// Fetch the resource of `resource_type` with logical id `id`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidInput`] if `id` is not a valid FHIR id
    /// - [`CoreError::NotFound`] on HTTP 404
    /// - [`CoreError::Transport`], [`CoreError::Http`], [`CoreError::Fhir`] as for
    ///   [`RepositoryClient::create`]
    pub async fn read(&self, resource_type: ResourceType, id: &str) -> CoreResult<Resource> {
        validate_logical_id(id)?;
        let url = format!("{}/{}/{}", self.base_url, resource_type, id);

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, FHIR_JSON_ACCEPT)
            .send()
            .await
            .map_err(|source| CoreError::Transport {
                url: url.clone(),
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound {
                resource_type,
                id: id.to_string(),
            });
        }

        let text = success_body(&url, response).await?;
        Ok(Resource::from_json_as(resource_type, &text)?)
    }
}

/// Read the response body, failing on a non-success status.
async fn success_body(url: &str, response: Response) -> CoreResult<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| CoreError::Transport {
            url: url.to_string(),
            source,
        })?;

    tracing::debug!("{} answered {}", url, status);
    if !status.is_success() {
        return Err(CoreError::Http {
            url: url.to_string(),
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(text)
}

/// FHIR logical ids: 1-64 characters from `A-Z a-z 0-9 - .`.
fn validate_logical_id(id: &str) -> CoreResult<()> {
    let valid = (1..=64).contains(&id.len())
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!("invalid resource id: {id:?}")))
    }
}
