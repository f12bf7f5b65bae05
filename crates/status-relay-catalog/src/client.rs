// crates/status-relay-catalog/src/client.rs
// ============================================================================
// Module: Sources API Client
// Description: reqwest-backed implementation of the core catalog interface.
// Purpose: List application types and per-source applications.
// Dependencies: reqwest, serde_json, status-relay-core, tracing, url
// ============================================================================

//! ## Overview
//! Every request forwards the caller's identity in the `x-rh-identity`
//! header; an empty identity sends no header. Redirects are not followed.
//! Collections follow `links.next` until the last page.
//! Invariants:
//! - Non-success status codes map to [`CatalogError::Status`].
//! - A `links.next` cursor must stay on the base URL's origin and at most
//!   [`MAX_COLLECTION_PAGES`] pages are read per collection.
//! - Bodies larger than the configured limit fail with
//!   [`CatalogError::ResponseTooLarge`] before decoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Response;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use status_relay_core::Catalog;
use status_relay_core::CatalogError;
use status_relay_core::DependentResource;
use status_relay_core::IDENTITY_HEADER;
use status_relay_core::Identity;
use status_relay_core::ResourceType;
use status_relay_core::SourceId;
use tracing::debug;
use url::Url;

use crate::wire::ApplicationRecord;
use crate::wire::ApplicationTypeRecord;
use crate::wire::Collection;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on catalog response bodies.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

/// Default page size requested from collection endpoints.
pub const DEFAULT_PAGE_LIMIT: u32 = 1_000;

/// Upper bound on pages read for one collection.
pub const MAX_COLLECTION_PAGES: usize = 64;

/// Connection settings for the sources API.
///
/// # Invariants
/// - `base_url` points at the versioned API root, for example
///   `http://sources-api:8000/api/sources/v3.1`.
/// - `timeout` covers the whole request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcesApiConfig {
    /// Versioned API root.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum accepted response body size in bytes.
    pub max_response_bytes: usize,
    /// Page size requested from collection endpoints.
    pub page_limit: u32,
}

impl SourcesApiConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Sources API client implementing [`Catalog`].
#[derive(Debug, Clone)]
pub struct SourcesApiClient {
    /// Connection settings.
    config: SourcesApiConfig,
    /// Shared HTTP client.
    client: Client,
}

impl SourcesApiClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] when the HTTP client cannot be constructed.
    pub fn new(config: SourcesApiConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout)
            .build()
            .map_err(|err| CatalogError::Transport(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &SourcesApiConfig {
        &self.config
    }

    /// Returns the application type collection URL.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] when the base URL cannot carry path segments.
    pub fn application_types_url(&self) -> Result<Url, CatalogError> {
        self.collection_url(&["application_types"])
    }

    /// Returns the application collection URL scoped to `source_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] when the base URL cannot carry path segments.
    pub fn source_applications_url(&self, source_id: &SourceId) -> Result<Url, CatalogError> {
        self.collection_url(&["sources", source_id.as_str(), "applications"])
    }

    /// Appends percent-encoded path segments and the page limit to the base URL.
    fn collection_url(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CatalogError::Transport(format!("base url cannot be a base: {}", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("limit", &self.config.page_limit.to_string());
        Ok(url)
    }

    /// Reads every page of a collection starting at `url`.
    async fn get_collection<T: DeserializeOwned>(
        &self,
        url: Url,
        identity: &Identity,
    ) -> Result<Vec<T>, CatalogError> {
        let mut entries = Vec::new();
        let mut next = Some(url);
        let mut pages = 0_usize;
        while let Some(url) = next.take() {
            if pages == MAX_COLLECTION_PAGES {
                return Err(CatalogError::InvalidResponse(format!(
                    "collection exceeds {MAX_COLLECTION_PAGES} pages"
                )));
            }
            pages += 1;
            let page: Collection<T> = self.get_page(&url, identity).await?;
            entries.extend(page.data);
            next = match page.links.and_then(|links| links.next).as_deref().map(str::trim) {
                Some(reference) if !reference.is_empty() => Some(self.next_page_url(reference)?),
                _ => None,
            };
        }
        Ok(entries)
    }

    /// Resolves a `links.next` reference against the base URL.
    fn next_page_url(&self, reference: &str) -> Result<Url, CatalogError> {
        let base = &self.config.base_url;
        let url = base.join(reference).map_err(|err| {
            CatalogError::InvalidResponse(format!("invalid next page link {reference}: {err}"))
        })?;
        if url.origin() != base.origin() {
            return Err(CatalogError::InvalidResponse(format!(
                "next page link leaves the catalog origin: {reference}"
            )));
        }
        Ok(url)
    }

    /// Issues a GET and decodes one collection page.
    async fn get_page<T: DeserializeOwned>(
        &self,
        url: &Url,
        identity: &Identity,
    ) -> Result<Collection<T>, CatalogError> {
        let mut request = self.client.get(url.clone());
        if !identity.is_empty() {
            let value = HeaderValue::from_bytes(identity.as_bytes()).map_err(|err| {
                CatalogError::Transport(format!("identity is not a valid header value: {err}"))
            })?;
            request = request.header(IDENTITY_HEADER, value);
        }
        let response =
            request.send().await.map_err(|err| CatalogError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                endpoint: url.path().to_string(),
            });
        }
        let body = self.read_limited(response).await?;
        let collection: Collection<T> = serde_json::from_slice(&body)
            .map_err(|err| CatalogError::InvalidResponse(err.to_string()))?;
        debug!(endpoint = url.path(), entries = collection.data.len(), "catalog page read");
        Ok(collection)
    }

    /// Reads the response body, failing once it exceeds the configured cap.
    async fn read_limited(&self, mut response: Response) -> Result<Vec<u8>, CatalogError> {
        let limit = self.config.max_response_bytes;
        if let Some(length) = response.content_length()
            && usize::try_from(length).map_or(true, |length| length > limit)
        {
            return Err(CatalogError::ResponseTooLarge {
                limit,
            });
        }
        let mut body = Vec::new();
        while let Some(chunk) =
            response.chunk().await.map_err(|err| CatalogError::Transport(err.to_string()))?
        {
            if body.len() + chunk.len() > limit {
                return Err(CatalogError::ResponseTooLarge {
                    limit,
                });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait]
impl Catalog for SourcesApiClient {
    async fn list_resource_types(
        &self,
        identity: &Identity,
    ) -> Result<Vec<ResourceType>, CatalogError> {
        let url = self.application_types_url()?;
        let records: Vec<ApplicationTypeRecord> = self.get_collection(url, identity).await?;
        Ok(records.into_iter().map(ResourceType::from).collect())
    }

    async fn list_dependent_resources(
        &self,
        identity: &Identity,
        source_id: &SourceId,
    ) -> Result<Vec<DependentResource>, CatalogError> {
        let url = self.source_applications_url(source_id)?;
        let records: Vec<ApplicationRecord> = self.get_collection(url, identity).await?;
        Ok(records.into_iter().map(DependentResource::from).collect())
    }
}
