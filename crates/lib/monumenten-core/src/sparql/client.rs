use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use super::{SparqlError, SparqlQuery};
use crate::vocab::KADASTER_SPARQL_ENDPOINT;

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// SPARQL 1.1 JSON result document.
///
/// Missing `results` or `bindings` members decode as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub results: SparqlResultSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlResultSet {
    #[serde(default)]
    pub bindings: Vec<SparqlBinding>,
}

/// One solution row: variable name to bound term.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SparqlBinding(pub HashMap<String, SparqlTerm>);

impl SparqlBinding {
    #[must_use]
    pub fn value(&self, variable: &str) -> Option<&str> {
        self.0.get(variable).and_then(|term| term.value.as_deref())
    }

    /// Owned copy of the bound value, for building result rows.
    #[must_use]
    pub fn value_owned(&self, variable: &str) -> Option<String> {
        self.value(variable).map(str::to_string)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlTerm {
    #[serde(default)]
    pub value: Option<String>,
}

/// Client for one SPARQL endpoint.
///
/// Holds no connection state; every call runs on its own HTTP session which
/// is dropped when the call returns.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    endpoint: String,
    timeout: Duration,
}

impl SparqlClient {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Client for the Kadaster knowledge graph endpoint.
    #[must_use]
    pub fn kadaster() -> Self {
        Self::new(KADASTER_SPARQL_ENDPOINT)
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Opens a fresh HTTP session bounded by the configured timeout.
    ///
    /// # Errors
    /// Returns `SparqlError::Http` if the TLS backend cannot be initialized.
    pub fn session(&self) -> Result<reqwest::Client, SparqlError> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }

    /// Runs a SELECT query on a session of its own.
    ///
    /// # Errors
    /// Returns `SparqlError` on render, transport, status, or decode failures.
    pub async fn select(&self, query: &SparqlQuery) -> Result<SparqlResults, SparqlError> {
        let session = self.session()?;
        self.select_with(&session, query).await
    }

    /// Runs a SELECT query on a caller-owned session.
    ///
    /// # Errors
    /// Returns `SparqlError` on render, transport, status, or decode failures.
    pub async fn select_with(
        &self,
        session: &reqwest::Client,
        query: &SparqlQuery,
    ) -> Result<SparqlResults, SparqlError> {
        let text = query.render()?;
        debug!(endpoint = %self.endpoint, bytes = text.len(), "issuing SPARQL query");

        let response = session
            .post(&self.endpoint)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", text.as_str())])
            .send()
            .await
            .map_err(|err| self.map_request_err(err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SparqlError::Status(status.as_u16()));
        }

        let results = response
            .json::<SparqlResults>()
            .await
            .map_err(|err| self.map_request_err(err))?;
        debug!(rows = results.results.bindings.len(), "SPARQL query returned");
        Ok(results)
    }

    fn map_request_err(&self, err: reqwest::Error) -> SparqlError {
        if err.is_timeout() {
            SparqlError::Timeout(self.timeout)
        } else {
            SparqlError::from(err)
        }
    }
}
