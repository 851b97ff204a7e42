//! Monument status lookups.
//!
//! The adapter knows nothing about the shape of a status result. It opens a
//! client from a [`StatusSource`], asks it about exactly one identifier,
//! always closes the client again, and serializes whatever came back.

use std::{error::Error, fmt};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::sparql::SparqlError;

pub mod kadaster;

pub use kadaster::{KadasterStatusClient, KadasterStatusSource, MonumentStatus};

/// Appended verbatim to every serialized status result.
pub const STATUS_ADVISORY: &str = ". Always mention the source for the Rijksmonument status if it is a Rijksmonument. (RCE = Rijksdienst voor het Cultureel Erfgoed.)";

#[derive(Debug)]
pub enum StatusError {
    InvalidIdentifier(String),
    Closed,
    Sparql(SparqlError),
    Encode(serde_json::Error),
    Source(String),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier(id) => {
                write!(f, "invalid verblijfsobject id (expected 16-18 digits): {id}")
            }
            Self::Closed => f.write_str("status client already closed"),
            Self::Sparql(err) => write!(f, "status query failed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode status result: {err}"),
            Self::Source(message) => f.write_str(message),
        }
    }
}

impl Error for StatusError {}

impl From<SparqlError> for StatusError {
    fn from(err: SparqlError) -> Self {
        Self::Sparql(err)
    }
}

impl From<serde_json::Error> for StatusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

/// Hands out status clients, one per lookup.
#[async_trait]
pub trait StatusSource: Send + Sync + 'static {
    type Client: StatusClient;

    async fn open(&self) -> Result<Self::Client, StatusError>;
}

/// An open connection to a monument status provider.
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Looks up the status of every identifier in `identifiers`.
    async fn process_from_list(&self, identifiers: &[String]) -> Result<Value, StatusError>;

    /// Releases the client's resources. Called exactly once per client.
    async fn close(&mut self) -> Result<(), StatusError>;
}

/// Forwards single identifiers to a [`StatusSource`].
#[derive(Debug, Clone)]
pub struct StatusAdapter<S> {
    source: S,
}

impl<S: StatusSource> StatusAdapter<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Looks up one identifier and returns the pretty-printed result with
    /// [`STATUS_ADVISORY`] appended.
    ///
    /// The client is closed whether or not the lookup succeeded. When both
    /// fail the lookup error is returned.
    ///
    /// # Errors
    /// Returns whatever `StatusError` the source or client raised.
    pub async fn lookup(&self, bag_verblijfsobject_id: &str) -> Result<String, StatusError> {
        let mut client = self.source.open().await?;
        let outcome = client
            .process_from_list(&[bag_verblijfsobject_id.to_string()])
            .await;
        let closed = client.close().await;

        let result = match (outcome, closed) {
            (Ok(result), Ok(())) => result,
            (Ok(_), Err(err)) | (Err(err), Ok(())) => return Err(err),
            (Err(err), Err(close_err)) => {
                warn!(%close_err, "failed to close status client after lookup error");
                return Err(err);
            }
        };

        debug!(bag_verblijfsobject_id, "status lookup complete");
        let json = serde_json::to_string_pretty(&result)?;
        Ok(format!("{json}{STATUS_ADVISORY}"))
    }
}
