//! Parameterized SPARQL queries and the HTTP client that runs them.
//!
//! Caller-supplied values never enter a query by string concatenation: they
//! are bound to `$name` placeholders as typed literals and escaped on render.

use std::{error::Error, fmt, time::Duration};

pub mod client;
pub mod query;

pub use client::{SparqlBinding, SparqlClient, SparqlResultSet, SparqlResults, SparqlTerm};
pub use query::{Literal, SparqlQuery};

#[derive(Debug)]
pub enum SparqlError {
    UnboundParameter(String),
    Http(Box<reqwest::Error>),
    Timeout(Duration),
    Status(u16),
}

impl fmt::Display for SparqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundParameter(name) => write!(f, "unbound query parameter: ${name}"),
            Self::Http(err) => {
                write!(f, "{err}")?;
                let mut source = err.source();
                while let Some(cause) = source {
                    write!(f, ": {cause}")?;
                    source = cause.source();
                }
                Ok(())
            }
            Self::Timeout(timeout) => write!(f, "request timed out after {timeout:?}"),
            Self::Status(status) => write!(f, "HTTP {status}"),
        }
    }
}

impl Error for SparqlError {}

impl From<reqwest::Error> for SparqlError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Box::new(err))
    }
}
