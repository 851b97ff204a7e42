//! Address to verblijfsobject resolution.
//!
//! Validates the caller's address fragment, picks a search mode, runs one
//! parameterized query against the registry, and classifies the rows by how
//! many of them carry an identifier.

use std::{error::Error, fmt};

use tracing::{debug, warn};

use crate::models::{AddressMatch, AddressQuery, AddressQueryError, SearchMode};
use crate::sparql::{SparqlBinding, SparqlClient, SparqlError};

pub mod query;

pub use query::build_address_query;

#[derive(Debug)]
pub enum ResolveError {
    Invalid(AddressQueryError),
    Sparql(SparqlError),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Sparql(SparqlError::Status(status)) => {
                write!(f, "Error querying Kadaster endpoint: HTTP {status}")
            }
            Self::Sparql(err) => write!(f, "Error executing SPARQL query: {err}"),
        }
    }
}

impl Error for ResolveError {}

impl From<AddressQueryError> for ResolveError {
    fn from(err: AddressQueryError) -> Self {
        Self::Invalid(err)
    }
}

impl From<SparqlError> for ResolveError {
    fn from(err: SparqlError) -> Self {
        Self::Sparql(err)
    }
}

/// Outcome of a lookup, by number of rows carrying an identifier.
///
/// `Unique` and `Ambiguous` keep every returned row, including rows without
/// an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    NotFound,
    Unique(Vec<AddressMatch>),
    Ambiguous(Vec<AddressMatch>),
}

impl Resolution {
    #[must_use]
    pub fn classify(rows: Vec<AddressMatch>) -> Self {
        match rows.iter().filter(|row| row.identifier().is_some()).count() {
            0 => Self::NotFound,
            1 => Self::Unique(rows),
            _ => Self::Ambiguous(rows),
        }
    }

    /// Short name of the outcome, for logs.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unique(_) => "unique",
            Self::Ambiguous(_) => "ambiguous",
        }
    }

    /// Number of rows carrying an identifier.
    #[must_use]
    pub fn identified(&self) -> usize {
        self.rows()
            .iter()
            .filter(|row| row.identifier().is_some())
            .count()
    }

    #[must_use]
    pub fn rows(&self) -> &[AddressMatch] {
        match self {
            Self::NotFound => &[],
            Self::Unique(rows) | Self::Ambiguous(rows) => rows,
        }
    }

    /// Renders the outcome the way tool callers receive it.
    #[must_use]
    pub fn describe(&self, query: &AddressQuery, mode: SearchMode) -> String {
        match self {
            Self::NotFound => not_found_message(query, mode),
            Self::Unique(rows) => encode_rows(rows),
            Self::Ambiguous(rows) => {
                format!("Ambiguous address: multiple results found: {}", encode_rows(rows))
            }
        }
    }
}

impl AddressMatch {
    #[must_use]
    pub fn from_binding(binding: &SparqlBinding) -> Self {
        Self {
            bag_verblijfsobject_id: binding.value_owned("identificatie"),
            postcode: binding.value_owned("postcode"),
            huisnummer: binding.value_owned("huisnummer"),
            huisletter: binding.value_owned("huisletter"),
            huisnummertoevoeging: binding.value_owned("huisnummertoevoeging"),
            straatnaam: binding.value_owned("straatnaam"),
            plaatsnaam: binding.value_owned("plaatsnaam"),
        }
    }
}

fn not_found_message(query: &AddressQuery, mode: SearchMode) -> String {
    let house_number = &query.house_number;
    match mode {
        SearchMode::PostalCode => format!(
            "No verblijfsobject found for postal code {}, house number {house_number}",
            query.postal_code().unwrap_or_default()
        ),
        SearchMode::Address => format!(
            "No verblijfsobject found for address: {} {house_number}, {}. Postal code + house number usually works better.",
            query.street().unwrap_or_default(),
            query.city().unwrap_or_default()
        ),
    }
}

fn encode_rows(rows: &[AddressMatch]) -> String {
    serde_json::to_string(rows).unwrap_or_else(|err| format!("Error encoding results: {err}"))
}

/// Resolves addresses against a SPARQL endpoint.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    client: SparqlClient,
}

impl AddressResolver {
    #[must_use]
    pub const fn new(client: SparqlClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn kadaster() -> Self {
        Self::new(SparqlClient::kadaster())
    }

    /// Validates the query and classifies the registry's answer.
    ///
    /// Validation happens before any network traffic.
    ///
    /// # Errors
    /// Returns `ResolveError::Invalid` for rejected input and
    /// `ResolveError::Sparql` when the endpoint call fails.
    pub async fn lookup(
        &self,
        query: &AddressQuery,
    ) -> Result<(SearchMode, Resolution), ResolveError> {
        let mode = query.search_mode()?;
        let house_number = query.house_number_value()?;
        debug!(%mode, "resolving address");

        let sparql = build_address_query(query, mode, house_number);
        let results = self.client.select(&sparql).await?;
        let rows = results
            .results
            .bindings
            .iter()
            .map(AddressMatch::from_binding)
            .collect();
        let resolution = Resolution::classify(rows);
        debug!(
            %mode,
            outcome = resolution.outcome(),
            identified = resolution.identified(),
            "address lookup classified"
        );
        Ok((mode, resolution))
    }

    /// Like [`Self::lookup`], but every outcome, failures included, comes
    /// back as text for the caller to show as is.
    pub async fn resolve(&self, query: &AddressQuery) -> String {
        match self.lookup(query).await {
            Ok((mode, resolution)) => resolution.describe(query, mode),
            Err(err) => {
                match &err {
                    ResolveError::Invalid(reason) => debug!(%reason, "address query rejected"),
                    ResolveError::Sparql(reason) => warn!(%reason, "address lookup failed"),
                }
                err.to_string()
            }
        }
    }
}
