use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{StatusClient, StatusError, StatusSource};
use crate::sparql::{Literal, SparqlClient, SparqlQuery, SparqlResults};
use crate::vocab::{PREFIX_CEO, RCE_SOURCE_NAME, RCE_SPARQL_ENDPOINT};

/// Status of one verblijfsobject as reported by the knowledge graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonumentStatus {
    pub bag_verblijfsobject_id: String,
    pub rijksmonument: bool,
    pub rijksmonument_nummer: Option<String>,
    pub rijksmonument_bron: Option<String>,
}

/// Status source backed by the Rijksmonument linkage of the RCE heritage
/// register, queried through the Kadaster knowledge graph.
#[derive(Debug, Clone)]
pub struct KadasterStatusSource {
    client: SparqlClient,
}

impl KadasterStatusSource {
    #[must_use]
    pub const fn new(client: SparqlClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn kadaster() -> Self {
        Self::new(SparqlClient::kadaster())
    }
}

#[async_trait]
impl StatusSource for KadasterStatusSource {
    type Client = KadasterStatusClient;

    async fn open(&self) -> Result<KadasterStatusClient, StatusError> {
        let session = self.client.session()?;
        Ok(KadasterStatusClient {
            client: self.client.clone(),
            session: Some(session),
        })
    }
}

/// Open HTTP session against the knowledge graph.
#[derive(Debug)]
pub struct KadasterStatusClient {
    client: SparqlClient,
    session: Option<reqwest::Client>,
}

#[async_trait]
impl StatusClient for KadasterStatusClient {
    async fn process_from_list(&self, identifiers: &[String]) -> Result<Value, StatusError> {
        let session = self.session.as_ref().ok_or(StatusError::Closed)?;
        if let Some(invalid) = identifiers.iter().find(|id| !is_verblijfsobject_id(id)) {
            return Err(StatusError::InvalidIdentifier(invalid.clone()));
        }
        if identifiers.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }

        let query = status_query(identifiers);
        let results = self.client.select_with(session, &query).await?;
        let statuses = merge_statuses(identifiers, &results);
        debug!(
            requested = identifiers.len(),
            monuments = statuses.iter().filter(|status| status.rijksmonument).count(),
            "monument status resolved"
        );
        Ok(serde_json::to_value(statuses)?)
    }

    async fn close(&mut self) -> Result<(), StatusError> {
        self.session.take();
        Ok(())
    }
}

fn is_verblijfsobject_id(value: &str) -> bool {
    (16..=18).contains(&value.len()) && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn status_query(identifiers: &[String]) -> SparqlQuery {
    let template = format!(
        "PREFIX ceo: <{PREFIX_CEO}>\n\n\
         SELECT DISTINCT ?identificatie ?monumentnummer\n\
         WHERE {{\n\
         \x20 SERVICE <{RCE_SPARQL_ENDPOINT}> {{\n\
         \x20   VALUES ?identificatie {{ $identificaties }}\n\
         \x20   ?monument ceo:heeftBasisregistratieRelatie/ceo:heeftBAGRelatie/ceo:verblijfsobjectIdentificatie ?identificatie ;\n\
         \x20             ceo:rijksmonumentnummer ?monumentnummer .\n\
         \x20 }}\n\
         }}\n\
         ORDER BY ?identificatie ?monumentnummer"
    );
    let values = identifiers
        .iter()
        .map(|id| Literal::string(id.as_str()))
        .collect();
    SparqlQuery::new(template).bind(("identificaties", Literal::Values(values)))
}

fn merge_statuses(identifiers: &[String], results: &SparqlResults) -> Vec<MonumentStatus> {
    identifiers
        .iter()
        .map(|id| {
            let nummer = results
                .results
                .bindings
                .iter()
                .filter(|binding| binding.value("identificatie") == Some(id.as_str()))
                .find_map(|binding| binding.value_owned("monumentnummer"));
            MonumentStatus {
                bag_verblijfsobject_id: id.clone(),
                rijksmonument: nummer.is_some(),
                rijksmonument_bron: nummer.as_ref().map(|_| RCE_SOURCE_NAME.to_string()),
                rijksmonument_nummer: nummer,
            }
        })
        .collect()
}
