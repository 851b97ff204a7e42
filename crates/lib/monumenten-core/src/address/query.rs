use crate::models::{AddressQuery, SearchMode};
use crate::sparql::SparqlQuery;
use crate::vocab::{
    IMX_HUISLETTER,
    IMX_HUISNUMMER,
    IMX_HUISNUMMERTOEVOEGING,
    IMX_PLAATSNAAM,
    IMX_POSTCODE,
    IMX_STRAATNAAM,
    PREFIX_IMX,
    PREFIX_PROV,
    TOLERATED_SUFFIX,
    VERBLIJFSOBJECT_URI_PREFIX,
};

const PROJECTION: &str = "?identificatie ?postcode ?huisnummer ?huisletter ?huisnummertoevoeging ?straatnaam ?plaatsnaam";

/// Fields fetched for the result row without constraining the match.
const OPTIONAL_FIELDS: [(&str, &str); 6] = [
    (IMX_POSTCODE, "postcode"),
    (IMX_HUISNUMMER, "huisnummer"),
    (IMX_HUISLETTER, "huisletter"),
    (IMX_HUISNUMMERTOEVOEGING, "huisnummertoevoeging"),
    (IMX_STRAATNAAM, "straatnaam"),
    (IMX_PLAATSNAAM, "plaatsnaam"),
];

/// Optional narrowing of the address pattern, keyed to one input field.
///
/// With a value the field must match exactly. Without one the field must be
/// absent, apart from an optionally tolerated registry value.
struct Refinement<'a> {
    predicate: &'static str,
    placeholder: &'static str,
    probe: &'static str,
    tolerated: Option<&'static str>,
    value: Option<&'a str>,
}

impl Refinement<'_> {
    fn clause(&self) -> String {
        let predicate = self.predicate;
        let probe = self.probe;
        if self.value.is_some() {
            return format!("  ?adres {predicate} ${} .\n", self.placeholder);
        }
        match self.tolerated {
            Some(tolerated) => format!(
                "  FILTER NOT EXISTS {{ ?adres {predicate} {probe} . FILTER({probe} != \"{tolerated}\") }}\n"
            ),
            None => format!("  FILTER NOT EXISTS {{ ?adres {predicate} {probe} . }}\n"),
        }
    }

    fn bind(&self, query: SparqlQuery) -> SparqlQuery {
        match self.value {
            Some(value) => query.bind((self.placeholder, value)),
            None => query,
        }
    }
}

fn refinements(query: &AddressQuery) -> [Refinement<'_>; 2] {
    [
        Refinement {
            predicate: IMX_HUISLETTER,
            placeholder: "huisletter",
            probe: "?_hl",
            tolerated: None,
            value: query.house_letter(),
        },
        Refinement {
            predicate: IMX_HUISNUMMERTOEVOEGING,
            placeholder: "huisnummertoevoeging",
            probe: "?_hs",
            tolerated: Some(TOLERATED_SUFFIX),
            value: query.house_suffix(),
        },
    ]
}

/// Builds the verblijfsobject lookup for an already validated address.
#[must_use]
pub fn build_address_query(query: &AddressQuery, mode: SearchMode, house_number: u64) -> SparqlQuery {
    let mut text = format!(
        "PREFIX prov: <{PREFIX_PROV}>\nPREFIX imx:  <{PREFIX_IMX}>\n\nSELECT DISTINCT {PROJECTION}\nWHERE {{\n"
    );
    text.push_str("  ?adres prov:wasDerivedFrom ?verblijfsobjectIri ;\n");
    text.push_str("         imx:isHoofdadres $hoofdadres ;\n");
    match mode {
        SearchMode::PostalCode => {
            text.push_str(&format!("         {IMX_POSTCODE} $postcode ;\n"));
            text.push_str(&format!("         {IMX_HUISNUMMER} $huisnummer .\n"));
        }
        SearchMode::Address => {
            text.push_str(&format!("         {IMX_STRAATNAAM} $straatnaam ;\n"));
            text.push_str(&format!("         {IMX_HUISNUMMER} $huisnummer ;\n"));
            text.push_str(&format!("         {IMX_PLAATSNAAM} $plaatsnaam .\n"));
        }
    }
    text.push('\n');

    let refinements = refinements(query);
    for refinement in &refinements {
        text.push_str(&refinement.clause());
    }
    text.push('\n');

    for (predicate, variable) in OPTIONAL_FIELDS {
        text.push_str(&format!("  OPTIONAL {{ ?adres {predicate} ?{variable} . }}\n"));
    }
    text.push_str(&format!(
        "\n  BIND(STRAFTER(STR(?verblijfsobjectIri), \"{VERBLIJFSOBJECT_URI_PREFIX}\") AS ?identificatie)\n}}"
    ));

    let mut sparql = SparqlQuery::new(text)
        .bind(("hoofdadres", true))
        .bind(("huisnummer", house_number));
    sparql = match mode {
        SearchMode::PostalCode => {
            sparql.bind(("postcode", query.postal_code().unwrap_or_default()))
        }
        SearchMode::Address => sparql
            .bind(("straatnaam", query.street().unwrap_or_default()))
            .bind(("plaatsnaam", query.city().unwrap_or_default())),
    };
    for refinement in &refinements {
        sparql = refinement.bind(sparql);
    }
    sparql
}
