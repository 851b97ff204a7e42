pub const KADASTER_SPARQL_ENDPOINT: &str = "https://data.kkg.kadaster.nl/service/sparql";

/// Heritage register of the Rijksdienst voor het Cultureel Erfgoed, reached
/// from the Kadaster endpoint through a federated `SERVICE` block.
pub const RCE_SPARQL_ENDPOINT: &str =
    "https://api.linkeddata.cultureelerfgoed.nl/datasets/rce/cho/services/cho/sparql";

pub const VERBLIJFSOBJECT_URI_PREFIX: &str =
    "https://bag.basisregistraties.overheid.nl/id/verblijfsobject/";

pub const PREFIX_PROV: &str = "http://www.w3.org/ns/prov#";
pub const PREFIX_IMX: &str = "http://modellen.geostandaarden.nl/def/imx-geo#";
pub const PREFIX_CEO: &str = "https://linkeddata.cultureelerfgoed.nl/def/ceo#";

pub const IMX_POSTCODE: &str = "imx:postcode";
pub const IMX_HUISNUMMER: &str = "imx:huisnummer";
pub const IMX_HUISLETTER: &str = "imx:huisletter";
pub const IMX_HUISNUMMERTOEVOEGING: &str = "imx:huisnummertoevoeging";
pub const IMX_STRAATNAAM: &str = "imx:straatnaam";
pub const IMX_PLAATSNAAM: &str = "imx:plaatsnaam";

/// Suffix value the registry attaches to addresses that have no real suffix.
pub const TOLERATED_SUFFIX: &str = "H";

pub const RCE_SOURCE_NAME: &str = "Rijksdienst voor het Cultureel Erfgoed";
