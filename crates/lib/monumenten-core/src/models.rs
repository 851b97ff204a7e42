use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Address fragment supplied by a caller looking for a verblijfsobject.
///
/// Optional fields holding an empty string count as not provided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    pub house_number: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub house_letter: Option<String>,
    #[serde(default)]
    pub house_suffix: Option<String>,
}

/// Which part of the address drives the registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    PostalCode,
    Address,
}

impl SearchMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostalCode => "postal_code",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressQueryError {
    ConflictingParameters,
    EmptyPostalCode,
    EmptyStreetOrCity,
    MissingParameters,
    NonNumericHouseNumber,
}

impl fmt::Display for AddressQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingParameters => {
                f.write_str("Error: Provide either postal_code OR (street + city), not both.")
            }
            Self::EmptyPostalCode => f.write_str(
                "Error: postal_code cannot be empty when using postal code search.",
            ),
            Self::EmptyStreetOrCity => f.write_str(
                "Error: street and city cannot be empty when using address search.",
            ),
            Self::MissingParameters => f.write_str(
                "Error: Provide either (postal_code + house_number) OR (street + house_number + city).",
            ),
            Self::NonNumericHouseNumber => {
                f.write_str("Error: house_number must be numeric, e.g. '30'.")
            }
        }
    }
}

impl Error for AddressQueryError {}

impl AddressQuery {
    /// Builds a postal code search, e.g. `1234AB` number `30`.
    #[must_use]
    pub fn by_postal_code(postal_code: impl Into<String>, house_number: impl Into<String>) -> Self {
        Self {
            house_number: house_number.into(),
            postal_code: Some(postal_code.into()),
            ..Self::default()
        }
    }

    /// Builds a street + city search.
    #[must_use]
    pub fn by_street(
        street: impl Into<String>,
        house_number: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            house_number: house_number.into(),
            street: Some(street.into()),
            city: Some(city.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_house_letter(mut self, house_letter: impl Into<String>) -> Self {
        self.house_letter = Some(house_letter.into());
        self
    }

    #[must_use]
    pub fn with_house_suffix(mut self, house_suffix: impl Into<String>) -> Self {
        self.house_suffix = Some(house_suffix.into());
        self
    }

    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        provided(self.postal_code.as_deref())
    }

    #[must_use]
    pub fn street(&self) -> Option<&str> {
        provided(self.street.as_deref())
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        provided(self.city.as_deref())
    }

    #[must_use]
    pub fn house_letter(&self) -> Option<&str> {
        provided(self.house_letter.as_deref())
    }

    #[must_use]
    pub fn house_suffix(&self) -> Option<&str> {
        provided(self.house_suffix.as_deref())
    }

    /// Selects the search mode from the populated fields.
    ///
    /// Checks run in a fixed order and the first failing one is reported, so
    /// the same input always yields the same answer.
    ///
    /// # Errors
    /// Returns `AddressQueryError` when the field combination is conflicting,
    /// incomplete, or blank.
    pub fn search_mode(&self) -> Result<SearchMode, AddressQueryError> {
        let postal_code = self.postal_code();
        let street = self.street();
        let city = self.city();

        if postal_code.is_some() && (street.is_some() || city.is_some()) {
            return Err(AddressQueryError::ConflictingParameters);
        }

        if let Some(postal_code) = postal_code {
            if postal_code.trim().is_empty() {
                return Err(AddressQueryError::EmptyPostalCode);
            }
            return Ok(SearchMode::PostalCode);
        }

        match (street, city) {
            (Some(street), Some(city)) => {
                if street.trim().is_empty() || city.trim().is_empty() {
                    Err(AddressQueryError::EmptyStreetOrCity)
                } else {
                    Ok(SearchMode::Address)
                }
            }
            _ => Err(AddressQueryError::MissingParameters),
        }
    }

    /// Parses the house number into the integer bound in the query.
    ///
    /// # Errors
    /// Returns `AddressQueryError::NonNumericHouseNumber` when the value is
    /// not an unsigned integer.
    pub fn house_number_value(&self) -> Result<u64, AddressQueryError> {
        self.house_number
            .trim()
            .parse::<u64>()
            .map_err(|_| AddressQueryError::NonNumericHouseNumber)
    }
}

fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// One candidate address row returned by the registry.
///
/// All seven fields are always serialized, absent values as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressMatch {
    pub bag_verblijfsobject_id: Option<String>,
    pub postcode: Option<String>,
    pub huisnummer: Option<String>,
    pub huisletter: Option<String>,
    pub huisnummertoevoeging: Option<String>,
    pub straatnaam: Option<String>,
    pub plaatsnaam: Option<String>,
}

impl AddressMatch {
    /// The resolved identifier, if the row carries a non-empty one.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        provided(self.bag_verblijfsobject_id.as_deref())
    }
}
