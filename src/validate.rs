use std::fmt;
use std::sync::LazyLock;
use regex::Regex;
use serde::Serialize;
use crate::model::{Address, AddressType};

/// 5-digit ZIP, optionally ZIP+4. Applied to every address, international or not.
static ZIP_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").unwrap());

pub const DOMESTIC_COUNTRY: &str = "USA";

/// placeholders until a real sanctions list is wired in
pub const RESTRICTED_COUNTRIES: &[&str] = &["RESTRICTED_COUNTRY_1", "RESTRICTED_COUNTRY_2"];

const MIN_STREET_LEN: usize = 5;
const MIN_CITY_LEN: usize = 2;
const MIN_STATE_LEN: usize = 2;
const MIN_COUNTRY_LEN: usize = 2;

/// Country rules the validator and enricher share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingRules {
    domestic_country: String,
    restricted_countries: Vec<String>,
}

impl Default for ShippingRules {
    fn default() -> Self {
        Self::new(DOMESTIC_COUNTRY, RESTRICTED_COUNTRIES.iter().copied())
    }
}

impl ShippingRules {
    pub fn new<I, S>(domestic_country: impl Into<String>, restricted_countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domestic_country: domestic_country.into(),
            restricted_countries: restricted_countries.into_iter()
                .map(|country| country.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// exact comparison, so "usa" is international when the domestic value is "USA"
    pub fn is_international(&self, address: &Address) -> bool {
        address.country != self.domestic_country
    }

    fn is_restricted(&self, country: &str) -> bool {
        let country = country.to_uppercase();
        self.restricted_countries.iter().any(|restricted| *restricted == country)
    }

    /// Run the eligibility checks in order and report the first one that fails.
    pub fn check(&self, address: &Address, address_type: AddressType) -> Result<(), ShippingIssue> {
        CHECKS.iter()
            .find(|check| !(check.passes)(self, address, address_type))
            .map_or(Ok(()), |check| Err(check.issue))
    }

    pub fn is_eligible(&self, address: &Address, address_type: AddressType) -> bool {
        self.check(address, address_type).is_ok()
    }
}

/// Why an address cannot be shipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingIssue {
    PoBox,
    PostalCode,
    Street,
    City,
    State,
    CountryName,
    RestrictedCountry,
}

impl ShippingIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingIssue::PoBox => "po-box",
            ShippingIssue::PostalCode => "postal-code",
            ShippingIssue::Street => "street",
            ShippingIssue::City => "city",
            ShippingIssue::State => "state",
            ShippingIssue::CountryName => "country-name",
            ShippingIssue::RestrictedCountry => "restricted-country",
        }
    }
}

impl fmt::Display for ShippingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Check {
    issue: ShippingIssue,
    passes: fn(&ShippingRules, &Address, AddressType) -> bool,
}

const CHECKS: &[Check] = &[
    Check { issue: ShippingIssue::PoBox, passes: not_po_box },
    Check { issue: ShippingIssue::PostalCode, passes: postal_code_matches },
    Check { issue: ShippingIssue::Street, passes: street_long_enough },
    Check { issue: ShippingIssue::City, passes: city_long_enough },
    Check { issue: ShippingIssue::State, passes: state_long_enough },
    Check { issue: ShippingIssue::CountryName, passes: country_name_long_enough },
    Check { issue: ShippingIssue::RestrictedCountry, passes: country_not_restricted },
];

fn trimmed_len(s: &str) -> usize {
    s.trim().chars().count()
}

fn not_po_box(_: &ShippingRules, _: &Address, address_type: AddressType) -> bool {
    address_type != AddressType::PoBox
}

fn postal_code_matches(_: &ShippingRules, address: &Address, _: AddressType) -> bool {
    ZIP_REG.is_match(&address.zip_code)
}

fn street_long_enough(_: &ShippingRules, address: &Address, _: AddressType) -> bool {
    trimmed_len(&address.street) >= MIN_STREET_LEN
}

fn city_long_enough(_: &ShippingRules, address: &Address, _: AddressType) -> bool {
    trimmed_len(&address.city) >= MIN_CITY_LEN
}

fn state_long_enough(_: &ShippingRules, address: &Address, _: AddressType) -> bool {
    trimmed_len(&address.state) >= MIN_STATE_LEN
}

fn country_name_long_enough(rules: &ShippingRules, address: &Address, _: AddressType) -> bool {
    !rules.is_international(address) || trimmed_len(&address.country) >= MIN_COUNTRY_LEN
}

fn country_not_restricted(rules: &ShippingRules, address: &Address, _: AddressType) -> bool {
    !rules.is_international(address) || !rules.is_restricted(&address.country)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(street: &str, city: &str, state: &str, zip: &str, country: &str) -> Address {
        Address {
            id: "1".to_string(),
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip.to_string(),
            country: country.to_string(),
            is_primary: false,
        }
    }

    fn check(address: &Address, address_type: AddressType) -> Result<(), ShippingIssue> {
        ShippingRules::default().check(address, address_type)
    }

    #[test]
    fn po_box_is_rejected_first() {
        let addr = address("PO Box 123", "Test", "CA", "90210", "USA");
        assert_eq!(check(&addr, AddressType::PoBox), Err(ShippingIssue::PoBox));
        // even with every other field broken
        let addr = address("", "", "", "", "");
        assert_eq!(check(&addr, AddressType::PoBox), Err(ShippingIssue::PoBox));
    }

    #[test]
    fn postal_code_pattern() {
        let rules = ShippingRules::default();
        let reject = address("123 Test St", "Test", "CA", "1234", "USA");
        assert_eq!(rules.check(&reject, AddressType::Residential), Err(ShippingIssue::PostalCode));
        for zip in ["90210", "90210-1234"] {
            let accept = address("123 Test St", "Test", "CA", zip, "USA");
            assert!(rules.is_eligible(&accept, AddressType::Residential), "{zip}");
        }
        for zip in ["902101", "90210-12", " 90210", "90210\n", "９０２１０"] {
            let reject = address("123 Test St", "Test", "CA", zip, "USA");
            assert!(!rules.is_eligible(&reject, AddressType::Residential), "{zip:?}");
        }
    }

    #[test]
    fn short_fields_are_rejected_in_order() {
        assert_eq!(check(&address("123", "Test", "CA", "90210", "USA"), AddressType::Residential), Err(ShippingIssue::Street));
        assert_eq!(check(&address(" 12 ", "Test", "CA", "90210", "USA"), AddressType::Residential), Err(ShippingIssue::Street));
        assert_eq!(check(&address("123 Test St", "", "CA", "90210", "USA"), AddressType::Residential), Err(ShippingIssue::City));
        assert_eq!(check(&address("123 Test St", "Test", "", "90210", "USA"), AddressType::Residential), Err(ShippingIssue::State));
        assert_eq!(check(&address("123 Test St", "Test", " C ", "90210", "USA"), AddressType::Residential), Err(ShippingIssue::State));
        // postal code is checked before the street
        assert_eq!(check(&address("123", "", "", "1", "USA"), AddressType::Residential), Err(ShippingIssue::PostalCode));
    }

    #[test]
    fn international_postal_codes_must_still_be_zip() {
        let canada = address("123 Test Street", "Toronto", "ON", "M5V 3A1", "CANADA");
        assert_eq!(check(&canada, AddressType::Residential), Err(ShippingIssue::PostalCode));
        let short_country = address("123 Test St", "Test", "ON", "M5V 3A1", "C");
        assert_eq!(check(&short_country, AddressType::Residential), Err(ShippingIssue::PostalCode));
    }

    #[test]
    fn international_country_rules() {
        let short_country = address("123 Test St", "Test", "ON", "12345", "C");
        assert_eq!(check(&short_country, AddressType::Residential), Err(ShippingIssue::CountryName));

        for country in ["RESTRICTED_COUNTRY_1", "restricted_country_2", "Restricted_Country_1"] {
            let addr = address("123 Test St", "Test", "Test", "12345", country);
            assert_eq!(check(&addr, AddressType::Residential), Err(ShippingIssue::RestrictedCountry), "{country}");
        }

        let canada = address("123 Test Street", "Toronto", "ON", "12345", "CANADA");
        assert_eq!(check(&canada, AddressType::Residential), Ok(()));
    }

    #[test]
    fn valid_domestic_address() {
        let addr = address("123 Test Street", "Test City", "CA", "90210", "USA");
        assert_eq!(check(&addr, AddressType::Residential), Ok(()));
        assert_eq!(check(&addr, AddressType::Commercial), Ok(()));
    }

    #[test]
    fn field_length_counts_chars_not_utf16_units() {
        // one char, two UTF-16 code units
        assert_eq!(check(&address("123 Test St", "𝔸", "CA", "90210", "USA"), AddressType::Residential), Err(ShippingIssue::City));
        assert_eq!(check(&address("123 Test St", "𝔸𝔹", "CA", "90210", "USA"), AddressType::Residential), Ok(()));
        assert_eq!(check(&address("1 Ñu", "Test", "CA", "90210", "USA"), AddressType::Residential), Err(ShippingIssue::Street));
    }

    #[test]
    fn custom_rules() {
        let rules = ShippingRules::new("CANADA", ["narnia"]);
        let narnia = address("1 Lamp Post Way", "Cair", "NA", "00001", "Narnia");
        assert_eq!(rules.check(&narnia, AddressType::Residential), Err(ShippingIssue::RestrictedCountry));
        let usa = address("123 Test Street", "Test City", "CA", "90210", "USA");
        assert!(rules.is_international(&usa));
        assert!(rules.is_eligible(&usa, AddressType::Residential));
    }
}
