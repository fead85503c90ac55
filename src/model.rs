use std::fmt;
use serde::{Deserialize, Serialize};
use crate::validate::ShippingIssue;

/// basic structure for a user's address, as supplied by an address source
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_primary: bool,
}

impl Address {
    /// "{city}, {state}"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    /// single-line address, i.e. `123 Main St, New York, NY 10001, USA`
    pub fn formatted(&self) -> String {
        format!("{}, {}, {} {}, {}", self.street, self.city, self.state, self.zip_code, self.country)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressType {
    Residential,
    Commercial,
    PoBox,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Residential => "residential",
            AddressType::Commercial => "commercial",
            AddressType::PoBox => "po-box",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An [`Address`] with everything the pipeline derives from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedAddress {
    #[serde(flatten)]
    pub address: Address,
    pub display_name: String,
    pub is_international: bool,
    pub address_type: AddressType,
    pub is_valid_for_shipping: bool,
    /// first rejecting eligibility check, `None` when shippable
    pub shipping_issue: Option<ShippingIssue>,
    pub formatted_address: String,
    pub distance_from_warehouse: u32,
    pub tax_rate: f64,
}

impl ProcessedAddress {
    pub fn id(&self) -> &str {
        &self.address.id
    }

    pub fn is_primary(&self) -> bool {
        self.address.is_primary
    }
}

/// Final result for one user, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddressReport {
    pub user_id: String,
    pub addresses: Vec<ProcessedAddress>,
    pub primary_address: Option<ProcessedAddress>,
    pub total_addresses: usize,
    pub international_address_count: usize,
    pub domestic_address_count: usize,
    pub recommended_address: Option<ProcessedAddress>,
    pub has_valid_shipping_address: bool,
}
