use serde::Serialize;
use crate::model::{AddressType, ProcessedAddress, UserAddressReport};
use crate::validate::ShippingIssue;

/// One row of the result file: a processed address of one user
#[derive(Debug, Serialize)]
pub struct Record {
    pub user_id: String,
    id: String,
    street: String,
    city: String,
    state: String,
    zip: String,
    country: String,
    primary: bool,
    #[serde(rename = "type")]
    address_type: AddressType,
    shippable: bool,
    issue: Option<ShippingIssue>,
    international: bool,
    distance: u32,
    tax_rate: f64,
    pub recommended: bool,
    formatted: String,
}

impl Record {
    pub fn from_processed(user_id: &str, processed: ProcessedAddress, recommended: bool) -> Self {
        let address = processed.address;
        Self {
            user_id: user_id.to_string(),
            id: address.id,
            street: address.street,
            city: address.city,
            state: address.state,
            zip: address.zip_code,
            country: address.country,
            primary: address.is_primary,
            address_type: processed.address_type,
            shippable: processed.is_valid_for_shipping,
            issue: processed.shipping_issue,
            international: processed.is_international,
            distance: processed.distance_from_warehouse,
            tax_rate: processed.tax_rate,
            recommended,
            formatted: processed.formatted_address,
        }
    }

    /// rows for every address of the report, in report order
    pub fn from_report(report: UserAddressReport) -> Vec<Self> {
        let recommended_id = report.recommended_address.map(|a| a.address.id);
        let user_id = report.user_id;
        report.addresses.into_iter()
            .map(|processed| {
                let recommended = recommended_id.as_deref() == Some(processed.id());
                Self::from_processed(&user_id, processed, recommended)
            })
            .collect()
    }
}
