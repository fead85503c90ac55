use crate::classify::classify;
use crate::geo_tax::GeoTaxLookup;
use crate::model::{Address, ProcessedAddress};
use crate::validate::ShippingRules;

/// Turns a raw [`Address`] into a [`ProcessedAddress`].
#[derive(Debug, Clone, Default)]
pub struct AddressEnricher {
    rules: ShippingRules,
    geo_tax: GeoTaxLookup,
}

impl AddressEnricher {
    pub fn new(rules: ShippingRules, geo_tax: GeoTaxLookup) -> Self {
        Self {
            rules,
            geo_tax,
        }
    }

    pub fn enrich(&self, address: Address) -> ProcessedAddress {
        let is_international = self.rules.is_international(&address);
        let address_type = classify(&address.street);
        let shipping_issue = self.rules.check(&address, address_type).err();

        ProcessedAddress {
            display_name: address.display_name(),
            formatted_address: address.formatted(),
            distance_from_warehouse: self.geo_tax.distance(&address.state),
            tax_rate: self.geo_tax.tax_rate(&address.state),
            is_international,
            address_type,
            is_valid_for_shipping: shipping_issue.is_none(),
            shipping_issue,
            address,
        }
    }
}
