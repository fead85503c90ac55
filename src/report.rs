use log::debug;
use crate::enrich::AddressEnricher;
use crate::model::{Address, UserAddressReport};
use crate::recommend::find_recommended_address;
use crate::source::AddressSource;

/// Builds a [`UserAddressReport`] out of a user's raw addresses.
#[derive(Debug, Clone, Default)]
pub struct UserAddressAggregator {
    enricher: AddressEnricher,
}

impl UserAddressAggregator {
    pub fn new(enricher: AddressEnricher) -> Self {
        Self {
            enricher,
        }
    }

    /// Enrich every address, keeping input order, and summarize the result.
    pub fn process_addresses(&self, user_id: impl Into<String>, addresses: Vec<Address>) -> UserAddressReport {
        let addresses = addresses.into_iter()
            .map(|address| self.enricher.enrich(address))
            .collect::<Vec<_>>();

        let total_addresses = addresses.len();
        let international_address_count = addresses.iter().filter(|a| a.is_international).count();
        let primary_address = addresses.iter().find(|a| a.is_primary()).cloned();
        let recommended_address = find_recommended_address(addresses.as_slice()).cloned();
        let has_valid_shipping_address = addresses.iter().any(|a| a.is_valid_for_shipping);

        UserAddressReport {
            user_id: user_id.into(),
            primary_address,
            total_addresses,
            international_address_count,
            domestic_address_count: total_addresses - international_address_count,
            recommended_address,
            has_valid_shipping_address,
            addresses,
        }
    }

    /// Fetch the user's addresses once and process them.
    ///
    /// A failing fetch is returned unchanged; nothing is processed in that case.
    #[tracing::instrument(skip(self, source))]
    pub async fn build_report<S: AddressSource>(&self, source: &S, user_id: &str) -> color_eyre::Result<UserAddressReport> {
        let addresses = source.fetch_addresses(user_id).await?;
        debug!("processing [{}] addresses for [{}]", addresses.len(), user_id);
        Ok(self.process_addresses(user_id, addresses))
    }
}

/// [`UserAddressAggregator::process_addresses`] with the default rules and tables.
pub fn process_addresses(user_id: impl Into<String>, addresses: Vec<Address>) -> UserAddressReport {
    UserAddressAggregator::default().process_addresses(user_id, addresses)
}

/// [`UserAddressAggregator::build_report`] with the default rules and tables.
pub async fn build_report<S: AddressSource>(source: &S, user_id: &str) -> color_eyre::Result<UserAddressReport> {
    UserAddressAggregator::default().build_report(source, user_id).await
}
