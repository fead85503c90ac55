use std::collections::HashMap;
use std::future::Future;
use crate::model::Address;

mod file;
mod http;

pub use self::file::CsvAddressSource;
pub use self::http::HttpAddressSource;

/// Where a user's raw addresses come from.
///
/// Implementations own any transport concerns (retries, timeouts); callers
/// await a fetch once and surface its error as is.
pub trait AddressSource {
    fn fetch_addresses(&self, user_id: &str) -> impl Future<Output = color_eyre::Result<Vec<Address>>> + Send;
}

/// Addresses kept in memory, keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct MemoryAddressSource {
    addresses: HashMap<String, Vec<Address>>,
    /// returned for users without their own entry
    fallback: Vec<Address>,
}

impl MemoryAddressSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// the same two mock addresses for every user
    pub fn sample() -> Self {
        Self {
            addresses: HashMap::new(),
            fallback: vec![
                Address {
                    id: "1".to_string(),
                    street: "123 Main St".to_string(),
                    city: "New York".to_string(),
                    state: "NY".to_string(),
                    zip_code: "10001".to_string(),
                    country: "USA".to_string(),
                    is_primary: true,
                },
                Address {
                    id: "2".to_string(),
                    street: "456 Oak Ave".to_string(),
                    city: "Los Angeles".to_string(),
                    state: "CA".to_string(),
                    zip_code: "90210".to_string(),
                    country: "USA".to_string(),
                    is_primary: false,
                },
            ],
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>, addresses: Vec<Address>) -> Self {
        self.addresses.insert(user_id.into(), addresses);
        self
    }
}

impl AddressSource for MemoryAddressSource {
    async fn fetch_addresses(&self, user_id: &str) -> color_eyre::Result<Vec<Address>> {
        Ok(self.addresses.get(user_id).unwrap_or(&self.fallback).clone())
    }
}
