//! Classifies, validates and enriches a user's postal addresses, then picks
//! the one best suited for shipping.
//!
//! [`report::UserAddressAggregator`] is the entry point: it fetches raw
//! [`model::Address`]es from an [`source::AddressSource`] and turns them into
//! a [`model::UserAddressReport`].

pub mod classify;
pub mod enrich;
pub mod geo_tax;
pub mod model;
pub mod recommend;
pub mod record;
pub mod report;
pub mod source;
pub mod utils;
pub mod validate;

pub use crate::enrich::AddressEnricher;
pub use crate::geo_tax::GeoTaxLookup;
pub use crate::model::{Address, AddressType, ProcessedAddress, UserAddressReport};
pub use crate::report::{build_report, process_addresses, UserAddressAggregator};
pub use crate::source::{AddressSource, CsvAddressSource, HttpAddressSource, MemoryAddressSource};
pub use crate::validate::{ShippingIssue, ShippingRules};
