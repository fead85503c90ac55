use crate::model::{AddressType, ProcessedAddress};

/// Preferences applied in order; a higher one always beats a lower one.
const PREFERENCES: &[fn(&ProcessedAddress) -> bool] = &[
    ProcessedAddress::is_primary,
    is_domestic,
    is_residential,
];

fn is_domestic(address: &ProcessedAddress) -> bool {
    !address.is_international
}

fn is_residential(address: &ProcessedAddress) -> bool {
    address.address_type == AddressType::Residential
}

/// Pick the best shippable address.
///
/// Only addresses valid for shipping are considered. With more than one
/// candidate, the first address satisfying the highest-ranked preference
/// (primary, then domestic, then residential) wins, and the first candidate
/// in input order when none applies.
pub fn find_recommended_address<'a>(addresses: impl Into<Option<&'a [ProcessedAddress]>>) -> Option<&'a ProcessedAddress> {
    let addresses = addresses.into()?;
    let candidates = addresses.iter()
        .filter(|address| address.is_valid_for_shipping)
        .collect::<Vec<_>>();

    match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => PREFERENCES.iter()
            .find_map(|prefer| candidates.iter().copied().find(|address| prefer(address)))
            .or_else(|| candidates.first().copied()),
    }
}
