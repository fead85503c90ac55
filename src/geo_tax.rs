use std::collections::HashMap;

pub const DEFAULT_DISTANCE: u32 = 1000;
pub const DEFAULT_TAX_RATE: f64 = 0.05;

/// relative distance to the nearest warehouse (Los Angeles, New York, Dallas)
const DISTANCES: &[(&str, u32)] = &[
    ("CA", 50),
    ("NY", 25),
    ("TX", 30),
    ("NV", 275),
    ("AZ", 380),
    ("FL", 1100),
    ("WA", 1200),
    ("HI", 2400),
    ("AK", 2350),
];

/// simplified state sales tax
const TAX_RATES: &[(&str, f64)] = &[
    ("CA", 0.0825),
    ("NY", 0.08),
    ("TX", 0.0625),
    ("FL", 0.06),
    ("WA", 0.065),
    ("OR", 0.0),
    ("MT", 0.0),
    ("NH", 0.0),
    ("DE", 0.0),
];

/// Distance and tax tables keyed by state/region code.
///
/// Keys match exactly: no trimming, no case folding. Unknown codes fall back
/// to [`DEFAULT_DISTANCE`] and [`DEFAULT_TAX_RATE`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeoTaxLookup {
    distances: HashMap<String, u32>,
    tax_rates: HashMap<String, f64>,
}

impl Default for GeoTaxLookup {
    fn default() -> Self {
        Self::new(
            DISTANCES.iter().copied(),
            TAX_RATES.iter().copied(),
        )
    }
}

impl GeoTaxLookup {
    pub fn new<D, T, K>(distances: D, tax_rates: T) -> Self
    where
        D: IntoIterator<Item = (K, u32)>,
        T: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            distances: distances.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            tax_rates: tax_rates.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn distance(&self, state: &str) -> u32 {
        self.distances.get(state).copied().unwrap_or(DEFAULT_DISTANCE)
    }

    pub fn tax_rate(&self, state: &str) -> f64 {
        self.tax_rates.get(state).copied().unwrap_or(DEFAULT_TAX_RATE)
    }
}
