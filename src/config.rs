use std::path::{Path, PathBuf};
use clap::Parser;
use shipping_address_report::validate::{DOMESTIC_COUNTRY, RESTRICTED_COUNTRIES};
use shipping_address_report::ShippingRules;

/// Build shipping address reports for a set of users
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// address service base URL (http/https) or CSV file; built-in sample data when omitted
    #[arg(long, env = "ADDRESS_SOURCE")]
    pub source: Option<String>,

    /// users to build reports for
    #[arg(long = "user", env = "USER_IDS", value_delimiter = ',', default_value = "user-123")]
    pub users: Vec<String>,

    /// where the processed addresses are written
    #[arg(long, default_value = "result/addresses.csv")]
    pub out: PathBuf,

    /// reports built at the same time
    #[arg(long, default_value_t = 10)]
    pub concurrency: usize,

    /// retries for a failed address service request
    #[arg(long, default_value_t = 3)]
    pub retries: usize,

    #[arg(long, env = "DOMESTIC_COUNTRY", default_value = DOMESTIC_COUNTRY)]
    pub domestic_country: String,

    /// countries that are never shipped to
    #[arg(long = "restricted-country", env = "RESTRICTED_COUNTRIES", value_delimiter = ',')]
    pub restricted_countries: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SourceKind<'a> {
    Http(&'a str),
    Csv(&'a Path),
    Sample,
}

impl Cli {
    pub fn source(&self) -> SourceKind<'_> {
        match self.source.as_deref() {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => SourceKind::Http(url),
            Some(path) => SourceKind::Csv(Path::new(path)),
            None => SourceKind::Sample,
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    pub fn shipping_rules(&self) -> ShippingRules {
        if self.restricted_countries.is_empty() {
            ShippingRules::new(self.domestic_country.clone(), RESTRICTED_COUNTRIES.iter().copied())
        } else {
            ShippingRules::new(self.domestic_country.clone(), &self.restricted_countries)
        }
    }
}
