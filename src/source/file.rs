use std::path::PathBuf;
use color_eyre::eyre::WrapErr;
use log::debug;
use serde::Deserialize;
use crate::model::Address;
use crate::source::AddressSource;

/// one line of the address file: `user_id,id,street,city,state,zip_code,country,is_primary`
#[derive(Debug, Deserialize)]
struct AddressRow {
    user_id: String,
    id: String,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
    is_primary: bool,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            street: row.street,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            country: row.country,
            is_primary: row.is_primary,
        }
    }
}

/// Addresses of all users in a single CSV file, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct CsvAddressSource {
    path: PathBuf,
}

impl CsvAddressSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    fn parse(&self, content: &[u8], user_id: &str) -> color_eyre::Result<Vec<Address>> {
        let mut rdr = csv::Reader::from_reader(content);
        let mut addresses = Vec::new();
        for (idx, row) in rdr.deserialize::<AddressRow>().enumerate() {
            let row = row.wrap_err_with(|| format!("malformed record #{} in [{}]", idx + 1, self.path.display()))?;
            if row.user_id == user_id {
                addresses.push(row.into());
            }
        }
        Ok(addresses)
    }
}

impl AddressSource for CsvAddressSource {
    async fn fetch_addresses(&self, user_id: &str) -> color_eyre::Result<Vec<Address>> {
        let content = tokio::fs::read(&self.path).await
            .wrap_err_with(|| format!("cannot read address file [{}]", self.path.display()))?;
        let addresses = self.parse(&content, user_id)?;
        debug!("read [{}] addresses for [{}] from [{}]", addresses.len(), user_id, self.path.display());
        Ok(addresses)
    }
}
