use color_eyre::eyre::{eyre, WrapErr};
use log::info;
use reqwest::{Client, Url};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use crate::model::Address;
use crate::source::AddressSource;
use crate::utils::{retry_unless, RetryPolicy};

const UA: &str = concat!("shipping-address-report/", env!("CARGO_PKG_VERSION"));

/// Address service client: `GET {base}/users/{user_id}/addresses` returning a JSON array.
#[derive(Debug, Clone)]
pub struct HttpAddressSource {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl HttpAddressSource {
    pub fn new(base_url: &str, retry: RetryPolicy) -> color_eyre::Result<Self> {
        let base_url = Url::parse(base_url)
            .wrap_err_with(|| format!("invalid address service url [{}]", base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(eyre!("address service url [{}] cannot be a base", base_url));
        }
        Ok(
            Self {
                client: Client::builder()
                    .default_headers(Self::default_headers())
                    .build()?,
                base_url,
                retry,
            }
        )
    }

    fn default_headers() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(USER_AGENT, HeaderValue::from_static(UA));
        map.insert(ACCEPT, HeaderValue::from_static("application/json"));
        map
    }

    fn addresses_url(&self, user_id: &str) -> color_eyre::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| eyre!("address service url [{}] cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend(["users", user_id, "addresses"]);
        Ok(url)
    }
}

impl AddressSource for HttpAddressSource {
    async fn fetch_addresses(&self, user_id: &str) -> color_eyre::Result<Vec<Address>> {
        let url = self.addresses_url(user_id)?;
        info!("fetching addresses for [{}] from [{}]", user_id, url);
        let addresses = retry_unless(self.retry, is_permanent, || async {
            self.client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<Address>>()
                .await
        }).await
            .wrap_err_with(|| format!("cannot fetch addresses for [{}]", user_id))?;
        Ok(addresses)
    }
}

/// client errors and undecodable bodies will not change on a retry
fn is_permanent(err: &reqwest::Error) -> bool {
    err.is_decode() || err.status().is_some_and(|status| status.is_client_error())
}
