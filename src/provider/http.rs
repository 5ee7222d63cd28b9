use crate::model::{BaseRateInfo, DepositRate, ProviderError, SpecialOffer};
use crate::provider::traits::RateProvider;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// Reads the collections as JSON from `{base_url}/{endpoint}`.
pub struct HttpRateProvider {
    client: Client,
    base_url: String,
}

impl HttpRateProvider {
    pub fn new(base_url: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent("rate-alarm/0.1")
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ProviderError> {
        let url = self.build_url(endpoint);
        info!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} responded [{}]", url, status);
            return Err(ProviderError::InvalidResponse(format!("{} returned {}", endpoint, status)));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl RateProvider for HttpRateProvider {
    async fn get_base_rate(&self) -> Result<BaseRateInfo, ProviderError> {
        self.get_json("base-rate").await
    }

    async fn get_commercial_rates(&self) -> Result<Vec<DepositRate>, ProviderError> {
        self.get_json("rates/commercial").await
    }

    async fn get_savings_rates(&self) -> Result<Vec<DepositRate>, ProviderError> {
        self.get_json("rates/savings").await
    }

    async fn get_special_offers(&self) -> Result<Vec<SpecialOffer>, ProviderError> {
        self.get_json("offers").await
    }
}
