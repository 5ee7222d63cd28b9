use crate::model::{BaseRateInfo, DepositRate, ProviderError, SpecialOffer};

/// Source of the four dashboard collections.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    async fn get_base_rate(&self) -> Result<BaseRateInfo, ProviderError>;
    async fn get_commercial_rates(&self) -> Result<Vec<DepositRate>, ProviderError>;
    async fn get_savings_rates(&self) -> Result<Vec<DepositRate>, ProviderError>;
    async fn get_special_offers(&self) -> Result<Vec<SpecialOffer>, ProviderError>;
}
