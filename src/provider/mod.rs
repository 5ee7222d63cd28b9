pub mod http;
pub mod mock;
pub mod traits;

pub use http::HttpRateProvider;
pub use mock::MockRateProvider;
pub use traits::RateProvider;

use crate::config::{AppConfig, ProviderKind};
use crate::model::ProviderError;

/// Builds the provider selected in the configuration.
pub fn from_config(config: &AppConfig) -> Result<Box<dyn RateProvider>, ProviderError> {
    Ok(match config.provider {
        ProviderKind::Mock => Box::new(MockRateProvider::from_config(config)),
        ProviderKind::Http => Box::new(HttpRateProvider::new(&config.http_base_url)?),
    })
}
