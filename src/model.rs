// Core structs: BaseRateInfo, DepositRate, SpecialOffer, CalculatorSelection
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic message shown whenever any of the four collections fails to load.
pub const LOAD_FAILURE_MESSAGE: &str = "데이터를 불러오는 데 실패했습니다. 잠시 후 다시 시도해주세요.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRateInfo {
    pub rate: f64,
    pub last_updated: String,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub effective_date: Option<String>,
}

/// Product label as delivered by the provider: either a plain string or a
/// main label with an optional qualifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductName {
    Plain(String),
    Structured {
        main: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sub: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateCategory {
    Commercial,
    Savings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRate {
    pub id: String,
    pub bank_name: String,
    pub product_name: ProductName,
    pub rate: f64,
    #[serde(rename = "type", alias = "category")]
    pub category: RateCategory,
    #[serde(default)]
    pub min_duration_months: Option<u32>,
    #[serde(default)]
    pub max_amount: Option<u64>,
    #[serde(default)]
    pub conditions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOffer {
    pub id: String,
    pub title: String,
    pub bank_name: String,
    #[serde(default)]
    pub rate: Option<f64>,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Denormalized snapshot of the rate that drives the interest calculator.
///
/// `rate_id` is the id of the source `DepositRate` when the snapshot was taken
/// from the loaded collections. Snapshots built from bare event payloads
/// leave it empty and fall back to `(rate, bank_name)` lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorSelection {
    pub rate: f64,
    pub bank_name: String,
    pub product_name: String,
    pub rate_id: Option<String>,
}

impl CalculatorSelection {
    #[cfg(test)]
    pub fn new(rate: f64, bank_name: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            rate,
            bank_name: bank_name.into(),
            product_name: product_name.into(),
            rate_id: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("simulated failure in {0}")]
    Simulated(&'static str),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::InvalidResponse(e.to_string())
        } else {
            ProviderError::Http(e.to_string())
        }
    }
}

/// The single failure kind surfaced by a dashboard load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data load failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("data load timed out after {0}s")]
    TimedOut(u64),
    #[error("data load cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_rate_accepts_both_product_name_shapes() {
        let json = r#"[
            {"id":"cb1","bankName":"KB국민은행","productName":{"main":"KB Star 정기예금","sub":"비대면전용"},"rate":3.55,"type":"commercial","minDurationMonths":12},
            {"id":"sb9","bankName":"OK저축은행","productName":"OK 정기예금","rate":4.1,"category":"savings","maxAmount":50000000}
        ]"#;
        let rates: Vec<DepositRate> = serde_json::from_str(json).unwrap();

        assert_eq!(
            rates[0].product_name,
            ProductName::Structured {
                main: "KB Star 정기예금".into(),
                sub: Some("비대면전용".into()),
            }
        );
        assert_eq!(rates[0].category, RateCategory::Commercial);
        assert_eq!(rates[0].min_duration_months, Some(12));
        assert_eq!(rates[1].product_name, ProductName::Plain("OK 정기예금".into()));
        assert_eq!(rates[1].category, RateCategory::Savings);
        assert_eq!(rates[1].max_amount, Some(50_000_000));
        assert!(rates[1].conditions.is_none());
    }

    #[test]
    fn structured_name_without_sub_deserializes() {
        let name: ProductName = serde_json::from_str(r#"{"main":"e-정기예금"}"#).unwrap();
        assert_eq!(
            name,
            ProductName::Structured {
                main: "e-정기예금".into(),
                sub: None
            }
        );
    }

    #[test]
    fn base_rate_optional_fields_default_to_none() {
        let info: BaseRateInfo =
            serde_json::from_str(r#"{"rate":3.5,"lastUpdated":"2024-07-15"}"#).unwrap();
        assert_eq!(info.rate, 3.5);
        assert!(info.change.is_none());
        assert!(info.effective_date.is_none());
    }

    #[test]
    fn load_error_wraps_provider_error() {
        let err: LoadError = ProviderError::Timeout.into();
        assert_eq!(err.to_string(), "data load failed: request timed out");
    }
}
