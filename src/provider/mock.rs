// Fixed payloads served with simulated latency
use crate::config::AppConfig;
use crate::model::{
    BaseRateInfo, DepositRate, ProductName, ProviderError, RateCategory, SpecialOffer,
};
use crate::provider::traits::RateProvider;
use rand::Rng;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

pub struct MockRateProvider {
    delay_ms: u64,
    jitter_ms: u64,
    failure_rate: f64,
}

impl MockRateProvider {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            jitter_ms: 0,
            failure_rate: 0.0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            jitter_ms: config.mock_jitter_ms,
            failure_rate: config.mock_failure_rate.clamp(0.0, 1.0),
            ..Self::new(config.mock_delay_ms)
        }
    }

    /// Picks latency and failure up front; the thread RNG must not live across an await.
    fn roll(&self) -> (Duration, bool) {
        let mut rng = rand::rng();
        let jitter = if self.jitter_ms > 0 {
            rng.random_range(0..=self.jitter_ms)
        } else {
            0
        };
        let fail = self.failure_rate > 0.0 && rng.random_bool(self.failure_rate);
        (Duration::from_millis(self.delay_ms + jitter), fail)
    }

    async fn respond<T>(&self, endpoint: &'static str, data: T) -> Result<T, ProviderError> {
        let (delay, fail) = self.roll();
        debug!("Mock {} responding in {:?}", endpoint, delay);
        sleep(delay).await;
        if fail {
            warn!("Mock {} failing on purpose", endpoint);
            return Err(ProviderError::Simulated(endpoint));
        }
        Ok(data)
    }
}

fn product(main: &str, sub: &str) -> ProductName {
    ProductName::Structured {
        main: main.to_string(),
        sub: Some(sub.to_string()),
    }
}

fn deposit(
    id: &str,
    bank_name: &str,
    product_name: ProductName,
    rate: f64,
    category: RateCategory,
    max_amount: Option<u64>,
    conditions: &str,
) -> DepositRate {
    DepositRate {
        id: id.to_string(),
        bank_name: bank_name.to_string(),
        product_name,
        rate,
        category,
        min_duration_months: Some(12),
        max_amount,
        conditions: Some(conditions.to_string()),
    }
}

pub fn sample_base_rate() -> BaseRateInfo {
    BaseRateInfo {
        rate: 3.50,
        last_updated: "2024-07-15".to_string(),
        change: Some(0.00),
        effective_date: Some("2023-01-13".to_string()),
    }
}

pub fn sample_commercial_rates() -> Vec<DepositRate> {
    use RateCategory::Commercial;
    vec![
        deposit("cb1", "KB국민은행", product("KB Star 정기예금", "비대면전용"), 3.55, Commercial, None, "1년 만기, 비대면 가입시"),
        deposit("cb2", "신한은행", product("쏠편한 정기예금", "최고금리"), 3.50, Commercial, None, "1년 만기, 우대조건 충족시"),
        deposit("cb3", "우리은행", product("WON플러스 예금", "인기상품"), 3.45, Commercial, None, "1년 만기, 모바일 가입"),
    ]
}

pub fn sample_savings_rates() -> Vec<DepositRate> {
    use RateCategory::Savings;
    vec![
        deposit("sb1", "OK저축은행", product("OK e-안심정기예금", "인터넷/모바일"), 4.10, Savings, Some(50_000_000), "1년, 비대면, 5천만원 한도"),
        deposit("sb2", "페퍼저축은행", product("페퍼스 회전정기예금", "디지털전용"), 4.05, Savings, None, "1년, 인터넷/모바일 가입"),
        deposit("sb3", "SBI저축은행", product("e-정기예금", "온라인 추천"), 4.00, Savings, None, "1년, 온라인 전용"),
    ]
}

pub fn sample_special_offers() -> Vec<SpecialOffer> {
    vec![
        SpecialOffer {
            id: "so1".to_string(),
            title: "신규고객 첫거래 우대 이벤트".to_string(),
            bank_name: "하나은행".to_string(),
            rate: Some(3.8),
            description: "선착순 1만명, 모바일 앱으로 가입 시 추가 우대금리 제공!".to_string(),
            link: None,
            end_date: Some("2024-08-31".to_string()),
        },
        SpecialOffer {
            id: "so2".to_string(),
            title: "여름맞이 특별금리 정기예금".to_string(),
            bank_name: "IBK기업은행".to_string(),
            rate: None,
            description: "최대 연 3.7% (12개월). 한도 소진 시 조기 종료.".to_string(),
            link: None,
            end_date: Some("2024-09-15".to_string()),
        },
        SpecialOffer {
            id: "so3".to_string(),
            title: "저축은행 특판 알림".to_string(),
            bank_name: "상상인저축은행".to_string(),
            rate: Some(4.2),
            description: "연 4.2% 고금리 특판! 앱푸시 알림 신청하고 기회를 잡으세요.".to_string(),
            link: Some("#".to_string()),
            end_date: None,
        },
    ]
}

#[async_trait::async_trait]
impl RateProvider for MockRateProvider {
    async fn get_base_rate(&self) -> Result<BaseRateInfo, ProviderError> {
        self.respond("base-rate", sample_base_rate()).await
    }

    async fn get_commercial_rates(&self) -> Result<Vec<DepositRate>, ProviderError> {
        self.respond("rates/commercial", sample_commercial_rates()).await
    }

    async fn get_savings_rates(&self) -> Result<Vec<DepositRate>, ProviderError> {
        self.respond("rates/savings", sample_savings_rates()).await
    }

    async fn get_special_offers(&self) -> Result<Vec<SpecialOffer>, ProviderError> {
        self.respond("offers", sample_special_offers()).await
    }
}
