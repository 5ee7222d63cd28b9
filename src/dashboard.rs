// Dashboard orchestrator: owns loaded data and routes UI events into state
use crate::alarm::{AlarmHook, AlarmState, LoggingAlarmHook};
use crate::calculator::CalculatorState;
use crate::model::{
    BaseRateInfo, CalculatorSelection, DepositRate, LoadError, ProviderError, SpecialOffer,
    LOAD_FAILURE_MESSAGE,
};
use crate::normalizer::selection_from_rate;
use crate::provider::RateProvider;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{error, info, warn};

/// Everything one successful load produces.
#[derive(Debug)]
struct Snapshot {
    base_rate: BaseRateInfo,
    commercial_rates: Vec<DepositRate>,
    savings_rates: Vec<DepositRate>,
    special_offers: Vec<SpecialOffer>,
}

/// Issues the four fetches concurrently; the first failure aborts the lot.
async fn fetch_all(provider: &dyn RateProvider) -> Result<Snapshot, ProviderError> {
    let (base_rate, commercial_rates, savings_rates, special_offers) = futures::try_join!(
        provider.get_base_rate(),
        provider.get_commercial_rates(),
        provider.get_savings_rates(),
        provider.get_special_offers(),
    )?;

    Ok(Snapshot {
        base_rate,
        commercial_rates,
        savings_rates,
        special_offers,
    })
}

/// Read-only state handed to the display surface for one render.
pub struct DashboardView<'a> {
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub base_rate: Option<&'a BaseRateInfo>,
    pub commercial_rates: &'a [DepositRate],
    pub savings_rates: &'a [DepositRate],
    pub special_offers: &'a [SpecialOffer],
    pub alarms: &'a AlarmState,
    pub calculator: &'a CalculatorState,
    /// Loaded entry the calculator selection resolves to.
    pub selected_rate: Option<&'a DepositRate>,
}

pub struct Dashboard {
    is_loading: bool,
    error: Option<String>,
    base_rate: Option<BaseRateInfo>,
    commercial_rates: Vec<DepositRate>,
    savings_rates: Vec<DepositRate>,
    special_offers: Vec<SpecialOffer>,
    alarms: AlarmState,
    calculator: CalculatorState,
    initial_selection: Option<CalculatorSelection>,
    alarm_hook: Box<dyn AlarmHook>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(CalculatorState::default())
    }
}

impl Dashboard {
    pub fn new(calculator: CalculatorState) -> Self {
        Self {
            is_loading: true,
            error: None,
            base_rate: None,
            commercial_rates: Vec::new(),
            savings_rates: Vec::new(),
            special_offers: Vec::new(),
            alarms: AlarmState::default(),
            calculator,
            initial_selection: None,
            alarm_hook: Box::new(LoggingAlarmHook),
        }
    }

    pub fn alarms(&self) -> &AlarmState {
        &self.alarms
    }

    pub fn calculator(&self) -> &CalculatorState {
        &self.calculator
    }

    /// Direct access for amount, period, method and calculate events.
    pub fn calculator_mut(&mut self) -> &mut CalculatorState {
        &mut self.calculator
    }

    /// Commercial rates followed by savings rates, as offered to the calculator.
    pub fn all_rates(&self) -> impl Iterator<Item = &DepositRate> {
        self.commercial_rates.iter().chain(self.savings_rates.iter())
    }

    pub fn find_rate(&self, id: &str) -> Option<&DepositRate> {
        self.all_rates().find(|r| r.id == id)
    }

    /// Loads all four collections without timeout or cancellation.
    pub async fn load(&mut self, provider: &dyn RateProvider) -> Result<(), LoadError> {
        self.load_with(provider, None, None).await
    }

    /// Loads all four collections.
    ///
    /// A notification on `shutdown` abandons the in-flight fetches and leaves
    /// the current data untouched. An elapsed `timeout` counts as a failed load.
    pub async fn load_with(
        &mut self,
        provider: &dyn RateProvider,
        timeout: Option<Duration>,
        shutdown: Option<&Notify>,
    ) -> Result<(), LoadError> {
        self.is_loading = true;
        self.error = None;
        info!("Loading dashboard data...");

        let fetch = async {
            match timeout {
                Some(limit) => match tokio::time::timeout(limit, fetch_all(provider)).await {
                    Ok(result) => result.map_err(LoadError::from),
                    Err(_) => Err(LoadError::TimedOut(limit.as_secs())),
                },
                None => fetch_all(provider).await.map_err(LoadError::from),
            }
        };
        let cancelled = async {
            match shutdown {
                Some(notify) => notify.notified().await,
                None => std::future::pending::<()>().await,
            }
        };

        let outcome = tokio::select! {
            result = fetch => result,
            _ = cancelled => Err(LoadError::Cancelled),
        };

        self.is_loading = false;
        match outcome {
            Ok(snapshot) => {
                self.apply(snapshot);
                Ok(())
            }
            Err(LoadError::Cancelled) => {
                warn!("Load cancelled, keeping current state");
                Err(LoadError::Cancelled)
            }
            Err(e) => {
                error!("Failed to load data: {}", e);
                self.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                self.base_rate = None;
                self.commercial_rates.clear();
                self.savings_rates.clear();
                self.special_offers.clear();
                Err(e)
            }
        }
    }

    fn apply(&mut self, snapshot: Snapshot) {
        info!(
            "Loaded base rate {:.2}%, {} commercial, {} savings, {} offers",
            snapshot.base_rate.rate,
            snapshot.commercial_rates.len(),
            snapshot.savings_rates.len(),
            snapshot.special_offers.len()
        );
        self.base_rate = Some(snapshot.base_rate);
        self.commercial_rates = snapshot.commercial_rates;
        self.savings_rates = snapshot.savings_rates;
        self.special_offers = snapshot.special_offers;
        self.reseed_calculator();
    }

    /// Re-runs selection seeding against the current rate collections.
    fn reseed_calculator(&mut self) {
        let available: Vec<DepositRate> = self.all_rates().cloned().collect();
        self.calculator
            .sync_inputs(self.initial_selection.as_ref(), &available);
    }

    /// "Rate selected for calculator" event from outside the calculator.
    pub fn select_rate_for_calculator(&mut self, selection: CalculatorSelection) {
        info!(
            "Calculator rate set to {} - {} ({:.2}%)",
            selection.bank_name, selection.product_name, selection.rate
        );
        self.initial_selection = Some(selection);
        self.reseed_calculator();
    }

    /// Same event, raised from a loaded rate card. Returns `false` for unknown ids.
    pub fn use_rate_for_calculator(&mut self, rate_id: &str) -> bool {
        match self.find_rate(rate_id).map(selection_from_rate) {
            Some(selection) => {
                self.select_rate_for_calculator(selection);
                true
            }
            None => {
                warn!("Unknown rate id {}", rate_id);
                false
            }
        }
    }

    /// Manual pick inside the calculator. Returns `false` for unknown ids.
    pub fn pick_calculator_rate(&mut self, rate_id: &str) -> bool {
        match self.find_rate(rate_id).cloned() {
            Some(rate) => {
                self.calculator.select_rate(&rate);
                true
            }
            None => {
                warn!("Unknown rate id {}", rate_id);
                false
            }
        }
    }

    pub fn toggle_alarm(&mut self, offer_id: &str, new_state: bool) {
        self.alarms.toggle(offer_id, new_state);
        self.alarm_hook.on_toggle(offer_id, new_state);
    }

    pub fn view(&self) -> DashboardView<'_> {
        let selected_rate = self
            .calculator
            .selected_entry(&self.commercial_rates)
            .or_else(|| self.calculator.selected_entry(&self.savings_rates));

        DashboardView {
            is_loading: self.is_loading,
            error: self.error.as_deref(),
            base_rate: self.base_rate.as_ref(),
            commercial_rates: &self.commercial_rates,
            savings_rates: &self.savings_rates,
            special_offers: &self.special_offers,
            alarms: &self.alarms,
            calculator: &self.calculator,
            selected_rate,
        }
    }
}

#[cfg(test)]
impl Dashboard {
    pub fn with_alarm_hook(mut self, hook: Box<dyn AlarmHook>) -> Self {
        self.alarm_hook = hook;
        self
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn base_rate(&self) -> Option<&BaseRateInfo> {
        self.base_rate.as_ref()
    }

    pub fn commercial_rates(&self) -> &[DepositRate] {
        &self.commercial_rates
    }

    pub fn savings_rates(&self) -> &[DepositRate] {
        &self.savings_rates
    }

    pub fn special_offers(&self) -> &[SpecialOffer] {
        &self.special_offers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::InterestMethod;
    use crate::provider::mock::{
        sample_base_rate, sample_commercial_rates, sample_savings_rates, sample_special_offers,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StubProvider {
        fail_savings: bool,
        hang_offers: bool,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RateProvider for StubProvider {
        async fn get_base_rate(&self) -> Result<BaseRateInfo, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_base_rate())
        }

        async fn get_commercial_rates(&self) -> Result<Vec<DepositRate>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_commercial_rates())
        }

        async fn get_savings_rates(&self) -> Result<Vec<DepositRate>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_savings {
                return Err(ProviderError::Http("connection reset".into()));
            }
            Ok(sample_savings_rates())
        }

        async fn get_special_offers(&self) -> Result<Vec<SpecialOffer>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_offers {
                std::future::pending::<()>().await;
            }
            Ok(sample_special_offers())
        }
    }

    struct RecordingHook(Arc<Mutex<Vec<(String, bool)>>>);

    impl AlarmHook for RecordingHook {
        fn on_toggle(&self, offer_id: &str, active: bool) {
            self.0.lock().unwrap().push((offer_id.to_string(), active));
        }
    }

    #[tokio::test]
    async fn successful_load_populates_everything() {
        let mut dashboard = Dashboard::default();
        assert!(dashboard.is_loading());

        dashboard.load(&StubProvider::default()).await.unwrap();

        assert!(!dashboard.is_loading());
        assert!(dashboard.error().is_none());
        assert_eq!(dashboard.base_rate().map(|b| b.rate), Some(3.50));
        assert_eq!(dashboard.commercial_rates().len(), 3);
        assert_eq!(dashboard.savings_rates().len(), 3);
        assert_eq!(dashboard.special_offers().len(), 3);

        let selection = dashboard.calculator().selection().unwrap();
        assert_eq!(selection.bank_name, "KB국민은행");
        assert_eq!(selection.product_name, "KB Star 정기예금 (비대면전용)");
        assert_eq!(selection.rate, 3.55);
    }

    #[tokio::test]
    async fn one_failed_fetch_fails_the_whole_load() {
        let mut dashboard = Dashboard::default();
        dashboard.load(&StubProvider::default()).await.unwrap();

        let failing = StubProvider {
            fail_savings: true,
            ..StubProvider::default()
        };
        let err = dashboard.load(&failing).await.unwrap_err();

        assert!(matches!(err, LoadError::Provider(ProviderError::Http(_))));
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.error(), Some(LOAD_FAILURE_MESSAGE));
        assert!(dashboard.base_rate().is_none());
        assert!(dashboard.commercial_rates().is_empty());
        assert!(dashboard.savings_rates().is_empty());
        assert!(dashboard.special_offers().is_empty());
    }

    #[tokio::test]
    async fn reload_after_failure_clears_error() {
        let mut dashboard = Dashboard::default();
        let failing = StubProvider {
            fail_savings: true,
            ..StubProvider::default()
        };
        assert!(dashboard.load(&failing).await.is_err());

        let healthy = StubProvider::default();
        dashboard.load(&healthy).await.unwrap();
        assert!(dashboard.error().is_none());
        assert_eq!(healthy.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_fetch_times_out_as_failure() {
        let mut dashboard = Dashboard::default();
        let hanging = StubProvider {
            hang_offers: true,
            ..StubProvider::default()
        };
        let err = dashboard
            .load_with(&hanging, Some(Duration::from_secs(5)), None)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::TimedOut(5)));
        assert_eq!(dashboard.error(), Some(LOAD_FAILURE_MESSAGE));
        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn shutdown_cancels_in_flight_load() {
        let mut dashboard = Dashboard::default();
        dashboard.load(&StubProvider::default()).await.unwrap();

        let hanging = StubProvider {
            hang_offers: true,
            ..StubProvider::default()
        };
        let shutdown = Notify::new();
        shutdown.notify_one();
        let err = dashboard
            .load_with(&hanging, None, Some(&shutdown))
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Cancelled));
        assert!(!dashboard.is_loading());
        assert!(dashboard.error().is_none());
        assert_eq!(dashboard.special_offers().len(), 3);
    }

    #[tokio::test]
    async fn external_selection_overrides_default() {
        let mut dashboard = Dashboard::default();
        dashboard.load(&StubProvider::default()).await.unwrap();

        assert!(dashboard.use_rate_for_calculator("sb1"));
        assert_eq!(dashboard.calculator().selection().unwrap().bank_name, "OK저축은행");
        assert_eq!(dashboard.view().selected_rate.map(|r| r.id.as_str()), Some("sb1"));

        // A reload keeps honouring the external pick.
        dashboard.load(&StubProvider::default()).await.unwrap();
        assert_eq!(dashboard.calculator().selection().unwrap().bank_name, "OK저축은행");

        assert!(!dashboard.use_rate_for_calculator("nope"));
    }

    #[tokio::test]
    async fn reload_replaces_manual_pick_with_default() {
        let mut dashboard = Dashboard::default();
        dashboard.load(&StubProvider::default()).await.unwrap();

        assert!(dashboard.pick_calculator_rate("cb3"));
        assert_eq!(dashboard.calculator().selection().unwrap().bank_name, "우리은행");

        dashboard.load(&StubProvider::default()).await.unwrap();
        assert_eq!(dashboard.calculator().selection().unwrap().bank_name, "KB국민은행");
    }

    #[tokio::test]
    async fn calculator_flow_through_dashboard() {
        let mut dashboard = Dashboard::default();
        dashboard.load(&StubProvider::default()).await.unwrap();
        dashboard.use_rate_for_calculator("sb1");

        let calc = dashboard.calculator_mut();
        calc.set_principal_input("10000000");
        calc.set_period(2);
        calc.set_method(InterestMethod::CompoundAnnual);
        let quote = calc.calculate().unwrap();
        assert_eq!(quote.interest.round(), 836_810.0);

        dashboard.pick_calculator_rate("sb2");
        assert!(dashboard.calculator().quote().is_none());
    }

    #[test]
    fn alarm_toggle_updates_state_and_runs_hook() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut dashboard =
            Dashboard::default().with_alarm_hook(Box::new(RecordingHook(log.clone())));

        dashboard.toggle_alarm("so1", true);
        dashboard.toggle_alarm("so1", true);
        dashboard.toggle_alarm("so3", false);

        assert!(dashboard.alarms().is_active("so1"));
        assert_eq!(dashboard.alarms().get("so3"), Some(false));
        assert_eq!(log.lock().unwrap().len(), 3);
    }
}
