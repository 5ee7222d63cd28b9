use crate::calculator::interest::{
    clamp_period, compute_interest, parse_period, total_payout, InterestMethod,
    DEFAULT_PERIOD_YEARS,
};
use crate::calculator::selection::RateSelection;
use crate::model::{CalculatorSelection, DepositRate};
use crate::utils::digits_only;
use tracing::{debug, info};

/// Result of an explicit calculation, kept until any input changes.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestQuote {
    pub principal: f64,
    pub interest: f64,
    pub total_payout: f64,
    pub period_years: u32,
    pub method: InterestMethod,
}

/// Calculator inputs plus the last computed quote.
///
/// Every mutator drops the quote; only [`CalculatorState::calculate`] fills it.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    principal: Option<f64>,
    selection: RateSelection,
    period_years: u32,
    method: InterestMethod,
    quote: Option<InterestQuote>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::with_period(DEFAULT_PERIOD_YEARS)
    }
}

impl CalculatorState {
    pub fn with_period(period_years: u32) -> Self {
        Self {
            principal: None,
            selection: RateSelection::default(),
            period_years: period_years.max(1),
            method: InterestMethod::default(),
            quote: None,
        }
    }

    pub fn principal(&self) -> Option<f64> {
        self.principal
    }

    pub fn period_years(&self) -> u32 {
        self.period_years
    }

    pub fn method(&self) -> InterestMethod {
        self.method
    }

    pub fn selection(&self) -> Option<&CalculatorSelection> {
        self.selection.current()
    }

    pub fn quote(&self) -> Option<&InterestQuote> {
        self.quote.as_ref()
    }

    /// The loaded entry the current selection points at, for highlighting.
    pub fn selected_entry<'a>(&self, available: &'a [DepositRate]) -> Option<&'a DepositRate> {
        self.selection.find_in(available)
    }

    /// Accepts raw text from the amount field; non-digits are dropped.
    pub fn set_principal_input(&mut self, input: &str) {
        let digits = digits_only(input);
        self.principal = if digits.is_empty() {
            None
        } else {
            digits.parse::<f64>().ok()
        };
        self.invalidate();
    }

    pub fn set_principal(&mut self, principal: f64) {
        self.principal = Some(principal);
        self.invalidate();
    }

    pub fn set_period(&mut self, years: i64) {
        self.period_years = clamp_period(years);
        self.invalidate();
    }

    pub fn set_period_input(&mut self, input: &str) {
        self.period_years = parse_period(input);
        self.invalidate();
    }

    pub fn set_method(&mut self, method: InterestMethod) {
        self.method = method;
        self.invalidate();
    }

    /// Manual pick from the loaded rates.
    pub fn select_rate(&mut self, rate: &DepositRate) {
        self.selection.select(rate);
        self.invalidate();
    }

    /// Re-runs selection seeding after the initial selection or the rate
    /// collection changed.
    pub fn sync_inputs(&mut self, initial: Option<&CalculatorSelection>, available: &[DepositRate]) {
        if self.selection.initialize(initial, available) {
            self.invalidate();
        }
    }

    /// Whether a calculation would produce a result.
    pub fn can_calculate(&self) -> bool {
        self.selection.current().is_some() && self.principal.is_some_and(|p| p > 0.0)
    }

    /// Computes the quote from the current inputs, or clears it when the
    /// inputs are incomplete.
    pub fn calculate(&mut self) -> Option<&InterestQuote> {
        self.quote = match (self.principal, self.selection.current()) {
            (Some(principal), Some(selection)) => {
                compute_interest(principal, selection.rate, self.period_years as i64, self.method)
                    .map(|interest| InterestQuote {
                        principal,
                        interest,
                        total_payout: total_payout(principal, interest),
                        period_years: self.period_years,
                        method: self.method,
                    })
            }
            _ => None,
        };

        match &self.quote {
            Some(q) => info!(
                "Calculated {} interest over {}y: {:.2}",
                q.method, q.period_years, q.interest
            ),
            None => debug!("Calculation skipped: incomplete inputs"),
        }
        self.quote.as_ref()
    }

    fn invalidate(&mut self) {
        self.quote = None;
    }
}
