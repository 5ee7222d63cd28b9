use crate::model::{CalculatorSelection, DepositRate};
use crate::normalizer::selection_from_rate;
use tracing::debug;

/// Tracks which rate currently feeds the calculator.
#[derive(Debug, Clone, Default)]
pub struct RateSelection {
    current: Option<CalculatorSelection>,
}

impl RateSelection {
    pub fn current(&self) -> Option<&CalculatorSelection> {
        self.current.as_ref()
    }

    /// Seeds the selection: an explicit initial selection wins, otherwise the
    /// first available rate. With neither, the previous selection is kept.
    ///
    /// Returns `true` when the selection was (re)assigned.
    pub fn initialize(
        &mut self,
        initial: Option<&CalculatorSelection>,
        available: &[DepositRate],
    ) -> bool {
        if let Some(initial) = initial {
            debug!("Selection seeded from external pick: {}", initial.bank_name);
            self.current = Some(initial.clone());
            true
        } else if let Some(first) = available.first() {
            debug!("Selection defaulted to first rate: {}", first.id);
            self.current = Some(selection_from_rate(first));
            true
        } else {
            false
        }
    }

    /// Manual override from the picker.
    pub fn select(&mut self, rate: &DepositRate) {
        self.current = Some(selection_from_rate(rate));
    }

    /// Finds the loaded entry matching the current selection.
    ///
    /// Matches by source id when the snapshot carries one. Otherwise falls back
    /// to `(rate, bank_name)` equality, where two products of the same bank
    /// with the same rate resolve to the first of them.
    pub fn find_in<'a>(&self, available: &'a [DepositRate]) -> Option<&'a DepositRate> {
        let current = self.current.as_ref()?;
        match &current.rate_id {
            Some(id) => available.iter().find(|r| &r.id == id),
            None => available
                .iter()
                .find(|r| r.rate == current.rate && r.bank_name == current.bank_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductName, RateCategory};

    fn rate(id: &str, bank: &str, main: &str, sub: Option<&str>, value: f64) -> DepositRate {
        DepositRate {
            id: id.into(),
            bank_name: bank.into(),
            product_name: ProductName::Structured {
                main: main.into(),
                sub: sub.map(str::to_string),
            },
            rate: value,
            category: RateCategory::Commercial,
            min_duration_months: Some(12),
            max_amount: None,
            conditions: None,
        }
    }

    fn sample() -> Vec<DepositRate> {
        vec![
            rate("cb1", "KB국민은행", "KB Star 정기예금", Some("비대면전용"), 3.55),
            rate("cb2", "신한은행", "쏠편한 정기예금", Some("최고금리"), 3.50),
        ]
    }

    #[test]
    fn defaults_to_first_rate() {
        let mut selection = RateSelection::default();
        assert!(selection.initialize(None, &sample()));

        let current = selection.current().unwrap();
        assert_eq!(current.rate, 3.55);
        assert_eq!(current.bank_name, "KB국민은행");
        assert_eq!(current.product_name, "KB Star 정기예금 (비대면전용)");
    }

    #[test]
    fn explicit_initial_selection_wins() {
        let mut selection = RateSelection::default();
        let pick = CalculatorSelection::new(4.2, "상상인저축은행", "특판");
        selection.initialize(Some(&pick), &sample());
        assert_eq!(selection.current(), Some(&pick));
    }

    #[test]
    fn stays_unset_without_rates() {
        let mut selection = RateSelection::default();
        assert!(!selection.initialize(None, &[]));
        assert!(selection.current().is_none());
    }

    #[test]
    fn reinitialization_overwrites_manual_choice() {
        let rates = sample();
        let mut selection = RateSelection::default();
        selection.initialize(None, &rates);
        selection.select(&rates[1]);
        assert_eq!(selection.current().unwrap().bank_name, "신한은행");

        selection.initialize(None, &rates);
        assert_eq!(selection.current().unwrap().bank_name, "KB국민은행");
    }

    #[test]
    fn lookup_by_id_distinguishes_twins() {
        let rates = vec![
            rate("a", "같은은행", "상품A", None, 3.0),
            rate("b", "같은은행", "상품B", None, 3.0),
        ];
        let mut selection = RateSelection::default();
        selection.select(&rates[1]);
        assert_eq!(selection.find_in(&rates).map(|r| r.id.as_str()), Some("b"));
    }

    #[test]
    fn lookup_without_id_matches_rate_and_bank() {
        let rates = vec![
            rate("a", "같은은행", "상품A", None, 3.0),
            rate("b", "같은은행", "상품B", None, 3.0),
        ];
        let mut selection = RateSelection::default();
        let pick = CalculatorSelection::new(3.0, "같은은행", "상품B");
        selection.initialize(Some(&pick), &rates);
        // Without an id the twin products collapse onto the first entry.
        assert_eq!(selection.find_in(&rates).map(|r| r.id.as_str()), Some("a"));

        let unknown = CalculatorSelection::new(9.9, "없는은행", "x");
        selection.initialize(Some(&unknown), &rates);
        assert!(selection.find_in(&rates).is_none());
    }
}
