use crate::model::{CalculatorSelection, DepositRate, ProductName};
use std::fmt;

/// Collapses a product name into the single string shown to the user.
pub fn normalize_product_name(name: &ProductName) -> String {
    match name {
        ProductName::Plain(label) => label.clone(),
        ProductName::Structured { main, sub: Some(sub) } if !sub.is_empty() => {
            format!("{} ({})", main, sub)
        }
        ProductName::Structured { main, .. } => main.clone(),
    }
}

/// Snapshot of a loaded rate in the shape the calculator works with.
pub fn selection_from_rate(rate: &DepositRate) -> CalculatorSelection {
    CalculatorSelection {
        rate: rate.rate,
        bank_name: rate.bank_name.clone(),
        product_name: normalize_product_name(&rate.product_name),
        rate_id: Some(rate.id.clone()),
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&normalize_product_name(self))
    }
}
