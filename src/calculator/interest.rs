use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PERIOD_YEARS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterestMethod {
    #[default]
    Simple,
    CompoundAnnual,
}

impl InterestMethod {
    /// Short label shown next to the result.
    pub fn label(&self) -> &'static str {
        match self {
            InterestMethod::Simple => "단리",
            InterestMethod::CompoundAnnual => "연복리",
        }
    }
}

impl fmt::Display for InterestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown interest method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for InterestMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" | "단리" => Ok(InterestMethod::Simple),
            "compound" | "compound_annual" | "compounded_annually" | "연복리" => {
                Ok(InterestMethod::CompoundAnnual)
            }
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Deposit periods below one year count as one year.
pub fn clamp_period(years: i64) -> u32 {
    years.clamp(1, u32::MAX as i64) as u32
}

/// Reads a period typed by the user; anything non-numeric becomes one year.
pub fn parse_period(input: &str) -> u32 {
    input.trim().parse::<i64>().map(clamp_period).unwrap_or(DEFAULT_PERIOD_YEARS)
}

/// Projected pre-tax interest on `principal` over `period_years`.
///
/// Returns `None` when there is nothing meaningful to compute: a principal
/// that is not strictly positive, or a non-finite principal or rate. The
/// amount is left unrounded.
pub fn compute_interest(
    principal: f64,
    annual_rate_percent: f64,
    period_years: i64,
    method: InterestMethod,
) -> Option<f64> {
    if !principal.is_finite() || !annual_rate_percent.is_finite() || principal <= 0.0 {
        return None;
    }

    let years = clamp_period(period_years);
    let rate = annual_rate_percent / 100.0;

    let interest = match method {
        InterestMethod::Simple => principal * rate * years as f64,
        InterestMethod::CompoundAnnual => principal * ((1.0 + rate).powf(years as f64) - 1.0),
    };
    Some(interest)
}

pub fn total_payout(principal: f64, interest: f64) -> f64 {
    principal + interest
}
