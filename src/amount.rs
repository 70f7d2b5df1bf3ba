//! Euro amount with EPC range rules and two-place rendering.
//!
//! Uses `rust_decimal` internally so that range checks and rounding are exact;
//! the unrounded value is kept so that amounts such as `0.00999` are rejected
//! rather than silently rounded up to the minimum.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Amount of a credit transfer in euro (AT-04).
///
/// A zero amount means "omitted": the payer enters the amount in the banking app.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use sepa_qr::EuroAmount;
///
/// let amount = EuroAmount::from_str("12.3").unwrap();
/// assert_eq!(amount.to_string(), "12.30");
/// assert_eq!(amount.to_field(), "EUR12.30");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct EuroAmount(Decimal);

impl EuroAmount {
    /// The number of decimal places rendered in the payload.
    pub const SCALE: u32 = 2;

    /// Zero value, i.e. no amount.
    pub const ZERO: Self = EuroAmount(Decimal::ZERO);

    /// Creates an amount from a `Decimal` without rounding.
    pub fn new(value: Decimal) -> Self {
        EuroAmount(value)
    }

    /// Smallest accepted nonzero amount (0.01).
    pub fn min() -> Decimal {
        Decimal::new(1, Self::SCALE)
    }

    /// Largest accepted amount (999999999.99).
    pub fn max() -> Decimal {
        Decimal::new(99_999_999_999, Self::SCALE)
    }

    /// Returns `true` if no amount is set.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the amount lies in `[0.01, 999999999.99]`.
    pub fn is_within_range(&self) -> bool {
        self.0 >= Self::min() && self.0 <= Self::max()
    }

    /// Rounds half away from zero to two places.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Renders the payload field: `EUR` followed by two decimals, or an
    /// empty string when the amount is zero.
    pub fn to_field(&self) -> String {
        if self.is_zero() {
            return String::new();
        }

        format!("EUR{}", self)
    }
}

impl From<Decimal> for EuroAmount {
    fn from(value: Decimal) -> Self {
        EuroAmount::new(value)
    }
}

impl FromStr for EuroAmount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(EuroAmount::ZERO);
        }
        Ok(EuroAmount(Decimal::from_str(trimmed)?))
    }
}

impl fmt::Display for EuroAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}
