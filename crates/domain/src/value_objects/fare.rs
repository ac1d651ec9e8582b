//! Fare value object
//!
//! A non-negative money amount with two decimal places, backed by
//! [`rust_decimal::Decimal`] so fares never pick up binary floating point
//! error.
//!
//! # Examples
//!
//! ```
//! use domain::Fare;
//!
//! let fare: Fare = "3.25".parse().unwrap();
//! assert_eq!(fare.to_string(), "3.25");
//!
//! // Always rendered with two decimals
//! assert_eq!(Fare::ZERO.to_string(), "0.00");
//!
//! // Negative amounts are rejected
//! assert!("-1.00".parse::<Fare>().is_err());
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of decimal places carried by every fare
pub const FARE_SCALE: u32 = 2;

/// A non-negative fare amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fare(Decimal);

impl Fare {
    /// The zero fare charged for cancelled trips
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a fare, rounding half away from zero to two decimals
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::InvalidFare(format!(
                "Fare must not be negative, got {amount}"
            )));
        }
        let mut rounded =
            amount.round_dp_with_strategy(FARE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(FARE_SCALE);
        Ok(Self(rounded))
    }

    /// Create a fare from a whole number of cents
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), FARE_SCALE))
    }

    /// Get the underlying amount
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether nothing is charged
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Fare {
    fn default() -> Self {
        Self::ZERO
    }
}

// Both sides are non-negative, so the sum is too.
impl Add for Fare {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Fare {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Fare {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut amount = self.0;
        amount.rescale(FARE_SCALE);
        write!(f, "{amount}")
    }
}

impl FromStr for Fare {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::InvalidFare(format!("'{s}': {e}")))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Fare {
    type Error = DomainError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Fare> for Decimal {
    fn from(fare: Fare) -> Self {
        fare.0
    }
}
