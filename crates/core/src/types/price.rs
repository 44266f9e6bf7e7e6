//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative product price.
///
/// Amounts are stored as [`Decimal`] in the currency's standard unit;
/// floating-point never touches money. The storefront is single-currency,
/// so no currency code is carried.
///
/// ## Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use jabuticaba_core::Price;
///
/// let price = Price::new(Decimal::new(1990, 2)).unwrap();
/// assert_eq!(price.to_string(), "19.90");
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Decimal = s.trim().parse().map_err(PriceParseError::Decimal)?;
        Self::new(amount).map_err(PriceParseError::Price)
    }
}

/// Errors that can occur when parsing a [`Price`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PriceParseError {
    /// Not a valid decimal number.
    #[error("invalid decimal: {0}")]
    Decimal(rust_decimal::Error),
    /// A valid decimal, but not a valid price.
    #[error(transparent)]
    Price(PriceError),
}
