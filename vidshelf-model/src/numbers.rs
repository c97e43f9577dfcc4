use crate::error::ModelError;

/// Non-negative price, stored as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    /// Parse a decimal amount such as `9.99`, rounding to the nearest cent.
    pub fn from_amount(amount: f64) -> Result<Self, ModelError> {
        if !amount.is_finite() {
            return Err(ModelError::InvalidPrice(format!(
                "{amount} is not a finite amount"
            )));
        }
        if amount < 0.0 {
            return Err(ModelError::InvalidPrice(format!(
                "{amount} is negative"
            )));
        }

        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(ModelError::InvalidPrice(format!(
                "{amount} is out of range"
            )));
        }

        Ok(Price(cents as u64))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl TryFrom<f64> for Price {
    type Error = ModelError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Price::from_amount(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_round_to_cents() {
        assert_eq!(Price::from_amount(9.99).unwrap().cents(), 999);
        assert_eq!(Price::from_amount(0.005).unwrap().cents(), 1);
        assert_eq!(Price::from_amount(12.0).unwrap().to_string(), "$12.00");
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        assert!(matches!(
            Price::from_amount(-0.01),
            Err(ModelError::InvalidPrice(_))
        ));
        assert!(Price::from_amount(f64::NAN).is_err());
        assert!(Price::from_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn display_pads_cents() {
        assert_eq!(Price::from_cents(405).to_string(), "$4.05");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }
}
