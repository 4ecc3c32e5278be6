use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Sub};

/// An amount of coins. The amount is signed so that a malicious transaction
/// output with a negative value is representable, and rejected by validation.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Coin(i64);

impl Coin {
    pub const fn new(amount: i64) -> Self {
        Coin(amount)
    }

    pub fn zero() -> Self {
        Self::new(0)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Add for Coin {
    type Output = Coin;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum<Coin> for Coin {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut sum = Self::zero();
        for el in iter {
            sum = sum.add(el);
        }
        sum
    }
}

impl Sub for Coin {
    type Output = Coin;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<i64> for Coin {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} CLR", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_of_amounts() {
        let total: Coin = vec![Coin::new(5), Coin::new(3), Coin::new(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Coin::new(10));
    }

    #[test]
    fn negative_amounts_are_representable() {
        assert!(Coin::new(-1).is_negative());
        assert!(!Coin::zero().is_negative());
        assert_eq!(Coin::new(3) - Coin::new(5), Coin::new(-2));
    }
}
