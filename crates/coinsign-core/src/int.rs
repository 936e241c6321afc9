//! Arbitrary-precision signed amounts.
//!
//! [`Int`] wraps a [`BigInt`] and enforces the protocol's magnitude bound of
//! [`MAX_AMOUNT_BITS`] bits. Parsing rejects anything wider; arithmetic that
//! would cross the bound returns [`CoinError::AmountOverflow`] instead of
//! silently growing. Amounts serialize as quoted decimal strings.

use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::constants::MAX_AMOUNT_BITS;
use crate::error::CoinError;

/// A signed integer amount bounded to [`MAX_AMOUNT_BITS`] bits of magnitude.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(BigInt);

impl Int {
    /// The zero amount.
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// Wrap a big integer, failing if it exceeds the magnitude bound.
    pub fn from_big(value: BigInt) -> Result<Self, CoinError> {
        if value.bits() > MAX_AMOUNT_BITS {
            return Err(CoinError::AmountOverflow { max_bits: MAX_AMOUNT_BITS });
        }
        Ok(Self(value))
    }

    /// The underlying big integer.
    pub fn as_big(&self) -> &BigInt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `-1`, `0` or `1` according to the sign of the amount.
    pub fn signum(&self) -> i8 {
        match self.0.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.signum() == 1
    }

    pub fn is_negative(&self) -> bool {
        self.signum() == -1
    }

    /// Sum of two amounts, failing if the result exceeds the magnitude bound.
    pub fn checked_add(&self, other: &Int) -> Result<Int, CoinError> {
        Self::from_big(&self.0 + &other.0)
    }

    /// Difference of two amounts, failing if the result exceeds the magnitude bound.
    pub fn checked_sub(&self, other: &Int) -> Result<Int, CoinError> {
        Self::from_big(&self.0 - &other.0)
    }

    /// Whether the magnitude exceeds [`MAX_AMOUNT_BITS`].
    pub(crate) fn exceeds_bound(&self) -> bool {
        self.0.bits() > MAX_AMOUNT_BITS
    }

    /// Sum without the bound check. Merge arithmetic checks the final result.
    pub(crate) fn add_unbounded(&self, other: &Int) -> Int {
        Int(&self.0 + &other.0)
    }

    pub(crate) fn sub_unbounded(&self, other: &Int) -> Int {
        Int(&self.0 - &other.0)
    }
}

impl Neg for Int {
    type Output = Int;

    fn neg(self) -> Int {
        Int(-self.0)
    }
}

impl Neg for &Int {
    type Output = Int;

    fn neg(self) -> Int {
        Int(-&self.0)
    }
}

impl From<u64> for Int {
    fn from(value: u64) -> Self {
        Self(BigInt::from(value))
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl PartialEq<i64> for Int {
    fn eq(&self, other: &i64) -> bool {
        self.0 == BigInt::from(*other)
    }
}

impl PartialOrd<i64> for Int {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.0.partial_cmp(&BigInt::from(*other))
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses an optional `-` followed by ASCII decimal digits.
///
/// Signs other than a single leading minus, separators and radix prefixes
/// are rejected.
impl FromStr for Int {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoinError::MalformedAmount(s.to_string()));
        }
        let value = BigInt::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| CoinError::MalformedAmount(s.to_string()))?;
        Self::from_big(value).map_err(|_| CoinError::MalformedAmount(s.to_string()))
    }
}

impl Serialize for Int {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Int {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
