//! Coin and coin-set algebra.
//!
//! A [`Coin`] pairs a denomination with a non-negative [`Int`] amount. A
//! [`Coins`] value is a multiset of coins kept sorted by denomination, and
//! every `Coins` handed out by this module satisfies:
//!
//! - denominations strictly increasing in byte order (hence unique)
//! - every amount strictly positive
//!
//! Arithmetic is a linear merge over two sorted sequences. Subtraction is
//! addition of the negated right-hand side; intermediate negative entries only
//! exist inside [`Coins::try_sub`], whose caller learns about them through the
//! returned flag.
//!
//! The one exception is the fee carried by a transaction, which may keep a
//! zero-amount coin so that its encoding matches what the chain expects
//! (see [`StdFee::single`](crate::stdtx::StdFee::single)).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::constants::{DENOM_TAIL_MAX, DENOM_TAIL_MIN, MAX_AMOUNT_BITS};
use crate::error::CoinError;
use crate::int::Int;

/// A single token balance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CoinRaw")]
pub struct Coin {
    pub denom: String,
    pub amount: Int,
}

/// Wire shape of a [`Coin`]; decoding goes through [`Coin::new`].
#[derive(Deserialize)]
struct CoinRaw {
    denom: String,
    amount: Int,
}

impl TryFrom<CoinRaw> for Coin {
    type Error = CoinError;

    fn try_from(raw: CoinRaw) -> Result<Self, Self::Error> {
        Coin::new(raw.denom, raw.amount)
    }
}

impl Coin {
    /// Create a coin, rejecting negative amounts. Zero is allowed.
    pub fn new(denom: impl Into<String>, amount: Int) -> Result<Self, CoinError> {
        let denom = denom.into();
        if amount.is_negative() {
            return Err(CoinError::NegativeAmount(format!("{amount}{denom}")));
        }
        Ok(Self { denom, amount })
    }

    /// Convenience constructor for small literal amounts.
    pub fn from_u64(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount: Int::from(amount),
        }
    }

    /// Parse `<digits><optional spaces><denom>`, e.g. `"10atom"` or `"10 atom"`.
    pub fn parse(text: &str) -> Result<Self, CoinError> {
        let text = text.trim();
        let digits_end = text
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(text.len());
        if digits_end == 0 {
            return Err(CoinError::MalformedAmount(text.to_string()));
        }
        let (digits, rest) = text.split_at(digits_end);
        let denom = rest.trim_start_matches(is_coin_space);
        if !is_valid_denom(denom) {
            return Err(CoinError::InvalidDenom(denom.to_string()));
        }
        let amount: Int = digits.parse()?;
        Ok(Self {
            denom: denom.to_string(),
            amount,
        })
    }

    pub fn same_denom_as(&self, other: &Coin) -> bool {
        self.denom == other.denom
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_not_negative(&self) -> bool {
        !self.amount.is_negative()
    }

    /// Same denomination and an amount at least as large.
    pub fn is_gte(&self, other: &Coin) -> bool {
        self.same_denom_as(other) && self.amount >= other.amount
    }

    /// Same denomination and a strictly smaller amount.
    pub fn is_lt(&self, other: &Coin) -> bool {
        self.same_denom_as(other) && self.amount < other.amount
    }

    pub fn is_equal(&self, other: &Coin) -> bool {
        self.same_denom_as(other) && self.amount == other.amount
    }

    /// Sum of two coins of the same denomination.
    pub fn plus(&self, other: &Coin) -> Result<Coin, CoinError> {
        self.check_denom(other)?;
        Ok(Coin {
            denom: self.denom.clone(),
            amount: self.amount.checked_add(&other.amount)?,
        })
    }

    /// Difference of two coins of the same denomination; never negative.
    pub fn minus(&self, other: &Coin) -> Result<Coin, CoinError> {
        self.check_denom(other)?;
        let amount = self.amount.checked_sub(&other.amount)?;
        if amount.is_negative() {
            return Err(CoinError::NegativeResult(format!("{self} - {other}")));
        }
        Ok(Coin {
            denom: self.denom.clone(),
            amount,
        })
    }

    fn check_denom(&self, other: &Coin) -> Result<(), CoinError> {
        if self.same_denom_as(other) {
            Ok(())
        } else {
            Err(CoinError::DenomMismatch {
                left: self.denom.clone(),
                right: other.denom.clone(),
            })
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A sorted, denomination-unique set of strictly positive coins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// The empty coin set.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Sort the given coins and validate the result.
    pub fn new(mut coins: Vec<Coin>) -> Result<Self, CoinError> {
        sort_by_denom(&mut coins);
        let coins = Self(coins);
        if !coins.is_valid() {
            return Err(CoinError::InvalidCoinSet(coins.to_string()));
        }
        Ok(coins)
    }

    /// Wrap coins as-is. Callers outside the algebra use this only for the
    /// fee and for decoded wire data, where the input is reproduced verbatim.
    pub(crate) fn from_raw(coins: Vec<Coin>) -> Self {
        Self(coins)
    }

    /// Parse a comma-separated list such as `"10btc, 5atom"`.
    ///
    /// Input order does not matter; the result is sorted. Duplicate
    /// denominations and zero amounts are rejected. Empty input yields an
    /// empty set.
    pub fn parse(text: &str) -> Result<Self, CoinError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::empty());
        }
        let coins = text
            .split(',')
            .map(Coin::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Coin] {
        &self.0
    }

    /// Sort in place by denomination.
    pub fn sort(&mut self) {
        sort_by_denom(&mut self.0);
    }

    /// Whether the set is sorted, denomination-unique and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(Coin::is_positive)
            && self.0.windows(2).all(|w| w[0].denom < w[1].denom)
    }

    /// Non-empty and every entry strictly positive.
    pub fn is_positive(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(Coin::is_positive)
    }

    /// No entry is negative. The empty set qualifies.
    pub fn is_not_negative(&self) -> bool {
        self.0.iter().all(Coin::is_not_negative)
    }

    /// Every entry is zero. The empty set qualifies.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Coin::is_zero)
    }

    /// Merge-add two sets. Matching denominations are summed and zero results
    /// dropped.
    pub fn add(&self, other: &Coins) -> Result<Coins, CoinError> {
        let sum = merge(&self.0, &other.0, false);
        if sum.0.iter().any(|c| c.amount.exceeds_bound()) {
            return Err(CoinError::AmountOverflow { max_bits: MAX_AMOUNT_BITS });
        }
        Ok(sum)
    }

    /// Subtract `other`, failing if any resulting amount is negative.
    pub fn sub(&self, other: &Coins) -> Result<Coins, CoinError> {
        let (diff, has_negative) = self.try_sub(other);
        if has_negative {
            return Err(CoinError::NegativeResult(format!("{self} - {other}")));
        }
        Ok(diff)
    }

    /// Subtract `other` without failing; the flag reports whether any entry
    /// of the result is negative. A result with a negative entry is not a
    /// valid coin set and is only meant for inspection.
    pub fn try_sub(&self, other: &Coins) -> (Coins, bool) {
        let diff = merge(&self.0, &other.0, true);
        let has_negative = !diff.is_not_negative();
        (diff, has_negative)
    }

    /// The negation of every entry. Only meaningful as an operand of
    /// [`add`](Self::add); the result is not a valid coin set.
    pub fn negative(&self) -> Coins {
        Coins(
            self.0
                .iter()
                .map(|c| Coin {
                    denom: c.denom.clone(),
                    amount: -&c.amount,
                })
                .collect(),
        )
    }

    /// Strictly greater in every denomination of `other`, with something left
    /// over. An empty difference is never greater.
    pub fn all_gt(&self, other: &Coins) -> bool {
        let (diff, _) = self.try_sub(other);
        !diff.is_empty() && diff.is_positive()
    }

    /// Greater or equal in every denomination of `other`.
    pub fn all_gte(&self, other: &Coins) -> bool {
        let (diff, _) = self.try_sub(other);
        diff.is_empty() || diff.is_not_negative()
    }

    pub fn all_lt(&self, other: &Coins) -> bool {
        other.all_gt(self)
    }

    pub fn all_lte(&self, other: &Coins) -> bool {
        other.all_gte(self)
    }

    /// Same denominations with the same amounts, regardless of input order.
    pub fn is_equal(&self, other: &Coins) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut a = self.clone();
        let mut b = other.clone();
        a.sort();
        b.sort();
        a.0.iter().zip(b.0.iter()).all(|(x, y)| x.is_equal(y))
    }

    /// Amount held in `denom`, or zero. Binary search over the sorted entries.
    pub fn amount_of(&self, denom: &str) -> Int {
        amount_of_sorted(&self.0, denom)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoinError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether `denom` matches `[A-Za-z][A-Za-z0-9]{2,15}`.
pub fn is_valid_denom(denom: &str) -> bool {
    let bytes = denom.as_bytes();
    let Some((first, tail)) = bytes.split_first() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && (DENOM_TAIL_MIN..=DENOM_TAIL_MAX).contains(&tail.len())
        && tail.iter().all(u8::is_ascii_alphanumeric)
}

/// ASCII whitespace as accepted between amount and denomination, including
/// vertical tab.
fn is_coin_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn sort_by_denom(coins: &mut [Coin]) {
    coins.sort_by(|a, b| a.denom.as_bytes().cmp(b.denom.as_bytes()));
}

/// Two-pointer merge of two denomination-sorted slices, optionally negating
/// the right-hand side. Zero results are dropped.
fn merge(a: &[Coin], b: &[Coin], negate_b: bool) -> Coins {
    let rhs = |c: &Coin| -> Coin {
        if negate_b {
            Coin {
                denom: c.denom.clone(),
                amount: -&c.amount,
            }
        } else {
            c.clone()
        }
    };

    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (ca, cb) = (&a[i], &b[j]);
        match ca.denom.as_bytes().cmp(cb.denom.as_bytes()) {
            Ordering::Less => {
                if !ca.is_zero() {
                    out.push(ca.clone());
                }
                i += 1;
            }
            Ordering::Equal => {
                let amount = if negate_b {
                    ca.amount.sub_unbounded(&cb.amount)
                } else {
                    ca.amount.add_unbounded(&cb.amount)
                };
                if !amount.is_zero() {
                    out.push(Coin {
                        denom: ca.denom.clone(),
                        amount,
                    });
                }
                i += 1;
                j += 1;
            }
            Ordering::Greater => {
                if !cb.is_zero() {
                    out.push(rhs(cb));
                }
                j += 1;
            }
        }
    }
    out.extend(a[i..].iter().filter(|c| !c.is_zero()).cloned());
    out.extend(b[j..].iter().filter(|c| !c.is_zero()).map(rhs));
    Coins(out)
}

fn amount_of_sorted(coins: &[Coin], denom: &str) -> Int {
    match coins {
        [] => Int::zero(),
        [only] if only.denom == denom => only.amount.clone(),
        [_] => Int::zero(),
        _ => {
            let mid = coins.len() / 2;
            match denom.as_bytes().cmp(coins[mid].denom.as_bytes()) {
                Ordering::Less => amount_of_sorted(&coins[..mid], denom),
                Ordering::Equal => coins[mid].amount.clone(),
                Ordering::Greater => amount_of_sorted(&coins[mid + 1..], denom),
            }
        }
    }
}
