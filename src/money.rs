//! Fixed-point money helpers.
//!
//! Every balance, fee and limit goes through [`normalize`] or [`validate`] so that it always carries
//! exactly two fractional digits, rounded half-up (away from zero on ties). Rates are plain
//! [`Decimal`]s and never pass through here.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::error::AmountError;

pub const MONEY_SCALE: u32 = 2;

/// `0.00`
pub const ZERO: Decimal = Decimal::from_parts(0, 0, 0, false, MONEY_SCALE);

/// `10000.00`, the default per-transaction withdrawal cap of premium accounts.
pub const DEFAULT_MAX_WITHDRAW: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, MONEY_SCALE);

/// Raw inputs accepted wherever an amount is expected.
///
/// Floats are converted through their shortest round-trip representation, so `1.005_f64` is
/// treated as the decimal `1.005` and not as its binary approximation.
pub trait MoneyInput {
    fn to_decimal(&self) -> Result<Decimal, AmountError>;
}

impl MoneyInput for Decimal {
    fn to_decimal(&self) -> Result<Decimal, AmountError> {
        Ok(*self)
    }
}

impl MoneyInput for &str {
    fn to_decimal(&self) -> Result<Decimal, AmountError> {
        Decimal::from_str(self.trim()).map_err(|_| AmountError::Unparsable { raw: (*self).to_owned() })
    }
}

impl MoneyInput for String {
    fn to_decimal(&self) -> Result<Decimal, AmountError> {
        self.as_str().to_decimal()
    }
}

impl MoneyInput for f64 {
    fn to_decimal(&self) -> Result<Decimal, AmountError> {
        if !self.is_finite() {
            return Err(AmountError::Unparsable { raw: self.to_string() });
        }
        self.to_string().to_decimal()
    }
}

macro_rules! impl_money_input_for_int {
    ($($int:ty),*) => {
        $(
            impl MoneyInput for $int {
                fn to_decimal(&self) -> Result<Decimal, AmountError> {
                    Ok(Decimal::from(*self))
                }
            }
        )*
    };
}

impl_money_input_for_int!(i32, i64, u32, u64);

/// Rounds `amount` half-up to two fractional digits and pads it to exactly two digits.
///
/// Returns `None` when `amount` has too many integer digits to also carry two fractional ones.
pub fn to_money(amount: Decimal) -> Option<Decimal> {
    let mut money = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    money.rescale(MONEY_SCALE);
    (money.scale() == MONEY_SCALE).then_some(money)
}

/// Parses `raw` and rounds it to money precision.
///
/// # Errors
///
/// Returns an error if:
/// - `raw` is not a number ([`AmountError::Unparsable`]).
/// - `raw` is too large to be held with two fractional digits ([`AmountError::OutOfRange`]).
pub fn normalize(raw: impl MoneyInput) -> Result<Decimal, AmountError> {
    let amount = raw.to_decimal()?;
    to_money(amount).ok_or(AmountError::OutOfRange { amount })
}

/// Normalizes `raw` and checks it is a usable amount.
///
/// # Errors
///
/// Returns an error if:
/// - `raw` is not a number ([`AmountError::Unparsable`]) or is out of range ([`AmountError::OutOfRange`]).
/// - The normalized amount is negative ([`AmountError::Negative`]).
/// - The normalized amount is zero and `allow_zero` is `false` ([`AmountError::Zero`]).
pub fn validate(raw: impl MoneyInput, allow_zero: bool) -> Result<Decimal, AmountError> {
    let amount = normalize(raw)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AmountError::Negative { amount });
    }
    if amount.is_zero() && !allow_zero {
        return Err(AmountError::Zero);
    }
    Ok(amount)
}
