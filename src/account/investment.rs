use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::Serialize;

use crate::account::AccountCore;
use crate::account::BankAccount;
use crate::account::InvestmentOptions;
use crate::account::VariantInfo;
use crate::account::sealed::Variant;
use crate::error::Result;
use crate::error::Violation;
use crate::money;
use crate::money::MoneyInput;
use crate::types::AssetKind;
use crate::types::parse_tag;

/// Holdings of an investment account, one money bucket per [`AssetKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Portfolio {
    stocks: Decimal,
    bonds: Decimal,
    etf: Decimal,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            stocks: money::ZERO,
            bonds: money::ZERO,
            etf: money::ZERO,
        }
    }
}

impl Portfolio {
    pub const fn get(&self, asset: AssetKind) -> Decimal {
        match asset {
            AssetKind::Stocks => self.stocks,
            AssetKind::Bonds => self.bonds,
            AssetKind::Etf => self.etf,
        }
    }

    fn bucket_mut(&mut self, asset: AssetKind) -> &mut Decimal {
        match asset {
            AssetKind::Stocks => &mut self.stocks,
            AssetKind::Bonds => &mut self.bonds,
            AssetKind::Etf => &mut self.etf,
        }
    }

    /// Sum of the buckets. Buckets only change through [`Portfolio::with_holding`], which refuses
    /// portfolios whose sum is not a money value.
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(money::ZERO)
    }

    /// Copy of the portfolio with `asset` set to `value`, `None` if the buckets would no longer sum
    /// to a money value.
    fn with_holding(mut self, asset: AssetKind, value: Decimal) -> Option<Self> {
        *self.bucket_mut(asset) = value;
        self.checked_total().map(|_| self)
    }

    fn checked_total(&self) -> Option<Decimal> {
        self.stocks
            .checked_add(self.bonds)?
            .checked_add(self.etf)
            .and_then(money::to_money)
    }
}

/// Cash account with an attached portfolio. Holdings are never liquidated to cover withdrawals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentAccount {
    core: AccountCore,
    portfolio: Portfolio,
    expected_yearly_growth: Decimal,
}

impl InvestmentAccount {
    /// # Errors
    ///
    /// Returns an error if:
    /// - `expected_yearly_growth` is negative ([`Violation::NegativeRate`]).
    /// - An initial holding names an unknown asset ([`Violation::UnknownTag`]).
    /// - An initial holding is not a non negative amount ([`crate::BankError::InvalidAmount`]).
    /// - The holdings do not sum to a money value ([`Violation::Overflow`]).
    pub fn new(core: AccountCore, options: InvestmentOptions) -> Result<Self> {
        let expected_yearly_growth = options.expected_yearly_growth;
        if expected_yearly_growth.is_sign_negative() && !expected_yearly_growth.is_zero() {
            return Err(Violation::NegativeRate {
                field: "expected_yearly_growth",
                value: expected_yearly_growth,
            }
            .into());
        }
        let mut portfolio = Portfolio::default();
        for (asset, value) in options.portfolios.unwrap_or_default() {
            let asset = parse_tag::<AssetKind>(&asset)?;
            let value = money::validate(value, true)?;
            portfolio = portfolio
                .with_holding(asset, value)
                .ok_or(Violation::Overflow { operation: "portfolio value" })?;
        }
        Ok(Self {
            core,
            portfolio,
            expected_yearly_growth,
        })
    }

    pub const fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn portfolio_value(&self) -> Decimal {
        self.portfolio.total()
    }

    pub const fn expected_yearly_growth(&self) -> Decimal {
        self.expected_yearly_growth
    }

    /// Buys `amount` worth of `asset_type` (`stocks`, `bonds` or `etf`). Cash is not debited.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account is not active ([`crate::BankError::AccountFrozen`], [`crate::BankError::AccountClosed`]).
    /// - `asset_type` is unknown ([`Violation::UnknownTag`]).
    /// - `amount` is not a positive amount ([`crate::BankError::InvalidAmount`]).
    /// - The holding or the portfolio value would overflow ([`Violation::Overflow`]).
    pub fn add_asset(&mut self, asset_type: &str, amount: impl MoneyInput) -> Result<()> {
        self.core.ensure_can_operate()?;
        let asset = parse_tag::<AssetKind>(asset_type)?;
        let amount = money::validate(amount, false)?;
        let holding = self
            .portfolio
            .get(asset)
            .checked_add(amount)
            .and_then(money::to_money)
            .ok_or(Violation::Overflow { operation: "add asset" })?;
        self.portfolio = self
            .portfolio
            .with_holding(asset, holding)
            .ok_or(Violation::Overflow { operation: "portfolio value" })?;
        tracing::debug!(account_id = %self.core.id(), %asset, %amount, "asset added");
        Ok(())
    }

    /// Projects cash plus holdings after compounding `expected_yearly_growth` for `years` years.
    /// Zero years returns the current combined value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `years` is negative ([`Violation::NegativeYears`]).
    /// - The projection overflows ([`Violation::Overflow`]).
    pub fn project_yearly_growth(&self, years: i64) -> Result<Decimal> {
        let exponent = u64::try_from(years).map_err(|_| Violation::NegativeYears { years })?;
        let overflow = Violation::Overflow {
            operation: "yearly growth projection",
        };
        let base = self
            .core
            .balance()
            .checked_add(self.portfolio_value())
            .ok_or_else(|| overflow.clone())?;
        let factor = (Decimal::ONE + self.expected_yearly_growth)
            .checked_powu(exponent)
            .ok_or_else(|| overflow.clone())?;
        let projected = base.checked_mul(factor).and_then(money::to_money).ok_or(overflow)?;
        Ok(projected)
    }
}

impl Variant for InvestmentAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }

    fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()> {
        self.core.ensure_covered(amount)?;
        self.core.debit(amount)
    }

    fn type_name(&self) -> &'static str {
        "InvestmentAccount"
    }

    fn details(&self) -> VariantInfo {
        VariantInfo::Investment {
            portfolios: self.portfolio,
            portfolio_value: self.portfolio_value(),
            expected_yearly_growth: self.expected_yearly_growth,
        }
    }
}

impl BankAccount for InvestmentAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }
}

impl fmt::Display for InvestmentAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.fmt_head(f, self.type_name())?;
        write!(
            f,
            ", portfolio={:.2}, growth={:.2})",
            self.portfolio_value(),
            self.expected_yearly_growth
        )
    }
}
