//! Account variants and their shared contract.
//!
//! Every variant wraps an [`AccountCore`] (id, owner, balance, status, currency) and layers its own
//! withdrawal policy on top of it. [`BankAccount`] is the contract callers use; its
//! provided methods run the status guard and the amount validation before handing the
//! already validated amount to the variant, so a failing call never mutates the account.
//! [`Account`] is the closed set of variants stored by [`crate::Bank`].

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::money;
use crate::money::MoneyInput;
use crate::types::AccountId;
use crate::types::AccountStatus;
use crate::types::Currency;
use crate::types::Owner;

mod base;
mod investment;
mod options;
mod premium;
mod record;
mod savings;

pub use base::BaseAccount;
pub use investment::InvestmentAccount;
pub use investment::Portfolio;
pub use options::AccountOptions;
pub use options::InvestmentOptions;
pub use options::PremiumOptions;
pub use options::SavingsOptions;
pub(crate) use options::open;
pub use premium::PremiumAccount;
pub use record::AccountCore;
pub use savings::SavingsAccount;

mod sealed {
    use rust_decimal::Decimal;

    use super::AccountCore;
    use super::VariantInfo;
    use crate::error::Result;

    pub trait Variant {
        fn core_mut(&mut self) -> &mut AccountCore;

        /// Applies the variant withdrawal rule to an active account and a validated amount.
        fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()>;

        fn type_name(&self) -> &'static str;

        fn details(&self) -> VariantInfo;
    }
}

pub trait BankAccount: sealed::Variant {
    fn core(&self) -> &AccountCore;

    fn id(&self) -> &AccountId {
        self.core().id()
    }

    fn owner(&self) -> &Owner {
        self.core().owner()
    }

    fn balance(&self) -> Decimal {
        self.core().balance()
    }

    fn status(&self) -> AccountStatus {
        self.core().status()
    }

    fn currency(&self) -> Currency {
        self.core().currency()
    }

    /// Adds `amount` to the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account is not active ([`crate::BankError::AccountFrozen`], [`crate::BankError::AccountClosed`]).
    /// - `amount` is not a positive amount ([`crate::BankError::InvalidAmount`]).
    fn deposit(&mut self, amount: impl MoneyInput) -> Result<()>
    where
        Self: Sized,
    {
        self.core().ensure_can_operate()?;
        let amount = money::validate(amount, false)?;
        self.core_mut().credit(amount)
    }

    /// Takes `amount` out of the account according to the variant rules.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account is not active ([`crate::BankError::AccountFrozen`], [`crate::BankError::AccountClosed`]).
    /// - `amount` is not a positive amount ([`crate::BankError::InvalidAmount`]).
    /// - The balance would fall below the variant floor ([`crate::BankError::InsufficientFunds`]).
    /// - A variant specific limit is hit ([`crate::BankError::InvalidOperation`]).
    fn withdraw(&mut self, amount: impl MoneyInput) -> Result<()>
    where
        Self: Sized,
    {
        self.core().ensure_can_operate()?;
        let amount = money::validate(amount, false)?;
        self.apply_withdrawal(amount)
    }

    fn account_info(&self) -> AccountInfo {
        let core = self.core();
        AccountInfo {
            type_name: self.type_name(),
            id: core.id().clone(),
            owner_name: core.owner().name().to_owned(),
            owner_doc_id: core.owner().doc_id().map(str::to_owned),
            status: core.status(),
            balance: core.balance(),
            currency: core.currency(),
            details: self.details(),
        }
    }

    fn freeze(&mut self) -> bool {
        self.core_mut().freeze()
    }

    fn unfreeze(&mut self) -> bool {
        self.core_mut().unfreeze()
    }

    fn close(&mut self) -> bool {
        self.core_mut().close()
    }
}

/// Read only snapshot returned by [`BankAccount::account_info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub id: AccountId,
    pub owner_name: String,
    pub owner_doc_id: Option<String>,
    pub status: AccountStatus,
    pub balance: Decimal,
    pub currency: Currency,
    #[serde(flatten)]
    pub details: VariantInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VariantInfo {
    Base {},
    Savings {
        min_balance: Decimal,
        monthly_interest_rate: Decimal,
    },
    Premium {
        overdraft_limit: Decimal,
        withdraw_fee: Decimal,
        max_withdraw_per_txn: Decimal,
    },
    Investment {
        portfolios: Portfolio,
        portfolio_value: Decimal,
        expected_yearly_growth: Decimal,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Base(BaseAccount),
    Savings(SavingsAccount),
    Premium(PremiumAccount),
    Investment(InvestmentAccount),
}

impl Account {
    pub const fn as_savings(&self) -> Option<&SavingsAccount> {
        match self {
            Self::Savings(account) => Some(account),
            _ => None,
        }
    }

    pub fn as_savings_mut(&mut self) -> Option<&mut SavingsAccount> {
        match self {
            Self::Savings(account) => Some(account),
            _ => None,
        }
    }

    pub const fn as_premium(&self) -> Option<&PremiumAccount> {
        match self {
            Self::Premium(account) => Some(account),
            _ => None,
        }
    }

    pub const fn as_investment(&self) -> Option<&InvestmentAccount> {
        match self {
            Self::Investment(account) => Some(account),
            _ => None,
        }
    }

    pub fn as_investment_mut(&mut self) -> Option<&mut InvestmentAccount> {
        match self {
            Self::Investment(account) => Some(account),
            _ => None,
        }
    }
}

impl sealed::Variant for Account {
    fn core_mut(&mut self) -> &mut AccountCore {
        match self {
            Self::Base(account) => account.core_mut(),
            Self::Savings(account) => account.core_mut(),
            Self::Premium(account) => account.core_mut(),
            Self::Investment(account) => account.core_mut(),
        }
    }

    fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()> {
        match self {
            Self::Base(account) => account.apply_withdrawal(amount),
            Self::Savings(account) => account.apply_withdrawal(amount),
            Self::Premium(account) => account.apply_withdrawal(amount),
            Self::Investment(account) => account.apply_withdrawal(amount),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Base(account) => account.type_name(),
            Self::Savings(account) => account.type_name(),
            Self::Premium(account) => account.type_name(),
            Self::Investment(account) => account.type_name(),
        }
    }

    fn details(&self) -> VariantInfo {
        match self {
            Self::Base(account) => account.details(),
            Self::Savings(account) => account.details(),
            Self::Premium(account) => account.details(),
            Self::Investment(account) => account.details(),
        }
    }
}

impl BankAccount for Account {
    fn core(&self) -> &AccountCore {
        match self {
            Self::Base(account) => account.core(),
            Self::Savings(account) => account.core(),
            Self::Premium(account) => account.core(),
            Self::Investment(account) => account.core(),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(account) => fmt::Display::fmt(account, f),
            Self::Savings(account) => fmt::Display::fmt(account, f),
            Self::Premium(account) => fmt::Display::fmt(account, f),
            Self::Investment(account) => fmt::Display::fmt(account, f),
        }
    }
}

#[cfg(test)]
#[path = "account/tests/account_tests.rs"]
mod account_tests;
