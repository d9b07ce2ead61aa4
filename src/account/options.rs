use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::account::Account;
use crate::account::AccountCore;
use crate::account::BaseAccount;
use crate::account::InvestmentAccount;
use crate::account::PremiumAccount;
use crate::account::SavingsAccount;
use crate::error::Result;
use crate::error::Violation;
use crate::money;
use crate::types::AccountType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsOptions {
    pub min_balance: Decimal,
    pub monthly_interest_rate: Decimal,
}

impl Default for SavingsOptions {
    fn default() -> Self {
        Self {
            min_balance: money::ZERO,
            monthly_interest_rate: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremiumOptions {
    pub overdraft_limit: Decimal,
    pub withdraw_fee: Decimal,
    pub max_withdraw_per_txn: Decimal,
}

impl Default for PremiumOptions {
    fn default() -> Self {
        Self {
            overdraft_limit: money::ZERO,
            withdraw_fee: money::ZERO,
            max_withdraw_per_txn: money::DEFAULT_MAX_WITHDRAW,
        }
    }
}

/// `portfolios` keys must be `stocks`, `bonds` or `etf`, they are checked when the account is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentOptions {
    pub portfolios: Option<BTreeMap<String, Decimal>>,
    pub expected_yearly_growth: Decimal,
}

impl Default for InvestmentOptions {
    fn default() -> Self {
        Self {
            portfolios: None,
            expected_yearly_growth: Decimal::ZERO,
        }
    }
}

/// Extra construction parameters, one shape per account variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AccountOptions {
    Base,
    Savings(SavingsOptions),
    Premium(PremiumOptions),
    Investment(InvestmentOptions),
}

impl AccountOptions {
    fn defaults_for(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Base | AccountType::Bank => Self::Base,
            AccountType::Savings => Self::Savings(SavingsOptions::default()),
            AccountType::Premium => Self::Premium(PremiumOptions::default()),
            AccountType::Investment => Self::Investment(InvestmentOptions::default()),
        }
    }
}

/// Builds the variant registered for `account_type`, using its default options when none are given.
///
/// # Errors
///
/// Returns [`Violation::OptionsMismatch`] if `options` belong to another account type, or any
/// construction error of the selected variant.
pub(crate) fn open(account_type: AccountType, core: AccountCore, options: Option<AccountOptions>) -> Result<Account> {
    let options = options.unwrap_or_else(|| AccountOptions::defaults_for(account_type));
    match (account_type, options) {
        (AccountType::Base | AccountType::Bank, AccountOptions::Base) => Ok(Account::Base(BaseAccount::new(core))),
        (AccountType::Savings, AccountOptions::Savings(options)) => {
            SavingsAccount::new(core, options).map(Account::Savings)
        }
        (AccountType::Premium, AccountOptions::Premium(options)) => {
            PremiumAccount::new(core, options).map(Account::Premium)
        }
        (AccountType::Investment, AccountOptions::Investment(options)) => {
            InvestmentAccount::new(core, options).map(Account::Investment)
        }
        (account_type, _) => Err(Violation::OptionsMismatch { account_type }.into()),
    }
}
