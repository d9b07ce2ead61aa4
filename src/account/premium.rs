use std::fmt;

use rust_decimal::Decimal;

use crate::account::AccountCore;
use crate::account::BankAccount;
use crate::account::PremiumOptions;
use crate::account::VariantInfo;
use crate::account::sealed::Variant;
use crate::error::Result;
use crate::error::Violation;
use crate::money;

/// Account allowed to go negative down to `-overdraft_limit`. Every withdrawal is charged
/// `withdraw_fee` and capped at `max_withdraw_per_txn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumAccount {
    core: AccountCore,
    overdraft_limit: Decimal,
    withdraw_fee: Decimal,
    max_withdraw_per_txn: Decimal,
}

impl PremiumAccount {
    /// # Errors
    ///
    /// Returns [`crate::BankError::InvalidAmount`] if `overdraft_limit` or `withdraw_fee` is negative
    /// or if `max_withdraw_per_txn` is not positive.
    pub fn new(core: AccountCore, options: PremiumOptions) -> Result<Self> {
        Ok(Self {
            core,
            overdraft_limit: money::validate(options.overdraft_limit, true)?,
            withdraw_fee: money::validate(options.withdraw_fee, true)?,
            max_withdraw_per_txn: money::validate(options.max_withdraw_per_txn, false)?,
        })
    }

    pub const fn overdraft_limit(&self) -> Decimal {
        self.overdraft_limit
    }

    pub const fn withdraw_fee(&self) -> Decimal {
        self.withdraw_fee
    }

    pub const fn max_withdraw_per_txn(&self) -> Decimal {
        self.max_withdraw_per_txn
    }
}

impl Variant for PremiumAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }

    fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()> {
        if amount > self.max_withdraw_per_txn {
            return Err(Violation::ExceedsMaxWithdrawal {
                amount,
                max: self.max_withdraw_per_txn,
            }
            .into());
        }
        let total_debit = amount
            .checked_add(self.withdraw_fee)
            .and_then(money::to_money)
            .ok_or(Violation::Overflow { operation: "withdraw fee" })?;
        let remaining = self
            .core
            .balance()
            .checked_sub(total_debit)
            .ok_or(Violation::Overflow { operation: "overdraft" })?;
        if remaining < -self.overdraft_limit {
            return Err(self.core.insufficient_funds(total_debit));
        }
        self.core.debit(total_debit)
    }

    fn type_name(&self) -> &'static str {
        "PremiumAccount"
    }

    fn details(&self) -> VariantInfo {
        VariantInfo::Premium {
            overdraft_limit: self.overdraft_limit,
            withdraw_fee: self.withdraw_fee,
            max_withdraw_per_txn: self.max_withdraw_per_txn,
        }
    }
}

impl BankAccount for PremiumAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }
}

impl fmt::Display for PremiumAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.fmt_head(f, self.type_name())?;
        write!(
            f,
            ", overdraft={:.2}, fee={:.2})",
            self.overdraft_limit, self.withdraw_fee
        )
    }
}
