use std::fmt;

use rust_decimal::Decimal;

use crate::account::AccountCore;
use crate::account::BankAccount;
use crate::account::SavingsOptions;
use crate::account::VariantInfo;
use crate::account::sealed::Variant;
use crate::error::Result;
use crate::error::Violation;
use crate::money;

/// Interest bearing account that must always keep at least `min_balance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsAccount {
    core: AccountCore,
    min_balance: Decimal,
    monthly_interest_rate: Decimal,
}

impl SavingsAccount {
    /// # Errors
    ///
    /// Returns an error if:
    /// - `min_balance` is not a non negative amount ([`crate::BankError::InvalidAmount`]).
    /// - `monthly_interest_rate` is negative ([`Violation::NegativeRate`]).
    /// - The opening balance is below `min_balance` ([`Violation::InitialBalanceBelowMinimum`]).
    pub fn new(core: AccountCore, options: SavingsOptions) -> Result<Self> {
        let min_balance = money::validate(options.min_balance, true)?;
        let monthly_interest_rate = options.monthly_interest_rate;
        if monthly_interest_rate.is_sign_negative() && !monthly_interest_rate.is_zero() {
            return Err(Violation::NegativeRate {
                field: "monthly_interest_rate",
                value: monthly_interest_rate,
            }
            .into());
        }
        if core.balance() < min_balance {
            return Err(Violation::InitialBalanceBelowMinimum {
                balance: core.balance(),
                min_balance,
            }
            .into());
        }
        Ok(Self {
            core,
            min_balance,
            monthly_interest_rate,
        })
    }

    pub const fn min_balance(&self) -> Decimal {
        self.min_balance
    }

    pub const fn monthly_interest_rate(&self) -> Decimal {
        self.monthly_interest_rate
    }

    /// Credits one month of interest on the current balance, rounded to money precision.
    /// Scheduling is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not active or the interest overflows.
    pub fn apply_monthly_interest(&mut self) -> Result<()> {
        self.core.ensure_can_operate()?;
        if self.monthly_interest_rate.is_zero() {
            return Ok(());
        }
        let interest = self
            .core
            .balance()
            .checked_mul(self.monthly_interest_rate)
            .ok_or(Violation::Overflow { operation: "monthly interest" })?;
        self.core.credit(interest)
    }
}

impl Variant for SavingsAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }

    fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()> {
        self.core.ensure_covered(amount)?;
        if self.core.balance() - amount < self.min_balance {
            return Err(Violation::MinBalanceViolated {
                amount,
                min_balance: self.min_balance,
            }
            .into());
        }
        self.core.debit(amount)
    }

    fn type_name(&self) -> &'static str {
        "SavingsAccount"
    }

    fn details(&self) -> VariantInfo {
        VariantInfo::Savings {
            min_balance: self.min_balance,
            monthly_interest_rate: self.monthly_interest_rate,
        }
    }
}

impl BankAccount for SavingsAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }
}

impl fmt::Display for SavingsAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.fmt_head(f, self.type_name())?;
        write!(
            f,
            ", min_balance={:.2}, rate={:.4})",
            self.min_balance, self.monthly_interest_rate
        )
    }
}
