use std::fmt;

use rust_decimal::Decimal;

use crate::account::AccountCore;
use crate::account::BankAccount;
use crate::account::VariantInfo;
use crate::account::sealed::Variant;
use crate::error::Result;

/// Plain current account: withdrawals are limited by the cash balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseAccount {
    core: AccountCore,
}

impl BaseAccount {
    pub const fn new(core: AccountCore) -> Self {
        Self { core }
    }
}

impl Variant for BaseAccount {
    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }

    fn apply_withdrawal(&mut self, amount: Decimal) -> Result<()> {
        self.core.ensure_covered(amount)?;
        self.core.debit(amount)
    }

    fn type_name(&self) -> &'static str {
        "BankAccount"
    }

    fn details(&self) -> VariantInfo {
        VariantInfo::Base {}
    }
}

impl BankAccount for BaseAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }
}

impl fmt::Display for BaseAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.fmt_head(f, self.type_name())?;
        write!(f, ")")
    }
}
