use std::fmt;

use rust_decimal::Decimal;

use crate::error::BankError;
use crate::error::Result;
use crate::error::Violation;
use crate::money;
use crate::money::MoneyInput;
use crate::types::AccountId;
use crate::types::AccountStatus;
use crate::types::Currency;
use crate::types::Owner;

/// State shared by every account variant.
///
/// Balance mutations are crate private, the variants decide whether a debit is allowed before
/// calling [`AccountCore::debit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCore {
    pub(in crate::account) id: AccountId,
    pub(in crate::account) owner: Owner,
    pub(in crate::account) balance: Decimal,
    pub(in crate::account) status: AccountStatus,
    pub(in crate::account) currency: Currency,
}

impl AccountCore {
    /// Builds an active account record with a random [`AccountId`].
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InvalidAmount`] if `balance` is not a non negative amount.
    pub fn new(owner: Owner, currency: Currency, balance: impl MoneyInput) -> Result<Self> {
        Ok(Self {
            id: AccountId::random(),
            owner,
            balance: money::validate(balance, true)?,
            status: AccountStatus::Active,
            currency,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = id;
        self
    }

    pub const fn id(&self) -> &AccountId {
        &self.id
    }

    pub const fn owner(&self) -> &Owner {
        &self.owner
    }

    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    pub const fn status(&self) -> AccountStatus {
        self.status
    }

    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// # Errors
    ///
    /// Returns an error if:
    /// - The account is frozen ([`BankError::AccountFrozen`]).
    /// - The account is closed ([`BankError::AccountClosed`]).
    pub fn ensure_can_operate(&self) -> Result<()> {
        match self.status {
            AccountStatus::Active => Ok(()),
            AccountStatus::Frozen => Err(BankError::AccountFrozen {
                account_id: self.id.clone(),
            }),
            AccountStatus::Closed => Err(BankError::AccountClosed {
                account_id: self.id.clone(),
            }),
        }
    }

    /// Fails with [`BankError::InsufficientFunds`] if `amount` exceeds the cash balance.
    pub(in crate::account) fn ensure_covered(&self, amount: Decimal) -> Result<()> {
        if amount > self.balance {
            return Err(self.insufficient_funds(amount));
        }
        Ok(())
    }

    pub(in crate::account) fn insufficient_funds(&self, requested: Decimal) -> BankError {
        BankError::InsufficientFunds {
            account_id: self.id.clone(),
            requested,
            balance: self.balance,
        }
    }

    pub(in crate::account) fn credit(&mut self, amount: Decimal) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .and_then(money::to_money)
            .ok_or(Violation::Overflow { operation: "credit" })?;
        tracing::debug!(account_id = %self.id, %amount, balance = %self.balance, "account credited");
        Ok(())
    }

    pub(in crate::account) fn debit(&mut self, amount: Decimal) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .and_then(money::to_money)
            .ok_or(Violation::Overflow { operation: "debit" })?;
        tracing::debug!(account_id = %self.id, %amount, balance = %self.balance, "account debited");
        Ok(())
    }

    /// Active accounts become frozen, frozen and closed accounts are left alone.
    pub(in crate::account) fn freeze(&mut self) -> bool {
        self.transition(AccountStatus::Frozen, |status| status == AccountStatus::Active)
    }

    /// Only frozen accounts become active again.
    pub(in crate::account) fn unfreeze(&mut self) -> bool {
        self.transition(AccountStatus::Active, |status| status == AccountStatus::Frozen)
    }

    /// Closed is terminal, closing twice does nothing.
    pub(in crate::account) fn close(&mut self) -> bool {
        self.transition(AccountStatus::Closed, |status| status != AccountStatus::Closed)
    }

    fn transition(&mut self, to: AccountStatus, allowed_from: impl Fn(AccountStatus) -> bool) -> bool {
        if !allowed_from(self.status) {
            return false;
        }
        self.status = to;
        true
    }

    /// Writes `<type_name>(client=.., id=****.., status=.., balance=.. CUR` without the closing paren
    /// so that variants can append their own fields.
    pub(in crate::account) fn fmt_head(&self, f: &mut fmt::Formatter<'_>, type_name: &str) -> fmt::Result {
        write!(
            f,
            "{type_name}(client={}, id=****{}, status={}, balance={:.2} {}",
            self.owner.name(),
            self.id.last4(),
            self.status,
            self.balance,
            self.currency,
        )
    }
}
