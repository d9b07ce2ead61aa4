use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::types::AccountId;
use crate::types::AccountType;
use crate::types::ClientId;

pub type Result<T> = std::result::Result<T, BankError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("invalid amount, {0}")]
    InvalidAmount(#[from] AmountError),
    #[error("invalid operation, {0}")]
    InvalidOperation(#[from] Violation),
    #[error("insufficient funds in account={account_id}, requested={requested} balance={balance}")]
    InsufficientFunds {
        account_id: AccountId,
        requested: Decimal,
        balance: Decimal,
    },
    #[error("account frozen, operations are not allowed account={account_id}")]
    AccountFrozen { account_id: AccountId },
    #[error("account closed, operations are not allowed account={account_id}")]
    AccountClosed { account_id: AccountId },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount must be a number raw={raw:?}")]
    Unparsable { raw: String },
    #[error("amount cannot be negative amount={amount}")]
    Negative { amount: Decimal },
    #[error("amount must be greater than zero")]
    Zero,
    #[error("amount is too large to be held with two fractional digits amount={amount}")]
    OutOfRange { amount: Decimal },
}

/// Business rules whose violation is reported as [`BankError::InvalidOperation`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("owner name is required")]
    EmptyOwnerName,
    #[error("client full name is required")]
    EmptyClientName,
    #[error("client id is required")]
    EmptyClientId,
    #[error("client must be at least 18 years old age={age}")]
    Underage { age: u32 },
    #[error("client already exists client_id={client_id}")]
    DuplicateClient { client_id: ClientId },
    #[error("password is required")]
    EmptyPassword,
    #[error("client not found client_id={client_id}")]
    ClientNotFound { client_id: ClientId },
    #[error("client is not active client_id={client_id}")]
    ClientInactive { client_id: ClientId },
    #[error("account not found account_id={account_id}")]
    AccountNotFound { account_id: AccountId },
    #[error("unknown {kind} tag={tag:?}")]
    UnknownTag { kind: &'static str, tag: String },
    #[error("options do not match account_type={account_type}")]
    OptionsMismatch { account_type: AccountType },
    #[error("operations are not allowed during quiet hours at={at}")]
    QuietHours { at: NaiveDateTime },
    #[error("{field} cannot be negative value={value}")]
    NegativeRate { field: &'static str, value: Decimal },
    #[error("initial balance={balance} cannot be below min_balance={min_balance}")]
    InitialBalanceBelowMinimum { balance: Decimal, min_balance: Decimal },
    #[error("withdrawal of {amount} would leave balance below min_balance={min_balance}")]
    MinBalanceViolated { amount: Decimal, min_balance: Decimal },
    #[error("withdrawal of {amount} exceeds max_withdraw_per_txn={max}")]
    ExceedsMaxWithdrawal { amount: Decimal, max: Decimal },
    #[error("years cannot be negative years={years}")]
    NegativeYears { years: i64 },
    #[error("no free account id after {attempts} attempts")]
    AccountIdExhausted { attempts: usize },
    #[error("arithmetic overflow while computing {operation}")]
    Overflow { operation: &'static str },
}
