//! Core of a small retail bank.
//!
//! - [`money`] normalizes every amount to two fractional digits, half-up.
//! - [`account`] holds the account variants (base, savings, premium, investment) and their shared contract.
//! - [`client`] is the account holder entity.
//! - [`bank`] is the aggregate owning clients and accounts, enforcing quiet hours and login lockout.
//! - [`report`] exports accounts and rankings as CSV.

pub mod account;
pub mod bank;
pub mod client;
pub mod error;
pub mod money;
pub mod report;
pub mod types;

pub use account::Account;
pub use account::BankAccount;
pub use bank::Bank;
pub use client::Client;
pub use error::BankError;
