//! CSV exports of bank state.

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::Account;
use crate::account::BankAccount;
use crate::types::AccountId;
use crate::types::AccountStatus;
use crate::types::ClientId;
use crate::types::Currency;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv serialization error, source_error={0:?}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes one row per account in the supplied order.
///
/// # Errors
///
/// Returns an error if a row cannot be serialized or the writer fails.
pub fn write_accounts_csv<'a, W, I>(writer: W, accounts: I) -> Result<(), ReportError>
where
    W: std::io::Write,
    I: IntoIterator<Item = &'a Account>,
{
    let mut writer = Writer::from_writer(writer);
    for account in accounts {
        writer.serialize(AccountRow::from(account))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the `(client_id, total)` pairs produced by [`crate::Bank::clients_ranking`].
///
/// # Errors
///
/// Returns an error if a row cannot be serialized or the writer fails.
pub fn write_ranking_csv<'a, W, I>(writer: W, ranking: I) -> Result<(), ReportError>
where
    W: std::io::Write,
    I: IntoIterator<Item = &'a (ClientId, Decimal)>,
{
    let mut writer = Writer::from_writer(writer);
    for (client_id, total) in ranking {
        writer.serialize(RankingRow { client_id, total: *total })?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct AccountRow<'a> {
    account_id: &'a AccountId,
    account_type: &'static str,
    owner: &'a str,
    client_id: Option<&'a str>,
    status: AccountStatus,
    currency: Currency,
    balance: Decimal,
}

impl<'a> From<&'a Account> for AccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            account_id: account.id(),
            account_type: account.account_info().type_name,
            owner: account.owner().name(),
            client_id: account.owner().doc_id(),
            status: account.status(),
            currency: account.currency(),
            balance: account.balance(),
        }
    }
}

#[derive(Serialize)]
struct RankingRow<'a> {
    client_id: &'a ClientId,
    total: Decimal,
}
