use std::collections::BTreeMap;

use crate::error::Result;
use crate::error::Violation;
use crate::types::AccountId;
use crate::types::ClientId;
use crate::types::ClientStatus;

pub const MIN_CLIENT_AGE: u32 = 18;

/// Account holder registered with a [`crate::Bank`].
///
/// The client only tracks the ids of its accounts. The bank owns both the client and the accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    full_name: String,
    client_id: ClientId,
    age: u32,
    status: ClientStatus,
    accounts: Vec<AccountId>,
    contacts: BTreeMap<String, String>,
}

impl Client {
    /// # Errors
    ///
    /// Returns [`crate::BankError::InvalidOperation`] if:
    /// - `full_name` is blank ([`Violation::EmptyClientName`]).
    /// - `client_id` is blank ([`Violation::EmptyClientId`]).
    /// - `age` is below [`MIN_CLIENT_AGE`] ([`Violation::Underage`]).
    pub fn new(full_name: impl Into<String>, client_id: impl Into<ClientId>, age: u32) -> Result<Self> {
        let full_name = full_name.into().trim().to_owned();
        if full_name.is_empty() {
            return Err(Violation::EmptyClientName.into());
        }
        let ClientId(client_id) = client_id.into();
        let client_id = client_id.trim().to_owned();
        if client_id.is_empty() {
            return Err(Violation::EmptyClientId.into());
        }
        if age < MIN_CLIENT_AGE {
            return Err(Violation::Underage { age }.into());
        }
        Ok(Self {
            full_name,
            client_id: ClientId(client_id),
            age,
            status: ClientStatus::Active,
            accounts: Vec::new(),
            contacts: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn with_contacts<I, K, V>(mut self, contacts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.contacts
            .extend(contacts.into_iter().map(|(kind, value)| (kind.into(), value.into())));
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub const fn age(&self) -> u32 {
        self.age
    }

    pub const fn status(&self) -> ClientStatus {
        self.status
    }

    pub const fn is_active(&self) -> bool {
        matches!(self.status, ClientStatus::Active)
    }

    /// Account ids in the order they were added.
    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub const fn contacts(&self) -> &BTreeMap<String, String> {
        &self.contacts
    }

    /// Idempotent.
    pub fn add_account(&mut self, account_id: AccountId) {
        if !self.accounts.contains(&account_id) {
            self.accounts.push(account_id);
        }
    }

    pub fn remove_account(&mut self, account_id: &AccountId) {
        self.accounts.retain(|id| id != account_id);
    }

    pub(crate) fn block(&mut self) {
        self.status = ClientStatus::Blocked;
    }
}
