//! The bank aggregate.
//!
//! [`Bank`] owns every client, account, credential and failed login counter, plus the append only
//! security log. Lifecycle operations on accounts are refused during the quiet hours configured in
//! [`BankPolicy`]; a refusal leaves state untouched apart from the security log entry it records.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::account;
use crate::account::Account;
use crate::account::AccountCore;
use crate::account::AccountOptions;
use crate::account::BankAccount;
use crate::client::Client;
use crate::error::BankError;
use crate::error::Result;
use crate::error::Violation;
use crate::money;
use crate::types::AccountId;
use crate::types::AccountStatus;
use crate::types::AccountType;
use crate::types::ClientId;
use crate::types::Currency;
use crate::types::Owner;

pub mod collaborators;
pub mod policy;
pub mod security_log;

pub use collaborators::Clock;
pub use collaborators::FixedClock;
pub use collaborators::IdGenerator;
pub use collaborators::RandomIdGenerator;
pub use collaborators::SequentialIdGenerator;
pub use collaborators::SystemClock;
pub use policy::BankPolicy;
pub use security_log::SecurityEvent;
pub use security_log::SecurityReason;

#[cfg(test)]
#[path = "bank/tests/bank_tests.rs"]
mod bank_tests;

/// How many fresh ids are drawn before giving up on a colliding generator.
const MAX_ID_ATTEMPTS: usize = 16;

/// Parameters of [`Bank::open_account`]. Defaults to a `base` USD account with a zero balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAccountRequest {
    pub account_type: AccountType,
    pub currency: Currency,
    pub balance: Decimal,
    pub options: Option<AccountOptions>,
}

impl Default for OpenAccountRequest {
    fn default() -> Self {
        Self {
            account_type: AccountType::Base,
            currency: Currency::USD,
            balance: money::ZERO,
            options: None,
        }
    }
}

impl OpenAccountRequest {
    pub fn new(account_type: AccountType) -> Self {
        Self {
            account_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub const fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: AccountOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Filters of [`Bank::search_accounts`], combined with AND. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub client_id: Option<ClientId>,
    pub status: Option<AccountStatus>,
    pub currency: Option<Currency>,
}

impl AccountFilter {
    #[must_use]
    pub fn client(mut self, client_id: impl Into<ClientId>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: AccountStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    fn matches(&self, account: &Account) -> bool {
        self.client_id
            .as_ref()
            .is_none_or(|client_id| account.owner().doc_id() == Some(client_id.as_str()))
            && self.status.is_none_or(|status| account.status() == status)
            && self.currency.is_none_or(|currency| account.currency() == currency)
    }
}

#[derive(Debug)]
pub struct Bank<C = SystemClock, G = RandomIdGenerator> {
    policy: BankPolicy,
    clients: HashMap<ClientId, Client>,
    client_order: Vec<ClientId>,
    accounts: HashMap<AccountId, Account>,
    account_order: Vec<AccountId>,
    credentials: HashMap<ClientId, String>,
    failed_attempts: HashMap<ClientId, u32>,
    security_log: Vec<SecurityEvent>,
    clock: C,
    id_generator: G,
}

impl Bank {
    pub fn new() -> Self {
        Self::with_policy(BankPolicy::default())
    }

    pub fn with_policy(policy: BankPolicy) -> Self {
        Self::with_collaborators(policy, SystemClock, RandomIdGenerator)
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, G: IdGenerator> Bank<C, G> {
    pub fn with_collaborators(policy: BankPolicy, clock: C, id_generator: G) -> Self {
        Self {
            policy,
            clients: HashMap::new(),
            client_order: Vec::new(),
            accounts: HashMap::new(),
            account_order: Vec::new(),
            credentials: HashMap::new(),
            failed_attempts: HashMap::new(),
            security_log: Vec::new(),
            clock,
            id_generator,
        }
    }

    pub const fn policy(&self) -> &BankPolicy {
        &self.policy
    }

    /// Registers `client` with its initial password.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BankError::InvalidOperation`] if:
    /// - A client with the same id is already registered ([`Violation::DuplicateClient`]).
    /// - `password` is empty ([`Violation::EmptyPassword`]).
    pub fn add_client(&mut self, client: Client, password: impl Into<String>) -> Result<()> {
        let client_id = client.client_id().clone();
        if self.clients.contains_key(&client_id) {
            return Err(Violation::DuplicateClient { client_id }.into());
        }
        let password = password.into();
        if password.is_empty() {
            return Err(Violation::EmptyPassword.into());
        }
        self.credentials.insert(client_id.clone(), password);
        self.failed_attempts.insert(client_id.clone(), 0);
        self.clients.insert(client_id.clone(), client);
        self.client_order.push(client_id.clone());
        tracing::info!(%client_id, "client registered");
        Ok(())
    }

    pub fn client(&self, client_id: &ClientId) -> Option<&Client> {
        self.clients.get(client_id)
    }

    /// Registered clients in registration order.
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.client_order.iter().filter_map(|client_id| self.clients.get(client_id))
    }

    pub fn account(&self, account_id: &AccountId) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    /// Mutable access for balance and variant specific operations (deposit, withdraw, interest, assets).
    pub fn account_mut(&mut self, account_id: &AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(account_id)
    }

    /// Registered accounts in opening order, closed ones included.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.account_order
            .iter()
            .filter_map(|account_id| self.accounts.get(account_id))
    }

    /// Opens an account for an active client. `now` defaults to the bank clock.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `now` falls in the quiet hours ([`Violation::QuietHours`]), checked first.
    /// - The client is unknown or blocked ([`Violation::ClientNotFound`], [`Violation::ClientInactive`]).
    /// - The options do not match the account type ([`Violation::OptionsMismatch`]).
    /// - The balance or the options are invalid for the selected variant.
    pub fn open_account(
        &mut self,
        client_id: &ClientId,
        request: OpenAccountRequest,
        now: Option<NaiveDateTime>,
    ) -> Result<&Account> {
        self.ensure_operating_hours(client_id, now)?;
        let client = self.active_client(client_id)?;
        let owner = Owner::new(client.full_name())?.with_doc_id(client.client_id().as_str());
        let account_id = self.fresh_account_id()?;
        let core = AccountCore::new(owner, request.currency, request.balance)?.with_id(account_id.clone());
        let account = account::open(request.account_type, core, request.options)?;

        if let Some(client) = self.clients.get_mut(client_id) {
            client.add_account(account_id.clone());
        }
        self.account_order.push(account_id.clone());
        tracing::info!(
            %client_id,
            %account_id,
            account_type = %request.account_type,
            currency = %request.currency,
            balance = %account.balance(),
            "account opened"
        );
        Ok(self.accounts.entry(account_id).or_insert(account))
    }

    /// Closes the account. Closing an already closed account does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is unknown ([`Violation::AccountNotFound`]) or `now` falls in
    /// the quiet hours ([`Violation::QuietHours`]).
    pub fn close_account(&mut self, account_id: &AccountId, now: Option<NaiveDateTime>) -> Result<()> {
        self.transition_account(account_id, now, "closed", BankAccount::close)
    }

    /// Freezes an active account. Frozen and closed accounts are left as they are.
    ///
    /// # Errors
    ///
    /// Same as [`Bank::close_account`].
    pub fn freeze_account(&mut self, account_id: &AccountId, now: Option<NaiveDateTime>) -> Result<()> {
        self.transition_account(account_id, now, "frozen", BankAccount::freeze)
    }

    /// Reactivates a frozen account. Any other status is left as it is.
    ///
    /// # Errors
    ///
    /// Same as [`Bank::close_account`].
    pub fn unfreeze_account(&mut self, account_id: &AccountId, now: Option<NaiveDateTime>) -> Result<()> {
        self.transition_account(account_id, now, "unfrozen", BankAccount::unfreeze)
    }

    /// Checks `password` and applies the lockout policy.
    ///
    /// Unknown and blocked clients get `false` without counting an attempt. Reaching
    /// [`BankPolicy::max_failed_attempts`] consecutive failures blocks the client for good.
    pub fn authenticate_client(&mut self, client_id: &ClientId, password: &str) -> bool {
        let Some(client) = self.clients.get(client_id) else {
            return false;
        };
        if !client.is_active() {
            return false;
        }
        if self.credentials.get(client_id).is_some_and(|stored| stored == password) {
            self.failed_attempts.insert(client_id.clone(), 0);
            return true;
        }

        let attempts = self.failed_attempts.entry(client_id.clone()).or_insert(0);
        *attempts = attempts.saturating_add(1);
        let reason = if *attempts >= self.policy.max_failed_attempts {
            if let Some(client) = self.clients.get_mut(client_id) {
                client.block();
            }
            SecurityReason::LockedAfterFailedLogins
        } else {
            SecurityReason::FailedLogin
        };
        let at = self.clock.now();
        self.log_security_event(client_id.clone(), reason, at);
        false
    }

    /// Accounts matching every filter in `filter`, in opening order.
    pub fn search_accounts(&self, filter: &AccountFilter) -> Vec<&Account> {
        self.accounts().filter(|account| filter.matches(account)).collect()
    }

    /// Sum of the balances of every account that is not closed.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::Overflow`] if the sum overflows.
    pub fn total_balance(&self) -> Result<Decimal> {
        self.accounts()
            .filter(|account| account.status() != AccountStatus::Closed)
            .try_fold(money::ZERO, |total, account| {
                total
                    .checked_add(account.balance())
                    .ok_or_else(|| BankError::from(Violation::Overflow { operation: "total balance" }))
            })
    }

    /// Every client with the sum of its non closed account balances, richest first. Ties keep
    /// registration order.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::Overflow`] if a client total overflows.
    pub fn clients_ranking(&self) -> Result<Vec<(ClientId, Decimal)>> {
        let mut ranking: Vec<(ClientId, Decimal)> = self
            .client_order
            .iter()
            .map(|client_id| (client_id.clone(), money::ZERO))
            .collect();
        let positions: HashMap<&str, usize> = self
            .client_order
            .iter()
            .enumerate()
            .map(|(position, client_id)| (client_id.as_str(), position))
            .collect();

        for account in self.accounts() {
            if account.status() == AccountStatus::Closed {
                continue;
            }
            let Some(&position) = account.owner().doc_id().and_then(|doc_id| positions.get(doc_id)) else {
                continue;
            };
            let (_, total) = &mut ranking[position];
            *total = total
                .checked_add(account.balance())
                .ok_or(Violation::Overflow { operation: "client ranking" })?;
        }

        ranking.sort_by(|(_, left), (_, right)| right.cmp(left));
        Ok(ranking)
    }

    /// Read only view of the append only security log, oldest first.
    pub fn security_log(&self) -> &[SecurityEvent] {
        &self.security_log
    }

    fn transition_account(
        &mut self,
        account_id: &AccountId,
        now: Option<NaiveDateTime>,
        transition_name: &'static str,
        transition: impl FnOnce(&mut Account) -> bool,
    ) -> Result<()> {
        let client_id = self.account_client_id(account_id)?;
        self.ensure_operating_hours(&client_id, now)?;
        let account = self
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| Violation::AccountNotFound {
                account_id: account_id.clone(),
            })?;
        if transition(account) {
            tracing::info!(%client_id, %account_id, status = %account.status(), "account {transition_name}");
        }
        Ok(())
    }

    fn ensure_operating_hours(&mut self, client_id: &ClientId, now: Option<NaiveDateTime>) -> Result<()> {
        let at = now.unwrap_or_else(|| self.clock.now());
        if self.policy.is_quiet(at.time()) {
            self.log_security_event(client_id.clone(), SecurityReason::QuietHoursBlocked, at);
            return Err(Violation::QuietHours { at }.into());
        }
        Ok(())
    }

    fn active_client(&self, client_id: &ClientId) -> Result<&Client> {
        let client = self.clients.get(client_id).ok_or_else(|| Violation::ClientNotFound {
            client_id: client_id.clone(),
        })?;
        if !client.is_active() {
            return Err(Violation::ClientInactive {
                client_id: client_id.clone(),
            }
            .into());
        }
        Ok(client)
    }

    fn account_client_id(&self, account_id: &AccountId) -> Result<ClientId> {
        let account = self.accounts.get(account_id).ok_or_else(|| Violation::AccountNotFound {
            account_id: account_id.clone(),
        })?;
        Ok(ClientId::from(account.owner().doc_id().unwrap_or_default()))
    }

    fn fresh_account_id(&mut self) -> Result<AccountId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.id_generator.next_id();
            if !self.accounts.contains_key(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(account_id = %candidate, "account id already taken");
        }
        Err(Violation::AccountIdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        }
        .into())
    }

    fn log_security_event(&mut self, client_id: ClientId, reason: SecurityReason, created_at: NaiveDateTime) {
        tracing::warn!(%client_id, %reason, %created_at, "security event");
        self.security_log.push(SecurityEvent {
            client_id,
            reason,
            created_at,
        });
    }
}
