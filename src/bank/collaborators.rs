//! Seams for the outside world the bank depends on: wall clock and account id source.

use chrono::NaiveDateTime;

use crate::types::AccountId;

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Source of account ids. Ids are not required to be unique, the bank skips ids already in use.
pub trait IdGenerator {
    fn next_id(&mut self) -> AccountId;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> AccountId {
        AccountId::random()
    }
}

/// Yields `<prefix>-0001`, `<prefix>-0002`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u32,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> AccountId {
        let id = AccountId(format!("{}-{:04}", self.prefix, self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}
