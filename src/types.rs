use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Violation;

#[derive(Debug, Clone, Hash, PartialEq, Eq, Ord, PartialOrd, Serialize, Deserialize, parse_display::Display)]
#[display("{0}")]
pub struct ClientId(pub String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ClientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, Ord, PartialOrd, Serialize, Deserialize, parse_display::Display)]
#[display("{0}")]
pub struct AccountId(pub String);

impl AccountId {
    const LEN: usize = 8;

    /// Short opaque id made of the first 8 hex digits of a random v4 uuid.
    /// Uniqueness within a registry is the caller's concern.
    pub fn random() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(Self::LEN);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four characters, used to mask the id in human readable output.
    pub fn last4(&self) -> &str {
        let start = self.0.char_indices().rev().nth(3).map_or(0, |(idx, _)| idx);
        &self.0[start..]
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, parse_display::Display, parse_display::FromStr,
)]
pub enum Currency {
    RUB,
    USD,
    EUR,
    KZT,
    CNY,
}

#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, parse_display::Display, parse_display::FromStr,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Frozen,
    Closed,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Blocked,
}

/// Account type tags accepted when opening an account. `base` and `bank` are synonyms.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Base,
    Bank,
    Savings,
    Premium,
    Investment,
}

#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, parse_display::Display, parse_display::FromStr,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stocks,
    Bonds,
    Etf,
}

/// Closed enumerations that can be parsed from a loosely typed string tag.
pub trait Tag: FromStr {
    const KIND: &'static str;
}

impl Tag for Currency {
    const KIND: &'static str = "currency";
}

impl Tag for AccountStatus {
    const KIND: &'static str = "account status";
}

impl Tag for AccountType {
    const KIND: &'static str = "account type";
}

impl Tag for AssetKind {
    const KIND: &'static str = "portfolio asset";
}

/// The one conversion from an external string tag into a closed enumeration. Matching is
/// case-sensitive.
///
/// # Errors
///
/// Returns [`Violation::UnknownTag`] if `raw` does not name a variant of `T`.
pub fn parse_tag<T: Tag>(raw: &str) -> Result<T, Violation> {
    T::from_str(raw).map_err(|_| Violation::UnknownTag {
        kind: T::KIND,
        tag: raw.to_owned(),
    })
}

/// Account holder as printed on the account. Does not own the account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Owner {
    name: String,
    doc_id: Option<String>,
}

impl Owner {
    /// # Errors
    ///
    /// Returns [`Violation::EmptyOwnerName`] if `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, Violation> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Violation::EmptyOwnerName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            doc_id: None,
        })
    }

    #[must_use]
    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use assert2::let_assert;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("base", AccountType::Base)]
    #[case("bank", AccountType::Bank)]
    #[case("savings", AccountType::Savings)]
    #[case("premium", AccountType::Premium)]
    #[case("investment", AccountType::Investment)]
    fn parse_tag_maps_account_type_tags(#[case] raw: &str, #[case] expected: AccountType) {
        let_assert!(Ok(account_type) = parse_tag::<AccountType>(raw));
        assert_eq!(account_type, expected);
    }

    #[rstest]
    #[case("Savings")]
    #[case("checking")]
    #[case("")]
    fn parse_tag_rejects_unknown_or_miscased_account_types(#[case] raw: &str) {
        let_assert!(Err(Violation::UnknownTag { kind, tag }) = parse_tag::<AccountType>(raw));
        assert_eq!(kind, "account type");
        assert_eq!(tag, raw);
    }

    #[rstest]
    #[case("RUB", Currency::RUB)]
    #[case("USD", Currency::USD)]
    #[case("EUR", Currency::EUR)]
    #[case("KZT", Currency::KZT)]
    #[case("CNY", Currency::CNY)]
    fn parse_tag_maps_currency_codes(#[case] raw: &str, #[case] expected: Currency) {
        let_assert!(Ok(currency) = parse_tag::<Currency>(raw));
        assert_eq!(currency, expected);
        assert_eq!(currency.to_string(), raw);
    }

    #[test]
    fn parse_tag_rejects_unknown_currency() {
        let_assert!(Err(Violation::UnknownTag { kind: "currency", .. }) = parse_tag::<Currency>("GBP"));
    }

    #[test]
    fn statuses_display_as_lowercase_tags() {
        assert_eq!(AccountStatus::Frozen.to_string(), "frozen");
        assert_eq!(ClientStatus::Blocked.to_string(), "blocked");
        assert_eq!(AssetKind::Etf.to_string(), "etf");
    }

    #[test]
    fn owner_new_trims_name() {
        let_assert!(Ok(owner) = Owner::new("  Ilya  "));
        assert_eq!(owner.name(), "Ilya");
        assert_eq!(owner.doc_id(), None);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn owner_new_rejects_blank_names(#[case] name: &str) {
        let_assert!(Err(Violation::EmptyOwnerName) = Owner::new(name));
    }

    #[test]
    fn account_id_random_is_short_and_masks_to_last_four() {
        let id = AccountId::random();
        assert_eq!(id.as_str().len(), 8);
        assert_eq!(AccountId::from("abcdef12").last4(), "ef12");
        assert_eq!(AccountId::from("ab").last4(), "ab");
    }
}
