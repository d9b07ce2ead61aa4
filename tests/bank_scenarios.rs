use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use retail_bank::Bank;
use retail_bank::BankAccount;
use retail_bank::Client;
use retail_bank::account::AccountOptions;
use retail_bank::account::InvestmentOptions;
use retail_bank::account::SavingsOptions;
use retail_bank::bank::BankPolicy;
use retail_bank::bank::FixedClock;
use retail_bank::bank::OpenAccountRequest;
use retail_bank::bank::SequentialIdGenerator;
use retail_bank::report;
use retail_bank::types::AccountId;
use retail_bank::types::AccountType;
use retail_bank::types::ClientId;
use retail_bank::types::Currency;
use rust_decimal::Decimal;

type TestBank = Bank<FixedClock, SequentialIdGenerator>;

#[test]
fn accounts_report_lists_every_account_in_opening_order() {
    let bank = populated_bank();

    let mut output = Vec::new();
    report::write_accounts_csv(&mut output, bank.accounts()).unwrap();

    insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
    account_id,account_type,owner,client_id,status,currency,balance
    acc-0001,BankAccount,Ilya Yarets,C-001,active,USD,200.00
    acc-0002,SavingsAccount,Anna Petrova,C-002,active,EUR,50.50
    acc-0003,InvestmentAccount,Ilya Yarets,C-001,active,USD,0.00
    acc-0004,BankAccount,Anna Petrova,C-002,closed,USD,10.00
    ");
}

#[test]
fn ranking_report_skips_closed_accounts() {
    let bank = populated_bank();

    let ranking = bank.clients_ranking().unwrap();
    let mut output = Vec::new();
    report::write_ranking_csv(&mut output, &ranking).unwrap();

    insta::assert_snapshot!(String::from_utf8(output).unwrap(), @r"
    client_id,total
    C-001,200.00
    C-002,50.50
    ");
    assert_eq!(bank.total_balance().unwrap(), Decimal::from_str("250.50").unwrap());
}

#[test]
fn investment_growth_projection_uses_portfolio_and_balance() {
    let bank = populated_bank();

    let investment = bank
        .account(&AccountId::from("acc-0003"))
        .and_then(|account| account.as_investment())
        .unwrap();
    assert_eq!(investment.portfolio_value(), Decimal::from_str("100.00").unwrap());
    assert_eq!(
        investment.project_yearly_growth(2).unwrap(),
        Decimal::from_str("121.00").unwrap()
    );
}

#[test]
fn locked_out_client_cannot_open_accounts() {
    let mut bank = populated_bank();
    let client_id = ClientId::from("C-002");
    for password in ["a", "b", "c"] {
        assert!(!bank.authenticate_client(&client_id, password));
    }

    assert!(!bank.authenticate_client(&client_id, "pass"));
    assert!(
        bank.open_account(&client_id, OpenAccountRequest::default(), None)
            .is_err()
    );
    let reasons: Vec<String> = bank
        .security_log()
        .iter()
        .map(|event| event.reason.to_string())
        .collect();
    assert_eq!(
        reasons,
        [
            "failed login attempt",
            "failed login attempt",
            "account locked after failed logins",
        ]
    );
}

/// Two clients, four accounts, the last one closed.
fn populated_bank() -> TestBank {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let mut bank = Bank::with_collaborators(
        BankPolicy::default(),
        FixedClock(noon()),
        SequentialIdGenerator::new("acc"),
    );
    let ilya = ClientId::from("C-001");
    let anna = ClientId::from("C-002");
    bank.add_client(Client::new("Ilya Yarets", ilya.clone(), 34).unwrap(), "secret")
        .unwrap();
    bank.add_client(Client::new("Anna Petrova", anna.clone(), 27).unwrap(), "pass")
        .unwrap();

    bank.open_account(
        &ilya,
        OpenAccountRequest::default().with_balance(dec("200")),
        None,
    )
    .unwrap();

    let savings = OpenAccountRequest::new(AccountType::Savings)
        .with_currency(Currency::EUR)
        .with_balance(dec("50"))
        .with_options(AccountOptions::Savings(SavingsOptions {
            min_balance: Decimal::ZERO,
            monthly_interest_rate: dec("0.01"),
        }));
    let savings_id = bank.open_account(&anna, savings, None).unwrap().id().clone();
    bank.account_mut(&savings_id)
        .and_then(|account| account.as_savings_mut())
        .unwrap()
        .apply_monthly_interest()
        .unwrap();

    let investment = OpenAccountRequest::new(AccountType::Investment).with_options(AccountOptions::Investment(
        InvestmentOptions {
            portfolios: Some(BTreeMap::from([("stocks".to_owned(), dec("100"))])),
            expected_yearly_growth: dec("0.1"),
        },
    ));
    bank.open_account(&ilya, investment, None).unwrap();

    let closed = bank
        .open_account(&anna, OpenAccountRequest::default().with_balance(dec("10")), None)
        .unwrap()
        .id()
        .clone();
    bank.close_account(&closed, None).unwrap();

    bank
}

fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap()
}

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}
