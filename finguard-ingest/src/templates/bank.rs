//! Bank notification templates.
//!
//! Expected shapes:
//!   Co-operative Bank: Transfer of KES 2,730.21 to SAMUEL MWANGI
//!     successful. Acc XXXX5678 Balance: KES -13,325.38. Ref: 0354499106
//!     on 01-Sep-2025
//!   KCB: Acc XXXX5678 credited with KES 12,000.00 on 14-Oct-2025.
//!     Balance: KES 45,210.00. Ref: 8831240077
//!   Equity Bank: Acc XXXX5678 debited KES 3,500.00 on 14-Oct-2025.
//!     Balance: KES 41,710.00. Ref: 8831240078
//!   NCBA: Withdrawal of KES 5,000.00 from Acc XXXX5678 on 14-Oct-2025.
//!     Balance: KES 36,710.00. Ref: 8831240079
//!
//! The named-recipient transfer is the most specific shape and is tried
//! first; the last two shapes are alias templates for the same
//! bank-withdrawal kind.

use anyhow::Result;
use regex::Captures;
use rust_decimal::Decimal;

use finguard_core::{CURRENCY, TransactionKind, TransactionRecord};

use crate::normalize::{self, NormalizeError};
use crate::template::Template;

/// The bank template family, in priority order.
pub fn templates() -> Result<Vec<Template>> {
    Ok(vec![
        Template::new(
            "bank_transfer",
            TransactionKind::BankTransfer,
            concat!(
                r"^\s*(?P<bank>[^:]+?):\s*",
                r"Transfer of\s+KES\s+(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"to\s+(?P<name>.+?)\s+successful\.?\s+",
                r"Acc\s+(?P<account>\S+)\s+Balance:\s*KES\s+(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?\s*",
                r"Ref:\s*(?P<ref>[0-9]+)\s+on\s+(?P<date>[0-9]{1,2}-[A-Za-z]{3}-[0-9]{4})\.?\s*$",
            ),
            extract_transfer,
        )?,
        Template::new(
            "bank_deposit",
            TransactionKind::BankDeposit,
            concat!(
                r"^\s*(?P<bank>[^:]+?):\s*",
                r"Acc\s+(?P<account>\S+)\s+credited with\s+KES\s+(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"on\s+(?P<date>[0-9]{1,2}-[A-Za-z]{3}-[0-9]{4})\.?\s*",
                r"Balance:\s*KES\s+(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?\s*",
                r"Ref:\s*(?P<ref>[0-9]+)\.?\s*$",
            ),
            extract_deposit,
        )?,
        Template::new(
            "bank_withdrawal",
            TransactionKind::BankWithdrawal,
            concat!(
                r"^\s*(?P<bank>[^:]+?):\s*",
                r"Acc\s+(?P<account>\S+)\s+debited\s+(?:with\s+)?KES\s+(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"on\s+(?P<date>[0-9]{1,2}-[A-Za-z]{3}-[0-9]{4})\.?\s*",
                r"Balance:\s*KES\s+(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?\s*",
                r"Ref:\s*(?P<ref>[0-9]+)\.?\s*$",
            ),
            extract_withdrawal,
        )?,
        // Alias: ATM-style wording, same kind as the debit shape above.
        Template::new(
            "bank_withdrawal_atm",
            TransactionKind::BankWithdrawal,
            concat!(
                r"^\s*(?P<bank>[^:]+?):\s*",
                r"Withdrawal of\s+KES\s+(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"from\s+Acc\s+(?P<account>\S+)\s+",
                r"on\s+(?P<date>[0-9]{1,2}-[A-Za-z]{3}-[0-9]{4})\.?\s*",
                r"Balance:\s*KES\s+(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?\s*",
                r"Ref:\s*(?P<ref>[0-9]+)\.?\s*$",
            ),
            extract_withdrawal,
        )?,
    ])
}

fn extract_transfer(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::BankTransfer,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["name"].trim().to_string()),
        counterparty_phone: None,
        account_reference: Some(caps["account"].to_string()),
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: Decimal::ZERO,
        occurred_at: normalize::bank_date(&caps["date"])?,
        raw_text: raw.to_string(),
    })
}

fn extract_deposit(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::BankDeposit,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["bank"].trim().to_string()),
        counterparty_phone: None,
        account_reference: Some(caps["account"].to_string()),
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: Decimal::ZERO,
        occurred_at: normalize::bank_date(&caps["date"])?,
        raw_text: raw.to_string(),
    })
}

fn extract_withdrawal(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::BankWithdrawal,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["bank"].trim().to_string()),
        counterparty_phone: None,
        account_reference: Some(caps["account"].to_string()),
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: Decimal::ZERO,
        occurred_at: normalize::bank_date(&caps["date"])?,
        raw_text: raw.to_string(),
    })
}
