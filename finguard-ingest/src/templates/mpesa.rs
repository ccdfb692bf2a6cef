//! M-PESA message templates.
//!
//! Expected shapes (field order is fixed per shape, spacing and trailing
//! punctuation drift between provider versions):
//!   RB90VRG Confirmed. You have received Ksh5,991.87 from STEPHEN WAMBUI
//!     254712531512 on 26/08/2025 at 04:23 PM. New M-PESA balance is
//!     Ksh-30,000.70. Transaction cost, Ksh0.00.
//!   QC34XYZ Confirmed. Ksh2,500.00 sent to JANE SMITH 254723456789 on ...
//!   RF45ABC Confirmed. You have paid Ksh1,200.00 to SUPERMARKET LTD for
//!     account 123456 on ...
//!   TG18PQR Confirmed. Ksh760.50 paid to NAIVAS SUPERMARKET Till Number
//!     832901 on ...
//!   HJ77MNO Confirmed. You have withdrawn Ksh2,000.00 from M-PESA Agent
//!     JOHN KAMAU 254712345678 on ...
//!   KL09STU Confirmed. You bought Ksh500.00 airtime for 254712345678 on ...

use anyhow::Result;
use regex::Captures;
use rust_decimal::Decimal;

use finguard_core::{CURRENCY, TransactionKind, TransactionRecord};

use crate::normalize::{self, NormalizeError};
use crate::template::Template;

/// The M-PESA template family, in priority order.
pub fn templates() -> Result<Vec<Template>> {
    Ok(vec![
        Template::new(
            "mpesa_received",
            TransactionKind::MoneyReceived,
            concat!(
                r"^\s*(?P<ref>[A-Z0-9]+)\s+Confirmed\.?\s+",
                r"You have received\s+Ksh(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"from\s+(?P<name>.+?)\s+(?P<phone>[0-9]{9,15})\s+",
                r"on\s+(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s+",
                r"at\s+(?P<time>[0-9]{1,2}:[0-9]{2}\s*[AP]M)\.?\s*",
                r"New (?:M-PESA )?balance is\s+Ksh(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?",
                r"(?:\s*Transaction cost,?\s*Ksh(?P<cost>[0-9][0-9,]*(?:\.[0-9]+)?)\.?)?\s*$",
            ),
            extract_received,
        )?,
        Template::new(
            "mpesa_sent",
            TransactionKind::MoneySent,
            concat!(
                r"^\s*(?P<ref>[A-Z0-9]+)\s+Confirmed\.?\s+",
                r"Ksh(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"sent to\s+(?P<name>.+?)\s+(?P<phone>[0-9]{9,15})\s+",
                r"on\s+(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s+",
                r"at\s+(?P<time>[0-9]{1,2}:[0-9]{2}\s*[AP]M)\.?\s*",
                r"New (?:M-PESA )?balance is\s+Ksh(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?",
                r"(?:\s*Transaction cost,?\s*Ksh(?P<cost>[0-9][0-9,]*(?:\.[0-9]+)?)\.?)?\s*$",
            ),
            extract_sent,
        )?,
        Template::new(
            "mpesa_paybill",
            TransactionKind::BillPayment,
            concat!(
                r"^\s*(?P<ref>[A-Z0-9]+)\s+Confirmed\.?\s+",
                r"You have paid\s+Ksh(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"to\s+(?P<name>.+?)\s+for account\s+(?P<account>\S+)\s+",
                r"on\s+(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s+",
                r"at\s+(?P<time>[0-9]{1,2}:[0-9]{2}\s*[AP]M)\.?\s*",
                r"New (?:M-PESA )?balance is\s+Ksh(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?",
                r"(?:\s*Transaction cost,?\s*Ksh(?P<cost>[0-9][0-9,]*(?:\.[0-9]+)?)\.?)?\s*$",
            ),
            extract_paybill,
        )?,
        Template::new(
            "mpesa_till",
            TransactionKind::TillPayment,
            concat!(
                r"^\s*(?P<ref>[A-Z0-9]+)\s+Confirmed\.?\s+",
                r"Ksh(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"paid to\s+(?P<name>.+?)\s+Till Number\s+(?P<till>\S+)\s+",
                r"on\s+(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s+",
                r"at\s+(?P<time>[0-9]{1,2}:[0-9]{2}\s*[AP]M)\.?\s*",
                r"New (?:M-PESA )?balance is\s+Ksh(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?",
                r"(?:\s*Transaction cost,?\s*Ksh(?P<cost>[0-9][0-9,]*(?:\.[0-9]+)?)\.?)?\s*$",
            ),
            extract_till,
        )?,
        Template::new(
            "mpesa_withdrawal",
            TransactionKind::AgentWithdrawal,
            concat!(
                r"^\s*(?P<ref>[A-Z0-9]+)\s+Confirmed\.?\s+",
                r"You have withdrawn\s+Ksh(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"from\s+M-PESA Agent\s+(?P<name>.+?)\s+(?P<phone>[0-9]{9,15})\s+",
                r"on\s+(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s+",
                r"at\s+(?P<time>[0-9]{1,2}:[0-9]{2}\s*[AP]M)\.?\s*",
                r"New (?:M-PESA )?balance is\s+Ksh(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?",
                r"(?:\s*Transaction cost,?\s*Ksh(?P<cost>[0-9][0-9,]*(?:\.[0-9]+)?)\.?)?\s*$",
            ),
            extract_withdrawal,
        )?,
        Template::new(
            "mpesa_airtime",
            TransactionKind::AirtimePurchase,
            concat!(
                r"^\s*(?P<ref>[A-Z0-9]+)\s+Confirmed\.?\s+",
                r"You bought\s+Ksh(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)\s+",
                r"(?:of\s+)?airtime for\s+(?P<phone>[0-9]{9,15})\s+",
                r"on\s+(?P<date>[0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s+",
                r"at\s+(?P<time>[0-9]{1,2}:[0-9]{2}\s*[AP]M)\.?\s*",
                r"New (?:M-PESA )?balance is\s+Ksh(?P<balance>-?[0-9][0-9,]*(?:\.[0-9]+)?)\.?",
                r"(?:\s*Transaction cost,?\s*Ksh(?P<cost>[0-9][0-9,]*(?:\.[0-9]+)?)\.?)?\s*$",
            ),
            extract_airtime,
        )?,
    ])
}

/// The optional fee clause; zero when the message carries none.
fn cost_or_zero(caps: &Captures<'_>) -> Result<Decimal, NormalizeError> {
    match caps.name("cost") {
        Some(m) => normalize::amount(m.as_str()),
        None => Ok(Decimal::ZERO),
    }
}

fn extract_received(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::MoneyReceived,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["name"].trim().to_string()),
        counterparty_phone: normalize::phone(&caps["phone"]).ok(),
        account_reference: None,
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: cost_or_zero(caps)?,
        occurred_at: normalize::mpesa_datetime(&caps["date"], &caps["time"])?,
        raw_text: raw.to_string(),
    })
}

fn extract_sent(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::MoneySent,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["name"].trim().to_string()),
        counterparty_phone: normalize::phone(&caps["phone"]).ok(),
        account_reference: None,
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: cost_or_zero(caps)?,
        occurred_at: normalize::mpesa_datetime(&caps["date"], &caps["time"])?,
        raw_text: raw.to_string(),
    })
}

fn extract_paybill(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::BillPayment,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["name"].trim().to_string()),
        counterparty_phone: None,
        account_reference: Some(caps["account"].to_string()),
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: cost_or_zero(caps)?,
        occurred_at: normalize::mpesa_datetime(&caps["date"], &caps["time"])?,
        raw_text: raw.to_string(),
    })
}

fn extract_till(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::TillPayment,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["name"].trim().to_string()),
        counterparty_phone: None,
        account_reference: Some(caps["till"].to_string()),
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: cost_or_zero(caps)?,
        occurred_at: normalize::mpesa_datetime(&caps["date"], &caps["time"])?,
        raw_text: raw.to_string(),
    })
}

fn extract_withdrawal(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::AgentWithdrawal,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: Some(caps["name"].trim().to_string()),
        counterparty_phone: normalize::phone(&caps["phone"]).ok(),
        account_reference: None,
        balance_after: normalize::amount(&caps["balance"])?,
        // Withdrawals carry a real fee figure; it is extracted like any
        // other fee clause, not assumed zero.
        transaction_cost: cost_or_zero(caps)?,
        occurred_at: normalize::mpesa_datetime(&caps["date"], &caps["time"])?,
        raw_text: raw.to_string(),
    })
}

fn extract_airtime(caps: &Captures<'_>, raw: &str) -> Result<TransactionRecord, NormalizeError> {
    Ok(TransactionRecord {
        kind: TransactionKind::AirtimePurchase,
        reference: caps["ref"].to_string(),
        amount: normalize::amount(&caps["amount"])?,
        currency: CURRENCY.to_string(),
        counterparty: None,
        counterparty_phone: normalize::phone(&caps["phone"]).ok(),
        account_reference: None,
        balance_after: normalize::amount(&caps["balance"])?,
        transaction_cost: cost_or_zero(caps)?,
        occurred_at: normalize::mpesa_datetime(&caps["date"], &caps["time"])?,
        raw_text: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateOutcome;
    use rust_decimal_macros::dec;

    fn extract(text: &str) -> TransactionRecord {
        for template in templates().unwrap() {
            if let TemplateOutcome::Extracted(record) = template.try_match(text) {
                return record;
            }
        }
        panic!("no mpesa template matched: {text}");
    }

    #[test]
    fn test_received() {
        let record = extract(
            "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 254712345678 \
             on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00. \
             Transaction cost, Ksh0.00.",
        );
        assert_eq!(record.kind, TransactionKind::MoneyReceived);
        assert_eq!(record.reference, "RB12KLM");
        assert_eq!(record.amount, dec!(5000.00));
        assert_eq!(record.counterparty.as_deref(), Some("JOHN DOE"));
        assert_eq!(record.counterparty_phone.as_deref(), Some("254712345678"));
        assert_eq!(record.balance_after, dec!(15000.00));
        assert_eq!(record.transaction_cost, dec!(0.00));
        assert_eq!(record.occurred_at.to_string(), "2025-11-18 10:30:00");
    }

    #[test]
    fn test_received_without_cost_clause_defaults_to_zero() {
        let record = extract(
            "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 254712345678 \
             on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00",
        );
        assert_eq!(record.transaction_cost, dec!(0.00));
    }

    #[test]
    fn test_sent_extracts_fee() {
        let record = extract(
            "QC34XYZ Confirmed. Ksh2,500.00 sent to JANE SMITH 254723456789 on 18/11/2025 \
             at 02:15 PM. New M-PESA balance is Ksh12,475.00. Transaction cost, Ksh25.00.",
        );
        assert_eq!(record.kind, TransactionKind::MoneySent);
        assert_eq!(record.transaction_cost, dec!(25.00));
        assert_eq!(record.occurred_at.to_string(), "2025-11-18 14:15:00");
    }

    #[test]
    fn test_paybill_captures_account() {
        let record = extract(
            "RF45ABC Confirmed. You have paid Ksh1,200.00 to KENYA POWER for account 884422 \
             on 18/11/2025 at 09:05 AM. New balance is Ksh11,300.00. Transaction cost, Ksh0.00.",
        );
        assert_eq!(record.kind, TransactionKind::BillPayment);
        assert_eq!(record.counterparty.as_deref(), Some("KENYA POWER"));
        assert_eq!(record.account_reference.as_deref(), Some("884422"));
        assert_eq!(record.counterparty_phone, None);
    }

    #[test]
    fn test_till_captures_till_number() {
        let record = extract(
            "TG18PQR Confirmed. Ksh760.50 paid to NAIVAS SUPERMARKET Till Number 832901 \
             on 02/12/2025 at 06:44 PM. New balance is Ksh3,239.50. Transaction cost, Ksh0.00.",
        );
        assert_eq!(record.kind, TransactionKind::TillPayment);
        assert_eq!(record.counterparty.as_deref(), Some("NAIVAS SUPERMARKET"));
        assert_eq!(record.account_reference.as_deref(), Some("832901"));
        assert_eq!(record.amount, dec!(760.50));
    }

    #[test]
    fn test_withdrawal_keeps_real_fee() {
        let record = extract(
            "HJ77MNO Confirmed. You have withdrawn Ksh2,000.00 from M-PESA Agent JOHN KAMAU \
             254712345678 on 20/11/2025 at 11:00 AM. New balance is Ksh7,976.00. \
             Transaction cost, Ksh24.00.",
        );
        assert_eq!(record.kind, TransactionKind::AgentWithdrawal);
        assert_eq!(record.counterparty.as_deref(), Some("JOHN KAMAU"));
        assert_eq!(record.transaction_cost, dec!(24.00));
    }

    #[test]
    fn test_airtime_has_no_counterparty() {
        let record = extract(
            "KL09STU Confirmed. You bought Ksh500.00 airtime for 254712345678 on 21/11/2025 \
             at 08:12 AM. New balance is Ksh4,500.00. Transaction cost, Ksh0.00.",
        );
        assert_eq!(record.kind, TransactionKind::AirtimePurchase);
        assert_eq!(record.counterparty, None);
        assert_eq!(record.counterparty_phone.as_deref(), Some("254712345678"));
    }

    #[test]
    fn test_invalid_phone_leaves_field_absent() {
        // 11 digits: still a structural match, but the phone field does
        // not normalize and stays absent rather than failing the record.
        let record = extract(
            "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 25471234567 \
             on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00. \
             Transaction cost, Ksh0.00.",
        );
        assert_eq!(record.counterparty_phone, None);
        assert_eq!(record.amount, dec!(5000.00));
    }
}
