//! Transaction record types produced by the SMS extraction engine.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency tag carried by every extracted record.
pub const CURRENCY: &str = "KES";

/// Closed set of transaction kinds the engine can classify.
///
/// Wire names match the labels the legacy engine emitted, so downstream
/// consumers keep working across the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "received")]
    MoneyReceived,
    #[serde(rename = "sent")]
    MoneySent,
    #[serde(rename = "paybill")]
    BillPayment,
    #[serde(rename = "till")]
    TillPayment,
    #[serde(rename = "withdrawal")]
    AgentWithdrawal,
    #[serde(rename = "airtime")]
    AirtimePurchase,
    #[serde(rename = "bank_deposit")]
    BankDeposit,
    #[serde(rename = "bank_withdrawal")]
    BankWithdrawal,
    #[serde(rename = "bank_transfer")]
    BankTransfer,
}

impl TransactionKind {
    /// Wire/display label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::MoneyReceived => "received",
            TransactionKind::MoneySent => "sent",
            TransactionKind::BillPayment => "paybill",
            TransactionKind::TillPayment => "till",
            TransactionKind::AgentWithdrawal => "withdrawal",
            TransactionKind::AirtimePurchase => "airtime",
            TransactionKind::BankDeposit => "bank_deposit",
            TransactionKind::BankWithdrawal => "bank_withdrawal",
            TransactionKind::BankTransfer => "bank_transfer",
        }
    }

    /// Returns true for kinds that credit the account.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionKind::MoneyReceived | TransactionKind::BankDeposit
        )
    }
}

/// One structured transaction extracted from a single provider message.
///
/// Created only as the successful output of one parse and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Classification assigned by the winning template
    pub kind: TransactionKind,
    /// Provider-issued transaction identifier (alphanumeric for mobile
    /// money, numeric for bank)
    pub reference: String,
    /// Transaction amount, exact to 2 fractional digits
    pub amount: Decimal,
    /// Always [`CURRENCY`]
    pub currency: String,
    /// Other party: sender/recipient/merchant/agent/bank. Absent only for
    /// templates that carry no party at all (e.g. airtime)
    pub counterparty: Option<String>,
    /// Counterparty phone in 254-prefixed digit form, when present and valid
    pub counterparty_phone: Option<String>,
    /// Merchant account, till number, or masked bank account
    pub account_reference: Option<String>,
    /// Balance after the transaction; negative means overdrawn
    pub balance_after: Decimal,
    /// Provider fee; zero when the message has no fee clause
    pub transaction_cost: Decimal,
    /// When the transaction happened (bank messages default to midnight)
    pub occurred_at: NaiveDateTime,
    /// Original message text, retained for audit
    pub raw_text: String,
}

impl TransactionRecord {
    /// Returns true if this transaction credited the account.
    pub fn is_credit(&self) -> bool {
        self.kind.is_credit()
    }

    /// One-line human-readable description of the transaction.
    pub fn summary(&self) -> String {
        let counterparty = self.counterparty.as_deref().unwrap_or("unknown");
        match self.kind {
            TransactionKind::MoneyReceived => {
                format!("Received Ksh{} from {}", self.amount, counterparty)
            }
            TransactionKind::MoneySent => {
                format!("Sent Ksh{} to {}", self.amount, counterparty)
            }
            TransactionKind::BillPayment => match &self.account_reference {
                Some(account) => format!(
                    "Paid Ksh{} to {} for account {}",
                    self.amount, counterparty, account
                ),
                None => format!("Paid Ksh{} to {}", self.amount, counterparty),
            },
            TransactionKind::TillPayment => {
                format!("Paid Ksh{} to {}", self.amount, counterparty)
            }
            TransactionKind::AgentWithdrawal => {
                format!("Withdrew Ksh{} from agent {}", self.amount, counterparty)
            }
            TransactionKind::AirtimePurchase => match &self.counterparty_phone {
                Some(phone) => format!("Bought Ksh{} airtime for {}", self.amount, phone),
                None => format!("Bought Ksh{} airtime", self.amount),
            },
            TransactionKind::BankDeposit => {
                format!("Bank deposit of KES {} ({})", self.amount, counterparty)
            }
            TransactionKind::BankWithdrawal => {
                format!("Bank withdrawal of KES {} ({})", self.amount, counterparty)
            }
            TransactionKind::BankTransfer => {
                format!("Bank transfer of KES {} to {}", self.amount, counterparty)
            }
        }
    }
}
