//! Domain-invariant checks on already-extracted records.
//!
//! The parser guarantees syntactic well-formedness but deliberately does
//! not enforce business invariants, so callers can apply stricter policy
//! without re-parsing.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::record::TransactionRecord;

/// A domain invariant broken by an otherwise well-formed record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("transaction time {occurred_at} is after the reference time {now}")]
    FutureTimestamp {
        occurred_at: NaiveDateTime,
        now: NaiveDateTime,
    },
    #[error("reference code is empty")]
    EmptyReference,
}

/// Check a record against the domain invariants. An empty list means valid.
///
/// `now` is injected rather than read from the system clock, so the check
/// is deterministic under test. The known-kind invariant holds by
/// construction: `TransactionKind` is a closed enum.
pub fn validate(record: &TransactionRecord, now: NaiveDateTime) -> Vec<Violation> {
    let mut violations = Vec::new();

    if record.amount <= Decimal::ZERO {
        violations.push(Violation::NonPositiveAmount(record.amount));
    }
    if record.occurred_at > now {
        violations.push(Violation::FutureTimestamp {
            occurred_at: record.occurred_at,
            now,
        });
    }
    if record.reference.trim().is_empty() {
        violations.push(Violation::EmptyReference);
    }

    violations
}
