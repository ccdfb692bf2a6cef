//! finguard-core: domain types for the FinGuard transaction engine.
//!
//! Value types shared between the SMS extraction engine and its callers:
//! transaction records, per-message outcomes, domain validation, and
//! batch statistics. All monetary values are exact decimals.

pub mod outcome;
pub mod record;
pub mod stats;
pub mod validate;

pub use outcome::{ParseFailure, ParseOutcome};
pub use record::{CURRENCY, TransactionKind, TransactionRecord};
pub use stats::BatchStatistics;
pub use validate::{Violation, validate};
