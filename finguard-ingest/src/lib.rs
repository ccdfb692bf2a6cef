//! finguard-ingest: the SMS extraction engine.
//!
//! Turns unstructured mobile-money and bank notification messages into
//! typed [`finguard_core::TransactionRecord`]s: field normalizers, the
//! grammar template registry, the dispatcher/classifier, and the batch
//! aggregator.

pub mod classify;
pub mod normalize;
pub mod template;
pub mod templates;

pub use classify::SmsClassifier;
pub use normalize::NormalizeError;
pub use template::{Template, TemplateOutcome};
