//! Batch summary statistics derived from classification outcomes.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::outcome::ParseOutcome;
use crate::record::TransactionKind;

/// Aggregate view of one classified batch.
///
/// Recomputed from the outcome list on demand, never persisted. All sums
/// are exact decimal arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStatistics {
    pub total_messages: usize,
    pub successful_count: usize,
    pub failed_count: usize,
    /// Exact sum of `amount` over successful outcomes only.
    pub total_amount: Decimal,
    /// Per-kind success counts; only kinds that actually occurred appear.
    pub counts_by_kind: HashMap<TransactionKind, usize>,
    /// Date range over successes; `None` when there are zero successes.
    pub earliest_occurred_at: Option<NaiveDateTime>,
    pub latest_occurred_at: Option<NaiveDateTime>,
}

impl BatchStatistics {
    /// Fold a batch's outcomes into summary statistics.
    ///
    /// Degenerate-safe: an empty or all-failure batch yields zero counts
    /// and no date range, never an error.
    pub fn from_outcomes(outcomes: &[ParseOutcome]) -> Self {
        let mut stats = BatchStatistics {
            total_messages: outcomes.len(),
            successful_count: 0,
            failed_count: 0,
            total_amount: Decimal::ZERO,
            counts_by_kind: HashMap::new(),
            earliest_occurred_at: None,
            latest_occurred_at: None,
        };

        for outcome in outcomes {
            let Some(record) = outcome.record() else {
                stats.failed_count += 1;
                continue;
            };

            stats.successful_count += 1;
            stats.total_amount += record.amount;
            *stats.counts_by_kind.entry(record.kind).or_insert(0) += 1;

            stats.earliest_occurred_at = Some(match stats.earliest_occurred_at {
                Some(earliest) => earliest.min(record.occurred_at),
                None => record.occurred_at,
            });
            stats.latest_occurred_at = Some(match stats.latest_occurred_at {
                Some(latest) => latest.max(record.occurred_at),
                None => record.occurred_at,
            });
        }

        stats
    }
}
