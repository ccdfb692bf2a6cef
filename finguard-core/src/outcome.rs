//! Per-message classification outcomes.
//!
//! Malformed provider text is an expected, frequent condition: every
//! failure mode is a value, never a panic or propagated error.

use serde::{Deserialize, Serialize};

use crate::record::TransactionRecord;

/// Why a message failed to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailure {
    /// Input was empty or whitespace-only; no template was evaluated.
    #[error("message is empty or whitespace-only")]
    EmptyInput,
    /// Every template either failed to match structurally or failed
    /// field normalization.
    #[error("no template matched the message")]
    NoTemplateMatched,
}

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseOutcome {
    Success(TransactionRecord),
    Failure {
        reason: ParseFailure,
        /// Position of the message in its batch, set only by the batch API.
        index: Option<usize>,
    },
}

impl ParseOutcome {
    /// A failure with no batch position attached.
    pub fn failure(reason: ParseFailure) -> Self {
        ParseOutcome::Failure {
            reason,
            index: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success(_))
    }

    /// The extracted record, if this outcome is a success.
    pub fn record(&self) -> Option<&TransactionRecord> {
        match self {
            ParseOutcome::Success(record) => Some(record),
            ParseOutcome::Failure { .. } => None,
        }
    }

    /// Stamp a failure with its position in the batch; successes pass
    /// through unchanged.
    pub fn with_index(self, index: usize) -> Self {
        match self {
            ParseOutcome::Failure { reason, .. } => ParseOutcome::Failure {
                reason,
                index: Some(index),
            },
            success => success,
        }
    }
}
