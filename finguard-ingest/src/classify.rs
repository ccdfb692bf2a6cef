//! Dispatcher and batch aggregator.

use anyhow::Result;
use tracing::{debug, trace};

use finguard_core::{BatchStatistics, ParseFailure, ParseOutcome};

use crate::template::{Template, TemplateOutcome};
use crate::templates;

/// Classifies provider messages against the built-in template registry.
///
/// Construction compiles every template once. After that the classifier
/// holds no mutable state, so a single instance can be shared across
/// threads and called concurrently without locking.
pub struct SmsClassifier {
    templates: Vec<Template>,
}

impl SmsClassifier {
    /// Build the classifier with the full template registry.
    pub fn new() -> Result<Self> {
        let templates = templates::priority_list()?;
        debug!(count = templates.len(), "template registry built");
        Ok(Self { templates })
    }

    /// Classify one message.
    ///
    /// Templates are tried strictly in priority order; the first one that
    /// both matches structurally and normalizes every required field wins.
    /// Never panics on malformed input — every failure mode is a
    /// [`ParseOutcome::Failure`] value.
    pub fn classify(&self, text: &str) -> ParseOutcome {
        if text.trim().is_empty() {
            return ParseOutcome::failure(ParseFailure::EmptyInput);
        }

        for template in &self.templates {
            match template.try_match(text) {
                TemplateOutcome::Extracted(record) => {
                    debug!(
                        template = template.name(),
                        kind = record.kind.label(),
                        "message classified"
                    );
                    return ParseOutcome::Success(record);
                }
                TemplateOutcome::NotMatched => {}
                TemplateOutcome::NormalizationFailed(err) => {
                    // A structural match with a bad field is not a winner;
                    // keep trying lower-priority templates.
                    trace!(template = template.name(), error = %err, "normalization failed");
                }
            }
        }

        debug!("no template matched");
        ParseOutcome::failure(ParseFailure::NoTemplateMatched)
    }

    /// Classify an ordered batch of messages.
    ///
    /// `outcomes[i]` always corresponds to `texts[i]`; a failed message
    /// fills its own slot (stamped with its index) and never aborts the
    /// rest of the batch. Statistics are recomputed from the outcomes.
    pub fn classify_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> (Vec<ParseOutcome>, BatchStatistics) {
        let outcomes: Vec<ParseOutcome> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| self.classify(text.as_ref()).with_index(index))
            .collect();
        let statistics = BatchStatistics::from_outcomes(&outcomes);
        (outcomes, statistics)
    }

    /// Number of registered templates.
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}
