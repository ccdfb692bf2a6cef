//! A template pairs one textual message shape with a typed field
//! extraction for one transaction kind.

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use finguard_core::{TransactionKind, TransactionRecord};

use crate::normalize::NormalizeError;

/// Extraction function: named captures plus the original text, mapped
/// through the normalizers into a record.
pub type ExtractFn = fn(&Captures<'_>, &str) -> Result<TransactionRecord, NormalizeError>;

/// Typed result of trying one template against one message.
///
/// The dispatcher collapses `NotMatched` and `NormalizationFailed` into
/// "try the next template"; the distinction exists for logging and tests.
#[derive(Debug)]
pub enum TemplateOutcome {
    /// Structural match and every required field normalized.
    Extracted(TransactionRecord),
    /// The matching rule did not match the text.
    NotMatched,
    /// Structural match, but a captured field failed normalization.
    NormalizationFailed(NormalizeError),
}

/// One message shape: a compiled matching rule plus its extraction.
pub struct Template {
    name: &'static str,
    kind: TransactionKind,
    pattern: Regex,
    extract: ExtractFn,
}

impl Template {
    /// Compile a template. Pattern errors surface at registry build time,
    /// never during classification.
    pub fn new(
        name: &'static str,
        kind: TransactionKind,
        pattern: &str,
        extract: ExtractFn,
    ) -> Result<Self> {
        let pattern =
            Regex::new(pattern).with_context(|| format!("compiling template '{name}'"))?;
        Ok(Self {
            name,
            kind,
            pattern,
            extract,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Try this template against one message.
    pub fn try_match(&self, text: &str) -> TemplateOutcome {
        let Some(caps) = self.pattern.captures(text) else {
            return TemplateOutcome::NotMatched;
        };
        match (self.extract)(&caps, text) {
            Ok(record) => TemplateOutcome::Extracted(record),
            Err(err) => TemplateOutcome::NormalizationFailed(err),
        }
    }
}
