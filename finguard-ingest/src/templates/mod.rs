//! The grammar template registry: every message shape the engine
//! accepts, assembled once into a fixed priority list.

pub mod bank;
pub mod mpesa;

use anyhow::Result;

use crate::template::Template;

/// Build the full template list in match-priority order.
///
/// More syntactically specific shapes come before generic ones that could
/// partially match the same text: within the bank family the
/// named-recipient transfer precedes the plain credited/debited shapes.
pub fn priority_list() -> Result<Vec<Template>> {
    let mut templates = mpesa::templates()?;
    templates.extend(bank::templates()?);
    Ok(templates)
}
