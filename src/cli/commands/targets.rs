//! targets command - List the test targets suggestions are drawn from

use anyhow::{Context as _, Result};

use super::Session;
use crate::core::types::TargetLabel;
use crate::engine::Context;
use crate::query::TargetIndex;

/// List test targets, optionally only those containing `filter`.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `filter` - Substring a label must contain
/// * `json` - Print a JSON array instead of one label per line
pub fn targets(ctx: &Context, filter: Option<&str>, json: bool) -> Result<()> {
    let session = Session::open(ctx)?;
    let index = session.index();

    let universe = index
        .enumerate()
        .with_context(|| format!("Failed to list test targets from `{}`", index.universe()))?;
    let selected = select(universe.iter(), filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        for label in selected {
            println!("{}", label);
        }
    }
    Ok(())
}

/// Labels containing `filter`, in their original order.
fn select<'a>(
    labels: impl Iterator<Item = &'a TargetLabel>,
    filter: Option<&str>,
) -> Vec<&'a TargetLabel> {
    match filter.filter(|f| !f.is_empty()) {
        Some(needle) => labels.filter(|l| l.as_str().contains(needle)).collect(),
        None => labels.collect(),
    }
}
