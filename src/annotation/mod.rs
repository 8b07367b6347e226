//! Triage notes for transactions routed together.
//!
//! A note is composed from configured prefix/suffix text, an optional group
//! marker shared by the whole batch, and an optional page title taken from
//! the response body.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::extract_title;
use crate::types::{HighlightColor, Transaction};

pub mod counter;

pub use counter::GroupCounter;

/// Annotation settings, edited and persisted by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Prepend this string to triage notes.
    pub prepend: String,
    /// Append this string to triage notes.
    pub append: String,
    /// Use the page title as part of the triage notes.
    pub use_title: bool,
    /// When transactions are submitted together, tag them with a shared group number.
    pub tag_groups: bool,
    /// Highlight colour applied to every transaction in the batch.
    pub highlight_color: HighlightColor,
}

/// Note text and highlight for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Free-text note.
    pub notes: String,
    /// Highlight colour.
    pub highlight: HighlightColor,
}

/// Builds annotations for a batch, advancing the shared [`GroupCounter`].
#[derive(Debug, Clone)]
pub struct AnnotationBuilder {
    counter: Arc<GroupCounter>,
}

impl AnnotationBuilder {
    /// Builder bound to the process-wide counter.
    pub fn new(counter: Arc<GroupCounter>) -> Self {
        Self { counter }
    }

    /// One annotation per transaction, in batch order.
    ///
    /// With `tag_groups` on and more than one transaction, the counter is
    /// advanced exactly once before any note is built and its new value is
    /// written into every note.
    pub fn build(&self, batch: &[Transaction], config: &AnnotationConfig) -> Vec<Annotation> {
        let group = (config.tag_groups && batch.len() > 1).then(|| self.counter.advance());
        if let Some(group) = group {
            debug!(group, size = batch.len(), "tagging batch");
        }

        batch
            .iter()
            .map(|tx| Annotation {
                notes: compose_notes(tx, config, group),
                highlight: config.highlight_color,
            })
            .collect()
    }
}

fn compose_notes(tx: &Transaction, config: &AnnotationConfig, group: Option<u64>) -> String {
    let mut notes = String::new();
    notes.push_str(&config.prepend);
    notes.push(' ');

    if let Some(group) = group {
        notes.push_str(&format!(" {group} "));
    }

    if config.use_title {
        if let Some(title) = tx.response_body().and_then(extract_title) {
            notes.push(' ');
            notes.push_str(title);
            notes.push(' ');
        }
    }

    notes.push(' ');
    notes.push_str(&config.append);
    notes
}
