//! Resolution of the host's selection context into the batch an action runs on.

use serde::Deserialize;

use crate::types::Transaction;

/// What the user has selected when opening the action menu.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SelectionContext {
    /// Multi-select list, in host order. May be empty.
    pub selected: Vec<Transaction>,
    /// Transaction shown in the active message editor, if any.
    pub editor: Option<Transaction>,
}

impl SelectionContext {
    /// Context from a multi-select list only.
    pub fn from_selected(selected: Vec<Transaction>) -> Self {
        Self {
            selected,
            editor: None,
        }
    }

    /// Context from the active editor only.
    pub fn from_editor(editor: Transaction) -> Self {
        Self {
            selected: Vec::new(),
            editor: Some(editor),
        }
    }
}

/// Resolved, read-only batch for the next action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSelection(Vec<Transaction>);

impl ActiveSelection {
    /// Number of transactions in the batch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Transactions in selection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.0.iter()
    }

    /// Transactions as a slice.
    pub fn as_slice(&self) -> &[Transaction] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ActiveSelection {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pick the batch: the multi-select list if non-empty, else the editor item,
/// else nothing.
pub fn resolve(context: SelectionContext) -> ActiveSelection {
    if !context.selected.is_empty() {
        return ActiveSelection(context.selected);
    }
    match context.editor {
        Some(tx) => ActiveSelection(vec![tx]),
        None => ActiveSelection::default(),
    }
}
