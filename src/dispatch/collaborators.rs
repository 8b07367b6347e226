//! Host-side collaborators the dispatcher delivers to.
//!
//! The host implements these against its own tool, triage and scope stores.
//! In-memory implementations back the CLI and the tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::annotation::{Annotation, AnnotationConfig};
use crate::engine::Label;
use crate::types::{Request, Transaction};

/// Failure reported by a collaborator for a single delivery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The collaborator refused the item.
    #[error("rejected: {0}")]
    Rejected(String),
    /// The collaborator could not be reached or is in a bad state.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// Opens a named workspace for a request (repeater-style tool).
pub trait ToolSink: Send + Sync {
    /// Open `request` in a new workspace called `name`.
    fn open(&self, request: &Request, name: &Label) -> Result<(), SinkError>;
}

/// Stores an annotated transaction for later analysis.
pub trait TriageSink: Send + Sync {
    /// Store `transaction` with its annotation.
    fn store(&self, transaction: &Transaction, annotation: &Annotation) -> Result<(), SinkError>;
}

/// Target scope allow/deny registry. Registration is idempotent.
pub trait ScopeRegistry: Send + Sync {
    /// Add `origin` to the target scope.
    fn include(&self, origin: &str) -> Result<(), SinkError>;
    /// Exclude `origin` from the target scope.
    fn exclude(&self, origin: &str) -> Result<(), SinkError>;
}

/// Read-only access to the current annotation settings.
pub trait ConfigProvider: Send + Sync {
    /// Snapshot of the settings for one action.
    fn annotation_config(&self) -> AnnotationConfig;
}

impl ConfigProvider for AnnotationConfig {
    fn annotation_config(&self) -> AnnotationConfig {
        self.clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A workspace opened through [`InMemoryToolSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenedTab {
    /// Workspace name.
    pub name: Label,
    /// Request loaded into it.
    pub request: Request,
}

/// Records opened workspaces in order.
#[derive(Debug, Default)]
pub struct InMemoryToolSink {
    opened: Mutex<Vec<OpenedTab>>,
}

impl InMemoryToolSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspaces opened so far.
    pub fn opened(&self) -> Vec<OpenedTab> {
        lock(&self.opened).clone()
    }
}

impl ToolSink for InMemoryToolSink {
    fn open(&self, request: &Request, name: &Label) -> Result<(), SinkError> {
        lock(&self.opened).push(OpenedTab {
            name: name.clone(),
            request: request.clone(),
        });
        Ok(())
    }
}

/// A transaction stored through [`InMemoryTriage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageEntry {
    /// Stored transaction.
    pub transaction: Transaction,
    /// Its annotation.
    pub annotation: Annotation,
}

/// Records triaged transactions in order.
#[derive(Debug, Default)]
pub struct InMemoryTriage {
    entries: Mutex<Vec<TriageEntry>>,
}

impl InMemoryTriage {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries stored so far.
    pub fn entries(&self) -> Vec<TriageEntry> {
        lock(&self.entries).clone()
    }
}

impl TriageSink for InMemoryTriage {
    fn store(&self, transaction: &Transaction, annotation: &Annotation) -> Result<(), SinkError> {
        lock(&self.entries).push(TriageEntry {
            transaction: transaction.clone(),
            annotation: annotation.clone(),
        });
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ScopeState {
    included: Vec<String>,
    excluded: Vec<String>,
}

/// Insertion-ordered include/exclude lists with duplicate suppression.
#[derive(Debug, Default)]
pub struct InMemoryScope {
    state: Mutex<ScopeState>,
}

impl InMemoryScope {
    /// Empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Included origins in registration order.
    pub fn included(&self) -> Vec<String> {
        lock(&self.state).included.clone()
    }

    /// Excluded origins in registration order.
    pub fn excluded(&self) -> Vec<String> {
        lock(&self.state).excluded.clone()
    }

    /// Whether `url` falls under an included origin and no excluded one.
    pub fn is_in_scope(&self, url: &str) -> bool {
        let state = lock(&self.state);
        state.included.iter().any(|o| url.starts_with(o.as_str()))
            && !state.excluded.iter().any(|o| url.starts_with(o.as_str()))
    }
}

fn register(list: &mut Vec<String>, origin: &str) {
    if !list.iter().any(|existing| existing == origin) {
        list.push(origin.to_owned());
    }
}

impl ScopeRegistry for InMemoryScope {
    fn include(&self, origin: &str) -> Result<(), SinkError> {
        register(&mut lock(&self.state).included, origin);
        Ok(())
    }

    fn exclude(&self, origin: &str) -> Result<(), SinkError> {
        register(&mut lock(&self.state).excluded, origin);
        Ok(())
    }
}
