//! Action menu gating and delivery of a batch to host collaborators.
//!
//! Each action walks the batch in order. A collaborator failure is recorded
//! for that transaction and the walk continues with the next one.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::annotation::{AnnotationBuilder, GroupCounter};
use crate::engine::origin::request_origin;
use crate::engine::PathNormalizer;

pub mod collaborators;
pub mod selection;

pub use collaborators::{
    ConfigProvider, InMemoryScope, InMemoryToolSink, InMemoryTriage, ScopeRegistry, SinkError,
    ToolSink, TriageSink,
};
pub use selection::{resolve, ActiveSelection, SelectionContext};

/// Something the user can do with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Open each request in the tool under its label.
    RouteToTool,
    /// Annotate each transaction and store it for triage.
    RouteToTriage,
    /// Add each request's origin to the target scope.
    IncludeInScope,
    /// Exclude each request's origin from the target scope.
    ExcludeFromScope,
}

impl Action {
    /// All actions in menu order.
    pub const ALL: [Action; 4] = [
        Self::RouteToTool,
        Self::RouteToTriage,
        Self::IncludeInScope,
        Self::ExcludeFromScope,
    ];

    /// Menu caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::RouteToTool => "Send To Repeater",
            Self::RouteToTriage => "Send To Organizer",
            Self::IncludeInScope => "Add Base URL to Scope",
            Self::ExcludeFromScope => "Exclude Base URL from Scope",
        }
    }

    /// Kebab-case identifier accepted by [`FromStr`].
    pub fn id(self) -> &'static str {
        match self {
            Self::RouteToTool => "route-to-tool",
            Self::RouteToTriage => "route-to-triage",
            Self::IncludeInScope => "include-in-scope",
            Self::ExcludeFromScope => "exclude-from-scope",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An action name that is not one of [`Action::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.id() == s)
            .ok_or_else(|| UnknownAction(s.to_owned()))
    }
}

/// Actions to offer for `selection`; none at all when it is empty.
pub fn available_actions(selection: &ActiveSelection) -> Vec<Action> {
    if selection.is_empty() {
        return Vec::new();
    }
    Action::ALL.to_vec()
}

/// A collaborator failure for one transaction of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    /// Position of the transaction in the batch.
    pub index: usize,
    /// Collaborator error.
    pub error: SinkError,
}

/// Outcome of running one action over a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Action that ran.
    pub action: Action,
    /// Transactions handed to a collaborator.
    pub attempted: usize,
    /// Per-transaction failures, in batch order.
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    /// Transactions the collaborator accepted.
    pub fn delivered(&self) -> usize {
        self.attempted.saturating_sub(self.failures.len())
    }

    /// Whether every transaction was delivered.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs actions against the host's collaborators.
pub struct ActionDispatcher {
    normalizer: PathNormalizer,
    annotations: AnnotationBuilder,
    config: Arc<dyn ConfigProvider>,
    tool: Arc<dyn ToolSink>,
    triage: Arc<dyn TriageSink>,
    scope: Arc<dyn ScopeRegistry>,
}

impl ActionDispatcher {
    /// Dispatcher using the default path rules.
    pub fn new(
        counter: Arc<GroupCounter>,
        config: Arc<dyn ConfigProvider>,
        tool: Arc<dyn ToolSink>,
        triage: Arc<dyn TriageSink>,
        scope: Arc<dyn ScopeRegistry>,
    ) -> Self {
        Self {
            normalizer: PathNormalizer::shared().clone(),
            annotations: AnnotationBuilder::new(counter),
            config,
            tool,
            triage,
            scope,
        }
    }

    /// Replace the path normalizer used for tool labels.
    pub fn with_normalizer(mut self, normalizer: PathNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Run `action` over every transaction of `selection`, in order.
    pub fn dispatch(&self, action: Action, selection: &ActiveSelection) -> DispatchReport {
        let mut report = DispatchReport {
            action,
            attempted: selection.len(),
            failures: Vec::new(),
        };
        if selection.is_empty() {
            debug!(%action, "nothing selected");
            return report;
        }

        let outcomes: Vec<Result<(), SinkError>> = match action {
            Action::RouteToTool => self.route_to_tool(selection),
            Action::RouteToTriage => self.route_to_triage(selection),
            Action::IncludeInScope => self.update_scope(selection, true),
            Action::ExcludeFromScope => self.update_scope(selection, false),
        };

        for (index, outcome) in outcomes.into_iter().enumerate() {
            if let Err(error) = outcome {
                warn!(%action, index, error = %error, "delivery failed");
                report.failures.push(DispatchFailure { index, error });
            }
        }

        info!(
            %action,
            attempted = report.attempted,
            failed = report.failures.len(),
            "action complete"
        );
        report
    }

    fn route_to_tool(&self, selection: &ActiveSelection) -> Vec<Result<(), SinkError>> {
        selection
            .iter()
            .map(|tx| {
                let request = &tx.request;
                let name = self
                    .normalizer
                    .label(&request.method, &request.path_without_query);
                debug!(label = %name, "opening in tool");
                self.tool.open(request, &name)
            })
            .collect()
    }

    fn route_to_triage(&self, selection: &ActiveSelection) -> Vec<Result<(), SinkError>> {
        let config = self.config.annotation_config();
        let annotations = self.annotations.build(selection.as_slice(), &config);

        selection
            .iter()
            .zip(annotations.iter())
            .map(|(tx, annotation)| self.triage.store(tx, annotation))
            .collect()
    }

    fn update_scope(&self, selection: &ActiveSelection, include: bool) -> Vec<Result<(), SinkError>> {
        selection
            .iter()
            .map(|tx| {
                let origin = request_origin(&tx.request.url, &tx.request.path);
                info!(url = %tx.request.url, origin = %origin, include, "updating scope");
                if include {
                    self.scope.include(&origin)
                } else {
                    self.scope.exclude(&origin)
                }
            })
            .collect()
    }
}
