//! Interactive force-directed graph explorer with recorded provenance.
//!
//! Renders a node/link graph on an HTML canvas with:
//! - Physics-based layout, pan, zoom and node dragging
//! - Focus-driven visibility: selecting a node narrows the view to its
//!   neighborhood while level-1 nodes stay as anchors
//! - Every select, hover, drag and add recorded in a branching history
//!   with undo/redo and jump-to-entry
//!
//! The core is headless: [`ExplorerController`] owns the dataset, the
//! provenance graph and the derived view state, and can be driven entirely
//! from tests. [`GraphExplorer`] is the canvas component on top.

mod component;
mod controller;
mod dataset;
pub mod fixtures;
mod provenance;
mod render;
pub mod scale;
mod sim;
mod state;
mod style;
pub mod theme;
mod types;
mod visible;

pub use component::GraphExplorer;
pub use controller::{ExplorerController, PromptSource, SubgraphUpdate, ViewSync};
pub use dataset::{Dataset, DatasetError, IdPolicy};
pub use provenance::{EntryId, HistoryEntry, HistoryRow, ProvenanceGraph};
pub use state::{ActionDescriptor, AppState, EventKind};
pub use style::StyleSheet;
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode, NodeId};
pub use visible::{GraphDiff, Visible, VisibleSubgraph, derive_visible};
