//! Derivation of the visible subgraph and diff-based updates.
//!
//! With no focus the whole dataset is visible (the reset view). With a
//! focus, the visible nodes are its direct neighborhood plus every level-1
//! node (kept as anchors), and the visible links are exactly those incident
//! to the focus. Updates to the rendered set are expressed as explicit
//! added/removed sets so the render surface can keep per-node simulation
//! state for unchanged nodes.

use std::collections::HashSet;

use super::dataset::Dataset;
use super::types::{GraphLink, LinkKey, NodeId};

/// The node/link sets that should currently be rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visible {
	/// Visible node ids, in dataset order.
	pub nodes: Vec<NodeId>,
	/// Visible links.
	pub links: Vec<GraphLink>,
}

/// Computes the visible sets for the given focus.
pub fn derive_visible(dataset: &Dataset, focus: Option<&NodeId>) -> Visible {
	match focus {
		None => Visible {
			nodes: dataset.nodes().iter().map(|n| n.id.clone()).collect(),
			links: dataset.links().to_vec(),
		},
		Some(focus) => {
			let neighbors = dataset.neighbors_of(focus);
			Visible {
				nodes: dataset
					.nodes()
					.iter()
					.filter(|n| n.id == *focus || n.level == 1 || neighbors.contains(&n.id))
					.map(|n| n.id.clone())
					.collect(),
				links: dataset
					.links()
					.iter()
					.filter(|l| l.touches(focus))
					.cloned()
					.collect(),
			}
		}
	}
}

/// Added/removed sets between the rendered subgraph and a new derivation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphDiff {
	/// Nodes to add to the render surface.
	pub added_nodes: Vec<NodeId>,
	/// Nodes to remove from the render surface.
	pub removed_nodes: Vec<NodeId>,
	/// Links to add.
	pub added_links: Vec<GraphLink>,
	/// Links to remove, by composite key.
	pub removed_links: Vec<LinkKey>,
}

impl GraphDiff {
	/// True when nothing changed.
	pub fn is_empty(&self) -> bool {
		self.added_nodes.is_empty()
			&& self.removed_nodes.is_empty()
			&& self.added_links.is_empty()
			&& self.removed_links.is_empty()
	}
}

/// The currently-rendered subgraph, updated by diffing against derivations.
#[derive(Clone, Debug, Default)]
pub struct VisibleSubgraph {
	nodes: Vec<NodeId>,
	node_set: HashSet<NodeId>,
	links: Vec<GraphLink>,
	link_set: HashSet<LinkKey>,
}

impl VisibleSubgraph {
	/// Currently-rendered node ids.
	pub fn node_ids(&self) -> &[NodeId] {
		&self.nodes
	}

	/// Currently-rendered links.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	/// Whether this node is currently rendered.
	pub fn contains_node(&self, id: &NodeId) -> bool {
		self.node_set.contains(id)
	}

	/// Moves the rendered sets to `next`, returning what changed.
	///
	/// Removals are reported in current render order, additions in
	/// derivation order; entries present in both are left untouched.
	pub fn apply(&mut self, next: &Visible) -> GraphDiff {
		let next_nodes: HashSet<NodeId> = next.nodes.iter().cloned().collect();
		let next_links: HashSet<LinkKey> = next.links.iter().map(|l| l.key()).collect();

		let diff = GraphDiff {
			added_nodes: next
				.nodes
				.iter()
				.filter(|id| !self.node_set.contains(*id))
				.cloned()
				.collect(),
			removed_nodes: self
				.nodes
				.iter()
				.filter(|id| !next_nodes.contains(*id))
				.cloned()
				.collect(),
			added_links: next
				.links
				.iter()
				.filter(|l| !self.link_set.contains(&l.key()))
				.cloned()
				.collect(),
			removed_links: self
				.links
				.iter()
				.map(|l| l.key())
				.filter(|k| !next_links.contains(k))
				.collect(),
		};

		self.nodes = next.nodes.clone();
		self.node_set = next_nodes;
		self.links = next.links.clone();
		self.link_set = next_links;
		diff
	}
}
