//! Graph data structures for input to the explorer component.

use std::fmt;

use serde::Deserialize;

/// Stable node identifier carried end-to-end through state, history and
/// rendering. Never round-tripped through display strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	/// Wraps a raw id string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// The raw id string.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Numeric value of the id, if it is a decimal string.
	pub fn as_numeric(&self) -> Option<u64> {
		self.0.parse().ok()
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

/// A node in the graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: NodeId,
	/// Display label, also the match key for the attach list when adding nodes.
	pub label: String,
	/// Hierarchy level; `1` marks root/anchor nodes that stay visible and get
	/// distinct default styling.
	pub level: u32,
	/// Optional group name, inherited by nodes created through the add flow.
	#[serde(default)]
	pub group: Option<String>,
}

/// An undirected link between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// One endpoint's node id.
	pub source: NodeId,
	/// The other endpoint's node id.
	pub target: NodeId,
	/// Spring strength handed to the force simulation.
	#[serde(default = "default_strength")]
	pub strength: f32,
}

/// Composite identity of a link, keyed by its endpoint ids.
pub type LinkKey = (NodeId, NodeId);

impl GraphLink {
	/// The `(source, target)` composite key identifying this link.
	pub fn key(&self) -> LinkKey {
		(self.source.clone(), self.target.clone())
	}

	/// Whether either endpoint is `id`.
	pub fn touches(&self, id: &NodeId) -> bool {
		self.source == *id || self.target == *id
	}

	/// The endpoint opposite to `id`, if `id` is an endpoint at all.
	pub fn other_endpoint(&self, id: &NodeId) -> Option<&NodeId> {
		if self.source == *id {
			Some(&self.target)
		} else if self.target == *id {
			Some(&self.source)
		} else {
			None
		}
	}
}

fn default_strength() -> f32 {
	0.5
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// All nodes, in dataset order.
	pub nodes: Vec<GraphNode>,
	/// All links between nodes.
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::{GraphData, GraphLink, NodeId};

	#[test]
	fn link_endpoints() {
		let link = GraphLink {
			source: NodeId::from("1"),
			target: NodeId::from("2"),
			strength: 0.5,
		};
		assert!(link.touches(&NodeId::from("1")));
		assert!(link.touches(&NodeId::from("2")));
		assert!(!link.touches(&NodeId::from("3")));
		assert_eq!(link.other_endpoint(&NodeId::from("1")), Some(&NodeId::from("2")));
		assert_eq!(link.other_endpoint(&NodeId::from("3")), None);
	}

	#[test]
	fn link_strength_defaults_when_absent() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes": [], "links": [{"source": "1", "target": "2"}]}"#,
		)
		.unwrap();
		assert_eq!(data.links[0].strength, 0.5);
	}

	#[test]
	fn numeric_ids_parse() {
		assert_eq!(NodeId::from("17").as_numeric(), Some(17));
		assert_eq!(NodeId::from("apple").as_numeric(), None);
	}
}
