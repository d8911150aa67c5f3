//! Id-indexed storage for the loaded graph, with append-only mutation.
//!
//! The dataset is loaded once at startup and only ever grows: the add-node
//! flow appends a node and its links, nothing is removed. All lookups go
//! through the id index rather than positional scans.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::types::{GraphData, GraphLink, GraphNode, NodeId};

/// How ids for nodes created through the add flow are generated.
///
/// `MaxNumericPlusOne` assumes app-assigned decimal ids. Datasets with
/// non-numeric ids get the `Counter` policy instead, so id generation never
/// silently collides with externally-assigned ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdPolicy {
	/// New id = max over all numeric ids, plus one.
	MaxNumericPlusOne,
	/// New id from a monotonically increasing counter, skipping taken ids.
	Counter,
}

/// Error constructing a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
	/// Two nodes share the same id.
	DuplicateId(NodeId),
}

impl fmt::Display for DatasetError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DuplicateId(id) => write!(f, "duplicate node id '{id}'"),
		}
	}
}

impl std::error::Error for DatasetError {}

/// The full node/link collection, indexed by node id.
#[derive(Clone, Debug)]
pub struct Dataset {
	nodes: Vec<GraphNode>,
	index: HashMap<NodeId, usize>,
	links: Vec<GraphLink>,
	id_policy: IdPolicy,
	counter: u64,
}

impl Dataset {
	/// Builds the dataset, rejecting duplicate ids.
	///
	/// The id policy is chosen from the data: all-numeric ids keep the
	/// max-plus-one scheme, anything else switches to the counter.
	pub fn new(data: GraphData) -> Result<Self, DatasetError> {
		let all_numeric = data.nodes.iter().all(|n| n.id.as_numeric().is_some());
		let policy = if all_numeric {
			IdPolicy::MaxNumericPlusOne
		} else {
			IdPolicy::Counter
		};
		Self::with_policy(data, policy)
	}

	/// Builds the dataset with an explicit id-generation policy.
	pub fn with_policy(data: GraphData, id_policy: IdPolicy) -> Result<Self, DatasetError> {
		let mut index = HashMap::with_capacity(data.nodes.len());
		for (slot, node) in data.nodes.iter().enumerate() {
			if index.insert(node.id.clone(), slot).is_some() {
				return Err(DatasetError::DuplicateId(node.id.clone()));
			}
		}

		let counter = data
			.nodes
			.iter()
			.filter_map(|n| n.id.as_numeric())
			.max()
			.map(|max| max + 1)
			.unwrap_or(1);

		Ok(Self {
			nodes: data.nodes,
			index,
			links: data.links,
			id_policy,
			counter,
		})
	}

	/// All nodes, in insertion order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// All links.
	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
		self.index.get(id).map(|&slot| &self.nodes[slot])
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: &NodeId) -> bool {
		self.index.contains_key(id)
	}

	/// First node whose label matches exactly (case-sensitive).
	pub fn node_by_label(&self, label: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.label == label)
	}

	/// Ids of all nodes directly linked to `id`.
	pub fn neighbors_of(&self, id: &NodeId) -> HashSet<NodeId> {
		self.links
			.iter()
			.filter_map(|link| link.other_endpoint(id).cloned())
			.collect()
	}

	/// Appends a new node, inheriting group and level from the last node in
	/// insertion order (or level 1 with no group on an empty dataset).
	pub fn add_node(&mut self, label: String) -> NodeId {
		let id = self.next_id();
		let (level, group) = match self.nodes.last() {
			Some(last) => (last.level, last.group.clone()),
			None => (1, None),
		};
		self.index.insert(id.clone(), self.nodes.len());
		self.nodes.push(GraphNode {
			id: id.clone(),
			label,
			level,
			group,
		});
		id
	}

	/// Appends a new link. Endpoints are not validated; links referencing
	/// unknown ids simply never resolve as neighbors.
	pub fn add_link(&mut self, source: NodeId, target: NodeId, strength: f32) {
		self.links.push(GraphLink {
			source,
			target,
			strength,
		});
	}

	fn next_id(&mut self) -> NodeId {
		match self.id_policy {
			IdPolicy::MaxNumericPlusOne => {
				let next = self
					.nodes
					.iter()
					.filter_map(|n| n.id.as_numeric())
					.max()
					.map(|max| max + 1)
					.unwrap_or(1);
				NodeId::new(next.to_string())
			}
			IdPolicy::Counter => loop {
				let candidate = NodeId::new(self.counter.to_string());
				self.counter += 1;
				if !self.index.contains_key(&candidate) {
					break candidate;
				}
			},
		}
	}
}
