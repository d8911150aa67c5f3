//! Bundled demo dataset, used when the page provides no `graph-data` block.

use super::types::{GraphData, GraphLink, GraphNode, NodeId};

fn node(id: &str, label: &str, level: u32, group: &str) -> GraphNode {
	GraphNode {
		id: NodeId::from(id),
		label: label.to_string(),
		level,
		group: Some(group.to_string()),
	}
}

fn link(source: &str, target: &str, strength: f32) -> GraphLink {
	GraphLink {
		source: NodeId::from(source),
		target: NodeId::from(target),
		strength,
	}
}

/// A small produce taxonomy with numeric ids, two root-level anchors and a
/// handful of leaves.
pub fn demo() -> GraphData {
	GraphData {
		nodes: vec![
			node("1", "Produce", 1, "produce"),
			node("2", "Fruit", 1, "produce"),
			node("3", "Vegetable", 1, "produce"),
			node("4", "Apple", 2, "fruit"),
			node("5", "Pear", 2, "fruit"),
			node("6", "Banana", 2, "fruit"),
			node("7", "Carrot", 2, "vegetable"),
			node("8", "Potato", 2, "vegetable"),
			node("9", "Tomato", 2, "vegetable"),
			node("10", "Cucumber", 2, "vegetable"),
			node("11", "Cherry", 2, "fruit"),
		],
		links: vec![
			link("1", "2", 0.8),
			link("1", "3", 0.8),
			link("2", "4", 0.5),
			link("2", "5", 0.5),
			link("2", "6", 0.5),
			link("2", "11", 0.5),
			link("3", "7", 0.5),
			link("3", "8", 0.5),
			link("3", "9", 0.5),
			link("3", "10", 0.5),
			// Botanically a fruit, culinarily a vegetable.
			link("2", "9", 0.3),
		],
	}
}

#[cfg(test)]
mod tests {
	use super::super::dataset::Dataset;
	use super::demo;

	#[test]
	fn demo_dataset_is_well_formed() {
		let data = demo();
		let ds = Dataset::new(data).unwrap();
		// Every link endpoint resolves.
		for l in ds.links() {
			assert!(ds.node(&l.source).is_some(), "missing {}", l.source);
			assert!(ds.node(&l.target).is_some(), "missing {}", l.target);
		}
		assert!(ds.nodes().iter().any(|n| n.level == 1));
	}
}
