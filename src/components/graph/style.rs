//! Pure style resolution for nodes, labels and links.
//!
//! Every function here is total over its inputs and free of side effects;
//! the outputs are applied as attribute assignments on the render surface.
//! The focus node gets the self color, its direct neighborhood gets the
//! neighbor colors (split by level), everything else falls back to the
//! level-based defaults. The `reset_*` variants ignore focus entirely and
//! are used when focus is cleared.

use std::collections::{HashMap, HashSet};

use super::dataset::Dataset;
use super::theme::{Color, HighlightPalette};
use super::types::{GraphLink, GraphNode, LinkKey, NodeId};

/// Fill color of `node` while `focus` is active.
pub fn node_fill(
	node: &GraphNode,
	neighbors: &HashSet<NodeId>,
	focus: &NodeId,
	palette: &HighlightPalette,
) -> Color {
	if node.id == *focus {
		palette.focus_fill
	} else if neighbors.contains(&node.id) {
		if node.level == 1 {
			palette.neighbor_root_fill
		} else {
			palette.neighbor_fill
		}
	} else {
		reset_fill(node, palette)
	}
}

/// Label color of `node` while `focus` is active.
pub fn text_color(
	node: &GraphNode,
	neighbors: &HashSet<NodeId>,
	focus: &NodeId,
	palette: &HighlightPalette,
) -> Color {
	if node.id == *focus {
		palette.focus_text
	} else if neighbors.contains(&node.id) {
		if node.level == 1 {
			palette.neighbor_root_text
		} else {
			palette.neighbor_text
		}
	} else {
		reset_text(node, palette)
	}
}

/// Stroke color of `link` while `focus` is active. Highlighted when either
/// endpoint is the focus.
pub fn link_stroke(link: &GraphLink, focus: &NodeId, palette: &HighlightPalette) -> Color {
	if link.touches(focus) {
		palette.link_focus_stroke
	} else {
		palette.link_default_stroke
	}
}

/// Level-based default fill, ignoring any focus.
pub fn reset_fill(node: &GraphNode, palette: &HighlightPalette) -> Color {
	if node.level == 1 {
		palette.root_fill
	} else {
		palette.default_fill
	}
}

/// Level-based default label color, ignoring any focus.
pub fn reset_text(node: &GraphNode, palette: &HighlightPalette) -> Color {
	if node.level == 1 {
		palette.root_text
	} else {
		palette.default_text
	}
}

/// Default link stroke, ignoring any focus.
pub fn reset_stroke(_link: &GraphLink, palette: &HighlightPalette) -> Color {
	palette.link_default_stroke
}

/// Resolved colors for every node and link in the dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
	/// Fill color per node id.
	pub node_fill: HashMap<NodeId, Color>,
	/// Label color per node id.
	pub node_text: HashMap<NodeId, Color>,
	/// Stroke color per link key.
	pub link_stroke: HashMap<LinkKey, Color>,
}

/// Resolves the full sheet for an active focus node.
pub fn focus_styles(dataset: &Dataset, focus: &NodeId, palette: &HighlightPalette) -> StyleSheet {
	let neighbors = dataset.neighbors_of(focus);
	let mut sheet = StyleSheet::default();
	for node in dataset.nodes() {
		sheet
			.node_fill
			.insert(node.id.clone(), node_fill(node, &neighbors, focus, palette));
		sheet
			.node_text
			.insert(node.id.clone(), text_color(node, &neighbors, focus, palette));
	}
	for link in dataset.links() {
		sheet
			.link_stroke
			.insert(link.key(), link_stroke(link, focus, palette));
	}
	sheet
}

/// Resolves the full sheet with no focus (reset view).
pub fn reset_styles(dataset: &Dataset, palette: &HighlightPalette) -> StyleSheet {
	let mut sheet = StyleSheet::default();
	for node in dataset.nodes() {
		sheet
			.node_fill
			.insert(node.id.clone(), reset_fill(node, palette));
		sheet
			.node_text
			.insert(node.id.clone(), reset_text(node, palette));
	}
	for link in dataset.links() {
		sheet
			.link_stroke
			.insert(link.key(), reset_stroke(link, palette));
	}
	sheet
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::super::dataset::Dataset;
	use super::super::theme::HighlightPalette;
	use super::super::types::{GraphData, GraphLink, GraphNode, NodeId};
	use super::*;

	fn node(id: &str, level: u32) -> GraphNode {
		GraphNode {
			id: NodeId::from(id),
			label: id.to_string(),
			level,
			group: None,
		}
	}

	fn dataset() -> Dataset {
		Dataset::new(GraphData {
			nodes: vec![node("1", 1), node("2", 2), node("3", 2), node("4", 1)],
			links: vec![
				GraphLink {
					source: NodeId::from("1"),
					target: NodeId::from("2"),
					strength: 0.5,
				},
				GraphLink {
					source: NodeId::from("2"),
					target: NodeId::from("3"),
					strength: 0.5,
				},
			],
		})
		.unwrap()
	}

	#[test]
	fn fill_truth_table() {
		let ds = dataset();
		let palette = HighlightPalette::default();
		let focus = NodeId::from("2");
		let neighbors = ds.neighbors_of(&focus);

		// Focus always gets the self color, even though it is not its own
		// neighbor.
		let focus_node = ds.node(&focus).unwrap();
		assert_eq!(
			node_fill(focus_node, &neighbors, &focus, &palette),
			palette.focus_fill
		);
		// Level-1 neighbor vs plain neighbor.
		assert_eq!(
			node_fill(ds.node(&NodeId::from("1")).unwrap(), &neighbors, &focus, &palette),
			palette.neighbor_root_fill
		);
		assert_eq!(
			node_fill(ds.node(&NodeId::from("3")).unwrap(), &neighbors, &focus, &palette),
			palette.neighbor_fill
		);
		// Non-neighbor default depends only on level.
		assert_eq!(
			node_fill(ds.node(&NodeId::from("4")).unwrap(), &neighbors, &focus, &palette),
			palette.root_fill
		);
	}

	#[test]
	fn focus_is_self_colored_even_when_also_a_neighbor() {
		// A self-loop makes the focus a member of its own neighbor set; the
		// self color still wins.
		let palette = HighlightPalette::default();
		let focus = NodeId::from("2");
		let neighbors: HashSet<NodeId> = [NodeId::from("2")].into_iter().collect();
		assert_eq!(
			node_fill(&node("2", 2), &neighbors, &focus, &palette),
			palette.focus_fill
		);
	}

	#[test]
	fn reset_variants_ignore_focus() {
		let palette = HighlightPalette::default();
		assert_eq!(reset_fill(&node("9", 1), &palette), palette.root_fill);
		assert_eq!(reset_fill(&node("9", 2), &palette), palette.default_fill);
		assert_eq!(reset_text(&node("9", 1), &palette), palette.root_text);
		assert_eq!(reset_text(&node("9", 2), &palette), palette.default_text);
	}

	#[test]
	fn link_stroke_depends_on_touching_focus() {
		let ds = dataset();
		let palette = HighlightPalette::default();
		let focus = NodeId::from("1");
		assert_eq!(
			link_stroke(&ds.links()[0], &focus, &palette),
			palette.link_focus_stroke
		);
		assert_eq!(
			link_stroke(&ds.links()[1], &focus, &palette),
			palette.link_default_stroke
		);
	}

	#[test]
	fn sheets_cover_every_element() {
		let ds = dataset();
		let palette = HighlightPalette::default();
		let focused = focus_styles(&ds, &NodeId::from("2"), &palette);
		assert_eq!(focused.node_fill.len(), ds.nodes().len());
		assert_eq!(focused.link_stroke.len(), ds.links().len());

		let reset = reset_styles(&ds, &palette);
		assert_eq!(reset.node_fill.len(), ds.nodes().len());
		// Reset sheet never contains highlight colors.
		assert!(reset
			.node_fill
			.values()
			.all(|c| *c == palette.root_fill || *c == palette.default_fill));
	}
}
