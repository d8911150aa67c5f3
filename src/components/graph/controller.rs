//! The explorer controller: one context object owning the dataset, the
//! provenance graph, the rendered subgraph and the current style sheet.
//!
//! User gestures come in as method calls, get recorded through the
//! provenance graph, and the registered observers re-derive visibility and
//! styles from the resulting state alone, never from how that state was
//! reached. Undo, redo and jumps therefore produce exactly the visuals the
//! equivalent interactive path would have produced. The render surface
//! consumes the queued [`SubgraphUpdate`]s.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::warn;

use super::dataset::{Dataset, DatasetError};
use super::provenance::{EntryId, HistoryRow, ProvenanceGraph};
use super::state::{self, AppState};
use super::style::{self, StyleSheet};
use super::theme::HighlightPalette;
use super::types::{GraphData, GraphLink, GraphNode, NodeId};
use super::visible::{GraphDiff, VisibleSubgraph, derive_visible};

/// Strength assigned to links created through the add flow.
const ADDED_LINK_STRENGTH: f32 = 0.5;

/// Source of blocking text prompts for the add-node flow.
///
/// The component backs this with `window.prompt`; tests script it.
pub trait PromptSource {
	/// Asks the user for a line of text; `None` means cancelled.
	fn prompt(&mut self, message: &str) -> Option<String>;
}

/// One batch of render-surface work: a structural diff plus the style
/// sheet that now applies.
#[derive(Clone, Debug, PartialEq)]
pub struct SubgraphUpdate {
	/// Nodes/links to add and remove.
	pub diff: GraphDiff,
	/// Colors for every node and link.
	pub styles: StyleSheet,
}

/// Shared view-synchronization state mutated by the observers.
pub struct ViewSync {
	dataset: Dataset,
	visible: VisibleSubgraph,
	styles: StyleSheet,
	palette: HighlightPalette,
	pending: Vec<SubgraphUpdate>,
}

impl ViewSync {
	/// The dataset backing the view.
	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	/// The currently-rendered subgraph.
	pub fn visible(&self) -> &VisibleSubgraph {
		&self.visible
	}

	/// The style sheet currently in effect.
	pub fn styles(&self) -> &StyleSheet {
		&self.styles
	}

	/// Re-derives visibility and styles for `focus`, queueing the diff.
	/// An unresolvable focus degrades to the full reset view.
	fn refocus(&mut self, focus: Option<&NodeId>) {
		let focus = focus.filter(|id| self.dataset.contains(id));
		let next = derive_visible(&self.dataset, focus);
		let diff = self.visible.apply(&next);
		self.styles = match focus {
			Some(focus) => style::focus_styles(&self.dataset, focus, &self.palette),
			None => style::reset_styles(&self.dataset, &self.palette),
		};
		self.pending.push(SubgraphUpdate {
			diff,
			styles: self.styles.clone(),
		});
	}

	/// Restyles for the hover focus without touching visibility. When the
	/// hover is cleared the styles fall back to the drag/selection focus.
	fn restyle(&mut self, state: &AppState) {
		let hover = state.hovered.as_ref().filter(|id| self.dataset.contains(id));
		let fallback = state.focus().filter(|id| self.dataset.contains(id));
		self.styles = match hover.or(fallback) {
			Some(focus) => style::focus_styles(&self.dataset, focus, &self.palette),
			None => style::reset_styles(&self.dataset, &self.palette),
		};
		self.pending.push(SubgraphUpdate {
			diff: GraphDiff::default(),
			styles: self.styles.clone(),
		});
	}
}

/// The provenance-synchronized graph state controller.
pub struct ExplorerController {
	prov: ProvenanceGraph<AppState>,
	view: Rc<RefCell<ViewSync>>,
}

impl ExplorerController {
	/// Builds the controller, wires the state observers and performs the
	/// initial reset-view sync.
	pub fn new(data: GraphData, palette: HighlightPalette) -> Result<Self, DatasetError> {
		let dataset = Dataset::new(data)?;
		let view = Rc::new(RefCell::new(ViewSync {
			dataset,
			visible: VisibleSubgraph::default(),
			styles: StyleSheet::default(),
			palette,
			pending: Vec::new(),
		}));

		let mut prov = ProvenanceGraph::new(AppState::default());

		// Every refocusing observer derives the focus from the state alone
		// via `AppState::focus`, so the rendered view is identical whether
		// a state was reached interactively or by jumping to its entry,
		// and observer order cannot matter.
		let v = view.clone();
		prov.add_observer(
			|s: &AppState| s.selected.clone(),
			move |s| v.borrow_mut().refocus(s.focus()),
		);
		let v = view.clone();
		prov.add_observer(
			|s: &AppState| s.dragged.clone(),
			move |s| v.borrow_mut().refocus(s.focus()),
		);
		let v = view.clone();
		prov.add_observer(
			|s: &AppState| s.added.clone(),
			move |s| v.borrow_mut().refocus(s.focus()),
		);
		let v = view.clone();
		prov.add_observer(
			|s: &AppState| s.hovered.clone(),
			move |s| v.borrow_mut().restyle(s),
		);
		prov.done();

		Ok(Self { prov, view })
	}

	/// Selects a node; re-selecting the current selection deselects it
	/// (the toggle lives here, not in the action).
	pub fn select(&mut self, id: &NodeId) {
		let Some(label) = self.node_label(id) else {
			warn!("select: unknown node id '{id}'");
			return;
		};
		if self.prov.state().selected.as_ref() == Some(id) {
			self.prov.apply(state::select_node(None));
		} else {
			self.prov.apply(state::select_node(Some((id.clone(), label))));
		}
	}

	/// Hovers a node or clears the hover. Repeated hovers of the same node
	/// are deduplicated so pointer movement does not flood the history.
	pub fn hover(&mut self, id: Option<&NodeId>) {
		if self.prov.state().hovered.as_ref() == id {
			return;
		}
		let target = match id {
			Some(id) => match self.node_label(id) {
				Some(label) => Some((id.clone(), label)),
				None => {
					warn!("hover: unknown node id '{id}'");
					return;
				}
			},
			None => None,
		};
		self.prov.apply(state::hover_node(target));
	}

	/// Records a completed drag of `id`.
	pub fn drag_end(&mut self, id: &NodeId) {
		let Some(label) = self.node_label(id) else {
			warn!("drag: unknown node id '{id}'");
			return;
		};
		self.prov.apply(state::drag_node(id.clone(), label));
	}

	/// Runs the interactive add-node flow. Returns the new node's id, or
	/// `None` when the user aborted (no state or history mutation).
	pub fn add_node_flow(&mut self, prompts: &mut dyn PromptSource) -> Option<NodeId> {
		let label = prompts.prompt("Label for the new node:")?;
		let label = label.trim().to_string();
		if label.is_empty() {
			return None;
		}
		let attach = prompts.prompt("Labels of nodes to attach to (space-separated):")?;

		let focus = self.prov.state().focus().cloned();
		let id = {
			let mut view = self.view.borrow_mut();
			let id = view.dataset.add_node(label.clone());
			view.refocus(focus.as_ref());
			for token in attach.split_whitespace() {
				let target = view.dataset.node_by_label(token).map(|n| n.id.clone());
				match target {
					Some(target) if target != id => {
						view.dataset
							.add_link(id.clone(), target, ADDED_LINK_STRENGTH);
						view.refocus(focus.as_ref());
					}
					_ => {}
				}
			}
			id
		};

		// Dataset mutation is complete; only now does the event become
		// provenance. The entry's label carries the display name.
		self.prov.apply(state::add_node(id.clone(), label));
		Some(id)
	}

	/// Undo: move to the parent entry. No-op at the root.
	pub fn undo(&mut self) -> bool {
		self.prov.go_back_one_step()
	}

	/// Redo: move to the first child. No-op when there is none.
	pub fn redo(&mut self) -> bool {
		self.prov.go_forward_one_step()
	}

	/// Jumps to an arbitrary history entry.
	pub fn jump(&mut self, entry: EntryId) -> bool {
		self.prov.go_to_node(entry)
	}

	/// Queued render-surface updates, in order.
	pub fn drain_updates(&mut self) -> Vec<SubgraphUpdate> {
		self.view.borrow_mut().pending.drain(..).collect()
	}

	/// The current application state.
	pub fn state(&self) -> AppState {
		self.prov.state().clone()
	}

	/// Id of the current history entry.
	pub fn current_entry(&self) -> EntryId {
		self.prov.current_id()
	}

	/// Flattened history rows for the tree view.
	pub fn history_rows(&self) -> Vec<HistoryRow> {
		self.prov.rows()
	}

	/// Read access to the view state (dataset, visible subgraph, styles).
	pub fn view(&self) -> Ref<'_, ViewSync> {
		self.view.borrow()
	}

	/// Looks up a node by id, cloned out of the dataset.
	pub fn node(&self, id: &NodeId) -> Option<GraphNode> {
		self.view.borrow().dataset.node(id).cloned()
	}

	/// Snapshot of all links in the dataset.
	pub fn links(&self) -> Vec<GraphLink> {
		self.view.borrow().dataset.links().to_vec()
	}

	fn node_label(&self, id: &NodeId) -> Option<String> {
		self.view.borrow().dataset.node(id).map(|n| n.label.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::super::fixtures;
	use super::super::theme::HighlightPalette;
	use super::super::types::{GraphData, GraphLink, GraphNode, NodeId};
	use super::{ExplorerController, PromptSource};

	struct ScriptedPrompts(Vec<Option<String>>);

	impl PromptSource for ScriptedPrompts {
		fn prompt(&mut self, _message: &str) -> Option<String> {
			self.0.remove(0)
		}
	}

	fn controller() -> ExplorerController {
		ExplorerController::new(fixtures::demo(), HighlightPalette::default()).unwrap()
	}

	fn visible_ids(ctl: &ExplorerController) -> Vec<String> {
		ctl.view()
			.visible()
			.node_ids()
			.iter()
			.map(|id| id.as_str().to_string())
			.collect()
	}

	#[test]
	fn initial_sync_shows_the_full_reset_view() {
		let mut ctl = controller();
		let updates = ctl.drain_updates();
		assert_eq!(updates.len(), 4, "one initial update per observer");
		assert_eq!(visible_ids(&ctl).len(), 11);
	}

	#[test]
	fn select_focuses_neighborhood_and_keeps_roots() {
		let mut ctl = controller();
		ctl.drain_updates();

		ctl.select(&NodeId::from("4")); // Apple, neighbor of Fruit only
		let ids = visible_ids(&ctl);
		// Apple, its neighbor Fruit, plus the other level-1 anchors.
		assert!(ids.contains(&"4".to_string()));
		assert!(ids.contains(&"2".to_string()));
		assert!(ids.contains(&"1".to_string()));
		assert!(ids.contains(&"3".to_string()));
		assert!(!ids.contains(&"7".to_string()), "Carrot is hidden");

		let view = ctl.view();
		assert!(view.visible().links().iter().all(|l| l.touches(&NodeId::from("4"))));
	}

	#[test]
	fn reselecting_toggles_back_to_reset() {
		let mut ctl = controller();
		ctl.select(&NodeId::from("4"));
		ctl.select(&NodeId::from("4"));
		assert_eq!(ctl.state().selected, None);
		assert_eq!(visible_ids(&ctl).len(), 11);
		// The deselect is itself a history entry and can be undone.
		assert!(ctl.undo());
		assert_eq!(ctl.state().selected, Some(NodeId::from("4")));
	}

	#[test]
	fn history_round_trip_through_selection() {
		let mut ctl = controller();
		ctl.select(&NodeId::from("4"));
		ctl.select(&NodeId::from("7"));

		assert!(ctl.undo());
		assert_eq!(ctl.state().selected, Some(NodeId::from("4")));
		assert!(ctl.undo());
		assert_eq!(ctl.state().selected, None);
		assert!(!ctl.undo(), "already at root");

		assert!(ctl.redo());
		assert_eq!(ctl.state().selected, Some(NodeId::from("4")));
		assert!(ctl.redo());
		assert_eq!(ctl.state().selected, Some(NodeId::from("7")));
	}

	#[test]
	fn hover_is_deduplicated_and_labeled() {
		let mut ctl = controller();
		ctl.hover(Some(&NodeId::from("4")));
		ctl.hover(Some(&NodeId::from("4")));
		ctl.hover(None);
		ctl.hover(None);

		let rows = ctl.history_rows();
		let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
		assert_eq!(labels, vec!["Root", "Apple Hovered", "Hover Removed"]);
	}

	#[test]
	fn hover_restyles_without_changing_visibility() {
		let mut ctl = controller();
		ctl.drain_updates();
		ctl.hover(Some(&NodeId::from("4")));
		let updates = ctl.drain_updates();
		assert_eq!(updates.len(), 1);
		assert!(updates[0].diff.is_empty());
		assert_eq!(visible_ids(&ctl).len(), 11);
	}

	#[test]
	fn unknown_ids_degrade_silently() {
		let mut ctl = controller();
		ctl.drain_updates();
		ctl.select(&NodeId::from("no-such-node"));
		ctl.hover(Some(&NodeId::from("no-such-node")));
		assert_eq!(ctl.history_rows().len(), 1, "nothing recorded");
		assert!(ctl.drain_updates().is_empty());
	}

	#[test]
	fn add_node_flow_appends_links_and_records_label() {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: NodeId::from("1"),
					label: "Root".into(),
					level: 1,
					group: None,
				},
				GraphNode {
					id: NodeId::from("2"),
					label: "X".into(),
					level: 2,
					group: Some("g".into()),
				},
			],
			links: vec![],
		};
		let mut ctl = ExplorerController::new(data, HighlightPalette::default()).unwrap();

		let mut prompts = ScriptedPrompts(vec![Some("Y".into()), Some("X".into())]);
		let id = ctl.add_node_flow(&mut prompts).unwrap();
		assert_eq!(id, NodeId::from("3"));

		let added = ctl.node(&id).unwrap();
		assert_eq!(added.level, 2, "inherited from the last node");
		assert_eq!(added.group.as_deref(), Some("g"));

		let links = ctl.links();
		assert_eq!(links.len(), 1);
		assert_eq!(
			links[0],
			GraphLink {
				source: NodeId::from("3"),
				target: NodeId::from("2"),
				strength: 0.5,
			}
		);

		// The provenance entry carries the display name, not the id.
		let rows = ctl.history_rows();
		assert_eq!(rows.last().unwrap().label, "Y Added");
		assert_eq!(ctl.state().added, Some(NodeId::from("3")));
	}

	#[test]
	fn cancelled_or_empty_prompts_abort_without_mutation() {
		let mut ctl = controller();
		ctl.drain_updates();
		let before_nodes = ctl.view().dataset().nodes().len();

		let mut cancelled = ScriptedPrompts(vec![None]);
		assert!(ctl.add_node_flow(&mut cancelled).is_none());

		let mut empty = ScriptedPrompts(vec![Some("   ".into())]);
		assert!(ctl.add_node_flow(&mut empty).is_none());

		let mut attach_cancelled = ScriptedPrompts(vec![Some("Y".into()), None]);
		assert!(ctl.add_node_flow(&mut attach_cancelled).is_none());

		assert_eq!(ctl.view().dataset().nodes().len(), before_nodes);
		assert_eq!(ctl.history_rows().len(), 1);
		assert!(ctl.drain_updates().is_empty());
	}

	#[test]
	fn attach_tokens_match_labels_case_sensitively() {
		let mut ctl = controller();
		let mut prompts = ScriptedPrompts(vec![
			Some("Salad".into()),
			Some("Carrot tomato Cucumber".into()),
		]);
		ctl.add_node_flow(&mut prompts).unwrap();
		let links = ctl.links();
		let new_links: Vec<_> = links
			.iter()
			.filter(|l| l.source == NodeId::from("12"))
			.collect();
		// "tomato" does not match "Tomato".
		assert_eq!(new_links.len(), 2);
	}

	#[test]
	fn jump_matches_sequential_replay() {
		let mut ctl = controller();
		ctl.select(&NodeId::from("4"));
		ctl.hover(Some(&NodeId::from("7")));
		let mid = ctl.current_entry();
		let mid_nodes = visible_ids(&ctl);
		let mid_styles = ctl.view().styles().clone();

		ctl.hover(None);
		ctl.select(&NodeId::from("7"));
		ctl.drag_end(&NodeId::from("8"));

		assert!(ctl.jump(mid));
		assert_eq!(visible_ids(&ctl), mid_nodes);
		assert_eq!(*ctl.view().styles(), mid_styles);

		// And the same point reached by stepping back one at a time.
		ctl.jump(ctl.history_rows().last().unwrap().id);
		while ctl.current_entry() != mid {
			assert!(ctl.undo());
		}
		assert_eq!(visible_ids(&ctl), mid_nodes);
		assert_eq!(*ctl.view().styles(), mid_styles);
	}

	#[test]
	fn jump_reproduces_view_when_selection_follows_drag() {
		// The focus must be a function of the state alone: a selection
		// recorded after a drag has to land on the same view whether the
		// entry is reached interactively or by jumping to it.
		let mut ctl = controller();
		ctl.select(&NodeId::from("4"));
		ctl.drag_end(&NodeId::from("7"));
		ctl.select(&NodeId::from("8"));
		let interactive_nodes = visible_ids(&ctl);
		let interactive_styles = ctl.view().styles().clone();
		let here = ctl.current_entry();

		let root = ctl.history_rows()[0].id;
		assert!(ctl.jump(root));
		assert_eq!(visible_ids(&ctl).len(), 11);

		assert!(ctl.jump(here));
		assert_eq!(visible_ids(&ctl), interactive_nodes);
		assert_eq!(*ctl.view().styles(), interactive_styles);
	}

	#[test]
	fn undo_of_drag_falls_back_to_selection_focus() {
		let mut ctl = controller();
		ctl.select(&NodeId::from("4"));
		let selected_view = visible_ids(&ctl);
		ctl.drag_end(&NodeId::from("7"));
		assert_ne!(visible_ids(&ctl), selected_view);
		assert!(ctl.undo());
		assert_eq!(visible_ids(&ctl), selected_view);
	}
}
