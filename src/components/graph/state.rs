//! Observable application state and the actions that mutate it.
//!
//! The state is four orthogonal projections of interaction history, not a
//! single mode: selecting does not clear hovering, and so on. Each action
//! mutates exactly one field and carries the label and event tag recorded
//! on the resulting history entry.

use std::fmt;

use super::types::NodeId;

/// The observable interaction state, snapshotted on every history entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
	/// Currently selected node, if any.
	pub selected: Option<NodeId>,
	/// Currently hovered node, if any.
	pub hovered: Option<NodeId>,
	/// Node most recently dragged, if any.
	pub dragged: Option<NodeId>,
	/// Node most recently created through the add flow, if any.
	pub added: Option<NodeId>,
}

impl AppState {
	/// The node driving visibility and highlight computation.
	///
	/// A dragged node takes precedence over the selection until the drag
	/// is undone or superseded. Hover never affects visibility; it layers
	/// on top in the style pass. Because this is a function of the state
	/// alone, a jump to an entry yields the same focus as reaching that
	/// entry interactively.
	pub fn focus(&self) -> Option<&NodeId> {
		self.dragged.as_ref().or(self.selected.as_ref())
	}
}

/// Event tag attached to each history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
	SelectNode,
	HoverNode,
	DragNode,
	AddNode,
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::SelectNode => "Select Node",
			Self::HoverNode => "Hover Node",
			Self::DragNode => "Drag Node",
			Self::AddNode => "Add Node",
		})
	}
}

/// A labeled, tagged state mutation, applied through the provenance graph.
pub struct ActionDescriptor<S> {
	label: String,
	event: EventKind,
	apply: Box<dyn Fn(&mut S)>,
}

impl<S> ActionDescriptor<S> {
	/// Builds a descriptor from its label, event tag and mutation.
	pub fn new(label: impl Into<String>, event: EventKind, apply: impl Fn(&mut S) + 'static) -> Self {
		Self {
			label: label.into(),
			event,
			apply: Box::new(apply),
		}
	}

	/// Human-readable label recorded on the history entry.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Event tag recorded on the history entry.
	pub fn event(&self) -> EventKind {
		self.event
	}

	pub(crate) fn run(&self, state: &mut S) {
		(self.apply)(state)
	}
}

impl<S> fmt::Debug for ActionDescriptor<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionDescriptor")
			.field("label", &self.label)
			.field("event", &self.event)
			.finish_non_exhaustive()
	}
}

/// Selects a node, or clears the selection when `target` is `None`.
///
/// The toggle-on-reselect decision lives in the caller; this action only
/// records the resulting value.
pub fn select_node(target: Option<(NodeId, String)>) -> ActionDescriptor<AppState> {
	let (id, label) = match target {
		Some((id, label)) => (Some(id), format!("{label} Selected")),
		None => (None, "Selection Cleared".to_string()),
	};
	ActionDescriptor::new(label, EventKind::SelectNode, move |state: &mut AppState| {
		state.selected = id.clone();
	})
}

/// Hovers a node, or clears the hover when `target` is `None`. The cleared
/// case is labeled distinctly from a real hover.
pub fn hover_node(target: Option<(NodeId, String)>) -> ActionDescriptor<AppState> {
	let (id, label) = match target {
		Some((id, label)) => (Some(id), format!("{label} Hovered")),
		None => (None, "Hover Removed".to_string()),
	};
	ActionDescriptor::new(label, EventKind::HoverNode, move |state: &mut AppState| {
		state.hovered = id.clone();
	})
}

/// Records a completed drag. Fired once at drag end; intermediate drag
/// frames stay local to the render surface.
pub fn drag_node(id: NodeId, label: String) -> ActionDescriptor<AppState> {
	ActionDescriptor::new(
		format!("{label} Dragged"),
		EventKind::DragNode,
		move |state: &mut AppState| {
			state.dragged = Some(id.clone());
		},
	)
}

/// Records a node created through the add flow. The label carries the new
/// node's display name; the dataset mutation has already happened by the
/// time this action is applied.
pub fn add_node(id: NodeId, label: String) -> ActionDescriptor<AppState> {
	ActionDescriptor::new(
		format!("{label} Added"),
		EventKind::AddNode,
		move |state: &mut AppState| {
			state.added = Some(id.clone());
		},
	)
}

#[cfg(test)]
mod tests {
	use super::super::types::NodeId;
	use super::{AppState, EventKind, add_node, drag_node, hover_node, select_node};

	#[test]
	fn actions_mutate_exactly_one_field() {
		let mut state = AppState::default();

		select_node(Some((NodeId::from("1"), "Root".into()))).run(&mut state);
		assert_eq!(state.selected, Some(NodeId::from("1")));
		assert_eq!(state.hovered, None);

		hover_node(Some((NodeId::from("2"), "X".into()))).run(&mut state);
		assert_eq!(state.hovered, Some(NodeId::from("2")));
		assert_eq!(state.selected, Some(NodeId::from("1")));

		drag_node(NodeId::from("3"), "Y".into()).run(&mut state);
		assert_eq!(state.dragged, Some(NodeId::from("3")));

		add_node(NodeId::from("4"), "Z".into()).run(&mut state);
		assert_eq!(state.added, Some(NodeId::from("4")));
		assert_eq!(state.selected, Some(NodeId::from("1")));
	}

	#[test]
	fn labels_and_events() {
		let select = select_node(Some((NodeId::from("1"), "Root".into())));
		assert_eq!(select.label(), "Root Selected");
		assert_eq!(select.event(), EventKind::SelectNode);

		assert_eq!(select_node(None).label(), "Selection Cleared");
		assert_eq!(hover_node(None).label(), "Hover Removed");
		assert_eq!(
			hover_node(Some((NodeId::from("2"), "X".into()))).label(),
			"X Hovered"
		);
		assert_eq!(add_node(NodeId::from("9"), "Y".into()).label(), "Y Added");
		assert_eq!(EventKind::SelectNode.to_string(), "Select Node");
		assert_eq!(EventKind::HoverNode.to_string(), "Hover Node");
	}

	#[test]
	fn focus_prefers_dragged_over_selected() {
		let mut state = AppState::default();
		assert_eq!(state.focus(), None);
		state.selected = Some(NodeId::from("1"));
		assert_eq!(state.focus(), Some(&NodeId::from("1")));
		state.dragged = Some(NodeId::from("2"));
		assert_eq!(state.focus(), Some(&NodeId::from("2")));
		state.dragged = None;
		assert_eq!(state.focus(), Some(&NodeId::from("1")));
	}

	#[test]
	fn hover_clear_resets_field() {
		let mut state = AppState {
			hovered: Some(NodeId::from("2")),
			..AppState::default()
		};
		hover_node(None).run(&mut state);
		assert_eq!(state.hovered, None);
	}
}
