//! Branching history of state snapshots with a movable current pointer.
//!
//! Entries form an append-only tree stored in an arena: `apply` appends a
//! child under the current entry and moves the pointer there, undo moves to
//! the parent without deleting anything, so the previously-taken branch
//! stays reachable and a new action after an undo simply starts a sibling
//! branch. Observers watch slices of the state and fire synchronously,
//! before the triggering call returns, on every path-changing operation.
//! They cannot tell a fresh action from an undo, redo or jump.

use super::state::{ActionDescriptor, EventKind};

/// Index of an entry in the history arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
	/// Arena slot of this entry.
	pub fn index(self) -> usize {
		self.0
	}
}

/// One immutable snapshot in the history tree.
#[derive(Debug)]
pub struct HistoryEntry<S> {
	id: EntryId,
	label: String,
	event: Option<EventKind>,
	parent: Option<EntryId>,
	children: Vec<EntryId>,
	state: S,
}

impl<S> HistoryEntry<S> {
	/// This entry's id.
	pub fn id(&self) -> EntryId {
		self.id
	}

	/// Human-readable label of the transition that produced this entry.
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Event tag of the transition; `None` for the root.
	pub fn event(&self) -> Option<EventKind> {
		self.event
	}

	/// Parent entry; `None` for the root.
	pub fn parent(&self) -> Option<EntryId> {
		self.parent
	}

	/// Children in creation order; the first child is the redo target.
	pub fn children(&self) -> &[EntryId] {
		&self.children
	}

	/// The state snapshot this entry holds.
	pub fn state(&self) -> &S {
		&self.state
	}
}

/// One row of the flattened history tree, for the tree view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
	/// Entry this row represents.
	pub id: EntryId,
	/// Entry label.
	pub label: String,
	/// Event tag; `None` for the root.
	pub event: Option<EventKind>,
	/// Depth below the root.
	pub depth: usize,
	/// Whether this entry is the current pointer.
	pub is_current: bool,
	/// Whether this entry lies on the root-to-current path.
	pub on_path: bool,
}

type ObserverFn<S> = Box<dyn FnMut(Option<&S>, &S)>;

/// The history tree plus its registered observers.
pub struct ProvenanceGraph<S> {
	entries: Vec<HistoryEntry<S>>,
	current: EntryId,
	observers: Vec<ObserverFn<S>>,
}

impl<S: Clone> ProvenanceGraph<S> {
	/// Creates a history whose root holds the initial state.
	pub fn new(initial: S) -> Self {
		Self {
			entries: vec![HistoryEntry {
				id: EntryId(0),
				label: "Root".to_string(),
				event: None,
				parent: None,
				children: Vec::new(),
				state: initial,
			}],
			current: EntryId(0),
			observers: Vec::new(),
		}
	}

	/// The root entry's id.
	pub fn root(&self) -> EntryId {
		EntryId(0)
	}

	/// Id of the current entry.
	pub fn current_id(&self) -> EntryId {
		self.current
	}

	/// The current entry.
	pub fn current(&self) -> &HistoryEntry<S> {
		&self.entries[self.current.0]
	}

	/// Looks up an entry by id.
	pub fn entry(&self, id: EntryId) -> Option<&HistoryEntry<S>> {
		self.entries.get(id.0)
	}

	/// State snapshot held by an entry.
	pub fn get_state(&self, id: EntryId) -> Option<&S> {
		self.entry(id).map(HistoryEntry::state)
	}

	/// The current state.
	pub fn state(&self) -> &S {
		self.current().state()
	}

	/// Total number of entries, root included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the arena holds no entries. False in practice, since the
	/// root is created at construction.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Registers an observer for the slice produced by `select`.
	///
	/// `notify` fires with the new state whenever the slice differs between
	/// the previous and new current entry, and once unconditionally from
	/// [`ProvenanceGraph::done`].
	pub fn add_observer<V, Sel, F>(&mut self, select: Sel, mut notify: F)
	where
		V: PartialEq,
		Sel: Fn(&S) -> V + 'static,
		F: FnMut(&S) + 'static,
	{
		self.observers.push(Box::new(move |old, new| match old {
			None => notify(new),
			Some(old) => {
				if select(old) != select(new) {
					notify(new);
				}
			}
		}));
	}

	/// Finishes observer registration, firing every observer once against
	/// the current state so the initial render is in sync.
	pub fn done(&mut self) {
		let state = self.state().clone();
		self.notify(None, state);
	}

	/// Applies an action: snapshots the mutated state as a new child of the
	/// current entry and moves the pointer there.
	pub fn apply(&mut self, action: ActionDescriptor<S>) -> EntryId {
		let old = self.state().clone();
		let mut next = old.clone();
		action.run(&mut next);

		let id = EntryId(self.entries.len());
		self.entries.push(HistoryEntry {
			id,
			label: action.label().to_string(),
			event: Some(action.event()),
			parent: Some(self.current),
			children: Vec::new(),
			state: next.clone(),
		});
		self.entries[self.current.0].children.push(id);
		self.current = id;

		self.notify(Some(old), next);
		id
	}

	/// Moves the pointer to the parent entry. No-op at the root.
	pub fn go_back_one_step(&mut self) -> bool {
		match self.current().parent() {
			Some(parent) => self.move_current(parent),
			None => false,
		}
	}

	/// Moves the pointer to the first child. No-op when there is none.
	pub fn go_forward_one_step(&mut self) -> bool {
		match self.current().children().first().copied() {
			Some(child) => self.move_current(child),
			None => false,
		}
	}

	/// Jumps the pointer to an arbitrary entry.
	pub fn go_to_node(&mut self, id: EntryId) -> bool {
		if id.0 >= self.entries.len() || id == self.current {
			return false;
		}
		self.move_current(id)
	}

	/// Flattens the tree depth-first into rows for the tree view, marking
	/// the current entry and the root-to-current path.
	pub fn rows(&self) -> Vec<HistoryRow> {
		let mut on_path = vec![false; self.entries.len()];
		let mut cursor = Some(self.current);
		while let Some(id) = cursor {
			on_path[id.0] = true;
			cursor = self.entries[id.0].parent();
		}

		let mut rows = Vec::with_capacity(self.entries.len());
		let mut stack = vec![(self.root(), 0usize)];
		while let Some((id, depth)) = stack.pop() {
			let entry = &self.entries[id.0];
			rows.push(HistoryRow {
				id,
				label: entry.label.clone(),
				event: entry.event,
				depth,
				is_current: id == self.current,
				on_path: on_path[id.0],
			});
			for &child in entry.children().iter().rev() {
				stack.push((child, depth + 1));
			}
		}
		rows
	}

	fn move_current(&mut self, to: EntryId) -> bool {
		let old = self.state().clone();
		self.current = to;
		let new = self.state().clone();
		self.notify(Some(old), new);
		true
	}

	fn notify(&mut self, old: Option<S>, new: S) {
		for observer in &mut self.observers {
			observer(old.as_ref(), &new);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::super::state::{AppState, select_node};
	use super::super::types::NodeId;
	use super::ProvenanceGraph;

	fn select(id: &str) -> super::super::state::ActionDescriptor<AppState> {
		select_node(Some((NodeId::from(id), id.to_string())))
	}

	#[test]
	fn undo_redo_round_trip() {
		let mut prov = ProvenanceGraph::new(AppState::default());
		assert!(!prov.is_empty(), "the root exists from construction");
		prov.apply(select("A"));
		prov.apply(select("B"));
		assert_eq!(prov.len(), 3);
		assert_eq!(prov.state().selected, Some(NodeId::from("B")));

		assert!(prov.go_back_one_step());
		assert_eq!(prov.state().selected, Some(NodeId::from("A")));
		assert!(prov.go_back_one_step());
		assert_eq!(prov.state().selected, None);
		// At root: no-op.
		assert!(!prov.go_back_one_step());

		assert!(prov.go_forward_one_step());
		assert_eq!(prov.state().selected, Some(NodeId::from("A")));
		assert!(prov.go_forward_one_step());
		assert_eq!(prov.state().selected, Some(NodeId::from("B")));
		assert!(!prov.go_forward_one_step());
	}

	#[test]
	fn action_after_undo_branches_without_deleting() {
		let mut prov = ProvenanceGraph::new(AppState::default());
		let a = prov.apply(select("A"));
		let b = prov.apply(select("B"));
		prov.go_back_one_step();
		let c = prov.apply(select("C"));

		// Both branches hang off A; B is still reachable.
		assert_eq!(prov.entry(a).unwrap().children(), &[b, c]);
		assert_eq!(
			prov.get_state(b).unwrap().selected,
			Some(NodeId::from("B"))
		);
		// Redo from A follows the first child.
		prov.go_back_one_step();
		prov.go_forward_one_step();
		assert_eq!(prov.current_id(), b);
	}

	#[test]
	fn jump_reaches_arbitrary_entries() {
		let mut prov = ProvenanceGraph::new(AppState::default());
		let a = prov.apply(select("A"));
		prov.apply(select("B"));
		assert!(prov.go_to_node(a));
		assert_eq!(prov.state().selected, Some(NodeId::from("A")));
		// Jumping to the current entry is a no-op.
		assert!(!prov.go_to_node(a));
	}

	#[test]
	fn observers_fire_on_every_path_change_but_only_when_sliced_value_differs() {
		let mut prov = ProvenanceGraph::new(AppState::default());
		let seen: Rc<RefCell<Vec<Option<NodeId>>>> = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		prov.add_observer(
			|s: &AppState| s.selected.clone(),
			move |s| sink.borrow_mut().push(s.selected.clone()),
		);
		prov.done();
		assert_eq!(&*seen.borrow(), &[None]);

		let a = prov.apply(select("A"));
		prov.apply(select("B"));
		prov.go_back_one_step();
		prov.go_forward_one_step();
		prov.go_to_node(a);
		assert_eq!(
			&*seen.borrow(),
			&[
				None,
				Some(NodeId::from("A")),
				Some(NodeId::from("B")),
				Some(NodeId::from("A")),
				Some(NodeId::from("B")),
				Some(NodeId::from("A")),
			]
		);

		// A transition that leaves the slice unchanged stays silent.
		let before = seen.borrow().len();
		prov.apply(super::super::state::hover_node(Some((
			NodeId::from("Z"),
			"Z".to_string(),
		))));
		assert_eq!(seen.borrow().len(), before);
	}

	#[test]
	fn rows_flatten_depth_first_with_path_marks() {
		let mut prov = ProvenanceGraph::new(AppState::default());
		let a = prov.apply(select("A"));
		prov.apply(select("B"));
		prov.go_back_one_step();
		let c = prov.apply(select("C"));

		let rows = prov.rows();
		assert_eq!(rows.len(), 4);
		assert_eq!(rows[0].label, "Root");
		assert_eq!(rows[0].depth, 0);
		assert!(rows[0].on_path);
		// Current is C; B is recorded but off the active path.
		let b_row = rows.iter().find(|r| r.label == "B Selected").unwrap();
		assert!(!b_row.on_path);
		let c_row = rows.iter().find(|r| r.id == c).unwrap();
		assert!(c_row.is_current && c_row.on_path);
		assert_eq!(rows.iter().find(|r| r.id == a).unwrap().depth, 1);
		assert_eq!(c_row.depth, 2);
	}
}
