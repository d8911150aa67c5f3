//! History tree view.
//!
//! Renders the flattened provenance rows as an indented, clickable list.
//! Clicking a row requests a jump through the shared signal; the explorer
//! component consumes the request and republishes the rows, so the view
//! is always a pure function of the signal.

use leptos::prelude::*;

use crate::components::graph::{EntryId, HistoryRow};

/// Renders the branching interaction history as an indented tree.
///
/// Rows arrive on `rows` from the explorer; clicks publish the target
/// entry on `jump_to`.
#[component]
pub fn HistoryTreeView(
	/// Flattened history rows, depth-first.
	rows: RwSignal<Vec<HistoryRow>>,
	/// Jump requests consumed by the explorer.
	jump_to: RwSignal<Option<EntryId>>,
) -> impl IntoView {
	view! {
		<div class="history-tree">
			<h2>"History"</h2>
			<ul>
				{move || {
					rows.get()
						.into_iter()
						.map(|row| {
							let indent = format!("padding-left: {}px;", row.depth * 14);
							let class = match (row.is_current, row.on_path) {
								(true, _) => "history-row current",
								(false, true) => "history-row",
								(false, false) => "history-row off-path",
							};
							let event = row
								.event
								.map(|e| e.to_string())
								.unwrap_or_default();
							let id = row.id;
							view! {
								<li
									class=class
									style=indent
									title=event
									on:click=move |_| jump_to.set(Some(id))
								>
									{row.label}
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}
