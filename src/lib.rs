//! graphtrail: interactive force-directed graph exploration with a
//! recorded, branching interaction history.
//!
//! This crate provides a WASM-based explorer that renders a node/link
//! graph with physics-based layout, records every selection, hover, drag
//! and added node in a provenance tree, and lets the user undo, redo and
//! jump to any recorded state through a history tree view.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::graph::{
	EntryId, ExplorerController, GraphData, GraphExplorer, GraphLink, GraphNode, HistoryRow,
	NodeId, Theme,
};
pub use components::prov_vis::HistoryTreeView;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graphtrail: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"graphtrail: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("graphtrail: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph data from the DOM (falling back to the bundled demo set)
/// and renders the explorer next to its history tree.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(|| {
		info!("graphtrail: no embedded graph data, using the demo dataset");
		components::graph::fixtures::demo()
	});

	let history = RwSignal::new(Vec::<HistoryRow>::new());
	let jump_to = RwSignal::new(None::<EntryId>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Graph Provenance Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphExplorer data=graph_data history=history jump_to=jump_to fullscreen=true />
			<div class="graph-overlay">
				<h1>"Graph Provenance Explorer"</h1>
				<p class="subtitle">
					"Click to focus a node, drag to move it, scroll to zoom. Every action lands in the history; Ctrl+Z / Ctrl+Shift+Z walk it."
				</p>
			</div>
			<div class="history-panel">
				<HistoryTreeView rows=history jump_to=jump_to />
			</div>
		</div>
	}
}
