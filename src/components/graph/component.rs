//! Leptos component wrapping the explorer canvas.
//!
//! The component creates an HTML canvas, wires mouse/wheel/keyboard handlers
//! and runs the physics/render loop via `requestAnimationFrame`. Every user
//! gesture goes through the [`ExplorerController`]; the resulting subgraph
//! updates are drained into the simulation and the flattened history rows
//! are published on a signal for the tree view alongside.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::controller::{ExplorerController, PromptSource};
use super::provenance::{EntryId, HistoryRow};
use super::render;
use super::scale::{ScaleConfig, ScaledValues};
use super::sim::SimulationState;
use super::theme::Theme;
use super::types::GraphData;

/// Bundles the controller with its render surface and visual configuration.
struct GraphContext {
	controller: ExplorerController,
	sim: SimulationState,
	scale: ScaleConfig,
	theme: Theme,
}

/// Prompt source backed by `window.prompt`.
struct WindowPrompts;

impl PromptSource for WindowPrompts {
	fn prompt(&mut self, message: &str) -> Option<String> {
		web_sys::window()?
			.prompt_with_message(message)
			.ok()
			.flatten()
	}
}

/// Renders the interactive graph explorer on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
/// History rows and jump requests flow through the two signals so a tree
/// view can live anywhere in the page.
#[component]
pub fn GraphExplorer(
	data: GraphData,
	/// Receives the flattened history rows after every recorded action.
	history: RwSignal<Vec<HistoryRow>>,
	/// Set to an entry id to jump the session there; consumed on use.
	jump_to: RwSignal<Option<EntryId>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let data = RefCell::new(Some(data));
	let (context_init, animate_init, resize_cb_init, keydown_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(data) = data.borrow_mut().take() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let theme = Theme::default();
		let controller = match ExplorerController::new(data, theme.highlight.clone()) {
			Ok(controller) => controller,
			Err(e) => {
				error!("graph data rejected: {e}");
				return;
			}
		};

		let mut graph_context = GraphContext {
			controller,
			sim: SimulationState::new(w, h),
			scale: ScaleConfig::default(),
			theme,
		};
		apply_pending(&mut graph_context, history);
		*context_init.borrow_mut() = Some(graph_context);

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.sim.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// Ctrl+Z / Cmd+Z undoes, with Shift redoes. Registered on the window
		// so the canvas does not need focus.
		let context_keys = context_init.clone();
		let is_mac = window
			.navigator()
			.platform()
			.map(|p| p.contains("Mac"))
			.unwrap_or(false);
		*keydown_init.borrow_mut() = Some(Closure::new(move |ev: web_sys::KeyboardEvent| {
			let modifier = if is_mac { ev.meta_key() } else { ev.ctrl_key() };
			if !modifier || !ev.key().eq_ignore_ascii_case("z") {
				return;
			}
			ev.prevent_default();
			if let Some(ref mut c) = *context_keys.borrow_mut() {
				if ev.shift_key() {
					c.controller.redo();
				} else {
					c.controller.undo();
				}
				apply_pending(c, history);
			}
		}));
		if let Some(ref cb) = *keydown_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.sim.animation_running {
					c.sim.tick(0.016);
				}
				let hovered = c.controller.state().hovered;
				render::render(&c.sim, &ctx, &c.scale, &c.theme, hovered.as_ref());
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// External jump requests from the tree view.
	let context_jump = context.clone();
	Effect::new(move |_| {
		let Some(entry) = jump_to.get() else {
			return;
		};
		if let Some(ref mut c) = *context_jump.borrow_mut() {
			c.controller.jump(entry);
			apply_pending(c, history);
		}
		jump_to.set(None);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			let hit = ScaledValues::new(&c.scale, c.sim.transform.k).hit_radius;
			if let Some((idx, id)) = c.sim.node_at_position(x, y, hit) {
				c.sim.start_drag(idx, id, x, y);
			} else {
				c.sim.pan.active = true;
				c.sim.pan.start_x = x;
				c.sim.pan.start_y = y;
				c.sim.pan.transform_start_x = c.sim.transform.x;
				c.sim.pan.transform_start_y = c.sim.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.sim.drag.active {
				c.sim.drag_to(x, y);
			} else if c.sim.pan.active {
				c.sim.transform.x = c.sim.pan.transform_start_x + (x - c.sim.pan.start_x);
				c.sim.transform.y = c.sim.pan.transform_start_y + (y - c.sim.pan.start_y);
			} else {
				let hit = ScaledValues::new(&c.scale, c.sim.transform.k).hit_radius;
				let hovered = c.sim.node_at_position(x, y, hit).map(|(_, id)| id);
				// Only forward actual transitions; plain pointer travel over
				// empty space must not republish the history.
				if hovered != c.controller.state().hovered {
					c.controller.hover(hovered.as_ref());
					apply_pending(c, history);
				}
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if let Some((id, moved)) = c.sim.end_drag() {
				// A release without travel is a click: select instead of
				// recording a drag.
				if moved {
					c.controller.drag_end(&id);
				} else {
					c.controller.select(&id);
				}
				apply_pending(c, history);
			}
			c.sim.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			let _ = c.sim.end_drag();
			c.sim.pan.active = false;
			c.controller.hover(None);
			apply_pending(c, history);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.sim.zoom_around(factor, x, y);
		}
	};

	let context_add = context.clone();
	let on_add = move |_| {
		if let Some(ref mut c) = *context_add.borrow_mut() {
			c.controller.add_node_flow(&mut WindowPrompts);
			apply_pending(c, history);
		}
	};

	let context_zi = context.clone();
	let on_zoom_in = move |_| {
		if let Some(ref mut c) = *context_zi.borrow_mut() {
			c.sim.zoom_step(1.25);
		}
	};
	let context_zo = context.clone();
	let on_zoom_out = move |_| {
		if let Some(ref mut c) = *context_zo.borrow_mut() {
			c.sim.zoom_step(0.8);
		}
	};
	let context_zr = context.clone();
	let on_zoom_reset = move |_| {
		if let Some(ref mut c) = *context_zr.borrow_mut() {
			c.sim.reset_zoom();
		}
	};

	view! {
		<div class="graph-explorer">
			<canvas
				node_ref=canvas_ref
				class="graph-explorer-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-controls">
				<button on:click=on_add>"Add node"</button>
				<button on:click=on_zoom_in>"+"</button>
				<button on:click=on_zoom_out>"\u{2212}"</button>
				<button on:click=on_zoom_reset>"Reset view"</button>
			</div>
		</div>
	}
}

/// Moves queued subgraph updates into the simulation and republishes the
/// history rows.
fn apply_pending(c: &mut GraphContext, history: RwSignal<Vec<HistoryRow>>) {
	let updates = c.controller.drain_updates();
	for update in &updates {
		let controller = &c.controller;
		c.sim.apply_update(update, |id| controller.node(id));
	}
	history.set(c.controller.history_rows());
}
