//! Force-simulation render surface state.
//!
//! Wraps the `force_graph` physics simulation with the view transform for
//! pan/zoom and in-progress drag/pan tracking. The simulation holds exactly
//! the controller's visible subgraph: [`SimulationState::apply_update`]
//! adds and removes nodes per diff while keeping the positions of surviving
//! nodes, so layout is preserved across focus changes.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::controller::SubgraphUpdate;
use super::style::StyleSheet;
use super::theme::Color;
use super::types::{GraphLink, GraphNode, LinkKey, NodeId};

/// Per-node render data attached to each simulation node.
#[derive(Clone, Debug)]
pub struct NodeBody {
	/// Dataset id of this node.
	pub id: NodeId,
	/// Display label.
	pub label: String,
	/// Resolved fill color.
	pub fill: Color,
	/// Resolved label color.
	pub text: Color,
}

impl NodeBody {
	fn new(node: &GraphNode, styles: &StyleSheet) -> Self {
		let fallback = Color::rgb(128, 128, 128);
		Self {
			id: node.id.clone(),
			label: node.label.clone(),
			fill: styles.node_fill.get(&node.id).copied().unwrap_or(fallback),
			text: styles.node_text.get(&node.id).copied().unwrap_or(fallback),
		}
	}
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<(DefaultNodeIdx, NodeId)>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Whether the pointer traveled far enough to count as a real drag
	/// rather than a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer travel (screen px) below which a drag release counts as a click.
const CLICK_SLOP: f64 = 3.0;

fn sim_params() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

/// Simulation, transform and interaction state for the canvas.
pub struct SimulationState {
	pub graph: ForceGraph<NodeBody, ()>,
	index: HashMap<NodeId, DefaultNodeIdx>,
	links: Vec<GraphLink>,
	strokes: HashMap<LinkKey, Color>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	seeded: usize,
}

impl SimulationState {
	/// Creates an empty simulation; nodes arrive through updates.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: ForceGraph::new(sim_params()),
			index: HashMap::new(),
			links: Vec::new(),
			strokes: HashMap::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			animation_running: true,
			seeded: 0,
		}
	}

	/// Applies one controller update: structural diff plus styles.
	///
	/// Additions are incremental. Removals rebuild the simulation from the
	/// survivors, carrying their positions over, because the simulation API
	/// in use has no node removal.
	pub fn apply_update(
		&mut self,
		update: &SubgraphUpdate,
		lookup: impl Fn(&NodeId) -> Option<GraphNode>,
	) {
		let diff = &update.diff;
		if !diff.removed_nodes.is_empty() || !diff.removed_links.is_empty() {
			let removed_nodes: HashSet<NodeId> = diff.removed_nodes.iter().cloned().collect();
			let removed_links: HashSet<LinkKey> = diff.removed_links.iter().cloned().collect();
			self.links.retain(|l| !removed_links.contains(&l.key()));
			self.links.extend(diff.added_links.iter().cloned());

			let mut kept: Vec<(NodeBody, Option<(f32, f32, bool)>)> = Vec::new();
			self.graph.visit_nodes(|node| {
				if !removed_nodes.contains(&node.data.user_data.id) {
					kept.push((
						node.data.user_data.clone(),
						Some((node.x(), node.y(), node.data.is_anchor)),
					));
				}
			});
			for id in &diff.added_nodes {
				if let Some(node) = lookup(id) {
					kept.push((NodeBody::new(&node, &update.styles), None));
				}
			}
			self.rebuild(kept);
		} else {
			self.links.extend(diff.added_links.iter().cloned());
			for id in &diff.added_nodes {
				if self.index.contains_key(id) {
					continue;
				}
				if let Some(node) = lookup(id) {
					let (x, y) = self.seed_position();
					let idx = self.graph.add_node(NodeData {
						x,
						y,
						mass: 10.0,
						is_anchor: false,
						user_data: NodeBody::new(&node, &update.styles),
					});
					self.index.insert(id.clone(), idx);
				}
			}
			for link in &diff.added_links {
				if let (Some(&a), Some(&b)) =
					(self.index.get(&link.source), self.index.get(&link.target))
				{
					self.graph.add_edge(a, b, EdgeData::default());
				}
			}
		}

		self.strokes = update.styles.link_stroke.clone();
		self.graph.visit_nodes_mut(|node| {
			let body = &mut node.data.user_data;
			if let Some(c) = update.styles.node_fill.get(&body.id) {
				body.fill = *c;
			}
			if let Some(c) = update.styles.node_text.get(&body.id) {
				body.text = *c;
			}
		});
	}

	/// Resolved stroke for the link between `a` and `b`, if styled.
	pub fn stroke_between(&self, a: &NodeId, b: &NodeId) -> Option<Color> {
		self.strokes
			.get(&(a.clone(), b.clone()))
			.or_else(|| self.strokes.get(&(b.clone(), a.clone())))
			.copied()
	}

	/// Converts screen coordinates to graph (world) coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// The topmost node under the given screen position, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		hit_radius: f64,
	) -> Option<(DefaultNodeIdx, NodeId)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some((node.index(), node.data.user_data.id.clone()));
			}
		});
		found
	}

	/// Begins dragging the node under the pointer.
	pub fn start_drag(&mut self, idx: DefaultNodeIdx, id: NodeId, sx: f64, sy: f64) {
		self.drag.active = true;
		self.drag.node = Some((idx, id));
		self.drag.start_x = sx;
		self.drag.start_y = sy;
		self.drag.moved = false;
		let (mut nx, mut ny) = (0.0f32, 0.0f32);
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				nx = node.x();
				ny = node.y();
			}
		});
		self.drag.node_start_x = nx;
		self.drag.node_start_y = ny;
	}

	/// Moves the dragged node with the pointer, anchoring it in place.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some((idx, _)) = self.drag.node else {
			return;
		};
		let travel = ((sx - self.drag.start_x).powi(2) + (sy - self.drag.start_y).powi(2)).sqrt();
		if travel > CLICK_SLOP {
			self.drag.moved = true;
		}
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Ends the drag, returning the node and whether it actually moved.
	pub fn end_drag(&mut self) -> Option<(NodeId, bool)> {
		let result = self
			.drag
			.node
			.take()
			.map(|(_, id)| (id, self.drag.moved));
		self.drag.active = false;
		self.drag.moved = false;
		result
	}

	/// Zooms by `factor` around a screen-space anchor point.
	pub fn zoom_around(&mut self, factor: f64, cx: f64, cy: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = cx - (cx - self.transform.x) * ratio;
		self.transform.y = cy - (cy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Zooms by `factor` around the canvas center.
	pub fn zoom_step(&mut self, factor: f64) {
		self.zoom_around(factor, self.width / 2.0, self.height / 2.0);
	}

	/// Restores the initial centered transform at 100% zoom.
	pub fn reset_zoom(&mut self) {
		self.transform = ViewTransform {
			x: self.width / 2.0,
			y: self.height / 2.0,
			k: 1.0,
		};
	}

	/// Advances the physics simulation by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	/// Updates the canvas dimensions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn rebuild(&mut self, bodies: Vec<(NodeBody, Option<(f32, f32, bool)>)>) {
		let mut graph = ForceGraph::new(sim_params());
		let mut index = HashMap::with_capacity(bodies.len());
		for (body, pos) in bodies {
			let (x, y, anchor) = match pos {
				Some(p) => p,
				None => {
					let (x, y) = self.seed_position();
					(x, y, false)
				}
			};
			let id = body.id.clone();
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: anchor,
				user_data: body,
			});
			index.insert(id, idx);
		}
		for link in &self.links {
			if let (Some(&a), Some(&b)) = (index.get(&link.source), index.get(&link.target)) {
				graph.add_edge(a, b, EdgeData::default());
			}
		}
		self.graph = graph;
		self.index = index;
	}

	fn seed_position(&mut self) -> (f32, f32) {
		// Golden-angle spiral around the origin keeps fresh nodes spread out.
		let golden = PI * (3.0 - 5.0_f64.sqrt());
		let angle = self.seeded as f64 * golden;
		let radius = 80.0 + 14.0 * (self.seeded as f64).sqrt() * 4.0;
		self.seeded += 1;
		((radius * angle.cos()) as f32, (radius * angle.sin()) as f32)
	}
}
