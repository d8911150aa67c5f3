//! Canvas rendering for the explorer.
//!
//! Draws in passes for correct z-ordering: background (screen space), then
//! links and nodes under the pan/zoom transform (world space), then the
//! hover tooltip back in screen space. All colors come pre-resolved on the
//! simulation bodies; this module never consults the dataset.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::sim::{NodeBody, SimulationState};
use super::theme::Theme;
use super::types::NodeId;

/// Renders the complete graph to the canvas.
pub fn render(
	sim: &SimulationState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	hovered: Option<&NodeId>,
) {
	let scale = ScaledValues::new(config, sim.transform.k);

	draw_background(sim, ctx, theme);

	ctx.save();
	let _ = ctx.translate(sim.transform.x, sim.transform.y);
	let _ = ctx.scale(sim.transform.k, sim.transform.k);

	draw_links(sim, ctx, &scale, theme);
	draw_nodes(sim, ctx, &scale, theme);

	ctx.restore();

	if let Some(id) = hovered {
		draw_tooltip(sim, ctx, id);
	}
}

fn draw_background(sim: &SimulationState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				sim.width / 2.0,
				sim.height / 2.0,
				0.0,
				sim.width / 2.0,
				sim.height / 2.0,
				(sim.width.max(sim.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, sim.width, sim.height);
}

fn draw_links(
	sim: &SimulationState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_line_width(scale.link_width);
	sim.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let stroke = sim
			.stroke_between(&n1.data.user_data.id, &n2.data.user_data.id)
			.unwrap_or(theme.highlight.link_default_stroke);
		ctx.set_stroke_style_str(&stroke.to_css());

		// Trim the segment so it meets the node circles, not their centers.
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
		ctx.line_to(x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
		ctx.stroke();
	});
}

fn draw_nodes(
	sim: &SimulationState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	sim.graph.visit_nodes(|node| {
		draw_node(ctx, &node.data.user_data, node.x() as f64, node.y() as f64, scale, theme);
	});
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	body: &NodeBody,
	x: f64,
	y: f64,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let radius = scale.node_radius;

	if theme.node_gradient {
		let gradient = ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.unwrap();

		let highlight = body.fill.lighten(0.4);
		let shadow = body.fill.darken(0.2);

		gradient.add_color_stop(0.0, &highlight.to_css()).unwrap();
		gradient.add_color_stop(0.7, &body.fill.to_css()).unwrap();
		gradient.add_color_stop(1.0, &shadow.to_css()).unwrap();

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	} else {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&body.fill.to_css());
		ctx.fill();
	}

	ctx.set_fill_style_str(&body.text.to_css());
	ctx.set_font(&scale.label_font);
	let _ = ctx.fill_text(&body.label, x + radius + 4.0, y + 3.0);
}

fn draw_tooltip(sim: &SimulationState, ctx: &CanvasRenderingContext2d, id: &NodeId) {
	let mut target: Option<(String, f64, f64)> = None;
	sim.graph.visit_nodes(|node| {
		let body = &node.data.user_data;
		if body.id == *id {
			target = Some((
				format!("{} (#{})", body.label, body.id),
				node.x() as f64,
				node.y() as f64,
			));
		}
	});
	let Some((text, gx, gy)) = target else {
		return;
	};

	let sx = gx * sim.transform.k + sim.transform.x;
	let sy = gy * sim.transform.k + sim.transform.y;

	ctx.set_font("11px sans-serif");
	let width = ctx
		.measure_text(&text)
		.map(|m| m.width())
		.unwrap_or(text.len() as f64 * 6.0);

	let (pad, line) = (6.0, 14.0);
	ctx.set_fill_style_str("rgba(15, 18, 24, 0.85)");
	ctx.fill_rect(sx + 12.0, sy - line, width + pad * 2.0, line + pad);
	ctx.set_fill_style_str("rgba(235, 238, 245, 0.95)");
	let _ = ctx.fill_text(&text, sx + 12.0 + pad, sy - 3.0);
}
