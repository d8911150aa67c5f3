//! Zoom-dependent scaling configuration for graph visuals.
//!
//! Centralizes how sizes respond to the zoom level `k` so the render pass
//! and hit testing stay in agreement.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph. Values in
//!   world-space scale proportionally with zoom.
//! - **Screen-space**: Pixel coordinates on the canvas. Values in
//!   screen-space remain constant regardless of zoom level.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// Use `f64::NEG_INFINITY` or `f64::INFINITY` for unbounded.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k, so world bounds are screen / k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Complete scale configuration for the graph view.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Base node radius in world units.
	pub node_radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Minimum zoom level for label font scaling.
	pub label_min_k: f64,
	/// Link line width in screen pixels.
	pub link_width: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			radius_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 12.0,
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			label_size: 10.0,
			label_min_k: 0.5,
			link_width: 1.5,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after the canvas transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius in world-space.
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Label font string (e.g., "10px sans-serif").
	pub label_font: String,
	/// Link line width in world-space.
	pub link_width: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.label_size / k.max(config.label_min_k);
		Self {
			k,
			node_radius: config.radius_behavior.apply(config.node_radius, k),
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			label_font: format!("{}px sans-serif", label_font_size),
			link_width: config.link_width / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{ScaleBehavior, ScaleConfig, ScaledValues};

	#[test]
	fn clamped_radius_grows_when_zoomed_out() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 5.0,
			max_screen: f64::INFINITY,
		};
		// At k=1 the base is already above the screen minimum.
		assert_eq!(behavior.apply(5.0, 1.0), 5.0);
		// Zoomed out to 25%, the world radius doubles to hold 5px on screen.
		assert_eq!(behavior.apply(5.0, 0.25), 20.0);
		// Zoomed in, the world base wins.
		assert_eq!(behavior.apply(5.0, 4.0), 5.0);
	}

	#[test]
	fn screen_behavior_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(12.0, 2.0), 6.0);
		assert_eq!(ScaleBehavior::World.apply(12.0, 2.0), 12.0);
	}

	#[test]
	fn label_font_stops_shrinking_below_min_k() {
		let config = ScaleConfig::default();
		let far_out = ScaledValues::new(&config, 0.1);
		let at_min = ScaledValues::new(&config, 0.5);
		assert_eq!(far_out.label_font, at_min.label_font);
	}
}
