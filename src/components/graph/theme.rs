//! Visual theming for the explorer.
//!
//! Provides the color type, the highlight palette consumed by the style
//! resolver, and background styling for the canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors assigned by the style resolver.
///
/// The scheme distinguishes the focus node itself, its direct neighborhood
/// (with a variant for level-1 root nodes), and the unfocused defaults
/// (again split by level).
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightPalette {
	/// Fill of the focus node itself.
	pub focus_fill: Color,
	/// Fill of a level-1 neighbor of the focus.
	pub neighbor_root_fill: Color,
	/// Fill of any other neighbor of the focus.
	pub neighbor_fill: Color,
	/// Default fill of a level-1 node.
	pub root_fill: Color,
	/// Default fill of any other node.
	pub default_fill: Color,
	/// Label color of the focus node.
	pub focus_text: Color,
	/// Label color of a level-1 neighbor.
	pub neighbor_root_text: Color,
	/// Label color of any other neighbor.
	pub neighbor_text: Color,
	/// Default label color of a level-1 node.
	pub root_text: Color,
	/// Default label color of any other node.
	pub default_text: Color,
	/// Stroke of a link touching the focus node.
	pub link_focus_stroke: Color,
	/// Default link stroke.
	pub link_default_stroke: Color,
}

impl Default for HighlightPalette {
	fn default() -> Self {
		Self {
			focus_fill: Color::rgb(65, 105, 225),
			neighbor_root_fill: Color::rgb(85, 125, 235),
			neighbor_fill: Color::rgb(27, 180, 127),
			root_fill: Color::rgb(205, 92, 85),
			default_fill: Color::rgb(150, 155, 162),
			focus_text: Color::rgb(255, 255, 255),
			neighbor_root_text: Color::rgb(170, 195, 250),
			neighbor_text: Color::rgb(120, 220, 180),
			root_text: Color::rgb(235, 190, 188),
			default_text: Color::rgb(210, 214, 220),
			link_focus_stroke: Color::rgba(27, 180, 127, 0.9),
			link_default_stroke: Color::rgba(140, 160, 180, 0.5),
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	/// Whether nodes are shaded with an inner gradient.
	pub node_gradient: bool,
	/// Colors used by the style resolver.
	pub highlight: HighlightPalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			node_gradient: true,
			highlight: HighlightPalette::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Color;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(10, 20, 30, 0.5).to_css(), "rgba(10, 20, 30, 0.5)");
	}

	#[test]
	fn lighten_darken_clamp() {
		assert_eq!(Color::rgb(100, 100, 100).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(100, 100, 100).darken(1.0), Color::rgb(0, 0, 0));
	}
}
