//! Tunables for the layout, the view and search.
//!
//! There is no runtime configuration surface; everything lives here as
//! constants, plus the live-tunable [`ForceParams`].

use std::ops::RangeInclusive;

/// Canvas fill, also composited under raster exports.
pub const BACKGROUND: &str = "#151515";

/// Node radius when a node carries no explicit size.
pub const NODE_RADIUS: f64 = 12.0;
/// Selected nodes are drawn this many times larger.
pub const SELECTED_SCALE: f64 = 3.0;
pub const SELECTED_STROKE: &str = "#F15838";
pub const SELECTED_STROKE_WIDTH: f64 = 3.0;

/// Bounds of the zoom transform scale.
pub const SCALE_EXTENT: (f64, f64) = (0.01, 7.0);
/// Multiplicative step of the zoom buttons.
pub const ZOOM_STEP: f64 = 1.2;
pub const ZOOM_STEP_SECS: f64 = 0.3;
pub const RECENTER_SECS: f64 = 0.75;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Fuzzy match threshold: 0 is a perfect match, 1 matches anything.
pub const SEARCH_THRESHOLD: f64 = 0.4;
pub const SEARCH_LIMIT: usize = 10;

/// Value of the upload input's `accept` attribute.
pub const ACCEPTED_FILES: &str = ".rdf,.owl,.xml,.ttl";

pub const COLLIDE_RANGE: RangeInclusive<f64> = 20.0..=200.0;
pub const STRENGTH_RANGE: RangeInclusive<f64> = -10000.0..=-1000.0;
pub const DISTANCE_RANGE: RangeInclusive<f64> = 30.0..=200.0;

/// The three live knobs of the force layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
	/// Pairwise collision radius.
	pub collide: f64,
	/// Charge-style repulsion; more negative pushes harder.
	pub strength: f64,
	/// Target link length.
	pub distance: f64,
}

impl Default for ForceParams {
	fn default() -> Self {
		Self {
			collide: 65.0,
			strength: -8000.0,
			distance: 60.0,
		}
	}
}

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
	value.clamp(*range.start(), *range.end())
}

impl ForceParams {
	/// Copy with the collision radius set, clamped into [`COLLIDE_RANGE`].
	pub fn with_collide(self, collide: f64) -> Self {
		Self {
			collide: clamp_to(collide, &COLLIDE_RANGE),
			..self
		}
	}

	/// Copy with the charge strength set, clamped into [`STRENGTH_RANGE`].
	pub fn with_strength(self, strength: f64) -> Self {
		Self {
			strength: clamp_to(strength, &STRENGTH_RANGE),
			..self
		}
	}

	/// Copy with the link distance set, clamped into [`DISTANCE_RANGE`].
	pub fn with_distance(self, distance: f64) -> Self {
		Self {
			distance: clamp_to(distance, &DISTANCE_RANGE),
			..self
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_sit_inside_their_ranges() {
		let p = ForceParams::default();
		assert!(COLLIDE_RANGE.contains(&p.collide));
		assert!(STRENGTH_RANGE.contains(&p.strength));
		assert!(DISTANCE_RANGE.contains(&p.distance));
	}

	#[test]
	fn setters_clamp() {
		let p = ForceParams::default()
			.with_collide(500.0)
			.with_strength(0.0)
			.with_distance(1.0);
		assert_eq!(p.collide, 200.0);
		assert_eq!(p.strength, -1000.0);
		assert_eq!(p.distance, 30.0);
	}

	#[test]
	fn setters_keep_other_fields() {
		let p = ForceParams::default().with_distance(120.0);
		assert_eq!(p.distance, 120.0);
		assert_eq!(p.collide, 65.0);
		assert_eq!(p.strength, -8000.0);
	}
}
