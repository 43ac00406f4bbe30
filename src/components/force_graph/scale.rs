//! Pan/zoom transform and its animated transitions.

use crate::config::SCALE_EXTENT;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn ease_quad_out(t: f64) -> f64 {
	t * (2.0 - t)
}

/// Screen = graph * k + (x, y).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Scale by `factor` keeping the screen point (`sx`, `sy`) fixed.
	pub fn zoomed_about(&self, sx: f64, sy: f64, factor: f64) -> Self {
		let k = (self.k * factor).clamp(SCALE_EXTENT.0, SCALE_EXTENT.1);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	/// Same scale, graph point (`gx`, `gy`) moved to the viewport centre.
	pub fn centered_on(&self, gx: f64, gy: f64, width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0 - gx * self.k,
			y: height / 2.0 - gy * self.k,
			k: self.k,
		}
	}

	/// Transform showing the graph-space box with a margin.
	pub fn fitting(
		(min_x, min_y): (f64, f64),
		(max_x, max_y): (f64, f64),
		width: f64,
		height: f64,
	) -> Self {
		let (bw, bh) = ((max_x - min_x).max(1.0), (max_y - min_y).max(1.0));
		let k = (0.9 * (width / bw).min(height / bh)).clamp(SCALE_EXTENT.0, SCALE_EXTENT.1);
		let fit = Self { x: 0.0, y: 0.0, k };
		fit.centered_on((min_x + max_x) / 2.0, (min_y + max_y) / 2.0, width, height)
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Why a transition was started; deselection cancels recentring only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	Zoom,
	Recenter,
}

/// Eased interpolation between two transforms.
#[derive(Clone, Debug)]
pub struct ZoomAnimation {
	pub from: ViewTransform,
	pub to: ViewTransform,
	pub kind: Transition,
	elapsed: f64,
	duration: f64,
}

impl ZoomAnimation {
	pub fn new(from: ViewTransform, to: ViewTransform, duration: f64, kind: Transition) -> Self {
		Self {
			from,
			to,
			kind,
			elapsed: 0.0,
			duration,
		}
	}

	/// Advance by `dt` seconds; returns the transform to show and whether
	/// the animation is over.
	pub fn step(&mut self, dt: f64) -> (ViewTransform, bool) {
		self.elapsed += dt;
		if self.duration <= 0.0 || self.elapsed >= self.duration {
			return (self.to, true);
		}
		let t = ease_quad_out(self.elapsed / self.duration);
		(self.from.lerp(&self.to, t), false)
	}
}
