//! Forces layered on top of the `force_graph` integrator: pairwise collision
//! and the positional bias that spreads node kinds along the x axis.
//!
//! Both return per-node displacements rather than mutating, so the caller can
//! skip pinned nodes.

/// Share of the overlap resolved per tick.
pub const COLLIDE_STRENGTH: f32 = 0.7;
/// Pull towards the kind's column and the horizontal midline, per second.
pub const BIAS_STRENGTH: f32 = 0.5;

/// Displacements pushing apart nodes closer than twice `radius`.
pub fn collide(points: &[(f32, f32)], radius: f32) -> Vec<(f32, f32)> {
	let mut moves = vec![(0.0, 0.0); points.len()];
	let min_dist = 2.0 * radius;
	for i in 0..points.len() {
		for j in (i + 1)..points.len() {
			let (dx, dy) = (points[j].0 - points[i].0, points[j].1 - points[i].1);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist >= min_dist {
				continue;
			}
			// coincident points get split along a fixed jitter direction
			let (ux, uy) = if dist > 1e-3 {
				(dx / dist, dy / dist)
			} else {
				let a = (i * 31 + j * 17) as f32;
				(a.cos(), a.sin())
			};
			let push = (min_dist - dist) * 0.5 * COLLIDE_STRENGTH;
			moves[i].0 -= ux * push;
			moves[i].1 -= uy * push;
			moves[j].0 += ux * push;
			moves[j].1 += uy * push;
		}
	}
	moves
}

/// Column of a kind: slot `index` of `count` across `width`, centred on 0.
pub fn column_x(index: usize, count: usize, width: f32) -> f32 {
	if count == 0 {
		return 0.0;
	}
	(index as f32 / count as f32 - 0.5) * width
}

/// Displacement easing `point` towards (`target_x`, 0) over `dt` seconds.
pub fn bias(point: (f32, f32), target_x: f32, dt: f32) -> (f32, f32) {
	let s = (BIAS_STRENGTH * dt).min(1.0);
	((target_x - point.0) * s, -point.1 * s)
}
