use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::forces;
use super::scale::{Transition, ViewTransform, ZoomAnimation};
use crate::config::{
	ForceParams, NODE_RADIUS, RECENTER_SECS, SELECTED_SCALE, ZOOM_STEP, ZOOM_STEP_SECS,
};
use crate::graph::{GraphView, NodeKind, TypeLegend};

/// Pointer travel, in pixels, below which a press counts as a click.
const CLICK_SLOP: f64 = 3.0;
/// Extra pick tolerance around a node, in graph units.
const HIT_SLACK: f64 = 2.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// What a completed press on the canvas amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Click {
	Node(String),
	Background,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub animation: Option<ZoomAnimation>,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	params: ForceParams,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	columns: HashMap<NodeKind, f32>,
}

fn simulation_parameters(params: &ForceParams) -> SimulationParameters {
	SimulationParameters {
		force_charge: (-params.strength / 50.0) as f32,
		force_spring: (3.0 / params.distance) as f32,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

impl ForceGraphState {
	pub fn new(
		view: &GraphView<'_>,
		legend: &TypeLegend,
		params: ForceParams,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(simulation_parameters(&params));
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let total = view.nodes.len().max(1) as f64;

		for (i, node) in view.nodes.iter().enumerate() {
			// seed each cluster in its own sector
			let cluster = node.cluster.unwrap_or(0) as f64;
			let angle = (cluster + i as f64 / total) * 2.0 * PI / 6.0;
			let r = 100.0 + 40.0 * cluster;
			let idx = graph.add_node(NodeData {
				x: (r * angle.cos()) as f32,
				y: (r * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.name.clone(),
					kind: node.kind,
					color: legend.color(node.kind),
					radius: node.size.unwrap_or(NODE_RADIUS),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for edge in &view.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		let kinds = legend.kinds();
		let columns = kinds
			.iter()
			.enumerate()
			.map(|(i, k)| (*k, forces::column_x(i, kinds.len(), width as f32)))
			.collect();

		Self {
			graph,
			edges,
			id_to_idx,
			columns,
			params,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			animation: None,
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Take positions, view transform and selection over from the state this
	/// one replaces, so a parameter or filter change resettles rather than
	/// restarts the layout.
	pub fn carry_over(&mut self, old: &ForceGraphState) {
		let positions = old.positions();
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(x, y)) = positions.get(&node.data.user_data.id) {
				node.data.x = x;
				node.data.y = y;
			}
		});
		self.transform = old.transform;
		self.flow_time = old.flow_time;
		self.animation_running = old.animation_running;
		self.selected = old
			.selected_id()
			.and_then(|id| self.id_to_idx.get(&id).copied());
	}

	pub fn positions(&self) -> HashMap<String, (f32, f32)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		out
	}

	pub fn position(&self, idx: DefaultNodeIdx) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	pub fn selected_id(&self) -> Option<String> {
		self.selected
			.and_then(|idx| self.node_info(idx))
			.map(|info| info.id)
	}

	pub fn node_count(&self) -> usize {
		self.id_to_idx.len()
	}

	/// Drawn radius, including selection emphasis.
	pub fn radius_of(&self, idx: DefaultNodeIdx, base: f64) -> f64 {
		if self.selected == Some(idx) {
			base * SELECTED_SCALE
		} else {
			base
		}
	}

	pub fn set_colors(&mut self, legend: &TypeLegend) {
		self.graph.visit_nodes_mut(|node| {
			node.data.user_data.color = legend.color(node.data.user_data.kind);
		});
	}

	/// Mark `id` as the selected node and recentre on it; `None` clears the
	/// selection and drops any pending recentre.
	pub fn select(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.id_to_idx.get(id).copied());
		match self.selected.and_then(|idx| self.position(idx)) {
			Some((gx, gy)) => {
				let to = self.transform.centered_on(gx, gy, self.width, self.height);
				self.animation = Some(ZoomAnimation::new(
					self.transform,
					to,
					RECENTER_SECS,
					Transition::Recenter,
				));
			}
			None => {
				if self
					.animation
					.as_ref()
					.is_some_and(|a| a.kind == Transition::Recenter)
				{
					self.animation = None;
				}
			}
		}
	}

	/// Animated zoom about the viewport centre.
	pub fn zoom_step(&mut self, zoom_in: bool) {
		let factor = if zoom_in { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
		let from = self.animation.as_ref().map_or(self.transform, |a| a.to);
		let to = from.zoomed_about(self.width / 2.0, self.height / 2.0, factor);
		self.animation = Some(ZoomAnimation::new(
			self.transform,
			to,
			ZOOM_STEP_SECS,
			Transition::Zoom,
		));
	}

	/// Animated zoom showing every node.
	pub fn zoom_fit(&mut self) {
		let (mut min, mut max) = ((f64::MAX, f64::MAX), (f64::MIN, f64::MIN));
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let r = node.data.user_data.radius;
			min = (min.0.min(x - r), min.1.min(y - r));
			max = (max.0.max(x + r), max.1.max(y + r));
		});
		if self.id_to_idx.is_empty() {
			return;
		}
		let to = ViewTransform::fitting(min, max, self.width, self.height);
		self.animation = Some(ZoomAnimation::new(
			self.transform,
			to,
			RECENTER_SECS,
			Transition::Zoom,
		));
	}

	/// Wheel zoom, immediate, about the cursor.
	pub fn wheel(&mut self, sx: f64, sy: f64, factor: f64) {
		self.animation = None;
		self.transform = self.transform.zoomed_about(sx, sy, factor);
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let r = self.radius_of(node.index(), node.data.user_data.radius) + HIT_SLACK;
			if (dx * dx + dy * dy).sqrt() < r {
				found = Some(node.index());
			}
		});
		found
	}

	/// Press: grab the node under the pointer, or start panning.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let (nx, ny) = self.position(idx).unwrap_or_default();
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
				moved: false,
			};
			// pinned for the duration of the gesture
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = true;
				}
			});
		} else {
			self.animation = None;
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				moved: false,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			self.drag.moved |= dx.hypot(dy) > CLICK_SLOP;
			if let Some(idx) = self.drag.node_idx {
				let (nx, ny) = (
					self.drag.node_start_x + (dx / self.transform.k) as f32,
					self.drag.node_start_y + (dy / self.transform.k) as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
					}
				});
			}
		} else if self.pan.active {
			let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
			self.pan.moved |= dx.hypot(dy) > CLICK_SLOP;
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		}
	}

	/// Release: unpin a dragged node and report clicks.
	pub fn pointer_up(&mut self) -> Option<Click> {
		let click = if self.drag.active {
			let idx = self.drag.node_idx;
			if let Some(idx) = idx {
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
			match (self.drag.moved, idx.and_then(|i| self.node_info(i))) {
				(false, Some(info)) => Some(Click::Node(info.id)),
				_ => None,
			}
		} else if self.pan.active && !self.pan.moved {
			Some(Click::Background)
		} else {
			None
		};
		self.drag = DragState::default();
		self.pan = PanState::default();
		click
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.apply_layout_forces(dt);
		self.flow_time += dt as f64;

		if let Some(anim) = self.animation.as_mut() {
			let (transform, done) = anim.step(dt as f64);
			self.transform = transform;
			if done {
				self.animation = None;
			}
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Collision and kind-column bias; pinned nodes stay put.
	fn apply_layout_forces(&mut self, dt: f32) {
		let mut idxs = Vec::new();
		let mut points = Vec::new();
		let mut targets = Vec::new();
		self.graph.visit_nodes(|node| {
			idxs.push((node.index(), node.data.is_anchor));
			points.push((node.x(), node.y()));
			targets.push(
				self.columns
					.get(&node.data.user_data.kind)
					.copied()
					.unwrap_or(0.0),
			);
		});

		let pushes = forces::collide(&points, self.params.collide as f32);
		let moves: HashMap<DefaultNodeIdx, (f32, f32)> = idxs
			.iter()
			.enumerate()
			.filter(|(_, (_, pinned))| !pinned)
			.map(|(i, (idx, _))| {
				let (bx, by) = forces::bias(points[i], targets[i], dt);
				(*idx, (pushes[i].0 + bx, pushes[i].1 + by))
			})
			.collect();

		self.graph.visit_nodes_mut(|node| {
			if let Some(&(dx, dy)) = moves.get(&node.index()) {
				node.data.x += dx;
				node.data.y += dy;
			}
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, Graph, Node, TypeFilter};

	fn graph() -> Graph {
		Graph {
			nodes: vec![
				Node::new("#A", "A", NodeKind::Class),
				Node::new("#B", "B", NodeKind::Class),
				Node::new("#x", "x", NodeKind::Individual),
			],
			edges: vec![Edge {
				source: "#x".into(),
				target: "#A".into(),
				kind: "rdf:type".into(),
				label: "type".into(),
			}],
		}
	}

	fn state(g: &Graph, filter: &TypeFilter) -> ForceGraphState {
		ForceGraphState::new(
			&GraphView::new(g, filter),
			&TypeLegend::from_graph(g),
			ForceParams::default(),
			800.0,
			600.0,
		)
	}

	fn screen_pos(s: &ForceGraphState, id: &str) -> (f64, f64) {
		let idx = s.id_to_idx[id];
		let (gx, gy) = s.position(idx).unwrap();
		s.transform.graph_to_screen(gx, gy)
	}

	#[test]
	fn select_then_clear_restores_baseline() {
		let g = graph();
		let mut s = state(&g, &TypeFilter::all_of(&g));
		let baseline = s.transform;

		s.select(Some("#A"));
		assert_eq!(s.selected_id().as_deref(), Some("#A"));
		assert!(s.animation.is_some());

		s.select(None);
		assert!(s.selected.is_none());
		assert!(s.animation.is_none());
		assert_eq!(s.transform, baseline);
	}

	#[test]
	fn reselecting_is_idempotent() {
		let g = graph();
		let mut s = state(&g, &TypeFilter::all_of(&g));
		s.select(Some("#B"));
		let first = (s.selected, s.animation.as_ref().map(|a| a.to));
		s.select(Some("#B"));
		assert_eq!(first, (s.selected, s.animation.as_ref().map(|a| a.to)));
	}

	#[test]
	fn selecting_a_hidden_node_selects_nothing() {
		let g = graph();
		let mut filter = TypeFilter::all_of(&g);
		filter.set(NodeKind::Individual, false);
		let mut s = state(&g, &filter);
		assert_eq!(s.node_count(), 2);
		s.select(Some("#x"));
		assert!(s.selected.is_none());
	}

	#[test]
	fn rebuild_keeps_positions_and_selection() {
		let g = graph();
		let mut old = state(&g, &TypeFilter::all_of(&g));
		for _ in 0..10 {
			old.tick(0.016);
		}
		old.select(Some("#B"));
		let before = old.positions();

		let mut s = ForceGraphState::new(
			&GraphView::new(&g, &TypeFilter::all_of(&g)),
			&TypeLegend::from_graph(&g),
			ForceParams::default().with_distance(150.0),
			800.0,
			600.0,
		);
		s.carry_over(&old);
		assert_eq!(s.positions(), before);
		assert_eq!(s.selected_id().as_deref(), Some("#B"));
	}

	#[test]
	fn ticks_keep_positions_finite() {
		let g = graph();
		let mut s = state(&g, &TypeFilter::all_of(&g));
		for _ in 0..120 {
			s.tick(0.016);
		}
		for (x, y) in s.positions().values() {
			assert!(x.is_finite() && y.is_finite());
		}
	}

	#[test]
	fn click_on_node_and_background() {
		let g = graph();
		let mut s = state(&g, &TypeFilter::all_of(&g));
		let (sx, sy) = screen_pos(&s, "#x");
		s.pointer_down(sx, sy);
		assert_eq!(s.pointer_up(), Some(Click::Node("#x".into())));

		s.pointer_down(5.0, 5.0);
		assert_eq!(s.pointer_up(), Some(Click::Background));
	}

	#[test]
	fn drag_pins_then_releases() {
		let g = graph();
		let mut s = state(&g, &TypeFilter::all_of(&g));
		let (sx, sy) = screen_pos(&s, "#A");
		let idx = s.id_to_idx["#A"];

		s.pointer_down(sx, sy);
		s.pointer_move(sx + 40.0, sy + 10.0);
		let mut pinned = false;
		s.graph.visit_nodes(|n| {
			if n.index() == idx {
				pinned = n.data.is_anchor;
			}
		});
		assert!(pinned);
		let (gx, _) = s.position(idx).unwrap();
		let (start_gx, _) = s.transform.screen_to_graph(sx, sy);
		assert!((gx - (start_gx + 40.0)).abs() < 1e-3);

		assert_eq!(s.pointer_up(), None);
		s.graph.visit_nodes(|n| {
			if n.index() == idx {
				pinned = n.data.is_anchor;
			}
		});
		assert!(!pinned);
	}

	#[test]
	fn zoom_steps_animate_by_fixed_factor() {
		let g = graph();
		let mut s = state(&g, &TypeFilter::all_of(&g));
		s.zoom_step(true);
		for _ in 0..30 {
			s.tick(0.016);
		}
		assert!(s.animation.is_none());
		assert!((s.transform.k - ZOOM_STEP).abs() < 1e-9);
		s.zoom_step(false);
		for _ in 0..30 {
			s.tick(0.016);
		}
		assert!((s.transform.k - 1.0).abs() < 1e-9);
	}
}
