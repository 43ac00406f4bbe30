use std::collections::HashMap;

use super::{Graph, NodeKind};

const TABLEAU10: &[&str] = &[
	"#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
	"#9c755f", "#bab0ab",
];

const FALLBACK: &str = "#999999";

/// Colors per node kind, with user overrides on top of the palette.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeLegend {
	kinds: Vec<NodeKind>,
	overrides: HashMap<NodeKind, String>,
}

impl TypeLegend {
	pub fn from_graph(graph: &Graph) -> Self {
		Self {
			kinds: graph.kinds(),
			overrides: HashMap::new(),
		}
	}

	/// Kinds in legend order.
	pub fn kinds(&self) -> &[NodeKind] {
		&self.kinds
	}

	pub fn color(&self, kind: NodeKind) -> String {
		if let Some(c) = self.overrides.get(&kind) {
			return c.clone();
		}
		self.kinds
			.iter()
			.position(|k| *k == kind)
			.map(|i| TABLEAU10[i % TABLEAU10.len()])
			.unwrap_or(FALLBACK)
			.to_string()
	}

	/// Override the color of `kind`. Anything but `#RRGGBB` is ignored.
	pub fn set_color(&mut self, kind: NodeKind, hex: &str) -> bool {
		if !is_hex_color(hex) {
			return false;
		}
		self.overrides.insert(kind, hex.to_ascii_lowercase());
		true
	}

	pub fn reset(&mut self) {
		self.overrides.clear();
	}
}

fn is_hex_color(s: &str) -> bool {
	s.len() == 7
		&& s.starts_with('#')
		&& s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::Node;

	fn legend() -> TypeLegend {
		TypeLegend::from_graph(&Graph {
			nodes: vec![
				Node::new("a", "a", NodeKind::Resource),
				Node::new("b", "b", NodeKind::Literal),
			],
			edges: vec![],
		})
	}

	#[test]
	fn palette_follows_legend_order() {
		let l = legend();
		assert_eq!(l.color(NodeKind::Resource), "#4e79a7");
		assert_eq!(l.color(NodeKind::Literal), "#f28e2c");
		assert_eq!(l.color(NodeKind::Class), FALLBACK);
	}

	#[test]
	fn overrides_need_valid_hex_and_reset() {
		let mut l = legend();
		assert!(!l.set_color(NodeKind::Literal, "red"));
		assert!(!l.set_color(NodeKind::Literal, "#12345"));
		assert!(l.set_color(NodeKind::Literal, "#00FF87"));
		assert_eq!(l.color(NodeKind::Literal), "#00ff87");
		l.reset();
		assert_eq!(l.color(NodeKind::Literal), "#f28e2c");
	}

	#[test]
	fn color_edits_leave_kinds_alone() {
		let mut l = legend();
		l.set_color(NodeKind::Resource, "#000000");
		assert_eq!(l.kinds(), &[NodeKind::Resource, NodeKind::Literal]);
	}
}
