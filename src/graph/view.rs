use std::collections::{BTreeSet, HashSet};

use super::{Edge, Graph, Node, NodeKind};

/// Set of node kinds currently shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeFilter {
	active: BTreeSet<NodeKind>,
}

impl TypeFilter {
	/// Every kind present in `graph` active.
	pub fn all_of(graph: &Graph) -> Self {
		Self {
			active: graph.kinds().into_iter().collect(),
		}
	}

	pub fn is_active(&self, kind: NodeKind) -> bool {
		self.active.contains(&kind)
	}

	pub fn set(&mut self, kind: NodeKind, active: bool) {
		if active {
			self.active.insert(kind);
		} else {
			self.active.remove(&kind);
		}
	}
}

/// Visible part of a graph under a [`TypeFilter`]. Borrows, never copies.
#[derive(Clone, Debug, Default)]
pub struct GraphView<'a> {
	pub nodes: Vec<&'a Node>,
	pub edges: Vec<&'a Edge>,
}

impl<'a> GraphView<'a> {
	/// Nodes whose kind is active, and the edges with both endpoints among them.
	pub fn new(graph: &'a Graph, filter: &TypeFilter) -> Self {
		let nodes: Vec<&Node> = graph
			.nodes
			.iter()
			.filter(|n| filter.is_active(n.kind))
			.collect();
		let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let edges = graph
			.edges
			.iter()
			.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
			.collect();
		Self { nodes, edges }
	}

	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}
}
