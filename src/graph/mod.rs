//! In-memory node/edge model produced by the RDF adapter.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

mod legend;
mod view;

pub use legend::TypeLegend;
pub use view::{GraphView, TypeFilter};

/// Kind of ontology element a node stands for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
	Class,
	ObjectProperty,
	DatatypeProperty,
	AnnotationProperty,
	/// Property of unspecified flavour (Turtle URIs mentioning "property").
	Property,
	Individual,
	Resource,
	Literal,
	#[default]
	Unknown,
}

impl NodeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Class => "Class",
			NodeKind::ObjectProperty => "ObjectProperty",
			NodeKind::DatatypeProperty => "DatatypeProperty",
			NodeKind::AnnotationProperty => "AnnotationProperty",
			NodeKind::Property => "Property",
			NodeKind::Individual => "Individual",
			NodeKind::Resource => "Resource",
			NodeKind::Literal => "Literal",
			NodeKind::Unknown => "unknown",
		}
	}

	/// Layout cluster of this kind.
	pub fn cluster(self) -> u32 {
		match self {
			NodeKind::Class => 0,
			NodeKind::ObjectProperty => 1,
			NodeKind::DatatypeProperty => 2,
			NodeKind::AnnotationProperty => 3,
			NodeKind::Individual => 4,
			_ => 5,
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A resource or literal of the loaded ontology.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// URI, blank node label or literal value; unique within a graph.
	pub id: String,
	/// Display label.
	pub name: String,
	pub kind: NodeKind,
	pub description: Option<String>,
	pub attributes: BTreeMap<String, String>,
	pub cluster: Option<u32>,
	/// Display radius, `None` for the default.
	pub size: Option<f64>,
}

impl Node {
	pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			kind,
			description: None,
			attributes: BTreeMap::new(),
			cluster: Some(kind.cluster()),
			size: None,
		}
	}
}

/// A directed statement between two nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	pub source: String,
	pub target: String,
	/// Predicate tag name, or "literal"/"property" for Turtle statements.
	pub kind: String,
	/// Local name of the predicate.
	pub label: String,
}

/// Nodes and edges from a single successful parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl Graph {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Kinds present in the graph, in order of first appearance.
	pub fn kinds(&self) -> Vec<NodeKind> {
		let mut kinds = Vec::new();
		for node in &self.nodes {
			if !kinds.contains(&node.kind) {
				kinds.push(node.kind);
			}
		}
		kinds
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Accumulates nodes keyed by id while a document is being read.
///
/// Re-inserting an id replaces the node but keeps its original position.
#[derive(Debug, Default)]
pub(crate) struct GraphBuilder {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
	edges: Vec<Edge>,
}

impl GraphBuilder {
	/// Insert or replace a node, returning its slot.
	pub fn upsert(&mut self, node: Node) -> usize {
		match self.index.get(&node.id) {
			Some(&slot) => {
				self.nodes[slot] = node;
				slot
			}
			None => {
				let slot = self.nodes.len();
				self.index.insert(node.id.clone(), slot);
				self.nodes.push(node);
				slot
			}
		}
	}

	/// Insert `node` unless its id is already known.
	pub fn insert_new(&mut self, node: Node) {
		if !self.index.contains_key(&node.id) {
			self.upsert(node);
		}
	}

	pub fn node_mut(&mut self, slot: usize) -> Option<&mut Node> {
		self.nodes.get_mut(slot)
	}

	pub fn push_edge(&mut self, edge: Edge) {
		self.edges.push(edge);
	}

	pub fn finish(self) -> Graph {
		Graph {
			nodes: self.nodes,
			edges: self.edges,
		}
	}
}
