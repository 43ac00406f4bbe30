//! Converts RDF/XML or Turtle text into the [`Graph`] model.
//!
//! Dialect detection is a cheap sniff of the text, never a trial parse:
//! content that looks like neither is rejected with
//! [`Error::UnrecognizedFormat`]. Parsing is all-or-nothing.

use std::fmt;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeKind};

mod turtle;
mod xml;

/// Serialization of an input document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RdfDialect {
	RdfXml,
	Turtle,
}

impl fmt::Display for RdfDialect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RdfDialect::RdfXml => f.write_str("RDF/XML"),
			RdfDialect::Turtle => f.write_str("Turtle"),
		}
	}
}

impl RdfDialect {
	/// Guess the dialect of `text`.
	pub fn sniff(text: &str) -> Result<Self> {
		let head = text.trim_start();
		if head.starts_with("<?xml") || head.starts_with("<rdf:RDF") {
			Ok(RdfDialect::RdfXml)
		} else if text.contains("@prefix") || text.contains("PREFIX") {
			Ok(RdfDialect::Turtle)
		} else {
			Err(Error::UnrecognizedFormat)
		}
	}
}

/// Parse a whole document into a graph.
pub fn parse_document(text: &str) -> Result<Graph> {
	let dialect = RdfDialect::sniff(text).inspect_err(|_| warn!("Rejected input: unknown dialect"))?;
	let graph = match dialect {
		RdfDialect::RdfXml => xml::parse(text)?,
		RdfDialect::Turtle => turtle::parse(text)?,
	};
	if graph.is_empty() {
		warn!("{dialect} input produced no nodes");
		return Err(Error::EmptyGraph);
	}
	info!(
		"Parsed {dialect}: {} nodes, {} edges",
		graph.nodes.len(),
		graph.edges.len()
	);
	Ok(graph)
}

/// Ordered keyword rules; the first keyword contained in the lowercased
/// subject wins.
pub(crate) struct KindRules {
	rules: &'static [(&'static str, NodeKind)],
	fallback: NodeKind,
}

/// Rules for RDF/XML element tag names.
pub(crate) const TAG_RULES: KindRules = KindRules {
	rules: &[
		("class", NodeKind::Class),
		("objectproperty", NodeKind::ObjectProperty),
		("datatype", NodeKind::DatatypeProperty),
		("annotation", NodeKind::AnnotationProperty),
	],
	fallback: NodeKind::Individual,
};

/// Rules for Turtle resource URIs.
pub(crate) const URI_RULES: KindRules = KindRules {
	rules: &[
		("class", NodeKind::Class),
		("property", NodeKind::Property),
		("individual", NodeKind::Individual),
	],
	fallback: NodeKind::Resource,
};

impl KindRules {
	pub fn classify(&self, subject: &str) -> NodeKind {
		let lower = subject.to_lowercase();
		self.rules
			.iter()
			.find(|(keyword, _)| lower.contains(keyword))
			.map(|(_, kind)| *kind)
			.unwrap_or(self.fallback)
	}
}

/// Part of `id` after the last `#`, or all of it.
pub(crate) fn fragment(id: &str) -> &str {
	id.rsplit('#').next().unwrap_or(id)
}

/// Fragment after `#`, else the last non-empty path segment, else `iri` itself.
pub(crate) fn local_name(iri: &str) -> &str {
	if let Some((_, frag)) = iri.rsplit_once('#') {
		if !frag.is_empty() {
			return frag;
		}
	}
	iri.trim_end_matches(['/', '#'])
		.rsplit('/')
		.next()
		.filter(|s| !s.is_empty())
		.unwrap_or(iri)
}
