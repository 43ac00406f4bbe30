//! Turtle through `oxrdfio`.
//!
//! Triples are collected in full before the graph is built, so a syntax error
//! anywhere in the document yields no graph at all.

use oxrdf::{Quad, Term};
use oxrdfio::{RdfFormat, RdfParser};

use super::{RdfDialect, URI_RULES, local_name};
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, GraphBuilder, Node, NodeKind};

pub(super) fn parse(text: &str) -> Result<Graph> {
	let quads = RdfParser::from_format(RdfFormat::Turtle)
		.for_slice(text.as_bytes())
		.collect::<std::result::Result<Vec<Quad>, _>>()
		.map_err(|e| Error::parse(RdfDialect::Turtle, e.to_string()))?;

	let mut graph = GraphBuilder::default();
	for quad in quads {
		let subject = describe(&Term::from(quad.subject));
		let object = describe(&quad.object);
		let literal = object.kind == NodeKind::Literal;

		graph.push_edge(Edge {
			source: subject.id.clone(),
			target: object.id.clone(),
			kind: if literal { "literal" } else { "property" }.to_owned(),
			label: local_name(quad.predicate.as_str()).to_owned(),
		});
		graph.insert_new(subject);
		graph.insert_new(object);
	}
	Ok(graph.finish())
}

/// Node for a term on first encounter.
fn describe(term: &Term) -> Node {
	let (id, kind) = match term {
		Term::NamedNode(n) => (n.as_str().to_owned(), URI_RULES.classify(n.as_str())),
		Term::BlankNode(b) => (b.as_str().to_owned(), NodeKind::Unknown),
		Term::Literal(l) => (l.value().to_owned(), NodeKind::Literal),
		// quoted triples
		other => (other.to_string(), NodeKind::Unknown),
	};
	let name = match kind {
		NodeKind::Literal | NodeKind::Unknown => id.clone(),
		_ => local_name(&id).to_owned(),
	};
	Node::new(id, name, kind)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn prefixed_statement() {
		let g = parse("@prefix ex: <http://ex.org/> . ex:a ex:knows ex:b .").unwrap();
		let ids: Vec<_> = g.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["http://ex.org/a", "http://ex.org/b"]);
		assert_eq!(g.nodes[0].name, "a");
		assert_eq!(g.nodes[0].kind, NodeKind::Resource);
		assert_eq!(g.edges.len(), 1);
		assert_eq!(g.edges[0].label, "knows");
		assert_eq!(g.edges[0].kind, "property");
	}

	#[test]
	fn one_edge_per_triple_nodes_deduplicated() {
		let doc = r#"
@prefix ex: <http://ex.org/onto#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
ex:Person a owl:Class ;
    ex:label "Person" .
ex:alice a ex:Person ;
    ex:knows ex:bob , _:someone ;
    ex:label "Alice" .
ex:bob a ex:Person .
"#;
		let g = parse(doc).unwrap();
		assert_eq!(g.edges.len(), 7);
		let mut ids: Vec<_> = g.nodes.iter().map(|n| n.id.clone()).collect();
		ids.sort();
		ids.dedup();
		assert_eq!(ids.len(), g.nodes.len());

		let literal = g.node("Alice").unwrap();
		assert_eq!(literal.kind, NodeKind::Literal);
		assert_eq!(
			g.node("http://www.w3.org/2002/07/owl#Class").unwrap().kind,
			NodeKind::Class
		);
		assert!(g.nodes.iter().any(|n| n.kind == NodeKind::Unknown));
		assert!(
			g.edges
				.iter()
				.any(|e| e.kind == "literal" && e.target == "Alice" && e.label == "label")
		);
		assert!(g.edges.iter().any(|e| e.label == "type"));
	}

	#[test]
	fn syntax_error_fails_whole_document() {
		let err = parse("@prefix ex: <http://ex.org/> . ex:a ex:knows ex:b . ex:c ex:broken").unwrap_err();
		assert!(matches!(err, Error::ParseFailure { dialect: RdfDialect::Turtle, .. }));
	}
}
