//! RDF/XML by element walk.
//!
//! This is not a full RDF/XML parser: every element carrying `rdf:about` or
//! `rdf:ID` becomes a node, and every element carrying `rdf:resource` becomes
//! an edge from the nearest identified ancestor-or-self. Prefixes are matched
//! literally, the way ontology editors write them.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

use super::{RdfDialect, TAG_RULES, fragment};
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, GraphBuilder, Node};

const ABOUT: &str = "rdf:about";
const ID: &str = "rdf:ID";
const RESOURCE: &str = "rdf:resource";
const LABEL: &str = "rdfs:label";
const COMMENT: &str = "rdfs:comment";

/// Which node field the text of the current element feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Capture {
	Label,
	Comment,
}

struct Frame {
	tag: String,
	id: Option<String>,
	slot: Option<usize>,
}

/// General entities declared in the internal DTD subset, as ontology
/// editors emit them (`<!ENTITY owl "http://www.w3.org/2002/07/owl#">`).
#[derive(Debug, Default)]
struct Entities(HashMap<String, String>);

impl Entities {
	fn declare_from(&mut self, doctype: &str) {
		let mut rest = doctype;
		while let Some(at) = rest.find("<!ENTITY") {
			rest = rest[at + "<!ENTITY".len()..].trim_start();
			// parameter entities only matter inside the DTD
			if rest.starts_with('%') {
				continue;
			}
			let Some(name_end) = rest.find(char::is_whitespace) else {
				break;
			};
			let name = &rest[..name_end];
			let after = rest[name_end..].trim_start();
			let Some(quote) = after.chars().next().filter(|c| *c == '"' || *c == '\'') else {
				rest = after;
				continue;
			};
			let body = &after[1..];
			let Some(end) = body.find(quote) else {
				break;
			};
			// first declaration is binding
			self.0
				.entry(name.to_owned())
				.or_insert_with(|| body[..end].to_owned());
			rest = &body[end + 1..];
		}
	}

	fn resolve(&self, name: &str) -> Option<&str> {
		resolve_predefined_entity(name).or_else(|| self.0.get(name).map(String::as_str))
	}
}

#[derive(Default)]
struct Walker {
	graph: GraphBuilder,
	stack: Vec<Frame>,
	/// Slot, field and text being collected for an open label/comment.
	capture: Option<(usize, Capture, String)>,
	/// Nodes whose label/comment was already taken from a child.
	labelled: Vec<usize>,
	described: Vec<usize>,
}

pub(super) fn parse(text: &str) -> Result<Graph> {
	let mut reader = Reader::from_str(text);
	let mut walker = Walker::default();
	let mut entities = Entities::default();

	loop {
		match reader.read_event() {
			Ok(Event::DocType(d)) => entities.declare_from(&String::from_utf8_lossy(&d)),
			Ok(Event::Start(e)) => walker.open(&e, &entities)?,
			Ok(Event::Empty(e)) => {
				walker.open(&e, &entities)?;
				walker.close();
			}
			Ok(Event::Text(t)) => {
				let text = t
					.unescape_with(|name| entities.resolve(name))
					.map_err(fail)?;
				walker.text(&text);
			}
			Ok(Event::CData(c)) => walker.text(&String::from_utf8_lossy(&c.into_inner())),
			Ok(Event::End(_)) => walker.close(),
			Ok(Event::Eof) => break,
			Err(e) => {
				return Err(Error::parse(
					RdfDialect::RdfXml,
					format!("{e} at byte {}", reader.error_position()),
				));
			}
			_ => {}
		}
	}

	if let Some(frame) = walker.stack.last() {
		return Err(Error::parse(
			RdfDialect::RdfXml,
			format!("unexpected end of document inside <{}>", frame.tag),
		));
	}
	Ok(walker.graph.finish())
}

fn fail(e: impl std::fmt::Display) -> Error {
	Error::parse(RdfDialect::RdfXml, e.to_string())
}

fn attributes(e: &BytesStart, entities: &Entities) -> Result<Vec<(String, String)>> {
	e.attributes()
		.map(|attr| {
			let attr = attr.map_err(fail)?;
			let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
			let value = attr
				.unescape_value_with(|name| entities.resolve(name))
				.map_err(fail)?
				.into_owned();
			Ok((key, value))
		})
		.collect()
}

fn lookup<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
	attrs
		.iter()
		.find(|(k, _)| k == key)
		.map(|(_, v)| v.as_str())
}

impl Walker {
	fn open(&mut self, e: &BytesStart, entities: &Entities) -> Result<()> {
		let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
		let attrs = attributes(e, entities)?;

		// rdf:about wins over rdf:ID; empty values identify nothing
		let id = lookup(&attrs, ABOUT)
			.filter(|v| !v.is_empty())
			.or_else(|| lookup(&attrs, ID).filter(|v| !v.is_empty()))
			.map(str::to_owned);

		let slot = id.as_ref().map(|id| {
			let mut node = Node::new(id.clone(), fragment(id), TAG_RULES.classify(&tag));
			node.attributes = attrs.iter().cloned().collect();
			let slot = self.graph.upsert(node);
			// a repeated element starts over, its own label and comment win
			self.labelled.retain(|s| *s != slot);
			self.described.retain(|s| *s != slot);
			slot
		});

		if let Some(target) = lookup(&attrs, RESOURCE).filter(|v| !v.is_empty()) {
			let source = id
				.clone()
				.or_else(|| self.stack.iter().rev().find_map(|f| f.id.clone()));
			if let Some(source) = source {
				let label = tag.rsplit(':').next().unwrap_or(&tag).to_owned();
				self.graph.push_edge(Edge {
					source,
					target: target.to_owned(),
					kind: tag.clone(),
					label,
				});
			}
		}

		if self.capture.is_none() {
			self.capture = self.capture_for(&tag).map(|(s, c)| (s, c, String::new()));
		}

		self.stack.push(Frame { tag, id, slot });
		Ok(())
	}

	/// Label/comment capture target for a child element named `tag`.
	fn capture_for(&self, tag: &str) -> Option<(usize, Capture)> {
		let field = match tag {
			LABEL => Capture::Label,
			COMMENT => Capture::Comment,
			_ => return None,
		};
		let owner = self.stack.iter().rev().find_map(|f| f.slot)?;
		let taken = match field {
			Capture::Label => &self.labelled,
			Capture::Comment => &self.described,
		};
		(!taken.contains(&owner)).then_some((owner, field))
	}

	fn text(&mut self, text: &str) {
		if let Some((_, _, buf)) = self.capture.as_mut() {
			buf.push_str(text);
		}
	}

	fn close(&mut self) {
		let Some(frame) = self.stack.pop() else {
			return;
		};
		if !matches!(frame.tag.as_str(), LABEL | COMMENT) {
			return;
		}
		let Some((slot, field, buf)) = self.capture.take() else {
			return;
		};
		let value = buf.trim().to_owned();
		let Some(node) = self.graph.node_mut(slot) else {
			return;
		};
		match field {
			Capture::Label => {
				if !value.is_empty() {
					node.name = value;
				}
				self.labelled.push(slot);
			}
			Capture::Comment => {
				node.description = Some(value);
				self.described.push(slot);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::NodeKind;

	#[test]
	fn single_class() {
		let g = parse(r##"<rdf:RDF><owl:Class rdf:about="#Person"/></rdf:RDF>"##).unwrap();
		assert_eq!(g.nodes.len(), 1);
		assert_eq!(g.nodes[0].id, "#Person");
		assert_eq!(g.nodes[0].name, "Person");
		assert_eq!(g.nodes[0].kind, NodeKind::Class);
		assert!(g.edges.is_empty());
	}

	#[test]
	fn one_node_per_identifying_element() {
		let doc = r##"<?xml version="1.0"?>
<rdf:RDF>
  <owl:Class rdf:about="#Animal"/>
  <owl:Class rdf:ID="Dog">
    <rdfs:subClassOf rdf:resource="#Animal"/>
  </owl:Class>
  <owl:ObjectProperty rdf:about="#owns"/>
  <owl:DatatypeProperty rdf:about="#age"/>
  <owl:AnnotationProperty rdf:about="#note"/>
  <rdf:Description rdf:about="#rex"/>
</rdf:RDF>"##;
		let g = parse(doc).unwrap();
		let kinds: Vec<_> = g.nodes.iter().map(|n| (n.id.as_str(), n.kind)).collect();
		assert_eq!(
			kinds,
			vec![
				("#Animal", NodeKind::Class),
				("Dog", NodeKind::Class),
				("#owns", NodeKind::ObjectProperty),
				("#age", NodeKind::DatatypeProperty),
				("#note", NodeKind::AnnotationProperty),
				("#rex", NodeKind::Individual),
			]
		);
	}

	#[test]
	fn resource_edges_take_nearest_identified_ancestor() {
		let doc = r##"<rdf:RDF>
  <owl:Class rdf:about="#Dog">
    <rdfs:subClassOf>
      <owl:Restriction>
        <owl:onProperty rdf:resource="#owns"/>
      </owl:Restriction>
    </rdfs:subClassOf>
  </owl:Class>
  <owl:Thing>
    <ex:orphan rdf:resource="#nowhere"/>
  </owl:Thing>
</rdf:RDF>"##;
		let g = parse(doc).unwrap();
		assert_eq!(
			g.edges,
			vec![Edge {
				source: "#Dog".into(),
				target: "#owns".into(),
				kind: "owl:onProperty".into(),
				label: "onProperty".into(),
			}]
		);
	}

	#[test]
	fn label_comment_and_attributes() {
		let doc = r##"<rdf:RDF>
  <owl:Class rdf:about="http://ex.org/onto#Person" xml:lang="en">
    <rdfs:label>A &amp; B person</rdfs:label>
    <rdfs:comment>Somebody.</rdfs:comment>
    <rdfs:label>second label</rdfs:label>
  </owl:Class>
</rdf:RDF>"##;
		let g = parse(doc).unwrap();
		let n = &g.nodes[0];
		assert_eq!(n.name, "A & B person");
		assert_eq!(n.description.as_deref(), Some("Somebody."));
		assert_eq!(n.attributes.get("xml:lang").map(String::as_str), Some("en"));
		assert_eq!(
			n.attributes.get("rdf:about").map(String::as_str),
			Some("http://ex.org/onto#Person")
		);
		assert_eq!(n.cluster, Some(0));
	}

	#[test]
	fn repeated_element_takes_its_own_label() {
		let doc = r##"<rdf:RDF>
  <owl:Class rdf:about="#A">
    <rdfs:label>First</rdfs:label>
  </owl:Class>
  <owl:Class rdf:about="#A">
    <rdfs:label>Second</rdfs:label>
    <rdfs:comment>Later.</rdfs:comment>
  </owl:Class>
</rdf:RDF>"##;
		let g = parse(doc).unwrap();
		assert_eq!(g.nodes.len(), 1);
		assert_eq!(g.nodes[0].name, "Second");
		assert_eq!(g.nodes[0].description.as_deref(), Some("Later."));
	}

	#[test]
	fn dtd_entities_are_expanded() {
		let doc = r##"<?xml version="1.0"?>
<!DOCTYPE rdf:RDF [
    <!ENTITY owl "http://www.w3.org/2002/07/owl#" >
    <!ENTITY xsd 'http://www.w3.org/2001/XMLSchema#' >
]>
<rdf:RDF>
  <owl:Class rdf:about="&owl;Thing">
    <rdfs:label>Thing &amp; more</rdfs:label>
  </owl:Class>
  <owl:DatatypeProperty rdf:about="#age">
    <rdfs:range rdf:resource="&xsd;integer"/>
  </owl:DatatypeProperty>
</rdf:RDF>"##;
		let g = parse(doc).unwrap();
		assert_eq!(g.nodes.len(), 2);
		assert_eq!(g.nodes[0].id, "http://www.w3.org/2002/07/owl#Thing");
		assert_eq!(g.nodes[0].name, "Thing & more");
		assert_eq!(g.edges[0].target, "http://www.w3.org/2001/XMLSchema#integer");
	}

	#[test]
	fn undeclared_entity_fails() {
		let err = parse(r##"<rdf:RDF><owl:Class rdf:about="&owl;Thing"/></rdf:RDF>"##).unwrap_err();
		assert!(matches!(err, Error::ParseFailure { .. }));
	}

	#[test]
	fn malformed_xml_fails_without_partial_graph() {
		let err = parse("<rdf:RDF><owl:Class rdf:about=\"#A\"></rdf:RDF>").unwrap_err();
		assert!(matches!(err, Error::ParseFailure { dialect: RdfDialect::RdfXml, .. }));

		let err = parse("<rdf:RDF><owl:Class rdf:about=\"#A\">").unwrap_err();
		assert!(matches!(err, Error::ParseFailure { .. }));
	}
}
