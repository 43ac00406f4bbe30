//! Fuzzy lookup over node id, name, kind and attribute values.
//!
//! Scoring works like a bitap-style matcher: the query is slid across each
//! field value, the best window's edit distance relative to the query length
//! is the error, and matches further from the start of the value cost a
//! little extra. A score of 0 is a perfect match; anything above
//! [`SEARCH_THRESHOLD`] is dropped.

use std::fmt;

use crate::config::{SEARCH_LIMIT, SEARCH_THRESHOLD};
use crate::graph::{Graph, NodeKind};

/// Characters of distance that cost one full unit of score.
const LOCATION_DISTANCE: f64 = 100.0;

/// Node field a hit was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchField {
	Id,
	Name,
	Type,
	Attribute(String),
}

impl fmt::Display for SearchField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SearchField::Id => f.write_str("id"),
			SearchField::Name => f.write_str("name"),
			SearchField::Type => f.write_str("type"),
			SearchField::Attribute(key) => write!(f, "attributes.{key}"),
		}
	}
}

/// One ranked search result.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
	pub id: String,
	pub name: String,
	pub kind: NodeKind,
	/// Best matching field.
	pub field: SearchField,
	pub score: f64,
}

struct Entry {
	id: String,
	name: String,
	kind: NodeKind,
	/// Lowercased searchable values.
	fields: Vec<(SearchField, String)>,
}

/// Search index over the nodes of one graph. Rebuild on every load.
pub struct SearchIndex {
	entries: Vec<Entry>,
}

impl SearchIndex {
	pub fn new(graph: &Graph) -> Self {
		let entries = graph
			.nodes
			.iter()
			.map(|node| {
				let mut fields = vec![
					(SearchField::Id, node.id.to_lowercase()),
					(SearchField::Name, node.name.to_lowercase()),
					(SearchField::Type, node.kind.as_str().to_lowercase()),
				];
				fields.extend(
					node.attributes
						.iter()
						.map(|(k, v)| (SearchField::Attribute(k.clone()), v.to_lowercase())),
				);
				Entry {
					id: node.id.clone(),
					name: node.name.clone(),
					kind: node.kind,
					fields,
				}
			})
			.collect();
		Self { entries }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// At most [`SEARCH_LIMIT`] hits, best first. Blank queries find nothing.
	pub fn search(&self, query: &str) -> Vec<SearchHit> {
		let query = query.trim().to_lowercase();
		if query.is_empty() {
			return Vec::new();
		}

		let mut hits: Vec<SearchHit> = self
			.entries
			.iter()
			.filter_map(|entry| {
				let (field, score) = entry
					.fields
					.iter()
					.map(|(field, value)| (field, field_score(&query, value)))
					.fold(None, |best: Option<(&SearchField, f64)>, (field, score)| {
						match best {
							Some((_, b)) if b <= score => best,
							_ => Some((field, score)),
						}
					})?;
				(score <= SEARCH_THRESHOLD).then(|| SearchHit {
					id: entry.id.clone(),
					name: entry.name.clone(),
					kind: entry.kind,
					field: field.clone(),
					score,
				})
			})
			.collect();

		// stable: equal scores keep node order
		hits.sort_by(|a, b| a.score.total_cmp(&b.score));
		hits.truncate(SEARCH_LIMIT);
		hits
	}
}

/// Score of the best approximate occurrence of `query` in `value`.
fn field_score(query: &str, value: &str) -> f64 {
	if value.is_empty() {
		return 1.0;
	}
	if let Some(pos) = value.find(query) {
		let pos = value[..pos].chars().count();
		return (pos as f64 / LOCATION_DISTANCE).min(1.0);
	}

	let q_len = query.chars().count();
	let chars: Vec<char> = value.chars().collect();
	let mut best = 1.0_f64;
	for start in 0..chars.len() {
		for len in q_len.saturating_sub(1).max(1)..=q_len + 1 {
			let end = (start + len).min(chars.len());
			let window: String = chars[start..end].iter().collect();
			let errors = strsim::levenshtein(query, &window) as f64;
			let score = errors / q_len as f64 + start as f64 / LOCATION_DISTANCE;
			best = best.min(score);
			if end == chars.len() {
				break;
			}
		}
	}
	best.min(1.0)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::Node;

	fn graph() -> Graph {
		let mut person = Node::new("http://ex.org/onto#Person", "Person", NodeKind::Class);
		person
			.attributes
			.insert("rdf:about".into(), "http://ex.org/onto#Person".into());
		let mut nodes = vec![
			person,
			Node::new("http://ex.org/onto#knows", "knows", NodeKind::ObjectProperty),
			Node::new("http://ex.org/onto#alice", "Alice Smith", NodeKind::Individual),
		];
		for i in 0..20 {
			nodes.push(Node::new(format!("#item{i}"), format!("item{i}"), NodeKind::Individual));
		}
		Graph { nodes, edges: vec![] }
	}

	#[test]
	fn blank_query_finds_nothing() {
		let index = SearchIndex::new(&graph());
		assert!(index.search("").is_empty());
		assert!(index.search("   ").is_empty());
	}

	#[test]
	fn unmatched_query_finds_nothing() {
		let index = SearchIndex::new(&graph());
		assert!(index.search("zzqqxxjj").is_empty());
	}

	#[test]
	fn results_are_capped() {
		let index = SearchIndex::new(&graph());
		assert_eq!(index.len(), 23);
		let hits = index.search("item");
		assert_eq!(hits.len(), SEARCH_LIMIT);
	}

	#[test]
	fn exact_name_ranks_first_and_reports_field() {
		let index = SearchIndex::new(&graph());
		let hits = index.search("Person");
		assert_eq!(hits[0].id, "http://ex.org/onto#Person");
		assert_eq!(hits[0].field, SearchField::Name);
		assert_eq!(hits[0].score, 0.0);
	}

	#[test]
	fn tolerates_typos() {
		let index = SearchIndex::new(&graph());
		let hits = index.search("alise");
		assert_eq!(hits.first().map(|h| h.name.as_str()), Some("Alice Smith"));
	}

	#[test]
	fn matches_kind_field() {
		let index = SearchIndex::new(&graph());
		let hits = index.search("objectproperty");
		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].field, SearchField::Type);
	}

	#[test]
	fn field_keys_display() {
		assert_eq!(SearchField::Attribute("rdf:about".into()).to_string(), "attributes.rdf:about");
		assert_eq!(SearchField::Id.to_string(), "id");
	}
}
