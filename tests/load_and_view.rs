use ontology_graph_canvas::Error;
use ontology_graph_canvas::graph::{GraphView, NodeKind, TypeFilter, TypeLegend};
use ontology_graph_canvas::rdf::{RdfDialect, parse_document};
use ontology_graph_canvas::search::{SearchField, SearchIndex};
use pretty_assertions::assert_eq;

const PIZZA: &str = include_str!("fixtures/pizza.owl");
const ZOO: &str = include_str!("fixtures/zoo.ttl");

fn ids<'a>(view: &GraphView<'a>) -> Vec<&'a str> {
	view.nodes.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn owl_file_loads_into_nodes_and_edges() {
	let graph = parse_document(PIZZA).unwrap();
	assert_eq!(graph.nodes.len(), 6);
	assert_eq!(graph.edges.len(), 5);
	assert_eq!(
		graph.kinds(),
		vec![
			NodeKind::Class,
			NodeKind::ObjectProperty,
			NodeKind::DatatypeProperty,
			NodeKind::Individual,
		]
	);

	let pizza = graph.node("#Pizza").unwrap();
	assert_eq!(pizza.name, "Pizza");
	assert_eq!(pizza.description.as_deref(), Some("A flat baked dish."));

	let typed = graph
		.edges
		.iter()
		.find(|e| e.source == "#myPizza")
		.unwrap();
	assert_eq!(typed.target, "#Margherita");
	assert_eq!(typed.kind, "rdf:type");
	assert_eq!(typed.label, "type");

	// declared in the DOCTYPE
	let range = graph
		.edges
		.iter()
		.find(|e| e.source == "#calories")
		.unwrap();
	assert_eq!(range.target, "http://www.w3.org/2001/XMLSchema#integer");
}

#[test]
fn hiding_a_kind_hides_its_edges_but_not_the_model() {
	let graph = parse_document(PIZZA).unwrap();
	let before = graph.clone();
	let mut filter = TypeFilter::all_of(&graph);

	assert_eq!(GraphView::new(&graph, &filter).nodes.len(), 6);

	filter.set(NodeKind::Class, false);
	let view = GraphView::new(&graph, &filter);
	assert_eq!(ids(&view), vec!["#hasTopping", "#calories", "#myPizza"]);
	assert!(view.edges.is_empty());
	assert!(!view.contains("#Pizza"));
	assert_eq!(graph, before);

	// the xsd range target is not a node, so that edge never shows
	filter.set(NodeKind::Class, true);
	assert_eq!(GraphView::new(&graph, &filter).edges.len(), 4);
}

#[test]
fn search_finds_loaded_nodes() {
	let graph = parse_document(PIZZA).unwrap();
	let index = SearchIndex::new(&graph);
	assert_eq!(index.len(), 6);

	let hits = index.search("Margherita");
	assert_eq!(hits[0].id, "#Margherita");
	assert_eq!(hits[0].field, SearchField::Name);
	assert_eq!(hits[0].score, 0.0);

	assert!(index.search("   ").is_empty());
}

#[test]
fn turtle_file_loads_with_uri_kinds() {
	let graph = parse_document(ZOO).unwrap();
	assert_eq!(graph.edges.len(), 3);
	assert_eq!(
		graph.kinds(),
		vec![
			NodeKind::Class,
			NodeKind::Literal,
			NodeKind::Resource,
			NodeKind::Property,
		]
	);
	let animal = graph.node("http://example.org/zoo#AnimalClass").unwrap();
	assert_eq!(animal.name, "AnimalClass");
	assert_eq!(graph.node("Animal").unwrap().kind, NodeKind::Literal);

	let labels: Vec<(&str, &str)> = graph
		.edges
		.iter()
		.map(|e| (e.label.as_str(), e.kind.as_str()))
		.collect();
	assert_eq!(
		labels,
		vec![
			("label", "literal"),
			("hasProperty", "property"),
			("subClassOf", "property"),
		]
	);
}

#[test]
fn legend_follows_the_loaded_kinds() {
	let graph = parse_document(PIZZA).unwrap();
	let mut legend = TypeLegend::from_graph(&graph);
	assert_eq!(legend.kinds().len(), 4);
	let palette = legend.color(NodeKind::ObjectProperty);

	assert!(legend.set_color(NodeKind::ObjectProperty, "#ABCDEF"));
	assert_eq!(legend.color(NodeKind::ObjectProperty), "#abcdef");
	assert!(!legend.set_color(NodeKind::ObjectProperty, "blue"));

	legend.reset();
	assert_eq!(legend.color(NodeKind::ObjectProperty), palette);
}

#[test]
fn rejected_inputs_report_why() {
	assert_eq!(
		parse_document("name,type\nPizza,Class\n"),
		Err(Error::UnrecognizedFormat)
	);
	assert!(matches!(
		parse_document("<?xml version=\"1.0\"?><rdf:RDF><owl:Class rdf:about=\"#A\">"),
		Err(Error::ParseFailure {
			dialect: RdfDialect::RdfXml,
			..
		})
	));
	assert!(matches!(
		parse_document("@prefix ex: <http://ex.org/> .\nex:a ex:b ."),
		Err(Error::ParseFailure {
			dialect: RdfDialect::Turtle,
			..
		})
	));
}
