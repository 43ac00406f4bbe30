//! Application state shared through context.
//!
//! Every panel reads and writes through one [`AppState`]; the canvas turns
//! its signals into simulation updates, so there is a single source of truth
//! and data only flows one way.

use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, info};

use crate::components::force_graph::ExportFormat;
use crate::config::ForceParams;
use crate::graph::{Graph, Node, NodeKind, TypeFilter, TypeLegend};
use crate::search::SearchIndex;

/// One-shot requests from the panels to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasCommand {
	ZoomIn,
	ZoomOut,
	ZoomFit,
	Export(ExportFormat),
}

#[derive(Clone, Copy)]
pub struct AppState {
	pub graph: RwSignal<Option<Arc<Graph>>>,
	pub search_index: RwSignal<Option<Arc<SearchIndex>>>,
	pub filter: RwSignal<TypeFilter>,
	pub legend: RwSignal<TypeLegend>,
	pub params: RwSignal<ForceParams>,
	pub selected: RwSignal<Option<String>>,
	pub command: RwSignal<Option<CanvasCommand>>,
	pub show_controls: RwSignal<bool>,
	pub show_search: RwSignal<bool>,
	/// Bumped per visualize request; stale results compare unequal.
	generation: RwSignal<u64>,
}

impl AppState {
	pub fn new() -> Self {
		Self {
			graph: RwSignal::new(None),
			search_index: RwSignal::new(None),
			filter: RwSignal::new(TypeFilter::default()),
			legend: RwSignal::new(TypeLegend::default()),
			params: RwSignal::new(ForceParams::default()),
			selected: RwSignal::new(None),
			command: RwSignal::new(None),
			show_controls: RwSignal::new(true),
			show_search: RwSignal::new(false),
			generation: RwSignal::new(0),
		}
	}

	/// Replace the current graph wholesale; selection, filters, legend and
	/// search index all restart from it.
	pub fn load(&self, graph: Graph) {
		info!(
			"Loading graph with {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		self.selected.set(None);
		self.command.set(None);
		self.filter.set(TypeFilter::all_of(&graph));
		self.legend.set(TypeLegend::from_graph(&graph));
		self.search_index.set(Some(Arc::new(SearchIndex::new(&graph))));
		self.graph.set(Some(Arc::new(graph)));
	}

	/// Back to the upload screen.
	pub fn clear(&self) {
		debug!("Discarding graph");
		self.generation.update(|g| *g += 1);
		self.selected.set(None);
		self.command.set(None);
		self.filter.set(TypeFilter::default());
		self.legend.set(TypeLegend::default());
		self.search_index.set(None);
		self.graph.set(None);
	}

	/// Start a visualize request, superseding any in flight.
	pub fn begin_load(&self) -> u64 {
		self.generation.update(|g| *g += 1);
		self.generation.get_untracked()
	}

	/// Forget any in-flight request without starting a new one.
	pub fn cancel_pending(&self) {
		self.generation.update(|g| *g += 1);
	}

	pub fn is_current(&self, ticket: u64) -> bool {
		self.generation.get_untracked() == ticket
	}

	pub fn select(&self, id: Option<String>) {
		self.selected.set(id);
	}

	pub fn selected_node(&self) -> Option<Node> {
		let id = self.selected.get()?;
		self.graph.with(|g| g.as_ref().and_then(|g| g.node(&id).cloned()))
	}

	/// Kinds of the legend, changing only when the set of kinds does and not
	/// on color edits.
	pub fn legend_kinds(&self) -> Memo<Vec<NodeKind>> {
		let legend = self.legend;
		Memo::new(move |_| legend.with(|l| l.kinds().to_vec()))
	}

	/// Select `id`, showing its kind first if it is filtered out.
	pub fn reveal(&self, id: String, kind: NodeKind) {
		if !self.filter.with_untracked(|f| f.is_active(kind)) {
			self.filter.update(|f| f.set(kind, true));
		}
		self.selected.set(Some(id));
	}

	/// Show or hide a kind; hiding the selected node's kind clears selection.
	pub fn set_type_active(&self, kind: NodeKind, active: bool) {
		self.filter.update(|f| f.set(kind, active));
		if !active {
			let hidden = self.selected.with_untracked(|id| {
				id.as_ref().is_some_and(|id| {
					self.graph
						.with_untracked(|g| g.as_ref().and_then(|g| g.node(id)).map(|n| n.kind))
						== Some(kind)
				})
			});
			if hidden {
				self.selected.set(None);
			}
		}
	}

	pub fn send(&self, command: CanvasCommand) {
		self.command.set(Some(command));
	}
}

impl Default for AppState {
	fn default() -> Self {
		Self::new()
	}
}
