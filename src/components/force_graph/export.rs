//! Snapshot exports of the current view: PNG through an offscreen canvas,
//! and a standalone SVG document built from the same scene.

use std::fmt::Write as _;

use log::{error, info};
use quick_xml::escape::escape;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
	Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, Url,
};

use super::render;
use super::state::ForceGraphState;
use crate::config::{BACKGROUND, SELECTED_STROKE, SELECTED_STROKE_WIDTH};

/// Export targets offered by the controls panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
	Png,
	Svg,
}

impl ExportFormat {
	pub fn file_name(self) -> &'static str {
		match self {
			ExportFormat::Png => "graph.png",
			ExportFormat::Svg => "graph.svg",
		}
	}
}

/// Write the current view to a download. Failures are logged, never raised.
pub fn export(state: &ForceGraphState, format: ExportFormat) {
	let result = match format {
		ExportFormat::Png => export_png(state),
		ExportFormat::Svg => export_svg(state),
	};
	match result {
		Ok(()) => info!("Exported {}", format.file_name()),
		Err(e) => error!("Export to {} failed: {:?}", format.file_name(), e),
	}
}

fn export_png(state: &ForceGraphState) -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
	canvas.set_width(state.width as u32);
	canvas.set_height(state.height as u32);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("no 2d context"))?
		.dyn_into()?;
	// render() composites the scene over the background fill
	render::render(state, &ctx);
	let url = canvas.to_data_url_with_type("image/png")?;
	download(&url, ExportFormat::Png.file_name())
}

fn export_svg(state: &ForceGraphState) -> Result<(), JsValue> {
	let svg = svg_document(state);
	let options = BlobPropertyBag::new();
	options.set_type("image/svg+xml");
	let blob = Blob::new_with_str_sequence_and_options(
		&js_sys::Array::of1(&JsValue::from_str(&svg)),
		&options,
	)?;
	let url = Url::create_object_url_with_blob(&blob)?;
	let result = download(&url, ExportFormat::Svg.file_name());
	// the download reads the URL after this task; revoke on the next one
	let revoke = Closure::once_into_js(move || {
		let _ = Url::revoke_object_url(&url);
	});
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0)?;
	result
}

fn download(href: &str, file_name: &str) -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let body = document
		.body()
		.ok_or_else(|| JsValue::from_str("no body"))?;
	let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	link.set_href(href);
	link.set_download(file_name);
	link.style().set_property("display", "none")?;
	body.append_child(&link)?;
	link.click();
	link.remove();
	Ok(())
}

/// The visible scene as an SVG document the size of the viewport.
pub fn svg_document(state: &ForceGraphState) -> String {
	let (w, h) = (state.width, state.height);
	let t = state.transform;
	let mut out = String::new();

	let _ = writeln!(
		out,
		r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
	);
	let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{BACKGROUND}"/>"#);
	let _ = writeln!(
		out,
		r#"<g transform="translate({} {}) scale({})">"#,
		t.x, t.y, t.k
	);

	state.graph.visit_edges(|n1, n2, _| {
		let _ = writeln!(
			out,
			r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#999" stroke-opacity="0.5" stroke-width="2"/>"##,
			n1.x(),
			n1.y(),
			n2.x(),
			n2.y()
		);
	});

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let r = state.radius_of(node.index(), info.radius);
		let stroke = if state.selected == Some(node.index()) {
			format!(r#" stroke="{SELECTED_STROKE}" stroke-width="{SELECTED_STROKE_WIDTH}""#)
		} else {
			String::new()
		};
		let _ = writeln!(
			out,
			r#"<circle cx="{}" cy="{}" r="{r}" fill="{}"{stroke}><title>{}</title></circle>"#,
			node.x(),
			node.y(),
			escape(info.color.as_str()),
			escape(info.id.as_str()),
		);
		let _ = writeln!(
			out,
			r#"<text x="{}" y="{}" fill="white" font-family="sans-serif" font-size="11">{}</text>"#,
			node.x() as f64 + r + 3.0,
			node.y() as f64 + 3.0,
			escape(info.label.as_str()),
		);
	});

	out.push_str("</g>\n</svg>\n");
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ForceParams;
	use crate::graph::{Edge, Graph, GraphView, Node, NodeKind, TypeFilter, TypeLegend};

	fn state() -> ForceGraphState {
		let graph = Graph {
			nodes: vec![
				Node::new("#A", "A <&> B", NodeKind::Class),
				Node::new("#b", "b", NodeKind::Individual),
			],
			edges: vec![Edge {
				source: "#b".into(),
				target: "#A".into(),
				kind: "rdf:type".into(),
				label: "type".into(),
			}],
		};
		ForceGraphState::new(
			&GraphView::new(&graph, &TypeFilter::all_of(&graph)),
			&TypeLegend::from_graph(&graph),
			ForceParams::default(),
			1024.0,
			768.0,
		)
	}

	#[test]
	fn document_matches_viewport_and_background() {
		let svg = svg_document(&state());
		assert!(svg.starts_with(
			r#"<svg xmlns="http://www.w3.org/2000/svg" width="1024" height="768" viewBox="0 0 1024 768">"#
		));
		assert!(svg.contains(r##"fill="#151515""##));
		assert!(svg.contains(r#"translate(512 384) scale(1)"#));
		assert!(svg.trim_end().ends_with("</svg>"));
	}

	#[test]
	fn document_holds_visible_scene_escaped() {
		let svg = svg_document(&state());
		assert_eq!(svg.matches("<circle").count(), 2);
		assert_eq!(svg.matches("<line").count(), 1);
		assert!(svg.contains("A &lt;&amp;&gt; B"));
	}

	#[test]
	fn selection_is_part_of_the_snapshot() {
		let mut s = state();
		s.select(Some("#b"));
		let svg = svg_document(&s);
		assert!(svg.contains(r##"stroke="#F15838""##));
		assert!(svg.contains(r#"r="36""#));
	}

	#[test]
	fn file_names() {
		assert_eq!(ExportFormat::Png.file_name(), "graph.png");
		assert_eq!(ExportFormat::Svg.file_name(), "graph.svg");
	}
}
