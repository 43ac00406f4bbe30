use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::export;
use super::render;
use super::state::{Click, ForceGraphState};
use crate::config::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::graph::GraphView;
use crate::state::{AppState, CanvasCommand};

/// Tooltip contents for the node under the pointer.
#[derive(Clone, Debug, PartialEq)]
struct HoverTip {
	name: String,
	kind: String,
	x: f64,
	y: f64,
}

type JsCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn viewport(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0))
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive canvas for the loaded graph.
///
/// Reads the graph, filter, parameters, legend, selection and commands from
/// the [`AppState`] in context and reports clicks back through it.
#[component]
pub fn ForceGraphCanvas(
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let app = expect_context::<AppState>();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tip = RwSignal::new(None::<HoverTip>);
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: JsCallback = Rc::new(RefCell::new(None));
	let resize_cb: JsCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	// Rebuild the simulation whenever the visible graph or forces change.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(graph) = app.graph.get() else {
			return;
		};
		let filter = app.filter.get();
		let params = app.params.get();
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		if animate_init.borrow().is_none() {
			let (w, h) = if fullscreen {
				viewport(&window)
			} else {
				(
					width.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_width() as f64)
							.unwrap_or(800.0)
					}),
					height.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_height() as f64)
							.unwrap_or(600.0)
					}),
				)
			};
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);

			let ctx: CanvasRenderingContext2d = match canvas
				.get_context("2d")
				.ok()
				.flatten()
				.and_then(|c| c.dyn_into().ok())
			{
				Some(ctx) => ctx,
				None => {
					error!("Canvas has no 2d context");
					return;
				}
			};

			if fullscreen {
				let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
				*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
					let Some(win) = web_sys::window() else {
						return;
					};
					let (nw, nh) = viewport(&win);
					canvas_resize.set_width(nw as u32);
					canvas_resize.set_height(nh as u32);
					if let Some(ref mut s) = *state_resize.borrow_mut() {
						s.resize(nw, nh);
					}
				}));
				if let Some(ref cb) = *resize_cb_init.borrow() {
					let _ =
						window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			}

			let (state_anim, animate_inner, resize_inner, canvas_anim) = (
				state_init.clone(),
				animate_init.clone(),
				resize_cb_init.clone(),
				canvas.clone(),
			);
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				// canvas unmounted: stop scheduling and let the state go
				if !canvas_anim.is_connected() {
					debug!("Canvas detached, stopping animation loop");
					state_anim.borrow_mut().take();
					if let Some(cb) = resize_inner.borrow_mut().take() {
						let _ = win
							.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
					}
					return;
				}
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					if s.animation_running {
						s.tick(0.016);
					}
					render::render(s, &ctx);
				}
				if let Some(ref cb) = *animate_inner.borrow() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}));
			if let Some(ref cb) = *animate_init.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}

		let (w, h) = (canvas.width() as f64, canvas.height() as f64);
		let view = GraphView::new(&graph, &filter);
		let mut next = ForceGraphState::new(&view, &app.legend.get_untracked(), params, w, h);
		let previous = state_init.borrow_mut().take();
		if let Some(old) = previous {
			next.carry_over(&old);
		}
		// a selection made while its kind was hidden lands once it shows
		let selected = app.selected.get_untracked();
		if next.selected_id() != selected {
			next.select(selected.as_deref());
		}
		debug!(
			"Rebuilt simulation: {} of {} nodes visible",
			next.node_count(),
			graph.nodes.len()
		);
		*state_init.borrow_mut() = Some(next);
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let id = app.selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.select(id.as_deref());
		}
	});

	let state_col = state.clone();
	Effect::new(move |_| {
		app.legend.with(|legend| {
			if let Some(ref mut s) = *state_col.borrow_mut() {
				s.set_colors(legend);
			}
		});
	});

	let state_cmd = state.clone();
	Effect::new(move |_| {
		let Some(command) = app.command.get() else {
			return;
		};
		if let Some(ref mut s) = *state_cmd.borrow_mut() {
			match command {
				CanvasCommand::ZoomIn => s.zoom_step(true),
				CanvasCommand::ZoomOut => s.zoom_step(false),
				CanvasCommand::ZoomFit => s.zoom_fit(),
				CanvasCommand::Export(format) => export::export(s, format),
			}
		}
		app.command.set(None);
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let hovered = match *state_mm.borrow_mut() {
			Some(ref mut s) => {
				s.pointer_move(x, y);
				s.hover.node.and_then(|idx| s.node_info(idx))
			}
			None => None,
		};
		tip.set(hovered.map(|info| HoverTip {
			name: info.label,
			kind: info.kind.to_string(),
			x: ev.page_x() as f64,
			y: ev.page_y() as f64,
		}));
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let click = match *state_mu.borrow_mut() {
			Some(ref mut s) => s.pointer_up(),
			None => None,
		};
		match click {
			Some(Click::Node(id)) => app.select(Some(id)),
			Some(Click::Background) => app.select(None),
			None => {}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
		tip.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 {
				WHEEL_ZOOM_OUT
			} else {
				WHEEL_ZOOM_IN
			};
			s.wheel(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		{move || {
			tip.get()
				.map(|tip| {
					view! {
						<div
							class="tooltip"
							style=format!("left: {}px; top: {}px;", tip.x + 10.0, tip.y - 28.0)
						>
							<strong>{tip.name}</strong>
							<br />
							{format!("Type: {}", tip.kind)}
						</div>
					}
				})
		}}
	}
}
