use std::ops::RangeInclusive;

use leptos::prelude::*;

use crate::components::force_graph::ExportFormat;
use crate::config::{COLLIDE_RANGE, DISTANCE_RANGE, ForceParams, STRENGTH_RANGE};
use crate::graph::NodeKind;
use crate::state::{AppState, CanvasCommand};

#[component]
fn Slider(
	label: &'static str,
	range: RangeInclusive<f64>,
	step: f64,
	#[prop(into)] value: Signal<f64>,
	on_change: Callback<f64>,
) -> impl IntoView {
	view! {
		<label class="slider">
			<span>{label} ": " {move || value.get().to_string()}</span>
			<input
				type="range"
				min=range.start().to_string()
				max=range.end().to_string()
				step=step.to_string()
				prop:value=move || value.get().to_string()
				on:input=move |ev| {
					if let Ok(v) = event_target_value(&ev).parse::<f64>() {
						on_change.run(v);
					}
				}
			/>
		</label>
	}
}

/// Visibility toggle and color editor for one node kind.
#[component]
fn TypeRow(kind: NodeKind) -> impl IntoView {
	let app = expect_context::<AppState>();
	let color = move || app.legend.with(|l| l.color(kind));
	// invalid input still notifies, which snaps the field back
	let set_color = move |value: String| {
		app.legend.update(|l| {
			l.set_color(kind, &value);
		});
	};

	view! {
		<div class="type-row">
			<label>
				<input
					type="checkbox"
					prop:checked=move || app.filter.with(|f| f.is_active(kind))
					on:change=move |ev| app.set_type_active(kind, event_target_checked(&ev))
				/>
				{kind.as_str()}
			</label>
			<input
				type="color"
				prop:value=color
				on:input=move |ev| set_color(event_target_value(&ev))
			/>
			<input
				type="text"
				class="hex"
				maxlength="7"
				prop:value=color
				on:change=move |ev| set_color(event_target_value(&ev))
			/>
		</div>
	}
}

/// Force sliders, node type filters and export buttons.
#[component]
pub fn ControlsPanel() -> impl IntoView {
	let app = expect_context::<AppState>();
	// rows rebuild on a new set of kinds only, not on every color edit
	let kinds = app.legend_kinds();
	let param = move |f: fn(&ForceParams) -> f64| {
		Signal::derive(move || app.params.with(f))
	};

	view! {
		<div class="panel controls-panel">
			<div class="panel-header">
				<h2>"Controls"</h2>
				<button on:click=move |_| app.show_controls.update(|v| *v = !*v)>
					{move || if app.show_controls.get() { "Hide" } else { "Show" }}
				</button>
			</div>
			<Show when=move || app.show_controls.get()>
				<h3>"Forces"</h3>
				<Slider
					label="Collision radius"
					range=COLLIDE_RANGE
					step=1.0
					value=param(|p| p.collide)
					on_change=Callback::new(move |v| app.params.update(|p| *p = p.with_collide(v)))
				/>
				<Slider
					label="Charge strength"
					range=STRENGTH_RANGE
					step=100.0
					value=param(|p| p.strength)
					on_change=Callback::new(move |v| app.params.update(|p| *p = p.with_strength(v)))
				/>
				<Slider
					label="Link distance"
					range=DISTANCE_RANGE
					step=1.0
					value=param(|p| p.distance)
					on_change=Callback::new(move |v| app.params.update(|p| *p = p.with_distance(v)))
				/>

				<h3>"Node Types"</h3>
				<For each=move || kinds.get() key=|kind| *kind let:kind>
					<TypeRow kind=kind />
				</For>
				<button on:click=move |_| app.legend.update(|l| l.reset())>"Reset Colors"</button>

				<h3>"Export"</h3>
				<div class="button-row">
					<button on:click=move |_| app.send(CanvasCommand::Export(ExportFormat::Png))>
						"PNG"
					</button>
					<button on:click=move |_| app.send(CanvasCommand::Export(ExportFormat::Svg))>
						"SVG"
					</button>
				</div>
			</Show>
		</div>
	}
}
