use leptos::prelude::*;

use crate::state::{AppState, CanvasCommand};

#[component]
pub fn ZoomControls() -> impl IntoView {
	let app = expect_context::<AppState>();

	view! {
		<div class="panel zoom-controls">
			<button title="Zoom in" on:click=move |_| app.send(CanvasCommand::ZoomIn)>"+"</button>
			<button title="Zoom out" on:click=move |_| app.send(CanvasCommand::ZoomOut)>"−"</button>
			<button title="Fit graph" on:click=move |_| app.send(CanvasCommand::ZoomFit)>"⤢"</button>
		</div>
	}
}
