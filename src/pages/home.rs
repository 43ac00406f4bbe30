use leptos::prelude::*;

use crate::components::controls::ControlsPanel;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::legend::Legend;
use crate::components::node_details::NodeDetails;
use crate::components::search_bar::SearchBar;
use crate::components::upload::UploadPanel;
use crate::components::zoom_controls::ZoomControls;
use crate::state::AppState;

/// Upload screen until a graph is loaded, then the graph with its panels.
#[component]
pub fn Home() -> impl IntoView {
	let app = AppState::new();
	provide_context(app);

	view! {
		<div class="fullscreen-graph">
			<Show
				when=move || app.graph.with(Option::is_some)
				fallback=|| view! { <UploadPanel /> }
			>
				<ForceGraphCanvas fullscreen=true />
				<SearchBar />
				<ControlsPanel />
				<Legend />
				<NodeDetails />
				<ZoomControls />
				<button class="panel upload-again" on:click=move |_| app.clear()>
					"Upload New File"
				</button>
			</Show>
		</div>
	}
}
