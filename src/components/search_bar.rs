use leptos::prelude::*;

use crate::search::SearchHit;
use crate::state::AppState;

/// Collapsible fuzzy search over the loaded nodes.
#[component]
pub fn SearchBar() -> impl IntoView {
	let app = expect_context::<AppState>();
	let query = RwSignal::new(String::new());
	let hits = Memo::new(move |_| {
		query.with(|q| {
			app.search_index
				.with(|index| index.as_ref().map(|i| i.search(q)).unwrap_or_default())
		})
	});

	let pick = move |hit: &SearchHit| {
		app.reveal(hit.id.clone(), hit.kind);
		query.set(String::new());
		app.show_search.set(false);
	};

	view! {
		<div class="panel search-bar">
			<Show
				when=move || app.show_search.get()
				fallback=move || {
					view! {
						<button class="search-toggle" on:click=move |_| app.show_search.set(true)>
							"Search"
						</button>
					}
				}
			>
				<div class="search-input">
					<input
						type="text"
						placeholder="Search nodes..."
						prop:value=move || query.get()
						on:input=move |ev| query.set(event_target_value(&ev))
					/>
					<button on:click=move |_| {
						query.set(String::new());
						app.show_search.set(false);
					}>"×"</button>
				</div>
				<Show when=move || hits.with(|h| !h.is_empty())>
					<ul class="search-results">
						<For
							each=move || hits.get()
							key=|hit| hit.id.clone()
							children=move |hit| {
								let label = format!("Matched: {}", hit.field);
								let (name, kind) = (hit.name.clone(), hit.kind.as_str());
								view! {
									<li on:click=move |_| pick(&hit)>
										<strong>{name}</strong>
										<span class="kind">{kind}</span>
										<small>{label}</small>
									</li>
								}
							}
						/>
					</ul>
				</Show>
			</Show>
		</div>
	}
}
