use leptos::prelude::*;

use crate::state::AppState;

/// Color key of the node kinds currently shown.
#[component]
pub fn Legend() -> impl IntoView {
	let app = expect_context::<AppState>();

	view! {
		<div class="panel legend">
			<h3>"Legend"</h3>
			<ul>
				{move || {
					let filter = app.filter.get();
					app.legend
						.with(|l| {
							l.kinds()
								.iter()
								.filter(|k| filter.is_active(**k))
								.map(|k| (k.as_str(), l.color(*k)))
								.collect::<Vec<_>>()
						})
						.into_iter()
						.map(|(name, color)| {
							view! {
								<li>
									<span class="swatch" style=format!("background-color: {color};") />
									{name}
								</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}
