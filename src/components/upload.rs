use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

use crate::config::ACCEPTED_FILES;
use crate::error::{Error, Result};
use crate::rdf;
use crate::state::AppState;

async fn read_text(file: &File) -> Result<String> {
	let value = JsFuture::from(file.text())
		.await
		.map_err(|e| Error::Read(format!("{e:?}")))?;
	value
		.as_string()
		.ok_or_else(|| Error::Read("file content is not text".into()))
}

/// File picker and "Visualize" trigger shown while no graph is loaded.
#[component]
pub fn UploadPanel() -> impl IntoView {
	let app = expect_context::<AppState>();
	let picked: Rc<RefCell<Option<File>>> = Rc::new(RefCell::new(None));
	let file_name = RwSignal::new(None::<String>);
	let loading = RwSignal::new(false);
	let error = RwSignal::new(None::<String>);

	let picked_change = picked.clone();
	let on_change = move |ev: Event| {
		let input = event_target::<HtmlInputElement>(&ev);
		let file = input.files().and_then(|files| files.get(0));
		file_name.set(file.as_ref().map(File::name));
		*picked_change.borrow_mut() = file;
		// a new pick supersedes whatever was still being read
		app.cancel_pending();
		loading.set(false);
		error.set(None);
	};

	let on_visualize = move |_| {
		let Some(file) = picked.borrow().clone() else {
			return;
		};
		let ticket = app.begin_load();
		loading.set(true);
		error.set(None);
		info!("Reading {}", file.name());
		spawn_local(async move {
			let result = match read_text(&file).await {
				Ok(text) => rdf::parse_document(&text),
				Err(e) => Err(e),
			};
			if !app.is_current(ticket) {
				debug!("Discarding superseded result for {}", file.name());
				return;
			}
			loading.set(false);
			match result {
				Ok(graph) => app.load(graph),
				Err(e) => {
					warn!("Could not visualize {}: {e}", file.name());
					error.set(Some(e.to_string()));
				}
			}
		});
	};

	view! {
		<div class="upload-panel">
			<h1>"RDF Ontology Visualizer"</h1>
			<p class="subtitle">"Upload an RDF/XML, OWL or Turtle file to explore it as a graph."</p>
			<label class="file-input">
				<input type="file" accept=ACCEPTED_FILES on:change=on_change />
				<span>{move || file_name.get().unwrap_or_else(|| "Choose a file".into())}</span>
			</label>
			<button
				class="primary"
				disabled=move || loading.get() || file_name.with(Option::is_none)
				on:click=on_visualize
			>
				{move || if loading.get() { "Loading..." } else { "Visualize" }}
			</button>
			{move || error.get().map(|e| view! { <p class="error">{e}</p> })}
		</div>
	}
}
