use leptos::prelude::*;

use crate::graph::Node;
use crate::state::AppState;

fn rows(node: &Node) -> Vec<(String, String)> {
	let mut out = vec![
		("ID".to_string(), node.id.clone()),
		("Type".to_string(), node.kind.to_string()),
	];
	if let Some(description) = &node.description {
		out.push(("Description".to_string(), description.clone()));
	}
	if let Some(cluster) = node.cluster {
		out.push(("Cluster".to_string(), cluster.to_string()));
	}
	out.extend(node.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
	out
}

/// Properties of the selected node.
#[component]
pub fn NodeDetails() -> impl IntoView {
	let app = expect_context::<AppState>();

	move || {
		app.selected_node().map(|node| {
			view! {
				<div class="panel node-details">
					<div class="panel-header">
						<h2>{node.name.clone()}</h2>
						<button on:click=move |_| app.select(None)>"×"</button>
					</div>
					<dl>
						{rows(&node)
							.into_iter()
							.map(|(k, v)| view! { <dt>{k}</dt><dd>{v}</dd> })
							.collect_view()}
					</dl>
				</div>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::NodeKind;
	use pretty_assertions::assert_eq;

	#[test]
	fn rows_list_core_fields_then_attributes() {
		let mut node = Node::new("#Person", "Person", NodeKind::Class);
		node.description = Some("A human being".into());
		node.attributes.insert("rdf:about".into(), "#Person".into());
		assert_eq!(
			rows(&node),
			vec![
				("ID".to_string(), "#Person".to_string()),
				("Type".to_string(), "Class".to_string()),
				("Description".to_string(), "A human being".to_string()),
				("Cluster".to_string(), "0".to_string()),
				("rdf:about".to_string(), "#Person".to_string()),
			]
		);
	}
}
