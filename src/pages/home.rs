use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::{error, info, warn};

use crate::components::diagram::DiagramCanvas;
use crate::components::node_form::NodeForm;
use crate::model::{ChangeSet, DiagramConfig, DiagramModel, ReconcileOrder};

/// Form on the left, diagram on the right.
#[component]
pub fn Home() -> impl IntoView {
	let mut config = use_context::<DiagramConfig>().unwrap_or_default();
	// `?order=in-place` keeps edited nodes where they are in the collection.
	if let Some(order) = use_query_map().with_untracked(|q| q.get("order")) {
		match order.parse::<ReconcileOrder>() {
			Ok(order) => config.reconcile_order = order,
			Err(e) => warn!("{e}; keeping {:?}", config.reconcile_order),
		}
	}
	let shape_names: Vec<String> = config.palette.names().map(String::from).collect();
	let config = StoredValue::new(config);

	// The canonical collection; only `add_node` and `apply_change_set` touch it.
	let model = RwSignal::new(DiagramModel::new());
	let nodes = Signal::derive(move || model.with(|m| m.nodes().to_vec()));
	let form_error = RwSignal::new(None::<String>);

	let on_add = move |(label, shape): (String, String)| {
		let outcome = model.try_update(|m| {
			config.with_value(|cfg| {
				m.add_node(&label, &shape, cfg, &mut rand::thread_rng())
					.map(|node| node.key)
			})
		});
		match outcome {
			Some(Ok(key)) => {
				info!("Node {key} created");
				form_error.set(None);
			}
			Some(Err(e)) => {
				error!("Could not add node: {e}");
				form_error.set(Some(e.to_string()));
			}
			None => warn!("Diagram model disposed; node not added"),
		}
	};

	let on_model_change = move |changes: ChangeSet| {
		config.with_value(|cfg| model.update(|m| m.apply_change_set(&changes, cfg)));
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div style="width: 100%; display: flex;">
				<NodeForm shape_names=shape_names on_add=on_add error=form_error />
				<div class="diagram-host" style="flex: 1; height: 100vh;">
					<DiagramCanvas nodes=nodes on_model_change=on_model_change />
				</div>
			</div>
		</ErrorBoundary>
	}
}
