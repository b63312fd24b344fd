use leptos::ev::SubmitEvent;
use leptos::prelude::*;

/// Select entries as `(shape name, preselected)`; the first shape starts selected.
fn shape_options(shape_names: Vec<String>) -> Vec<(String, bool)> {
	shape_names
		.into_iter()
		.enumerate()
		.map(|(i, name)| (name, i == 0))
		.collect()
}

/// Label input, shape select and submit button.
///
/// Submitting hands `(label, shape name)` to `on_add`; the label is passed
/// through untouched, empty included.
#[component]
pub fn NodeForm(
	shape_names: Vec<String>,
	#[prop(into)] on_add: Callback<(String, String)>,
	#[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
	let initial_shape = shape_names.first().cloned().unwrap_or_default();
	let (label, set_label) = signal(String::new());
	let (shape, set_shape) = signal(initial_shape);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		on_add.run((label.get_untracked(), shape.get_untracked()));
	};

	let options = shape_options(shape_names)
		.into_iter()
		.map(|(name, selected)| {
			let value = name.clone();
			view! {
				<option value=value selected=selected style="text-transform: capitalize;">
					{name}
				</option>
			}
		})
		.collect_view();

	view! {
		<form
			on:submit=on_submit
			class="node-form"
			style="display: flex; flex-direction: column; justify-content: center; gap: 15px;"
		>
			<h3>"Add flow chart item"</h3>
			<input
				type="text"
				placeholder="Flow chart item"
				prop:value=move || label.get()
				on:input=move |ev| set_label.set(event_target_value(&ev))
			/>
			<select
				prop:value=move || shape.get()
				on:change=move |ev| set_shape.set(event_target_value(&ev))
				style="text-transform: capitalize;"
			>
				{options}
			</select>
			<button type="submit">"Add"</button>
			{move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
		</form>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_shape_is_preselected() {
		let names = vec!["rectangle".to_string(), "diamond".to_string(), "circle".to_string()];
		assert_eq!(
			shape_options(names),
			vec![
				("rectangle".to_string(), true),
				("diamond".to_string(), false),
				("circle".to_string(), false),
			]
		);
		assert!(shape_options(Vec::new()).is_empty());
	}
}
