use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::DiagramViewState;
use super::template::NODE_TEMPLATE;
use crate::model::{ChangeSet, NodeRecord};

type CanvasRef = NodeRef<leptos::html::Canvas>;

fn pointer(canvas_ref: CanvasRef, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn parent_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

/// Interactive view of the node collection.
///
/// Renders `nodes` as given and reports drags and label edits through
/// `on_model_change`. It never writes to the collection itself.
#[component]
pub fn DiagramCanvas(
	#[prop(into)] nodes: Signal<Vec<NodeRecord>>,
	#[prop(into)] on_model_change: Callback<ChangeSet>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref: CanvasRef = NodeRef::new();
	let state: Rc<RefCell<Option<DiagramViewState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("No window; diagram disabled");
			return;
		};

		let (w, h) = parent_size(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("Canvas 2D context unavailable; diagram disabled");
			return;
		};
		*state_init.borrow_mut() = Some(DiagramViewState::new(&nodes.get_untracked(), w, h));
		debug!(
			"Diagram view {w}x{h}, bindings: {}",
			NODE_TEMPLATE
				.iter()
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", ")
		);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::measure(s, &ctx);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// One-way feed: every new snapshot of the collection replaces what is drawn.
	let state_sync = state.clone();
	Effect::new(move |_| {
		let records = nodes.get();
		if let Some(ref mut s) = *state_sync.borrow_mut() {
			s.sync(&records);
		}
	});

	let report = move |changes: Option<ChangeSet>| {
		if let Some(changes) = changes.filter(|c| !c.is_empty()) {
			on_model_change.run(changes);
		}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.move_pointer(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		// Release the borrow before reporting; the change flows straight back into `sync`.
		let changes = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		report(changes);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let changes = state_ml.borrow_mut().as_mut().and_then(|s| s.leave());
		report(changes);
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let target = state_dc.borrow().as_ref().and_then(|s| {
			let key = s.node_at_position(x, y)?;
			Some((key, s.node(key)?.record.text.clone()))
		});
		let Some((key, current)) = target else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let edited = match window.prompt_with_message_and_default("Edit label", &current) {
			Ok(Some(text)) => text,
			Ok(None) => return,
			Err(e) => {
				debug!("Label prompt failed: {e:?}");
				return;
			}
		};
		let changes = state_dc
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.edit_text(key, edited));
		report(changes);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="diagram-component"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: default;"
		/>
	}
}
