use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::state::{DiagramViewState, ViewNode};
use super::template::LABEL_FONT;
use crate::model::geometry::PathOp;

const BACKGROUND: &str = "#ffffff";
const OUTLINE: &str = "#000000";
const SELECTION: &str = "dodgerblue";

/// Measures any labels the view has not sized yet.
pub fn measure(state: &mut DiagramViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	state.measure_labels(|text| ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0));
}

pub fn render(state: &DiagramViewState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	for node in &state.nodes {
		draw_node(node, state.transform.k, ctx);
	}
	draw_adornments(state, ctx);
	ctx.restore();
}

fn trace(ops: &[PathOp]) -> Result<Path2d, JsValue> {
	let path = Path2d::new()?;
	for op in ops {
		match *op {
			PathOp::MoveTo(p) => path.move_to(p.x, p.y),
			PathOp::LineTo(p) => path.line_to(p.x, p.y),
			PathOp::QuadTo(c, p) => path.quadratic_curve_to(c.x, c.y, p.x, p.y),
			PathOp::CubicTo(c1, c2, p) => path.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
			PathOp::Close => path.close_path(),
		}
	}
	Ok(path)
}

fn draw_node(node: &ViewNode, k: f64, ctx: &CanvasRenderingContext2d) {
	let bounds = node.bounds();
	ctx.set_fill_style_str(&node.record.color);
	ctx.set_stroke_style_str(OUTLINE);
	ctx.set_line_width(1.0 / k);

	let outline = node.geometry.as_ref().map(|g| trace(&g.fit_to(bounds)));
	match outline {
		Some(Ok(path)) => {
			ctx.fill_with_path_2d(&path);
			ctx.stroke_with_path(&path);
		}
		Some(Err(e)) => log::debug!("Path2D unavailable for node {}: {e:?}", node.record.key),
		None => {
			ctx.fill_rect(bounds.x, bounds.y, bounds.width, bounds.height);
			ctx.stroke_rect(bounds.x, bounds.y, bounds.width, bounds.height);
		}
	}

	let pad = node.record.padding;
	ctx.set_fill_style_str(node.record.text_color.css());
	ctx.set_font(LABEL_FONT);
	ctx.set_text_baseline("top");
	let _ = ctx.fill_text(&node.record.text, bounds.x + pad, bounds.y + pad);
}

fn draw_adornments(state: &DiagramViewState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;

	if let Some(node) = state.hovered.and_then(|key| state.node(key)) {
		let (dash, gap) = (6.0 / k, 4.0 / k);
		let b = node.bounds().inflate(2.0 / k);
		ctx.set_stroke_style_str("rgba(30, 144, 255, 0.6)");
		ctx.set_line_width(1.0 / k);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(-(state.dash_time * 20.0) % (dash + gap));
		ctx.stroke_rect(b.x, b.y, b.width, b.height);
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	if let Some(node) = state.selected.and_then(|key| state.node(key)) {
		let b = node.bounds().inflate(4.0 / k);
		ctx.set_stroke_style_str(SELECTION);
		ctx.set_line_width(2.0 / k);
		ctx.stroke_rect(b.x, b.y, b.width, b.height);
	}
}
