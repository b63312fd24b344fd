use std::collections::HashMap;
use std::rc::Rc;

use log::warn;

use super::template::LABEL_LINE_HEIGHT;
use crate::model::geometry::{Point, Rect, ShapeGeometry};
use crate::model::{ChangeSet, Location, NodeKey, NodeRecord};

/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const DRAG_THRESHOLD: f64 = 3.0;

#[derive(Clone, Debug)]
pub struct ViewNode {
	pub record: NodeRecord,
	pub geometry: Option<Rc<ShapeGeometry>>,
	/// Measured on the canvas; `None` until the first frame after a text change.
	pub label_width: Option<f64>,
}

impl ViewNode {
	pub fn bounds(&self) -> Rect {
		let pad = self.record.padding;
		Rect::new(
			self.record.loc.x,
			self.record.loc.y,
			self.label_width.unwrap_or(0.0) + 2.0 * pad,
			LABEL_LINE_HEIGHT + 2.0 * pad,
		)
	}
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub key: Option<NodeKey>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Location,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct DiagramViewState {
	pub nodes: Vec<ViewNode>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub selected: Option<NodeKey>,
	pub hovered: Option<NodeKey>,
	pub width: f64,
	pub height: f64,
	pub dash_time: f64,
	geometries: HashMap<String, Option<Rc<ShapeGeometry>>>,
}

impl DiagramViewState {
	pub fn new(records: &[NodeRecord], width: f64, height: f64) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			selected: None,
			hovered: None,
			width,
			height,
			dash_time: 0.0,
			geometries: HashMap::new(),
		};
		state.sync(records);
		state
	}

	/// Replaces the drawn nodes with a fresh snapshot of the collection.
	pub fn sync(&mut self, records: &[NodeRecord]) {
		let widths: HashMap<NodeKey, (String, Option<f64>)> = self
			.nodes
			.drain(..)
			.map(|n| (n.record.key, (n.record.text, n.label_width)))
			.collect();

		let mut nodes = Vec::with_capacity(records.len());
		for record in records {
			let geometry = self.geometry_for(&record.shape);
			let label_width = match widths.get(&record.key) {
				Some((text, width)) if *text == record.text => *width,
				_ => None,
			};
			nodes.push(ViewNode {
				record: record.clone(),
				geometry,
				label_width,
			});
		}
		self.nodes = nodes;

		if self.selected.is_some_and(|key| self.node(key).is_none()) {
			self.selected = None;
		}
	}

	fn geometry_for(&mut self, path: &str) -> Option<Rc<ShapeGeometry>> {
		self.geometries
			.entry(path.to_string())
			.or_insert_with(|| match ShapeGeometry::parse(path) {
				Ok(geometry) => Some(Rc::new(geometry)),
				Err(e) => {
					warn!("Unparsable shape {path:?}: {e}");
					None
				}
			})
			.clone()
	}

	pub fn node(&self, key: NodeKey) -> Option<&ViewNode> {
		self.nodes.iter().find(|n| n.record.key == key)
	}

	fn node_mut(&mut self, key: NodeKey) -> Option<&mut ViewNode> {
		self.nodes.iter_mut().find(|n| n.record.key == key)
	}

	/// Fills in label widths that have not been measured yet.
	pub fn measure_labels(&mut self, mut measure: impl FnMut(&str) -> f64) {
		for node in self.nodes.iter_mut().filter(|n| n.label_width.is_none()) {
			node.label_width = Some(measure(&node.record.text));
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the pointer. Later nodes are drawn above earlier ones.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeKey> {
		let p = self.screen_to_graph(sx, sy);
		self.nodes
			.iter()
			.rev()
			.find(|n| n.bounds().contains(p))
			.map(|n| n.record.key)
	}

	pub fn set_hover(&mut self, key: Option<NodeKey>) {
		if self.hovered != key {
			self.hovered = key;
			self.dash_time = 0.0;
		}
	}

	/// Starts dragging the node under the pointer, or panning if there is none.
	pub fn press(&mut self, sx: f64, sy: f64) {
		self.selected = self.node_at_position(sx, sy);
		let hit = self
			.selected
			.and_then(|key| self.node(key))
			.map(|n| (n.record.key, n.record.loc));
		match hit {
			Some((key, loc)) => {
				self.drag = DragState {
					active: true,
					key: Some(key),
					start_x: sx,
					start_y: sy,
					node_start: loc,
					moved: false,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	pub fn move_pointer(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if !self.drag.moved && dx.hypot(dy) < DRAG_THRESHOLD {
				return;
			}
			self.drag.moved = true;
			let k = self.transform.k;
			let loc = self.drag.node_start.offset(dx / k, dy / k);
			if let Some(node) = self.drag.key.and_then(|key| self.node_mut(key)) {
				node.record.loc = loc;
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends any drag or pan. A drag that moved its node yields the edit to report.
	pub fn release(&mut self) -> Option<ChangeSet> {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;
		if !(drag.active && drag.moved) {
			return None;
		}
		let node = drag.key.and_then(|key| self.node_mut(key))?;
		let loc = node.record.loc;
		node.record.loc = Location::new(loc.x.round(), loc.y.round());
		Some(ChangeSet::modified([node.record.clone()]))
	}

	pub fn leave(&mut self) -> Option<ChangeSet> {
		self.set_hover(None);
		self.release()
	}

	/// Applies an in-view label edit and returns it as a change-set.
	pub fn edit_text(&mut self, key: NodeKey, text: String) -> Option<ChangeSet> {
		let node = self.node_mut(key)?;
		if node.record.text == text {
			return None;
		}
		node.record.text = text;
		node.label_width = None;
		Some(ChangeSet::modified([node.record.clone()]))
	}

	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f64) {
		if self.hovered.is_some() {
			self.dash_time += dt;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
