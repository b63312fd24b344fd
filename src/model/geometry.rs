//! Shape outlines parsed from palette path strings.
//!
//! Palette paths use SVG path syntax with an optional `F` token marking a
//! filled figure. Outlines are kept in their own coordinate space and
//! stretched onto a node's box when drawn.

use svgtypes::{SimplePathSegment, SimplifyingPathParser};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}

	pub fn inflate(&self, by: f64) -> Self {
		Self::new(
			self.x - by,
			self.y - by,
			self.width + 2.0 * by,
			self.height + 2.0 * by,
		)
	}
}

/// Absolute drawing commands after arcs and shorthand forms are expanded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
	MoveTo(Point),
	LineTo(Point),
	QuadTo(Point, Point),
	CubicTo(Point, Point, Point),
	Close,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeGeometry {
	ops: Vec<PathOp>,
	/// Bounding box of every point, control points included.
	bounds: Rect,
}

/// Drops the `F` fill markers so the rest reads as plain SVG path data.
pub fn strip_fill_flags(path: &str) -> String {
	path.split_whitespace()
		.filter(|token| *token != "F")
		.collect::<Vec<_>>()
		.join(" ")
}

impl ShapeGeometry {
	pub fn parse(path: &str) -> Result<Self, String> {
		let data = strip_fill_flags(path);
		let mut ops = Vec::new();
		for segment in SimplifyingPathParser::from(data.as_str()) {
			let op = match segment.map_err(|e| e.to_string())? {
				SimplePathSegment::MoveTo { x, y } => PathOp::MoveTo(Point::new(x, y)),
				SimplePathSegment::LineTo { x, y } => PathOp::LineTo(Point::new(x, y)),
				SimplePathSegment::Quadratic { x1, y1, x, y } => {
					PathOp::QuadTo(Point::new(x1, y1), Point::new(x, y))
				}
				SimplePathSegment::CurveTo {
					x1,
					y1,
					x2,
					y2,
					x,
					y,
				} => PathOp::CubicTo(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y)),
				SimplePathSegment::ClosePath => PathOp::Close,
			};
			ops.push(op);
		}
		let bounds = bounds_of(&ops).ok_or_else(|| "path has no points".to_string())?;
		Ok(Self { ops, bounds })
	}

	/// Maps the outline onto `target`, stretching each axis independently.
	/// A degenerate axis (zero extent) is centred instead of scaled.
	pub fn fit_to(&self, target: Rect) -> Vec<PathOp> {
		let b = self.bounds;
		let map = |p: Point| {
			let x = if b.width > 0.0 {
				target.x + (p.x - b.x) / b.width * target.width
			} else {
				target.x + target.width / 2.0
			};
			let y = if b.height > 0.0 {
				target.y + (p.y - b.y) / b.height * target.height
			} else {
				target.y + target.height / 2.0
			};
			Point::new(x, y)
		};
		self.ops
			.iter()
			.map(|op| match *op {
				PathOp::MoveTo(p) => PathOp::MoveTo(map(p)),
				PathOp::LineTo(p) => PathOp::LineTo(map(p)),
				PathOp::QuadTo(c, p) => PathOp::QuadTo(map(c), map(p)),
				PathOp::CubicTo(c1, c2, p) => PathOp::CubicTo(map(c1), map(c2), map(p)),
				PathOp::Close => PathOp::Close,
			})
			.collect()
	}
}

fn bounds_of(ops: &[PathOp]) -> Option<Rect> {
	let mut points = ops.iter().flat_map(|op| match *op {
		PathOp::MoveTo(p) | PathOp::LineTo(p) => vec![p],
		PathOp::QuadTo(c, p) => vec![c, p],
		PathOp::CubicTo(c1, c2, p) => vec![c1, c2, p],
		PathOp::Close => vec![],
	});
	let first = points.next()?;
	let (mut min, mut max) = (first, first);
	for p in points {
		min.x = min.x.min(p.x);
		min.y = min.y.min(p.y);
		max.x = max.x.max(p.x);
		max.y = max.y.max(p.y);
	}
	Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
}
