use indexmap::IndexMap;

use super::error::{Error, Result};
use super::geometry::ShapeGeometry;

/// Ordered mapping from shape name to its outline path.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePalette {
	shapes: IndexMap<String, String>,
}

impl ShapePalette {
	pub fn empty() -> Self {
		Self {
			shapes: IndexMap::new(),
		}
	}

	/// Adds or replaces a shape after checking that its path parses.
	pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) -> Result<()> {
		let (name, path) = (name.into(), path.into());
		ShapeGeometry::parse(&path).map_err(|message| Error::InvalidShapePath {
			name: name.clone(),
			message,
		})?;
		self.shapes.insert(name, path);
		Ok(())
	}

	pub fn with_shape(mut self, name: impl Into<String>, path: impl Into<String>) -> Result<Self> {
		self.insert(name, path)?;
		Ok(self)
	}

	pub fn path(&self, name: &str) -> Option<&str> {
		self.shapes.get(name).map(String::as_str)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.shapes.keys().map(String::as_str)
	}
}

pub const RECTANGLE: &str = "F M 0,0 L 20,0 L 20,10 L 0,10 L 0,0 z";
pub const DIAMOND: &str = "F M 0,0 L 15,15 L 0,30 L -15,15 L 0,0 z";
pub const CIRCLE: &str = "F M 100, 100 m 75, 0 a 75,75 0 1,0 -150,0 a 75,75 0 1,0  150,0 z";
pub const TRIANGLE: &str = "F M 0,0 L 10,20 L -10,20 L 0,0 z";

impl ShapePalette {
	/// The four built-in shapes, validated like any other entry.
	pub fn builtin() -> Result<Self> {
		Self::empty()
			.with_shape("rectangle", RECTANGLE)?
			.with_shape("diamond", DIAMOND)?
			.with_shape("circle", CIRCLE)?
			.with_shape("triangle", TRIANGLE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_palette_keeps_declared_order() {
		let palette = ShapePalette::builtin().unwrap();
		let names: Vec<_> = palette.names().collect();
		assert_eq!(names, ["rectangle", "diamond", "circle", "triangle"]);
		assert_eq!(palette.path("circle"), Some(CIRCLE));
		assert_eq!(palette.path("hexagon"), None);
	}

	#[test]
	fn insert_rejects_unparsable_paths() {
		let mut palette = ShapePalette::empty();
		let err = palette.insert("blob", "").unwrap_err();
		assert!(matches!(err, Error::InvalidShapePath { ref name, .. } if name == "blob"));
		assert_eq!(palette.names().count(), 0);

		let palette = palette.with_shape("line", "M 0,0 L 10,0").unwrap();
		assert_eq!(palette.names().collect::<Vec<_>>(), ["line"]);
		assert_eq!(palette.path("line"), Some("M 0,0 L 10,0"));
	}

	#[test]
	fn insert_replaces_existing_name_in_place() {
		let palette = ShapePalette::builtin()
			.unwrap()
			.with_shape("diamond", "M 0,0 L 1,1 L 0,2 z")
			.unwrap();
		assert_eq!(palette.names().nth(1), Some("diamond"));
		assert_eq!(palette.path("diamond"), Some("M 0,0 L 1,1 L 0,2 z"));
	}
}
