use std::str::FromStr;

use log::error;

use super::error::Error;
use super::palette::ShapePalette;

/// Region new nodes are scattered over, in diagram pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasBounds {
	pub width: u32,
	pub height: u32,
}

impl Default for CanvasBounds {
	fn default() -> Self {
		Self {
			width: 1248,
			height: 400,
		}
	}
}

/// Where a record touched by a change-set ends up in the collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReconcileOrder {
	/// Remove the old record and append the new one.
	#[default]
	MoveToEnd,
	/// Replace the old record where it stands.
	InPlace,
}

impl FromStr for ReconcileOrder {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"move-to-end" => Ok(Self::MoveToEnd),
			"in-place" => Ok(Self::InPlace),
			_ => Err(Error::UnknownReconcileOrder {
				value: s.to_string(),
			}),
		}
	}
}

/// Everything the node factory and reconciler need that is not user input.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramConfig {
	pub palette: ShapePalette,
	pub canvas: CanvasBounds,
	pub padding: f64,
	/// Keys are drawn from `0..key_space`.
	pub key_space: u32,
	pub reconcile_order: ReconcileOrder,
}

impl Default for DiagramConfig {
	fn default() -> Self {
		let palette = ShapePalette::builtin().unwrap_or_else(|e| {
			error!("Built-in shapes rejected: {e}");
			ShapePalette::empty()
		});
		Self {
			palette,
			canvas: CanvasBounds::default(),
			padding: 15.0,
			key_space: 1000,
			reconcile_order: ReconcileOrder::default(),
		}
	}
}
