//! How record fields map onto the drawn node, and which of them the view may write back.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingMode {
	/// Record → view only.
	OneWay,
	/// Edits made in the view are reported back in a change-set.
	TwoWay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
	pub target: &'static str,
	pub field: &'static str,
	pub mode: BindingMode,
}

impl std::fmt::Display for Binding {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let arrow = match self.mode {
			BindingMode::OneWay => "<-",
			BindingMode::TwoWay => "<->",
		};
		write!(f, "{} {arrow} {}", self.target, self.field)
	}
}

const fn bind(target: &'static str, field: &'static str, mode: BindingMode) -> Binding {
	Binding {
		target,
		field,
		mode,
	}
}

pub const NODE_TEMPLATE: &[Binding] = &[
	bind("location", "loc", BindingMode::TwoWay),
	bind("fill", "color", BindingMode::OneWay),
	bind("geometry", "shape", BindingMode::OneWay),
	bind("margin", "padding", BindingMode::OneWay),
	bind("stroke", "textColor", BindingMode::TwoWay),
	bind("text", "text", BindingMode::TwoWay),
];

pub const LABEL_FONT: &str = "bold 14pt serif";
/// 14pt in CSS pixels, rounded up.
pub const LABEL_LINE_HEIGHT: f64 = 19.0;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_location_and_label_fields_write_back() {
		let two_way: Vec<_> = NODE_TEMPLATE
			.iter()
			.filter(|b| b.mode == BindingMode::TwoWay)
			.map(|b| b.field)
			.collect();
		assert_eq!(two_way, ["loc", "textColor", "text"]);
	}

	#[test]
	fn bindings_describe_direction() {
		assert_eq!(NODE_TEMPLATE[0].to_string(), "location <-> loc");
		assert_eq!(NODE_TEMPLATE[1].to_string(), "fill <- color");
	}
}
