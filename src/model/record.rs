use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::Error;

pub type NodeKey = u32;

/// Label tone drawn on top of a node's fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTone {
	/// Used on dark fills.
	#[serde(rename = "white")]
	Light,
	/// Used on light fills.
	#[serde(rename = "black")]
	Dark,
}

impl TextTone {
	pub fn css(self) -> &'static str {
		match self {
			TextTone::Light => "white",
			TextTone::Dark => "black",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Perceived brightness scaled by 1000, i.e. `299R + 587G + 114B`.
	pub fn brightness_milli(self) -> u32 {
		self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114
	}

	/// Strictly brighter than 128 gets dark text.
	pub fn contrast_tone(self) -> TextTone {
		if self.brightness_milli() > 128_000 {
			TextTone::Dark
		} else {
			TextTone::Light
		}
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgb({},{},{})", self.r, self.g, self.b)
	}
}

/// A node's top-left position in diagram coordinates, stored as `"x y"`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
	pub x: f64,
	pub y: f64,
}

impl Location {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.x.round() as i64, self.y.round() as i64)
	}
}

impl FromStr for Location {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || Error::InvalidLocation { input: s.to_string() };
		let mut parts = s.split_whitespace().map(str::parse::<f64>);
		match (parts.next(), parts.next(), parts.next()) {
			(Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => {
				Ok(Self::new(x, y))
			}
			_ => Err(invalid()),
		}
	}
}

impl Serialize for Location {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Location {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer)?
			.parse()
			.map_err(serde::de::Error::custom)
	}
}

/// One diagram node as held in the canonical collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
	pub key: NodeKey,
	pub text: String,
	pub color: String,
	pub text_color: TextTone,
	pub padding: f64,
	pub loc: Location,
	pub shape: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn black_gets_light_text() {
		let black = Rgb::new(0, 0, 0);
		assert_eq!(black.brightness_milli(), 0);
		assert_eq!(black.contrast_tone(), TextTone::Light);
	}

	#[test]
	fn white_gets_dark_text() {
		let white = Rgb::new(255, 255, 255);
		assert_eq!(white.brightness_milli(), 255_000);
		assert_eq!(white.contrast_tone(), TextTone::Dark);
	}

	#[test]
	fn brightness_of_exactly_128_stays_light() {
		// 299 * 128 + 587 * 128 + 114 * 128 = 128_000
		let grey = Rgb::new(128, 128, 128);
		assert_eq!(grey.brightness_milli(), 128_000);
		assert_eq!(grey.contrast_tone(), TextTone::Light);
		assert_eq!(Rgb::new(129, 128, 128).contrast_tone(), TextTone::Dark);
	}

	#[test]
	fn contrast_is_stable_for_a_color() {
		let color = Rgb::new(12, 200, 77);
		let first = color.contrast_tone();
		for _ in 0..10 {
			assert_eq!(color.contrast_tone(), first);
		}
	}

	#[test]
	fn rgb_formats_as_css() {
		assert_eq!(Rgb::new(1, 22, 255).to_string(), "rgb(1,22,255)");
	}

	#[test]
	fn location_parses_and_rounds_back_to_integers() {
		let loc: Location = "12.6 -3".parse().unwrap();
		assert_eq!(loc, Location::new(12.6, -3.0));
		assert_eq!(loc.to_string(), "13 -3");
		assert_eq!("  40   7 ".parse::<Location>().unwrap(), Location::new(40.0, 7.0));
	}

	#[test]
	fn location_rejects_malformed_input() {
		for bad in ["", "1", "1 2 3", "a b", "NaN 1"] {
			assert_eq!(
				bad.parse::<Location>(),
				Err(Error::InvalidLocation { input: bad.to_string() })
			);
		}
	}

	#[test]
	fn record_serializes_with_model_field_names() {
		let record = NodeRecord {
			key: 7,
			text: "Start".into(),
			color: "rgb(0,0,0)".into(),
			text_color: TextTone::Light,
			padding: 15.0,
			loc: Location::new(10.0, 20.0),
			shape: "F M 0,0 L 1,1 z".into(),
		};
		let json = serde_json::to_value(&record).unwrap();
		assert_eq!(json["textColor"], "white");
		assert_eq!(json["loc"], "10 20");
		assert_eq!(json["key"], 7);

		let back: NodeRecord = serde_json::from_value(json).unwrap();
		assert_eq!(back, record);
	}
}
