//! Synthesizes new node records from form input.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::{CanvasBounds, DiagramConfig};
use super::error::{Error, Result};
use super::record::{Location, NodeKey, NodeRecord, Rgb};

/// Random draws attempted before falling back to scanning for free keys.
pub const MAX_KEY_DRAWS: usize = 32;

/// Picks a key in `0..key_space` that no record in `existing` uses.
pub fn allocate_key<R: Rng + ?Sized>(
	existing: &[NodeRecord],
	key_space: u32,
	rng: &mut R,
) -> Result<NodeKey> {
	let exhausted = Error::KeySpaceExhausted {
		capacity: key_space,
	};
	if key_space == 0 {
		return Err(exhausted);
	}
	let taken: HashSet<NodeKey> = existing.iter().map(|n| n.key).collect();
	for _ in 0..MAX_KEY_DRAWS {
		let key = rng.gen_range(0..key_space);
		if !taken.contains(&key) {
			return Ok(key);
		}
	}
	let free: Vec<NodeKey> = (0..key_space).filter(|k| !taken.contains(k)).collect();
	free.choose(rng).copied().ok_or(exhausted)
}

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
	Rgb::new(
		rng.gen_range(0..=255),
		rng.gen_range(0..=255),
		rng.gen_range(0..=255),
	)
}

pub fn random_location<R: Rng + ?Sized>(canvas: CanvasBounds, rng: &mut R) -> Location {
	Location::new(
		rng.gen_range(0..canvas.width.max(1)) as f64,
		rng.gen_range(0..canvas.height.max(1)) as f64,
	)
}

/// Builds a record for `label` drawn as `shape_name`. Appending it is up to the caller.
pub fn create_node<R: Rng + ?Sized>(
	label: &str,
	shape_name: &str,
	existing: &[NodeRecord],
	config: &DiagramConfig,
	rng: &mut R,
) -> Result<NodeRecord> {
	let shape = config
		.palette
		.path(shape_name)
		.ok_or_else(|| Error::UnknownShape {
			name: shape_name.to_string(),
		})?;
	let key = allocate_key(existing, config.key_space, rng)?;
	let color = random_color(rng);
	let loc = random_location(config.canvas, rng);

	Ok(NodeRecord {
		key,
		text: label.to_string(),
		color: color.to_string(),
		text_color: color.contrast_tone(),
		padding: config.padding,
		loc,
		shape: shape.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::palette::CIRCLE;

	fn fill(config: &DiagramConfig, count: usize, seed: u64) -> Vec<NodeRecord> {
		let mut rng = StdRng::seed_from_u64(seed);
		let mut nodes = Vec::new();
		for i in 0..count {
			let node = create_node(&format!("n{i}"), "rectangle", &nodes, config, &mut rng)
				.expect("key space has room");
			nodes.push(node);
		}
		nodes
	}

	#[test]
	fn start_circle_from_empty() {
		let config = DiagramConfig::default();
		let mut rng = StdRng::seed_from_u64(1);
		let node = create_node("Start", "circle", &[], &config, &mut rng).unwrap();
		assert_eq!(node.text, "Start");
		assert_eq!(node.shape, CIRCLE);
		assert!(node.key < 1000);
		assert_eq!(node.padding, 15.0);
	}

	#[test]
	fn empty_label_is_accepted() {
		let mut rng = StdRng::seed_from_u64(2);
		let node = create_node("", "diamond", &[], &DiagramConfig::default(), &mut rng).unwrap();
		assert_eq!(node.text, "");
	}

	#[test]
	fn unknown_shape_is_an_error() {
		let mut rng = StdRng::seed_from_u64(3);
		let err = create_node("x", "hexagon", &[], &DiagramConfig::default(), &mut rng).unwrap_err();
		assert_eq!(
			err,
			Error::UnknownShape {
				name: "hexagon".into()
			}
		);
	}

	#[test]
	fn text_color_matches_generated_fill() {
		let nodes = fill(&DiagramConfig::default(), 50, 4);
		for node in &nodes {
			let rgb: Vec<u8> = node
				.color
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.map(|c| c.parse().unwrap())
				.collect();
			let color = Rgb::new(rgb[0], rgb[1], rgb[2]);
			assert_eq!(node.text_color, color.contrast_tone());
		}
	}

	#[test]
	fn locations_stay_inside_canvas_bounds() {
		let nodes = fill(&DiagramConfig::default(), 200, 5);
		for node in &nodes {
			assert!((0.0..1248.0).contains(&node.loc.x));
			assert!((0.0..400.0).contains(&node.loc.y));
			assert_eq!(node.loc.x.fract(), 0.0);
		}
	}

	#[test]
	fn full_key_space_is_reported_not_looped() {
		let config = DiagramConfig {
			key_space: 5,
			..DiagramConfig::default()
		};
		let nodes = fill(&config, 5, 6);
		let mut rng = StdRng::seed_from_u64(7);
		let err = create_node("one too many", "rectangle", &nodes, &config, &mut rng).unwrap_err();
		assert_eq!(err, Error::KeySpaceExhausted { capacity: 5 });
	}

	#[test]
	fn last_free_key_is_still_found() {
		let config = DiagramConfig::default();
		let mut nodes = fill(&config, 1, 8);
		let template = nodes.pop().unwrap();
		let nodes: Vec<NodeRecord> = (0..1000)
			.filter(|k| *k != 617)
			.map(|key| NodeRecord {
				key,
				..template.clone()
			})
			.collect();
		let mut rng = StdRng::seed_from_u64(9);
		assert_eq!(allocate_key(&nodes, 1000, &mut rng), Ok(617));
	}

	#[test]
	fn zero_key_space_is_exhausted() {
		let mut rng = StdRng::seed_from_u64(10);
		assert_eq!(
			allocate_key(&[], 0, &mut rng),
			Err(Error::KeySpaceExhausted { capacity: 0 })
		);
	}

	proptest! {
		#[test]
		fn keys_are_distinct_and_in_range(count in 1usize..300, seed in any::<u64>()) {
			let nodes = fill(&DiagramConfig::default(), count, seed);
			let keys: HashSet<NodeKey> = nodes.iter().map(|n| n.key).collect();
			prop_assert_eq!(keys.len(), count);
			prop_assert!(keys.iter().all(|k| *k < 1000));
		}
	}
}
