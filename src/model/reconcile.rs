//! Folds change-sets reported by the diagram view back into the node collection.

use serde::{Deserialize, Serialize};

use super::config::ReconcileOrder;
use super::record::NodeRecord;

/// Edits reported by the diagram view since the last reconciliation.
///
/// Each record carries the full field set for its key, not a delta.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
	#[serde(default)]
	pub modified_node_data: Vec<NodeRecord>,
}

impl ChangeSet {
	pub fn modified(records: impl IntoIterator<Item = NodeRecord>) -> Self {
		Self {
			modified_node_data: records.into_iter().collect(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.modified_node_data.is_empty()
	}
}

/// Returns the collection with each record of `modified` applied in order,
/// last writer winning per key. Records are replaced whole, never merged.
pub fn apply_change_set(
	existing: &[NodeRecord],
	modified: &[NodeRecord],
	order: ReconcileOrder,
) -> Vec<NodeRecord> {
	let mut result = existing.to_vec();
	for incoming in modified {
		let current = result.iter().position(|n| n.key == incoming.key);
		match (order, current) {
			(ReconcileOrder::InPlace, Some(idx)) => result[idx] = incoming.clone(),
			(ReconcileOrder::MoveToEnd, Some(idx)) => {
				result.remove(idx);
				result.push(incoming.clone());
			}
			(_, None) => result.push(incoming.clone()),
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::record::{Location, TextTone};

	fn node(key: u32, text: &str) -> NodeRecord {
		NodeRecord {
			key,
			text: text.into(),
			color: "rgb(10,20,30)".into(),
			text_color: TextTone::Light,
			padding: 15.0,
			loc: Location::new(0.0, 0.0),
			shape: "F M 0,0 L 1,1 z".into(),
		}
	}

	#[test]
	fn replaces_instead_of_merging() {
		let mut changed = node(1, "b");
		changed.color = "red".into();
		changed.loc = Location::new(5.0, 6.0);
		let result = apply_change_set(&[node(1, "a")], &[changed.clone()], ReconcileOrder::MoveToEnd);
		assert_eq!(result, vec![changed]);
	}

	#[test]
	fn touched_record_moves_to_the_end() {
		let existing = [node(1, ""), node(2, "")];
		let result = apply_change_set(&existing, &[node(1, "x")], ReconcileOrder::MoveToEnd);
		assert_eq!(result, vec![node(2, ""), node(1, "x")]);
	}

	#[test]
	fn in_place_keeps_position() {
		let existing = [node(1, ""), node(2, ""), node(3, "")];
		let result = apply_change_set(&existing, &[node(2, "x")], ReconcileOrder::InPlace);
		assert_eq!(result, vec![node(1, ""), node(2, "x"), node(3, "")]);
	}

	#[test]
	fn applying_twice_equals_applying_once() {
		let existing = [node(1, "a"), node(2, "b"), node(3, "c")];
		let modified = [node(3, "z"), node(1, "y")];
		for order in [ReconcileOrder::MoveToEnd, ReconcileOrder::InPlace] {
			let once = apply_change_set(&existing, &modified, order);
			let twice = apply_change_set(&once, &modified, order);
			assert_eq!(once, twice);
		}
	}

	#[test]
	fn later_entries_for_same_key_win() {
		let result = apply_change_set(
			&[node(1, "a")],
			&[node(1, "first"), node(1, "second")],
			ReconcileOrder::MoveToEnd,
		);
		assert_eq!(result, vec![node(1, "second")]);
	}

	#[test]
	fn unknown_keys_are_appended() {
		let result = apply_change_set(&[node(1, "a")], &[node(9, "new")], ReconcileOrder::InPlace);
		assert_eq!(result, vec![node(1, "a"), node(9, "new")]);
	}

	#[test]
	fn change_set_reads_view_field_names() {
		let json = r#"{"modifiedNodeData":[{"key":4,"text":"t","color":"blue","textColor":"black","padding":15,"loc":"3 4","shape":"M 0,0 L 1,1"}]}"#;
		let changes: ChangeSet = serde_json::from_str(json).unwrap();
		assert_eq!(changes.modified_node_data[0].loc, Location::new(3.0, 4.0));
		assert_eq!(changes.modified_node_data[0].text_color, TextTone::Dark);
		assert!(serde_json::from_str::<ChangeSet>("{}").unwrap().is_empty());
	}

	#[test]
	fn malformed_location_rejects_the_change_set() {
		let json = r#"{"modifiedNodeData":[{"key":4,"text":"t","color":"blue","textColor":"black","padding":15,"loc":"3","shape":"M 0,0 L 1,1"}]}"#;
		let err = serde_json::from_str::<ChangeSet>(json).unwrap_err();
		assert!(err.to_string().contains("Invalid location"), "{err}");
	}
}
