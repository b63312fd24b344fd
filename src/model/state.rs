use log::{debug, info};
use rand::Rng;

use super::config::DiagramConfig;
use super::error::Result;
use super::factory::create_node;
use super::reconcile::{ChangeSet, apply_change_set};
use super::record::NodeRecord;

/// Owner of the canonical node collection.
///
/// Only [`DiagramModel::add_node`] and [`DiagramModel::apply_change_set`]
/// change it; the diagram view gets read snapshots through [`DiagramModel::nodes`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramModel {
	nodes: Vec<NodeRecord>,
}

impl DiagramModel {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn nodes(&self) -> &[NodeRecord] {
		&self.nodes
	}

	pub fn add_node<R: Rng + ?Sized>(
		&mut self,
		label: &str,
		shape_name: &str,
		config: &DiagramConfig,
		rng: &mut R,
	) -> Result<&NodeRecord> {
		let node = create_node(label, shape_name, &self.nodes, config, rng)?;
		info!("Added node {} ({shape_name}) at {}", node.key, node.loc);
		self.nodes.push(node);
		Ok(&self.nodes[self.nodes.len() - 1])
	}

	pub fn apply_change_set(&mut self, changes: &ChangeSet, config: &DiagramConfig) {
		debug!(
			"Model change: {}",
			serde_json::to_string(changes).unwrap_or_else(|e| e.to_string())
		);
		self.nodes = apply_change_set(
			&self.nodes,
			&changes.modified_node_data,
			config.reconcile_order,
		);
	}
}
