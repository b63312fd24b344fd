//! Node records and the two operations that change them: creating a node
//! from form input and reconciling edits reported by the diagram view.

pub mod config;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod palette;
pub mod reconcile;
pub mod record;
mod state;

pub use config::{DiagramConfig, ReconcileOrder};
pub use reconcile::ChangeSet;
pub use record::{Location, NodeKey, NodeRecord};
pub use state::DiagramModel;
