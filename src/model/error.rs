//! Failures surfaced by the node model.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	/// The form asked for a shape the palette does not have.
	#[error("Unknown shape: {name}")]
	UnknownShape { name: String },

	/// Every key in `0..capacity` is already taken.
	#[error("All {capacity} node keys are in use")]
	KeySpaceExhausted { capacity: u32 },

	#[error("Invalid path for shape {name}: {message}")]
	InvalidShapePath { name: String, message: String },

	/// A `loc` string that is not two finite numbers.
	#[error("Invalid location {input:?}, expected \"x y\"")]
	InvalidLocation { input: String },

	#[error("Unknown reconcile order {value:?}, expected \"move-to-end\" or \"in-place\"")]
	UnknownReconcileOrder { value: String },
}
