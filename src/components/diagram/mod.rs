mod component;
mod render;
mod state;
pub mod template;

pub use component::DiagramCanvas;
