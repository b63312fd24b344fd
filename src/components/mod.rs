pub mod diagram;
pub mod node_form;
