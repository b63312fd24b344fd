#![allow(unused_crate_dependencies)]

use flowchart_canvas::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App);
}
