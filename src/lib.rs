#![recursion_limit = "1024"]
use wasm_bindgen::prelude::*;
use yew::start_app;

pub mod milestones;
mod root;

use root::components::RootComponent;

#[wasm_bindgen(start)]
pub fn run_app() {
    start_app::<RootComponent>();
}
