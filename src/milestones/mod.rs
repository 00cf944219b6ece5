pub mod api;
pub mod components;
pub mod state;
pub mod util;
