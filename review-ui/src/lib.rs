pub mod api;
pub mod components;
pub mod dashboard;
pub mod state;

pub use api::*;
pub use components::*;
pub use dashboard::*;
pub use state::*;
