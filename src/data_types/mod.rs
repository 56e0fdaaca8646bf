pub mod data;
pub mod render;
pub mod state;

pub use data::*;
pub use render::*;
pub use state::*;
