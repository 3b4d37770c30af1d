pub mod color;
pub mod warp;

mod insert;

pub use insert::insert_logo;
