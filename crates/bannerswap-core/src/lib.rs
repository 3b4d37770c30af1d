pub mod composite;
pub mod consts;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod io;
pub mod pipeline;
pub mod smoothing;
pub mod stabilize;
pub mod track;
