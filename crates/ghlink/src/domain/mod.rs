//! Domain types shared by the link pipeline.

pub mod errors;
pub mod model;
