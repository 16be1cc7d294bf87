pub mod config;
pub mod curve;

pub use config::*;
pub use curve::*;
