pub mod colormap;
pub mod config;
pub mod constants;
pub mod error;
pub mod figure;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod render;

pub use error::{ErrorKind, PlotError, Result};
