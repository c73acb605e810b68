// Processors module
pub mod debug_filter;
pub mod minifier;

pub use debug_filter::*;
pub use minifier::*;
