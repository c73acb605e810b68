// Domain layer: bundle catalog, minifier seam, build services
pub mod interfaces;
pub mod models;
pub mod services;

pub use interfaces::*;
pub use models::*;
pub use services::*;
