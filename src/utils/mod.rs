// Shared utilities module
pub mod build_ui;
pub mod config_loader;
pub mod errors;
pub mod logging;

pub use build_ui::*;
pub use config_loader::*;
pub use errors::*;
pub use logging::*;
