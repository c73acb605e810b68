// Infrastructure layer
pub mod file_system;
pub mod processors;
pub mod story_converter;

pub use file_system::*;
pub use processors::*;
pub use story_converter::*;
