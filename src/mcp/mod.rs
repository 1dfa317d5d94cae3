pub mod protocol;
pub mod resources;
pub mod tools;
pub mod write_tools;
