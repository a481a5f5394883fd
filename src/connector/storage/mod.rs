mod json_file;
mod memory;

pub use json_file::*;
pub use memory::*;
