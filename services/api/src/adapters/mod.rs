pub mod catalog;
pub mod fs;
