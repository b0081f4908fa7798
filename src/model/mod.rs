pub mod entry;
pub mod module;
