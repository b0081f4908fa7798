pub mod catalog;
pub mod classifier;
pub mod discover;
pub mod encoding;
pub mod formatter;
pub mod pipeline;
pub mod rebuild;
pub mod translator;
