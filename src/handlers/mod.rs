pub mod image;
pub mod public;
