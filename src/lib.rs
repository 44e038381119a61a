pub mod catalog;
pub mod error;
pub mod packer;
pub mod types;
