//! Core logic - framework-agnostic product store operations.

pub mod product;

pub use product::Product;
