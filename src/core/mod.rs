//! Core inspection logic

pub mod inspector;

pub use inspector::Inspector;
