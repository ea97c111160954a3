mod error;
pub use crate::error::{GraphError, LabelError};

pub mod graph;

pub mod label;

pub mod token;

#[cfg(test)]
mod tests;
