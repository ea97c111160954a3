mod error;
pub use crate::error::{Error, ParseError};

pub mod io;

pub mod wrap;

#[cfg(test)]
mod tests;
