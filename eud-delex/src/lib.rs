//! Delexicalisation and relexicalisation of enhanced dependencies.

mod error;
pub use crate::error::Error;

pub mod config;
pub use crate::config::{CaseDetector, DelexConfig, ForbiddenWords, Vocab};

pub mod copy;
pub use crate::copy::{copy_basic_to_enhanced, copy_basic_to_misc, copy_corpus_basic_to_misc};

mod delex;
pub use crate::delex::{Delexicalise, Delexicaliser};

mod propagate;

mod relex;
pub use crate::relex::{Relexicalise, Relexicaliser};

pub mod stats;
pub use crate::stats::{Operation, Stats};
