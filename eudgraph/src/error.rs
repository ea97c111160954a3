use thiserror::Error;

use crate::token::TokenId;

/// Graph processing error.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("dependent {dependent:?} is out of bounds for graph with {node_count:?} vertices")]
    DependentOutOfBounds { dependent: usize, node_count: usize },

    #[error("head {head:?} is out of bounds for graph with {node_count:?} vertices")]
    HeadOutOfBounds { head: usize, node_count: usize },

    /// A token refers to a head that is not in the sentence.
    #[error("token {dependent} refers to unknown head {head}")]
    UnresolvedHead { head: TokenId, dependent: TokenId },

    /// Two tokens in a sentence share an identifier.
    #[error("duplicate token identifier: {id}")]
    DuplicateId { id: TokenId },
}

/// Token identifier and enhanced dependency syntax errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum LabelError {
    /// The string is not a word or empty node identifier.
    #[error("cannot parse token identifier: {value:?}")]
    InvalidTokenId { value: String },

    /// An enhanced dependency without a `head:relation` separator.
    #[error("enhanced dependency without relation: {value:?}")]
    MissingRelation { value: String },
}
