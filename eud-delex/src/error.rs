use eudgraph::token::TokenId;
use eudgraph::GraphError;
use thiserror::Error;

/// Delexicalisation and label copying errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The sentence graph is malformed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A relation was rewritten twice in one propagation pass.
    ///
    /// This happens when a label is shared by coordination heads that
    /// disagree on its value.
    #[error("relation {position} of token {token} is rewritten more than once")]
    DuplicateRewrite { token: TokenId, position: usize },

    /// Aligned sentences have different numbers of tokens.
    #[error("cannot align sentence with {gold} tokens to sentence with {secondary} tokens")]
    LengthMismatch { gold: usize, secondary: usize },

    /// Aligned corpora have different numbers of sentences.
    #[error("cannot align corpus with {gold} sentences to corpus with {secondary} sentences")]
    SentenceCountMismatch { gold: usize, secondary: usize },
}
