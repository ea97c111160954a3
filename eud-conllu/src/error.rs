use std::io;

use eudgraph::{GraphError, LabelError};
use thiserror::Error;

/// CoNLL-U IO error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Error in file IO.
    #[error("error reading or writing treebank")]
    Io(#[from] io::Error),

    /// CoNLL-U parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// CoNLL-U parsing errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// Error constructing the graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Malformed enhanced dependencies.
    #[error(transparent)]
    Label(#[from] LabelError),

    /// A token line does not have the expected number of columns.
    #[error("expected {expected} columns, found {found}: {line:?}")]
    ColumnCount {
        expected: usize,
        found: usize,
        line: String,
    },

    /// The feature field could not be parsed
    #[error("cannot parse feature field: {value:?}")]
    IncorrectFeatureField { value: String },

    /// The head field could not be parsed.
    #[error("cannot parse head field: {value:?}")]
    ParseHeadField { value: String },

    /// The identifier field could not be parsed.
    #[error("cannot parse as identifier field: {value:?}")]
    ParseIdentifierField { value: String },

    /// Comments at the end of the treebank that are not followed by tokens.
    #[error("comments without tokens at the end of the treebank: {comments:?}")]
    CommentsWithoutTokens { comments: Vec<String> },

    /// Dependency relation without a head.
    #[error("dependency relation without a head: {token:?}")]
    RelationWithoutHead { token: String },
}
