//! Helpers shared by the coordination passes.

use std::collections::HashSet;

use log::debug;

use eudgraph::graph::{DepTriple, Sentence};
use eudgraph::label::Relation;
use eudgraph::token::{Token, TokenId};

use crate::Error;

/// Base relation of conjuncts.
pub(crate) const CONJ: &str = "conj";

/// Get the basic relation of the token at `idx`.
pub(crate) fn basic_relation(sentence: &Sentence, idx: usize) -> Option<&str> {
    sentence
        .dep_graph()
        .head(idx)
        .and_then(DepTriple::into_relation)
}

/// Get the lemma of the token at `idx`, falling back to its form.
pub(crate) fn lemma_or_form(sentence: &Sentence, idx: usize) -> Option<&str> {
    sentence[idx]
        .token()
        .map(|token| token.lemma().unwrap_or_else(|| token.form()))
}

/// Get the heads of the `conj` relations of a token, without duplicates.
pub(crate) fn conj_heads(token: &Token) -> Vec<TokenId> {
    let mut heads = Vec::new();
    for dep in token.deps().iter() {
        if dep.relation().base() == CONJ && !heads.contains(&dep.head()) {
            heads.push(dep.head());
        }
    }

    heads
}

/// Get the enhanced children of every node, indexed by node.
///
/// Rewriting relations does not change the graph structure, so the table
/// stays valid within a pass.
pub(crate) fn children_table(sentence: &Sentence) -> Result<Vec<Vec<usize>>, Error> {
    let graph = sentence.enhanced_graph()?;
    Ok((0..sentence.len()).map(|idx| graph.children(idx)).collect())
}

/// Get the first child that attaches through the given basic relation.
pub(crate) fn first_child_with_relation(
    sentence: &Sentence,
    children: &[usize],
    relation: &str,
) -> Option<usize> {
    children
        .iter()
        .copied()
        .find(|&child| basic_relation(sentence, child) == Some(relation))
}

/// Rewriter that allows one rewrite per relation.
///
/// A relation is identified by the position of its token and its position
/// in the token's enhanced dependencies.
#[derive(Debug, Default)]
pub(crate) struct RewriteGuard {
    rewritten: HashSet<(usize, usize)>,
}

impl RewriteGuard {
    pub(crate) fn new() -> Self {
        RewriteGuard::default()
    }

    /// Replace the relation at `position` of the token at `idx`.
    ///
    /// Returns `false` when the relation is already equal to `relation`,
    /// which does not count as a rewrite.
    pub(crate) fn rewrite(
        &mut self,
        sentence: &mut Sentence,
        idx: usize,
        position: usize,
        relation: Relation,
    ) -> Result<bool, Error> {
        let token = match sentence[idx].token_mut() {
            Some(token) => token,
            None => return Ok(false),
        };
        let id = token.id();

        let dep = match token.deps_mut().get_mut(position) {
            Some(dep) => dep,
            None => return Ok(false),
        };

        if *dep.relation() == relation {
            return Ok(false);
        }

        if !self.rewritten.insert((idx, position)) {
            return Err(Error::DuplicateRewrite {
                token: id,
                position,
            });
        }

        debug!(
            "token {}: {}:{} -> {}:{}",
            id,
            dep.head(),
            dep.relation(),
            dep.head(),
            relation
        );
        dep.set_relation(relation);

        Ok(true)
    }
}
