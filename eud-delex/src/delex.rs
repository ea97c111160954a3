//! Delexicalisation of enhanced relations.

use std::collections::HashSet;

use log::{debug, info};

use eudgraph::graph::Sentence;
use eudgraph::label::{Placeholder, Relation};
use eudgraph::GraphError;

use crate::config::DelexConfig;
use crate::propagate::{basic_relation, children_table, conj_heads, RewriteGuard, CONJ};
use crate::stats::{Operation, Stats};
use crate::Error;

/// Graph delexicaliser.
pub trait Delexicalise {
    /// Delexicalise a graph.
    ///
    /// This method replaces lexical material in the enhanced relations of
    /// a sentence by placeholders. The material can be restored later
    /// from the dependents that anchor the placeholders.
    fn delexicalise(&mut self, sentence: &mut Sentence) -> Result<(), Error>;
}

/// Delexicaliser for `case`, `mark` and `cc` material.
///
/// Delexicalisation is done in three passes:
///
/// 1. Lexical material is replaced by a placeholder when the token has a
///    `case`, `mark` (non-conjunct relations) or `cc` (conjunct relations)
///    dependent, e.g. `obl:into` becomes `obl:<case_delex>`.
/// 2. Conjuncts take over the relations of their first conjunct that have
///    the same head and shape.
/// 3. Conjuncts take over the `cc` relation of the conjunct that has the
///    coordinating conjunction.
///
/// The delexicaliser accumulates statistics over all sentences that it
/// processes.
#[derive(Clone, Debug, Default)]
pub struct Delexicaliser {
    config: DelexConfig,
    stats: Stats,
}

impl Delexicaliser {
    pub fn new(config: DelexConfig) -> Self {
        Delexicaliser {
            config,
            stats: Stats::new(),
        }
    }

    pub fn config(&self) -> &DelexConfig {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn into_stats(self) -> Stats {
        self.stats
    }

    /// Delexicalise all sentences of a corpus.
    pub fn delexicalise_corpus(&mut self, sentences: &mut [Sentence]) -> Result<(), Error> {
        for sentence in sentences.iter_mut() {
            self.delexicalise(sentence)?;
        }

        info!(
            "Delexicalised {} sentences: {} case, {} mark, {} cc, {} conjuncts propagated, {} cc modifiers propagated",
            sentences.len(),
            self.stats.count(Operation::CaseDelexicalised),
            self.stats.count(Operation::MarkDelexicalised),
            self.stats.count(Operation::CcDelexicalised),
            self.stats.count(Operation::FirstConjunctPropagated),
            self.stats.count(Operation::CcModifierPropagated),
        );

        Ok(())
    }

    /// Get the index of the segment that holds lexical material.
    ///
    /// With morphological case, the last segment holds the case, except
    /// for adverbial clauses and relative clauses.
    fn target_segment(&self, relation: &Relation) -> Option<usize> {
        let len = relation.len();
        if len < 2 {
            return None;
        }

        if self.config.uses_morphological_case()
            && relation.base() != "advcl"
            && !relation.starts_with("acl:relcl")
        {
            if len < 3 {
                None
            } else {
                Some(len - 2)
            }
        } else {
            Some(len - 1)
        }
    }

    /// Replace lexical material anchored by `case`, `mark` or `cc`
    /// dependents.
    fn substitute(&mut self, sentence: &mut Sentence) -> Result<(), Error> {
        let children = children_table(sentence)?;
        let mut guard = RewriteGuard::new();

        for idx in 1..sentence.len() {
            let mut substitutions = Vec::new();

            if let Some(token) = sentence[idx].token() {
                for (position, dep) in token.deps().iter().enumerate() {
                    let relation = dep.relation();

                    let target = match self.target_segment(relation) {
                        Some(target) => target,
                        None => continue,
                    };

                    // Placeholders are never substituted again.
                    let lexical = match relation.segments()[target].lexical() {
                        Some(lexical) => lexical,
                        None => continue,
                    };

                    let placeholder = match anchor_placeholder(sentence, &children[idx], relation)
                    {
                        Some(placeholder) => placeholder,
                        None => continue,
                    };

                    if self.config.forbidden_words().contains(lexical) {
                        debug!(
                            "token {}: not delexicalising forbidden segment in {}",
                            token.id(),
                            dep
                        );
                        continue;
                    }

                    let mut delexicalised = relation.clone();
                    delexicalised.set_segment(target, placeholder);

                    substitutions.push((
                        position,
                        placeholder,
                        lexical.to_owned(),
                        relation.clone(),
                        delexicalised,
                    ));
                }
            }

            for (position, placeholder, lexical, original, delexicalised) in substitutions {
                if guard.rewrite(sentence, idx, position, delexicalised)? {
                    self.stats.record(Operation::delexicalised(placeholder));
                    self.stats.record_lexical_item(&lexical);
                    self.stats.record_lexicalised_relation(&original);
                }
            }
        }

        Ok(())
    }

    /// Give conjuncts the relations of their first conjunct.
    fn propagate_first_conjunct(&mut self, sentence: &mut Sentence) -> Result<(), Error> {
        let mut guard = RewriteGuard::new();

        for idx in 1..sentence.len() {
            let (id, heads) = match sentence[idx].token() {
                Some(token) => (token.id(), conj_heads(token)),
                None => continue,
            };

            for head in heads {
                let head_idx = sentence
                    .index_of(head)
                    .ok_or(GraphError::UnresolvedHead { head, dependent: id })?;

                let head_deps = match sentence[head_idx].token() {
                    Some(token) => token
                        .deps()
                        .iter()
                        .filter(|dep| dep.relation().len() >= 2)
                        .cloned()
                        .collect::<Vec<_>>(),
                    None => continue,
                };

                for head_dep in head_deps {
                    let positions = match sentence[idx].token() {
                        Some(token) => token
                            .deps()
                            .iter()
                            .enumerate()
                            .filter(|(_, dep)| {
                                dep.head() == head_dep.head()
                                    && dep.relation().shape() == head_dep.relation().shape()
                            })
                            .map(|(position, _)| position)
                            .collect::<Vec<_>>(),
                        None => continue,
                    };

                    for position in positions {
                        if guard.rewrite(sentence, idx, position, head_dep.relation().clone())? {
                            self.stats.record(Operation::FirstConjunctPropagated);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Give all conjuncts of a head the `cc` relation of the conjunct that
    /// has the coordinating conjunction.
    fn propagate_cc_modifier(&mut self, sentence: &mut Sentence) -> Result<(), Error> {
        let children = children_table(sentence)?;
        let mut guard = RewriteGuard::new();
        let mut seen = HashSet::new();

        for idx in 1..sentence.len() {
            let (id, heads) = match sentence[idx].token() {
                Some(token) => (token.id(), conj_heads(token)),
                None => continue,
            };

            for head in heads {
                let head_idx = sentence
                    .index_of(head)
                    .ok_or(GraphError::UnresolvedHead { head, dependent: id })?;

                if !seen.insert(head_idx) {
                    continue;
                }

                let value = match cc_modifier_relation(sentence, &children, head_idx) {
                    Some(value) => value,
                    None => continue,
                };

                let mut rewrites = Vec::new();
                for &conjunct in &children[head_idx] {
                    if let Some(token) = sentence[conjunct].token() {
                        for (position, dep) in token.deps().iter().enumerate() {
                            if dep.head() == head
                                && dep.relation().base() == CONJ
                                && dep.relation().shape() == value.shape()
                            {
                                rewrites.push((conjunct, position));
                            }
                        }
                    }
                }

                for (conjunct, position) in rewrites {
                    if guard.rewrite(sentence, conjunct, position, value.clone())? {
                        self.stats.record(Operation::CcModifierPropagated);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Delexicalise for Delexicaliser {
    fn delexicalise(&mut self, sentence: &mut Sentence) -> Result<(), Error> {
        self.substitute(sentence)?;
        self.propagate_first_conjunct(sentence)?;
        self.propagate_cc_modifier(sentence)
    }
}

/// Get the placeholder for the first dependent that anchors lexical
/// material of `relation`.
///
/// `cc` dependents only anchor conjunct relations, `case` and `mark`
/// dependents only anchor other relations.
fn anchor_placeholder(
    sentence: &Sentence,
    children: &[usize],
    relation: &Relation,
) -> Option<Placeholder> {
    let conj = relation.base() == CONJ;
    children
        .iter()
        .filter_map(|&child| basic_relation(sentence, child))
        .filter_map(Placeholder::for_anchor_relation)
        .find(|&placeholder| (placeholder == Placeholder::Cc) == conj)
}

/// Find the `cc`-bearing relation of the conjuncts of `head_idx`.
///
/// This is the relation to the head of the first conjunct that has a
/// coordinating conjunction as its dependent.
fn cc_modifier_relation(
    sentence: &Sentence,
    children: &[Vec<usize>],
    head_idx: usize,
) -> Option<Relation> {
    let head = sentence[head_idx].id();

    children[head_idx]
        .iter()
        .copied()
        .filter(|&conjunct| {
            children[conjunct]
                .iter()
                .any(|&child| basic_relation(sentence, child) == Some("cc"))
        })
        .find_map(|conjunct| {
            sentence[conjunct]
                .token()?
                .deps()
                .iter()
                .find(|dep| {
                    dep.head() == head
                        && dep.relation().base() == CONJ
                        && dep.relation().contains_placeholder(Placeholder::Cc)
                })
                .map(|dep| dep.relation().clone())
        })
}
