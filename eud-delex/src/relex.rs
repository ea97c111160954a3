//! Relexicalisation of delexicalised enhanced relations.

use std::collections::HashSet;

use log::info;

use eudgraph::graph::Sentence;
use eudgraph::label::{Placeholder, Segment};
use eudgraph::GraphError;

use crate::propagate::{
    basic_relation, children_table, conj_heads, first_child_with_relation, lemma_or_form,
    RewriteGuard, CONJ,
};
use crate::stats::{Operation, Stats};
use crate::Error;

/// Graph relexicaliser.
pub trait Relexicalise {
    /// Relexicalise a graph.
    ///
    /// This method replaces the placeholders in the enhanced relations of
    /// a sentence by the lemmas of the dependents that anchor them.
    fn relexicalise(&mut self, sentence: &mut Sentence) -> Result<(), Error>;
}

/// Relexicaliser for `case`, `mark` and `cc` placeholders.
///
/// Relexicalisation undoes `Delexicaliser` in three passes:
///
/// 1. Placeholders are replaced by the lemma of the first dependent with
///    the anchoring relation. The lemmas of `fixed` dependents of a `case`
///    dependent are appended, e.g. `because_of`.
/// 2. Conjuncts with a trailing placeholder take the trailing segment of
///    the first conjunct's relation with the same head and shape.
/// 3. Remaining `cc` placeholders of the conjuncts of a head are replaced
///    by the coordinating conjunction of the chain.
#[derive(Clone, Debug, Default)]
pub struct Relexicaliser {
    stats: Stats,
}

impl Relexicaliser {
    pub fn new() -> Self {
        Relexicaliser::default()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn into_stats(self) -> Stats {
        self.stats
    }

    /// Relexicalise all sentences of a corpus.
    pub fn relexicalise_corpus(&mut self, sentences: &mut [Sentence]) -> Result<(), Error> {
        for sentence in sentences.iter_mut() {
            self.relexicalise(sentence)?;
        }

        info!(
            "Relexicalised {} sentences: {} case, {} mark, {} cc, {} conjuncts propagated, {} cc modifiers propagated",
            sentences.len(),
            self.stats.count(Operation::CaseRelexicalised),
            self.stats.count(Operation::MarkRelexicalised),
            self.stats.count(Operation::CcRelexicalised),
            self.stats.count(Operation::FirstConjunctPropagated),
            self.stats.count(Operation::CcModifierPropagated),
        );

        Ok(())
    }

    /// Restore placeholders from their anchoring dependents.
    fn restore(&mut self, sentence: &mut Sentence) -> Result<(), Error> {
        let children = children_table(sentence)?;
        let mut guard = RewriteGuard::new();

        for idx in 1..sentence.len() {
            let mut rewrites = Vec::new();

            if let Some(token) = sentence[idx].token() {
                for (position, dep) in token.deps().iter().enumerate() {
                    let mut relation = dep.relation().clone();
                    let mut restored = Vec::new();

                    for (segment, placeholder) in dep.relation().placeholders() {
                        if let Some(item) = lexical_item(sentence, &children, idx, placeholder) {
                            relation.set_segment(segment, Segment::Lexical(item.clone()));
                            restored.push((placeholder, item));
                        }
                    }

                    if !restored.is_empty() {
                        rewrites.push((position, relation, restored));
                    }
                }
            }

            for (position, relation, restored) in rewrites {
                if guard.rewrite(sentence, idx, position, relation)? {
                    for (placeholder, item) in restored {
                        self.stats.record(Operation::relexicalised(placeholder));
                        self.stats.record_lexical_item(&item);
                    }
                }
            }
        }

        Ok(())
    }

    /// Give conjuncts the trailing segment of their first conjunct.
    ///
    /// The placeholders of a conjunct are collected before any of its
    /// relations is rewritten, so two heads that provide different
    /// segments for the same relation are an error.
    fn propagate_first_conjunct(&mut self, sentence: &mut Sentence) -> Result<(), Error> {
        let mut guard = RewriteGuard::new();

        for idx in 1..sentence.len() {
            let (id, heads, deps) = match sentence[idx].token() {
                Some(token) => (token.id(), conj_heads(token), token.deps().clone()),
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
                        .filter(|dep| dep.relation().last().and_then(Segment::lexical).is_some())
                        .cloned()
                        .collect::<Vec<_>>(),
                    None => continue,
                };

                let mut rewrites = Vec::new();
                for (position, dep) in deps.iter().enumerate() {
                    let relation = dep.relation();
                    if relation.last().and_then(Segment::placeholder).is_none() {
                        continue;
                    }

                    let source = match head_deps.iter().find(|head_dep| {
                        head_dep.head() == dep.head()
                            && head_dep.relation().shape() == relation.shape()
                    }) {
                        Some(source) => source,
                        None => continue,
                    };

                    if let Some(last) = source.relation().last() {
                        let mut relexicalised = relation.clone();
                        relexicalised.set_segment(relation.len() - 1, last.clone());
                        rewrites.push((position, relexicalised));
                    }
                }

                for (position, relation) in rewrites {
                    if guard.rewrite(sentence, idx, position, relation)? {
                        self.stats.record(Operation::FirstConjunctPropagated);
                    }
                }
            }
        }

        Ok(())
    }

    /// Replace the remaining `cc` placeholders of conjuncts by the
    /// coordinating conjunction of their chain.
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

                let conjunction = match children[head_idx].iter().find_map(|&conjunct| {
                    first_child_with_relation(sentence, &children[conjunct], "cc")
                }) {
                    Some(cc) => match lemma_or_form(sentence, cc) {
                        Some(lemma) => lemma.to_owned(),
                        None => continue,
                    },
                    None => continue,
                };

                let mut rewrites = Vec::new();
                for &conjunct in &children[head_idx] {
                    if let Some(token) = sentence[conjunct].token() {
                        for (position, dep) in token.deps().iter().enumerate() {
                            let relation = dep.relation();
                            if dep.head() != head
                                || relation.base() != CONJ
                                || !relation.contains_placeholder(Placeholder::Cc)
                            {
                                continue;
                            }

                            let mut relexicalised = relation.clone();
                            for (segment, placeholder) in relation.placeholders() {
                                if placeholder == Placeholder::Cc {
                                    relexicalised
                                        .set_segment(segment, Segment::Lexical(conjunction.clone()));
                                }
                            }

                            rewrites.push((conjunct, position, relexicalised));
                        }
                    }
                }

                for (conjunct, position, relation) in rewrites {
                    if guard.rewrite(sentence, conjunct, position, relation)? {
                        self.stats.record(Operation::CcModifierPropagated);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Relexicalise for Relexicaliser {
    fn relexicalise(&mut self, sentence: &mut Sentence) -> Result<(), Error> {
        self.restore(sentence)?;
        self.propagate_first_conjunct(sentence)?;
        self.propagate_cc_modifier(sentence)
    }
}

/// Get the lexical item for a placeholder of the token at `idx`.
///
/// This is the lemma of the first dependent that attaches with the
/// anchoring relation. For `case`, the lemmas of its `fixed` dependents
/// are appended.
fn lexical_item(
    sentence: &Sentence,
    children: &[Vec<usize>],
    idx: usize,
    placeholder: Placeholder,
) -> Option<String> {
    let anchor =
        first_child_with_relation(sentence, &children[idx], placeholder.anchor_relation())?;
    let mut item = lemma_or_form(sentence, anchor)?.to_owned();

    if placeholder == Placeholder::Case {
        for &fixed in &children[anchor] {
            if basic_relation(sentence, fixed) != Some("fixed") {
                continue;
            }

            if let Some(lemma) = lemma_or_form(sentence, fixed) {
                item.push('_');
                item.push_str(lemma);
            }
        }
    }

    Some(item)
}
