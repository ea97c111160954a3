//! Statistics of delexicalisation runs.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use eudgraph::label::{Placeholder, Relation};

/// A label rewrite operation.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Operation {
    CaseDelexicalised,
    MarkDelexicalised,
    CcDelexicalised,

    /// A conjunct took over the relation of the first conjunct.
    FirstConjunctPropagated,

    /// A conjunct took over the coordinating conjunction of its chain.
    CcModifierPropagated,

    CaseRelexicalised,
    MarkRelexicalised,
    CcRelexicalised,
}

impl Operation {
    pub fn delexicalised(placeholder: Placeholder) -> Self {
        match placeholder {
            Placeholder::Case => Operation::CaseDelexicalised,
            Placeholder::Mark => Operation::MarkDelexicalised,
            Placeholder::Cc => Operation::CcDelexicalised,
        }
    }

    pub fn relexicalised(placeholder: Placeholder) -> Self {
        match placeholder {
            Placeholder::Case => Operation::CaseRelexicalised,
            Placeholder::Mark => Operation::MarkRelexicalised,
            Placeholder::Cc => Operation::CcRelexicalised,
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let desc = match self {
            Operation::CaseDelexicalised => "case delexicalised",
            Operation::MarkDelexicalised => "mark delexicalised",
            Operation::CcDelexicalised => "cc delexicalised",
            Operation::FirstConjunctPropagated => "first conjunct propagated",
            Operation::CcModifierPropagated => "cc modifier propagated",
            Operation::CaseRelexicalised => "case relexicalised",
            Operation::MarkRelexicalised => "mark relexicalised",
            Operation::CcRelexicalised => "cc relexicalised",
        };

        f.write_str(desc)
    }
}

/// Counters of a delexicalisation or relexicalisation run.
///
/// The counters are for reporting only, they do not influence the
/// rewrites.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    operations: BTreeMap<Operation, usize>,
    lexical_items: BTreeMap<String, usize>,
    lexicalised_relations: BTreeMap<String, usize>,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    /// Get the number of times that `operation` was applied.
    pub fn count(&self, operation: Operation) -> usize {
        self.operations.get(&operation).copied().unwrap_or(0)
    }

    /// Get the counts of all applied operations.
    pub fn operations(&self) -> &BTreeMap<Operation, usize> {
        &self.operations
    }

    /// Histogram of lexical items that were removed or restored.
    pub fn lexical_items(&self) -> &BTreeMap<String, usize> {
        &self.lexical_items
    }

    /// Counts of the lexicalised relations that were delexicalised.
    pub fn lexicalised_relations(&self) -> &BTreeMap<String, usize> {
        &self.lexicalised_relations
    }

    /// Total number of applied operations.
    pub fn total(&self) -> usize {
        self.operations.values().sum()
    }

    pub(crate) fn record(&mut self, operation: Operation) {
        *self.operations.entry(operation).or_insert(0) += 1;
    }

    pub(crate) fn record_lexical_item(&mut self, item: &str) {
        *self.lexical_items.entry(item.to_owned()).or_insert(0) += 1;
    }

    pub(crate) fn record_lexicalised_relation(&mut self, relation: &Relation) {
        *self
            .lexicalised_relations
            .entry(relation.to_string())
            .or_insert(0) += 1;
    }
}
