//! Enhanced dependency relations.
//!
//! Enhanced relations can carry lexical material, for example `obl:into`
//! or `conj:and`. Delexicalisation replaces such material by typed
//! placeholders. Relations are stored as a list of segments, where each
//! segment is either lexical text or a placeholder, so that placeholders
//! can be handled by case analysis rather than by string matching.

use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use itertools::Itertools;

use crate::error::LabelError;
use crate::token::{TokenId, EMPTY_TOKEN};

/// Separator of relation segments and of an enhanced head and its relation.
pub const SEGMENT_SEPARATOR: char = ':';

/// Separator of enhanced dependencies in the DEPS column.
pub const DEPS_SEPARATOR: char = '|';

/// Placeholder for lexical material that was removed from a relation.
///
/// Each placeholder is anchored by a dependent with a specific basic
/// relation, whose lemma restores the lexical material.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Placeholder {
    /// Adposition, anchored by a `case` dependent.
    Case,

    /// Subordinating conjunction, anchored by a `mark` dependent.
    Mark,

    /// Coordinating conjunction, anchored by a `cc` dependent.
    Cc,
}

impl Placeholder {
    /// All placeholders, in substitution priority order.
    pub const ALL: [Placeholder; 3] = [Placeholder::Case, Placeholder::Mark, Placeholder::Cc];

    /// The serialized form of the placeholder.
    pub fn as_str(self) -> &'static str {
        match self {
            Placeholder::Case => "<case_delex>",
            Placeholder::Mark => "<mark_delex>",
            Placeholder::Cc => "<cc_delex>",
        }
    }

    /// The basic relation of the dependent that anchors the placeholder.
    pub fn anchor_relation(self) -> &'static str {
        match self {
            Placeholder::Case => "case",
            Placeholder::Mark => "mark",
            Placeholder::Cc => "cc",
        }
    }

    /// Get the placeholder that is anchored by a dependent with the given
    /// basic relation.
    pub fn for_anchor_relation(relation: &str) -> Option<Placeholder> {
        Self::ALL
            .iter()
            .copied()
            .find(|placeholder| placeholder.anchor_relation() == relation)
    }

    fn parse(segment: &str) -> Option<Placeholder> {
        Self::ALL
            .iter()
            .copied()
            .find(|placeholder| placeholder.as_str() == segment)
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A segment of a relation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Segment {
    Lexical(String),
    Placeholder(Placeholder),
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Lexical(text) => text,
            Segment::Placeholder(placeholder) => placeholder.as_str(),
        }
    }

    /// Get the lexical text, `None` for placeholders.
    pub fn lexical(&self) -> Option<&str> {
        match self {
            Segment::Lexical(text) => Some(text),
            Segment::Placeholder(_) => None,
        }
    }

    /// Get the placeholder, `None` for lexical text.
    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            Segment::Lexical(_) => None,
            Segment::Placeholder(placeholder) => Some(*placeholder),
        }
    }
}

impl From<&str> for Segment {
    fn from(segment: &str) -> Self {
        match Placeholder::parse(segment) {
            Some(placeholder) => Segment::Placeholder(placeholder),
            None => Segment::Lexical(segment.to_owned()),
        }
    }
}

impl From<Placeholder> for Segment {
    fn from(placeholder: Placeholder) -> Self {
        Segment::Placeholder(placeholder)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An enhanced dependency relation such as `obl:into`.
///
/// A relation always has at least one segment. The first segment is the
/// base relation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Relation {
    segments: Vec<Segment>,
}

#[allow(clippy::len_without_is_empty)]
impl Relation {
    /// The base relation, e.g. `obl` for `obl:into`.
    pub fn base(&self) -> &str {
        self.segments.first().map(Segment::as_str).unwrap_or("")
    }

    /// Returns `true` if the relation starts with the given segments, e.g.
    /// `acl:relcl:gen` starts with `acl:relcl`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let prefix = prefix.split(SEGMENT_SEPARATOR).collect::<Vec<_>>();
        prefix.len() <= self.segments.len()
            && self
                .segments
                .iter()
                .zip(prefix)
                .all(|(segment, prefix)| segment.as_str() == prefix)
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The shape of the relation: all segments except the trailing one.
    ///
    /// Conjuncts that share their relation with the first conjunct have
    /// the same shape, but possibly a different trailing segment.
    pub fn shape(&self) -> &[Segment] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }

    /// The trailing segment.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Get the positions and kinds of the placeholders in the relation.
    pub fn placeholders(&self) -> impl Iterator<Item = (usize, Placeholder)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(idx, segment)| segment.placeholder().map(|p| (idx, p)))
    }

    /// Returns `true` if the relation contains a placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Returns `true` if the relation contains the given placeholder.
    pub fn contains_placeholder(&self, placeholder: Placeholder) -> bool {
        self.placeholders().any(|(_, p)| p == placeholder)
    }

    /// Replace the segment at `idx`.
    ///
    /// Returns the segment that is replaced.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn set_segment(&mut self, idx: usize, segment: impl Into<Segment>) -> Segment {
        mem::replace(&mut self.segments[idx], segment.into())
    }
}

impl From<&str> for Relation {
    fn from(relation: &str) -> Self {
        Relation {
            segments: relation.split(SEGMENT_SEPARATOR).map(Segment::from).collect(),
        }
    }
}

impl FromStr for Relation {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Relation::from(s))
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join(":"))
    }
}

/// An enhanced dependency: the head of a token and the relation to it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EnhancedDep {
    head: TokenId,
    relation: Relation,
}

impl EnhancedDep {
    pub fn new(head: impl Into<TokenId>, relation: impl Into<Relation>) -> Self {
        EnhancedDep {
            head: head.into(),
            relation: relation.into(),
        }
    }

    /// Get the identifier of the head.
    pub fn head(&self) -> TokenId {
        self.head
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn relation_mut(&mut self) -> &mut Relation {
        &mut self.relation
    }

    /// Set the relation.
    ///
    /// Returns the relation that is replaced.
    pub fn set_relation(&mut self, relation: Relation) -> Relation {
        mem::replace(&mut self.relation, relation)
    }
}

impl Display for EnhancedDep {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.head, SEGMENT_SEPARATOR, self.relation)
    }
}

impl FromStr for EnhancedDep {
    type Err = LabelError;

    /// Parse `head:relation`. The head is separated at the first colon,
    /// the relation keeps any further colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let idx = s
            .find(SEGMENT_SEPARATOR)
            .ok_or_else(|| LabelError::MissingRelation {
                value: s.to_owned(),
            })?;

        Ok(EnhancedDep {
            head: s[..idx].parse()?,
            relation: Relation::from(&s[idx + 1..]),
        })
    }
}

/// The enhanced dependencies of a token, in column order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnhancedDeps {
    inner: Vec<EnhancedDep>,
}

impl EnhancedDeps {
    /// Construct an empty list of enhanced dependencies.
    pub fn new() -> Self {
        EnhancedDeps { inner: Vec::new() }
    }

    /// Unwrap the contained dependencies.
    pub fn into_inner(self) -> Vec<EnhancedDep> {
        self.inner
    }
}

impl Deref for EnhancedDeps {
    type Target = Vec<EnhancedDep>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for EnhancedDeps {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl From<Vec<EnhancedDep>> for EnhancedDeps {
    fn from(deps: Vec<EnhancedDep>) -> Self {
        EnhancedDeps { inner: deps }
    }
}

impl FromIterator<EnhancedDep> for EnhancedDeps {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = EnhancedDep>,
    {
        EnhancedDeps {
            inner: iter.into_iter().collect(),
        }
    }
}

impl Display for EnhancedDeps {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.inner.is_empty() {
            f.write_str(EMPTY_TOKEN)
        } else {
            write!(f, "{}", self.inner.iter().join("|"))
        }
    }
}

impl FromStr for EnhancedDeps {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == EMPTY_TOKEN || s.is_empty() {
            return Ok(EnhancedDeps::new());
        }

        s.split(DEPS_SEPARATOR)
            .map(str::parse::<EnhancedDep>)
            .collect()
    }
}
