//! Dependency graphs.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::mem;
use std::ops::{Index, IndexMut};

use petgraph::graph::{node_index, DiGraph, NodeIndices, NodeWeightsMut};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::GraphError;
use crate::token::{Misc, Token, TokenId};

/// Dependency graph node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Root node.
    Root,

    /// Token node.
    Token(Token),
}

impl Node {
    pub fn is_root(&self) -> bool {
        !self.is_token()
    }

    pub fn is_token(&self) -> bool {
        match self {
            Node::Root => false,
            Node::Token(_) => true,
        }
    }

    /// Get the identifier of the node.
    pub fn id(&self) -> TokenId {
        match self {
            Node::Root => TokenId::ROOT,
            Node::Token(token) => token.id(),
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Root => None,
            Node::Token(token) => Some(token),
        }
    }

    pub fn token_mut(&mut self) -> Option<&mut Token> {
        match self {
            Node::Root => None,
            Node::Token(token) => Some(token),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// Sentence comment.
pub enum Comment {
    /// Attribute-value pair, written as `# attr = val`.
    AttrVal { attr: String, val: String },

    /// Any other comment: the text following `#`, verbatim.
    String(String),
}

impl Comment {
    /// Returns `true` if the comment is an attribute-value pair.
    pub fn is_attr_val(&self) -> bool {
        !self.is_string()
    }

    /// Returns `true` if the comment is a string.
    pub fn is_string(&self) -> bool {
        match self {
            Comment::String(_) => true,
            Comment::AttrVal { .. } => false,
        }
    }

    /// Get the comment attribute value pair.
    pub fn attr_val(&self) -> Option<(&str, &str)> {
        match self {
            Comment::AttrVal { attr, val } => Some((attr, val)),
            Comment::String(_) => None,
        }
    }

    /// Get the comment string.
    pub fn string(&self) -> Option<&str> {
        match self {
            Comment::AttrVal { .. } => None,
            Comment::String(val) => Some(val),
        }
    }
}

impl Display for Comment {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Comment::AttrVal { attr, val } => write!(fmt, "# {} = {}", attr, val),
            Comment::String(val) => write!(fmt, "#{}", val),
        }
    }
}

/// A multi-word token.
///
/// A multi-word token spans the words `first..=last` of the sentence,
/// e.g. Spanish *del* spanning *de* and *el*. Only the form and the
/// miscellaneous features are meaningful for the span itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiwordToken {
    first: usize,
    last: usize,
    form: String,
    misc: Misc,
}

impl MultiwordToken {
    pub fn new(first: usize, last: usize, form: impl Into<String>) -> Self {
        MultiwordToken {
            first,
            last,
            form: form.into(),
            misc: Misc::new(),
        }
    }

    /// Identifier of the first word in the span.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Identifier of the last word in the span.
    pub fn last(&self) -> usize {
        self.last
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn misc(&self) -> &Misc {
        &self.misc
    }

    /// Set miscellaneous features.
    ///
    /// Returns the features that are replaced.
    pub fn set_misc(&mut self, misc: Misc) -> Misc {
        mem::replace(&mut self.misc, misc)
    }
}

/// A dependency triple.
///
/// A dependency triple consists of: a head index; a dependent index; and
/// an optional dependency label. Indices are positions in the sentence,
/// not token identifiers.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct DepTriple<S> {
    head: usize,
    dependent: usize,
    relation: Option<S>,
}

impl<S> DepTriple<S> {
    /// Construct a new dependency triple.
    pub fn new(head: usize, relation: Option<S>, dependent: usize) -> Self {
        DepTriple {
            head,
            dependent,
            relation,
        }
    }

    /// Get the dependent.
    pub fn dependent(&self) -> usize {
        self.dependent
    }

    /// Get the head.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Consume the triple, returning its relation.
    pub fn into_relation(self) -> Option<S> {
        self.relation
    }
}

impl<S> DepTriple<S>
where
    S: Borrow<str>,
{
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_ref().map(Borrow::borrow)
    }
}

/// Basic dependency edge.
pub type Edge = Option<String>;

/// A CoNLL-U dependency graph.
///
/// `Sentence` stores the tokens of a sentence, preceded by a special root
/// node. The basic dependency tree is stored as edges in a `petgraph`
/// graph, which enforces single-headedness. Enhanced dependencies are
/// stored on the tokens themselves, see `Sentence::enhanced_graph` for the
/// graph view over them.
///
/// Tokens are addressed by position (`sentence[idx]`) or by identifier
/// (`index_of`). Positions and identifiers diverge as soon as a sentence
/// contains empty nodes.
#[derive(Clone, Debug)]
pub struct Sentence {
    comments: Vec<Comment>,
    multiwords: Vec<MultiwordToken>,
    graph: DiGraph<Node, Edge>,
    index: HashMap<TokenId, usize>,
}

#[allow(clippy::len_without_is_empty)]
impl Sentence {
    /// Construct a new sentence.
    ///
    /// The sentence will be constructed such that the first token is
    /// the root of the dependency graph:
    ///
    /// ```
    /// use eudgraph::graph::{Node, Sentence};
    ///
    /// let sentence = Sentence::new();
    /// assert_eq!(sentence[0], Node::Root);
    /// ```
    pub fn new() -> Self {
        let mut graph = DiGraph::new();
        graph.add_node(Node::Root);

        let mut index = HashMap::new();
        index.insert(TokenId::ROOT, 0);

        Sentence {
            comments: Vec::new(),
            multiwords: Vec::new(),
            graph,
            index,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }

    /// Get the multi-word tokens of the sentence.
    pub fn multiwords(&self) -> &[MultiwordToken] {
        &self.multiwords
    }

    pub fn multiwords_mut(&mut self) -> &mut Vec<MultiwordToken> {
        &mut self.multiwords
    }

    /// Get a reference to the `DiGraph` of the sentence.
    pub fn get_ref(&self) -> &DiGraph<Node, Edge> {
        &self.graph
    }

    /// Get an iterator over the nodes in the graph.
    pub fn iter(&self) -> Iter {
        Iter {
            inner: self.graph.node_indices(),
            graph: &self.graph,
        }
    }

    /// Get a mutable iterator over the nodes in the graph.
    pub fn iter_mut(&mut self) -> IterMut {
        IterMut(self.graph.node_weights_mut())
    }

    /// Add a new token to the graph.
    ///
    /// Tokens should always be pushed in sentence order.
    ///
    /// Returns the index of the token. The first pushed token has index 1,
    /// since index 0 is reserved by the root of the graph. Fails if the
    /// sentence already has a token with the same identifier.
    pub fn push(&mut self, token: Token) -> Result<usize, GraphError> {
        let id = token.id();
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateId { id });
        }

        let idx = self.graph.add_node(Node::Token(token)).index();
        self.index.insert(id, idx);

        Ok(idx)
    }

    /// Get the index of the token with identifier `id`.
    pub fn index_of(&self, id: TokenId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Get the token with identifier `id`.
    pub fn token_by_id(&self, id: TokenId) -> Option<&Token> {
        self.index_of(id).and_then(|idx| self[idx].token())
    }

    /// Get the dependency graph.
    pub fn dep_graph(&self) -> DepGraph {
        DepGraph { inner: &self.graph }
    }

    /// Get the graph mutably.
    pub fn dep_graph_mut(&mut self) -> DepGraphMut {
        DepGraphMut {
            inner: &mut self.graph,
        }
    }

    /// Get the enhanced dependency graph.
    ///
    /// The graph is computed from the enhanced dependencies of the tokens
    /// as they are now. Since the graph borrows the sentence, it has to be
    /// recomputed after enhanced dependencies are modified.
    ///
    /// Fails if a token has an enhanced head that is not in the sentence.
    pub fn enhanced_graph(&self) -> Result<EnhancedGraph, GraphError> {
        EnhancedGraph::new(self)
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Replace the comments by the given comments.
    ///
    /// Returns the old comments that are replaced.
    pub fn set_comments(&mut self, comments: impl Into<Vec<Comment>>) -> Vec<Comment> {
        mem::replace(&mut self.comments, comments.into())
    }
}

impl Default for Sentence {
    fn default() -> Self {
        Sentence::new()
    }
}

/// Iterator over the nodes in a dependency graph.
pub struct Iter<'a> {
    inner: NodeIndices,
    graph: &'a DiGraph<Node, Edge>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|idx| &self.graph[idx])
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mutable iterator over the nodes in a dependency graph.
pub struct IterMut<'a>(NodeWeightsMut<'a, Node>);

impl<'a> Iterator for IterMut<'a> {
    type Item = &'a mut Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl<'a> IntoIterator for &'a mut Sentence {
    type Item = &'a mut Node;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl Eq for Sentence {}

impl Index<usize> for Sentence {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.graph[node_index(idx)]
    }
}

/// Mutable access to a node.
///
/// Replacing a node by a token with another identifier invalidates the
/// identifier index; modify the token through `Node::token_mut` instead.
impl IndexMut<usize> for Sentence {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.graph[node_index(idx)]
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.comments == other.comments
            && self.multiwords == other.multiwords
            && self.dep_graph() == other.dep_graph()
    }
}

/// A graph view.
///
/// This data structure provides a view of the basic dependency tree. The
/// view can be used to retrieve the dependents of a head or the head of a
/// dependent.
pub struct DepGraph<'a> {
    inner: &'a DiGraph<Node, Edge>,
}

#[allow(clippy::len_without_is_empty)]
impl<'a> DepGraph<'a> {
    /// Return an iterator over the dependents of `head`.
    pub fn dependents(&self, head: usize) -> impl Iterator<Item = DepTriple<&'a str>> {
        dependents_impl(self.inner, head)
    }

    /// Return the head relation of `dependent`, if any.
    pub fn head(&self, dependent: usize) -> Option<DepTriple<&'a str>> {
        head_impl(self.inner, dependent)
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }
}

impl<'a> Eq for DepGraph<'a> {}

impl<'a> Index<usize> for DepGraph<'a> {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.inner[node_index(idx)]
    }
}

impl<'a, 'b> PartialEq<DepGraph<'b>> for DepGraph<'a> {
    fn eq(&self, other: &DepGraph<'b>) -> bool {
        // Cheap checks
        if self.inner.node_count() != other.inner.node_count()
            || self.inner.edge_count() != other.inner.edge_count()
        {
            return false;
        }

        for i in 0..self.len() {
            // Nodes should be equal.
            if self[i] != other[i] {
                return false;
            }

            // Relation to a token's head should be the same.
            if self.head(i) != other.head(i) {
                return false;
            }
        }

        true
    }
}

/// A mutable graph view.
///
/// This data structure provides a mutable view of the basic dependency
/// tree. The view can be used to retrieve the dependents of a head or
/// the head of a dependent. In addition, the `add_deprel` method can be
/// used to add dependency relations to the graph.
pub struct DepGraphMut<'a> {
    inner: &'a mut DiGraph<Node, Edge>,
}

#[allow(clippy::len_without_is_empty)]
impl<'a> DepGraphMut<'a> {
    /// Add a dependency relation between `head` and `dependent`.
    ///
    /// If `dependent` already has a head relation, this relation is removed
    /// to ensure single-headedness.
    pub fn add_deprel<S>(&mut self, triple: DepTriple<S>) -> Result<(), GraphError>
    where
        S: Into<String>,
    {
        if triple.head() >= self.inner.node_count() {
            return Err(GraphError::HeadOutOfBounds {
                head: triple.head(),
                node_count: self.inner.node_count(),
            });
        }

        if triple.dependent() >= self.inner.node_count() {
            return Err(GraphError::DependentOutOfBounds {
                dependent: triple.dependent(),
                node_count: self.inner.node_count(),
            });
        }

        // Remove existing head relation (when present).
        if let Some(id) = self
            .inner
            .edges_directed(node_index(triple.dependent), Direction::Incoming)
            .map(|e| e.id())
            .next()
        {
            self.inner.remove_edge(id);
        }

        self.inner.add_edge(
            node_index(triple.head),
            node_index(triple.dependent),
            triple.relation.map(Into::into),
        );

        Ok(())
    }

    /// Return the head relation of `dependent`, if any.
    pub fn head(&self, dependent: usize) -> Option<DepTriple<&str>> {
        head_impl(self.inner, dependent)
    }

    /// Get the number of nodes in the dependency graph.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }
}

fn dependents_impl(
    graph: &DiGraph<Node, Edge>,
    head: usize,
) -> impl Iterator<Item = DepTriple<&str>> {
    graph
        .edges_directed(node_index(head), Direction::Outgoing)
        .map(|e| DepTriple::new(e.source().index(), e.weight().as_deref(), e.target().index()))
}

fn head_impl(graph: &DiGraph<Node, Edge>, dependent: usize) -> Option<DepTriple<&str>> {
    graph
        .edges_directed(node_index(dependent), Direction::Incoming)
        .next()
        .map(|e| DepTriple::new(e.source().index(), e.weight().as_deref(), e.target().index()))
}

/// Enhanced dependency graph view.
///
/// The nodes of this graph correspond to the positions in the sentence.
/// An edge points from a head to a dependent and is labeled with the
/// position of the relation in the dependent's enhanced dependencies.
/// Relations to the root are not part of the view: the root has no
/// children.
pub struct EnhancedGraph<'a> {
    sentence: &'a Sentence,
    graph: DiGraph<(), usize>,
}

impl<'a> EnhancedGraph<'a> {
    fn new(sentence: &'a Sentence) -> Result<Self, GraphError> {
        let mut graph = DiGraph::with_capacity(sentence.len(), sentence.len());
        for _ in 0..sentence.len() {
            graph.add_node(());
        }

        for (dependent, node) in sentence.iter().enumerate() {
            let token = match node.token() {
                Some(token) => token,
                None => continue,
            };

            for (position, dep) in token.deps().iter().enumerate() {
                if dep.head().is_root() {
                    continue;
                }

                let head =
                    sentence
                        .index_of(dep.head())
                        .ok_or_else(|| GraphError::UnresolvedHead {
                            head: dep.head(),
                            dependent: token.id(),
                        })?;

                graph.add_edge(node_index(head), node_index(dependent), position);
            }
        }

        Ok(EnhancedGraph { sentence, graph })
    }

    /// Get the sentence that this graph is a view of.
    pub fn sentence(&self) -> &'a Sentence {
        self.sentence
    }

    /// Get the children of `head`, in sentence order.
    ///
    /// A child that is attached to `head` through several relations is
    /// returned once.
    pub fn children(&self, head: usize) -> Vec<usize> {
        let mut children = self
            .graph
            .neighbors_directed(node_index(head), Direction::Outgoing)
            .map(|n| n.index())
            .collect::<Vec<_>>();
        children.sort_unstable();
        children.dedup();
        children
    }

    /// Get the relations of which `head` is the head.
    ///
    /// Returns pairs of the dependent and the position of the relation in
    /// the dependent's enhanced dependencies, in sentence order.
    pub fn dependents(&self, head: usize) -> Vec<(usize, usize)> {
        let mut dependents = self
            .graph
            .edges_directed(node_index(head), Direction::Outgoing)
            .map(|e| (e.target().index(), *e.weight()))
            .collect::<Vec<_>>();
        dependents.sort_unstable();
        dependents
    }
}

#[cfg(test)]
mod tests {
    use super::{DepTriple, Node, Sentence};
    use crate::error::GraphError;
    use crate::label::{EnhancedDep, EnhancedDeps};
    use crate::tests::TEST_SENTENCES;
    use crate::token::{Token, TokenBuilder, TokenId};

    fn three_tokens() -> Sentence {
        let mut g = Sentence::default();
        g.push(Token::new(1, "Daniël")).unwrap();
        g.push(Token::new(2, "test")).unwrap();
        g.push(Token::new(3, "dit")).unwrap();
        g
    }

    #[test]
    fn add_deprel() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("wrong"), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 2))
            .unwrap();

        assert!(g.dep_graph().head(0).is_none());
        assert_eq!(
            g.dep_graph().head(1),
            Some(DepTriple::new(0, Some("wrong"), 1))
        );
        assert_eq!(
            g.dep_graph().head(2),
            Some(DepTriple::new(0, Some("root"), 2))
        );
        assert!(g.dep_graph().head(3).is_none());

        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("subj"), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("obj1"), 3))
            .unwrap();
        assert_eq!(
            g.dep_graph().head(1),
            Some(DepTriple::new(2, Some("subj"), 1))
        );
        assert_eq!(
            g.dep_graph().head(3),
            Some(DepTriple::new(2, Some("obj1"), 3))
        );
    }

    #[test]
    fn dependents() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 2))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("subj"), 1))
            .unwrap();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("obj1"), 3))
            .unwrap();

        let deps = g.dep_graph().dependents(0).collect::<Vec<_>>();
        assert_eq!(&deps, &[DepTriple::new(0, Some("root"), 2)]);

        assert!(g.dep_graph().dependents(1).next().is_none());

        let mut deps = g.dep_graph().dependents(2).collect::<Vec<_>>();
        deps.sort();
        assert_eq!(
            &deps,
            &[
                DepTriple::new(2, Some("subj"), 1),
                DepTriple::new(2, Some("obj1"), 3),
            ]
        );
    }

    #[test]
    fn relation_outlives_graph_view() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("subj"), 1))
            .unwrap();

        let relation = g.dep_graph().head(1).and_then(DepTriple::into_relation);
        assert_eq!(relation, Some("subj"));
        assert_eq!(
            g.dep_graph().head(3).and_then(DepTriple::into_relation),
            None
        );
    }

    #[test]
    fn equality() {
        let mut g1 = three_tokens();

        let g2 = g1.clone();
        assert_eq!(g1, g2);

        g1.push(Token::new(4, "?")).unwrap();
        assert_ne!(g1, g2);

        let mut g3 = g1.clone();
        g1.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 3))
            .unwrap();
        assert_ne!(g1, g3);
        g3.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 3))
            .unwrap();
        assert_eq!(g1, g3);

        let mut g4 = g1.clone();
        if let Node::Token(ref mut token) = g4[3] {
            token.set_deps("0:root".parse().unwrap());
        }
        assert_ne!(g1, g4);
    }

    #[test]
    #[should_panic(expected = "HeadOutOfBounds")]
    fn incorrect_head_is_rejected() {
        let mut g = three_tokens();
        g.dep_graph_mut()
            .add_deprel(DepTriple::new(4, Some("test"), 3))
            .unwrap();
    }

    #[test]
    fn incorrect_dependent_is_rejected() {
        let mut g = three_tokens();
        assert_eq!(
            g.dep_graph_mut()
                .add_deprel(DepTriple::new(3, Some("test"), 4)),
            Err(GraphError::DependentOutOfBounds {
                dependent: 4,
                node_count: 4
            })
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut g = three_tokens();
        assert_eq!(
            g.push(Token::new(2, "again")),
            Err(GraphError::DuplicateId {
                id: TokenId::Word(2)
            })
        );
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn lookup_by_id() {
        let sentence = &TEST_SENTENCES[1];

        // The empty node 5.1 is the sixth token.
        assert_eq!(sentence.index_of(TokenId::Empty(5, 1)), Some(6));
        assert_eq!(sentence.index_of(TokenId::Word(6)), Some(7));
        assert_eq!(sentence.index_of(TokenId::ROOT), Some(0));
        assert_eq!(sentence.index_of(TokenId::Word(8)), None);
        assert_eq!(
            sentence.token_by_id(TokenId::Empty(5, 1)).unwrap().form(),
            "won"
        );
        assert!(sentence.token_by_id(TokenId::ROOT).is_none());
    }

    #[test]
    fn enhanced_children() {
        let sentence = &TEST_SENTENCES[1];
        let graph = sentence.enhanced_graph().unwrap();
        assert!(std::ptr::eq(graph.sentence(), sentence));

        // The root has no children, even though 'won' attaches to it.
        assert!(graph.children(0).is_empty());
        assert_eq!(graph.children(2), vec![1, 3, 6]);
        assert_eq!(graph.children(6), vec![4, 5, 7]);
        assert!(graph.children(7).is_empty());
        assert_eq!(graph.dependents(6), vec![(4, 0), (5, 0), (7, 0)]);
    }

    #[test]
    fn enhanced_children_are_deduplicated() {
        let mut sentence = Sentence::new();
        sentence
            .push(
                TokenBuilder::new(1, "a")
                    .deps("0:root".parse().unwrap())
                    .into(),
            )
            .unwrap();
        sentence
            .push(
                TokenBuilder::new(2, "b")
                    .deps("1:obj|1:nsubj:xsubj".parse().unwrap())
                    .into(),
            )
            .unwrap();

        let graph = sentence.enhanced_graph().unwrap();
        assert_eq!(graph.children(1), vec![2]);
        assert_eq!(graph.dependents(1), vec![(2, 0), (2, 1)]);
    }

    #[test]
    fn enhanced_graph_reflects_modifications() {
        let mut sentence = TEST_SENTENCES[1].clone();
        assert!(sentence.enhanced_graph().unwrap().children(3).is_empty());

        sentence[7]
            .token_mut()
            .unwrap()
            .deps_mut()
            .push(EnhancedDep::new(3, "conj"));

        assert_eq!(sentence.enhanced_graph().unwrap().children(3), vec![7]);
    }

    #[test]
    fn unresolved_enhanced_head() {
        let mut sentence = Sentence::new();
        let deps: EnhancedDeps = "4.1:nsubj".parse().unwrap();
        sentence
            .push(TokenBuilder::new(1, "a").deps(deps).into())
            .unwrap();

        assert_eq!(
            sentence.enhanced_graph().err(),
            Some(GraphError::UnresolvedHead {
                head: TokenId::Empty(4, 1),
                dependent: TokenId::Word(1),
            })
        );
    }
}
