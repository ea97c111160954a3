//! Tokens in the dependency graph.

use std::fmt::{self, Display, Formatter};
use std::iter::FromIterator;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::LabelError;
use crate::graph::{Iter, IterMut, Node, Sentence};
use crate::label::EnhancedDeps;

pub const EMPTY_TOKEN: &str = "_";

/// Token identifier.
///
/// Surface tokens are numbered from 1, the root has identifier 0. Empty
/// (elided) nodes have a decimal identifier such as `5.1`: the first empty
/// node after word 5. Empty nodes do not correspond to a position in the
/// sentence, so they can only be found through identifier lookup.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenId {
    /// A surface word, or the root.
    Word(usize),

    /// An empty node: the word it follows and its index after that word.
    Empty(usize, usize),
}

impl TokenId {
    /// Identifier of the artificial root.
    pub const ROOT: TokenId = TokenId::Word(0);

    /// Returns `true` if this is the identifier of the root.
    pub fn is_root(self) -> bool {
        self == TokenId::ROOT
    }

    /// Returns `true` if this is the identifier of an empty node.
    pub fn is_empty_node(self) -> bool {
        match self {
            TokenId::Word(_) => false,
            TokenId::Empty(_, _) => true,
        }
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TokenId::Word(word) => write!(f, "{}", word),
            TokenId::Empty(word, idx) => write!(f, "{}.{}", word, idx),
        }
    }
}

impl From<usize> for TokenId {
    fn from(word: usize) -> Self {
        TokenId::Word(word)
    }
}

impl FromStr for TokenId {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LabelError::InvalidTokenId {
            value: s.to_owned(),
        };

        match s.find('.') {
            Some(idx) => Ok(TokenId::Empty(
                parse_id_part(&s[..idx]).ok_or_else(invalid)?,
                parse_id_part(&s[idx + 1..]).ok_or_else(invalid)?,
            )),
            None => parse_id_part(s).map(TokenId::Word).ok_or_else(invalid),
        }
    }
}

fn parse_id_part(part: &str) -> Option<usize> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    part.parse().ok()
}

/// A builder for `Token`s.
///
/// The `Token` type stores a CoNLL-U token. However, since this format
/// permits a large number of fields, construction of a token can get
/// tedious. This builder provides a fluent interface for creating `Token`s.
pub struct TokenBuilder {
    token: Token,
}

impl TokenBuilder {
    /// Create a `Token` builder with all non-form fields set to absent.
    pub fn new(id: impl Into<TokenId>, form: impl Into<String>) -> TokenBuilder {
        TokenBuilder {
            token: Token::new(id, form),
        }
    }

    /// Set the word form or punctuation symbol.
    pub fn form(mut self, form: impl Into<String>) -> TokenBuilder {
        self.token.set_form(form);
        self
    }

    /// Set the lemma or stem of the word form.
    pub fn lemma(mut self, lemma: impl Into<String>) -> TokenBuilder {
        self.token.set_lemma(Some(lemma));
        self
    }

    /// Set the universal part-of-speech tag.
    pub fn upos(mut self, upos: impl Into<String>) -> TokenBuilder {
        self.token.set_upos(Some(upos));
        self
    }

    /// Set the language-specific part-of-speech tag.
    pub fn xpos(mut self, xpos: impl Into<String>) -> TokenBuilder {
        self.token.set_xpos(Some(xpos));
        self
    }

    /// Set the syntactic and/or morphological features of the token.
    pub fn features(mut self, features: Features) -> TokenBuilder {
        self.token.set_features(features);
        self
    }

    /// Set the enhanced dependencies of the token.
    pub fn deps(mut self, deps: EnhancedDeps) -> TokenBuilder {
        self.token.set_deps(deps);
        self
    }

    /// Set miscellaneous token features.
    pub fn misc(mut self, misc: Misc) -> TokenBuilder {
        self.token.set_misc(misc);
        self
    }
}

impl From<Token> for TokenBuilder {
    fn from(token: Token) -> Self {
        TokenBuilder { token }
    }
}

impl From<TokenBuilder> for Token {
    fn from(builder: TokenBuilder) -> Self {
        builder.token
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    id: TokenId,
    form: String,
    lemma: Option<String>,
    upos: Option<String>,
    xpos: Option<String>,
    features: Features,
    deps: EnhancedDeps,
    misc: Misc,
}

impl Token {
    /// Create a new token where all the non-form fields are absent.
    pub fn new(id: impl Into<TokenId>, form: impl Into<String>) -> Token {
        Token {
            id: id.into(),
            form: form.into(),
            lemma: None,
            upos: None,
            xpos: None,
            features: Features::new(),
            deps: EnhancedDeps::new(),
            misc: Misc::new(),
        }
    }

    /// Get the token identifier.
    ///
    /// The identifier is fixed at construction, since the sentence
    /// indexes tokens by identifier.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Get the word form or punctuation symbol.
    pub fn form(&self) -> &str {
        self.form.as_ref()
    }

    /// Get the lemma or stem of the word form.
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    /// Get the universal part-of-speech tag.
    pub fn upos(&self) -> Option<&str> {
        self.upos.as_deref()
    }

    /// Get the language-specific part-of-speech tag.
    pub fn xpos(&self) -> Option<&str> {
        self.xpos.as_deref()
    }

    /// Get the syntactic and/or morphological features of the token.
    pub fn features(&self) -> &Features {
        &self.features
    }

    /// Get the syntactic and/or morphological features of the token.
    ///
    /// Returns a mutable reference, so that the features can be updated.
    pub fn features_mut(&mut self) -> &mut Features {
        &mut self.features
    }

    /// Get the enhanced dependencies of the token.
    pub fn deps(&self) -> &EnhancedDeps {
        &self.deps
    }

    /// Get the enhanced dependencies of the token.
    ///
    /// Returns a mutable reference, so that relations can be rewritten.
    pub fn deps_mut(&mut self) -> &mut EnhancedDeps {
        &mut self.deps
    }

    /// Get miscellaneous token features.
    pub fn misc(&self) -> &Misc {
        &self.misc
    }

    /// Get miscellaneous token features.
    ///
    /// Returns a mutable reference, so that the information can be updated.
    pub fn misc_mut(&mut self) -> &mut Misc {
        &mut self.misc
    }

    /// Set the word form or punctuation symbol.
    ///
    /// Returns the form that is replaced.
    pub fn set_form(&mut self, form: impl Into<String>) -> String {
        mem::replace(&mut self.form, form.into())
    }

    /// Set the lemma or stem of the word form.
    ///
    /// Returns the lemma that is replaced.
    pub fn set_lemma<S>(&mut self, lemma: Option<S>) -> Option<String>
    where
        S: Into<String>,
    {
        mem::replace(&mut self.lemma, lemma.map(Into::into))
    }

    /// Set the universal part-of-speech tag.
    ///
    /// Returns the universal part-of-speech tag that is replaced.
    pub fn set_upos<S>(&mut self, upos: Option<S>) -> Option<String>
    where
        S: Into<String>,
    {
        mem::replace(&mut self.upos, upos.map(Into::into))
    }

    /// Set the language-specific part-of-speech tag.
    ///
    /// Returns the language-specific part-of-speech tag that is replaced.
    pub fn set_xpos<S>(&mut self, xpos: Option<S>) -> Option<String>
    where
        S: Into<String>,
    {
        mem::replace(&mut self.xpos, xpos.map(Into::into))
    }

    /// Set the syntactic and/or morphological features of the token.
    ///
    /// Returns the features that are replaced.
    pub fn set_features(&mut self, features: Features) -> Features {
        mem::replace(&mut self.features, features)
    }

    /// Set the enhanced dependencies of the token.
    ///
    /// Returns the dependencies that are replaced.
    pub fn set_deps(&mut self, deps: EnhancedDeps) -> EnhancedDeps {
        mem::replace(&mut self.deps, deps)
    }

    /// Set miscellaneous token features.
    ///
    /// Returns the features that are replaced.
    pub fn set_misc(&mut self, misc: Misc) -> Misc {
        mem::replace(&mut self.misc, misc)
    }
}

/// Token features.
///
/// In the CoNLL-U specification, these are morphological features of the
/// token. Features keep the order in which they were read, so that a
/// read -> write round trip reproduces the column. Equality does not
/// depend on the order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Features {
    inner: IndexMap<String, String>,
}

impl Features {
    /// Construct an empty set of features.
    pub fn new() -> Self {
        Features {
            inner: IndexMap::new(),
        }
    }

    /// Unwrap the contained feature map.
    pub fn into_inner(self) -> IndexMap<String, String> {
        self.inner
    }
}

impl Default for Features {
    fn default() -> Self {
        Features::new()
    }
}

impl Deref for Features {
    type Target = IndexMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Features {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl From<IndexMap<String, String>> for Features {
    fn from(feature_map: IndexMap<String, String>) -> Self {
        Features { inner: feature_map }
    }
}

impl<S, T> FromIterator<(S, T)> for Features
where
    S: Into<String>,
    T: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
    {
        let features = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Features { inner: features }
    }
}

/// Miscellaneous features.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Misc {
    inner: IndexMap<String, Option<String>>,
}

impl Misc {
    /// Construct an empty set of features.
    pub fn new() -> Self {
        Misc {
            inner: IndexMap::new(),
        }
    }

    /// Unwrap the contained feature map.
    pub fn into_inner(self) -> IndexMap<String, Option<String>> {
        self.inner
    }
}

impl Default for Misc {
    fn default() -> Self {
        Misc::new()
    }
}

impl Deref for Misc {
    type Target = IndexMap<String, Option<String>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Misc {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl From<IndexMap<String, Option<String>>> for Misc {
    fn from(misc_map: IndexMap<String, Option<String>>) -> Self {
        Misc { inner: misc_map }
    }
}

impl<S, T> FromIterator<(S, Option<T>)> for Misc
where
    S: Into<String>,
    T: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<T>)>,
    {
        let misc = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.map(Into::into)))
            .collect();

        Misc { inner: misc }
    }
}

/// Get tokens of a sentence.
pub trait Tokens {
    /// Get an iterator over the tokens in a sentence.
    fn tokens(&self) -> TokenIter;

    /// Get the tokens in a sentence mutably.
    fn tokens_mut(&mut self) -> TokenIterMut;
}

impl Tokens for Sentence {
    fn tokens(&self) -> TokenIter {
        TokenIter { inner: self.iter() }
    }

    fn tokens_mut(&mut self) -> TokenIterMut {
        TokenIterMut {
            inner: self.iter_mut(),
        }
    }
}

/// Token iterator.
pub struct TokenIter<'a> {
    inner: Iter<'a>,
}

impl<'a> Iterator for TokenIter<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        for node in &mut self.inner {
            if let Node::Token(token) = node {
                return Some(token);
            }
        }

        None
    }
}

/// Mutable token iterator.
pub struct TokenIterMut<'a> {
    inner: IterMut<'a>,
}

impl<'a> Iterator for TokenIterMut<'a> {
    type Item = &'a mut Token;

    fn next(&mut self) -> Option<Self::Item> {
        for node in &mut self.inner {
            if let Node::Token(token) = node {
                return Some(token);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::iter::FromIterator;

    use indexmap::IndexMap;
    use maplit::hashset;

    use super::{Features, TokenId, Tokens};
    use crate::error::LabelError;
    use crate::tests::TEST_SENTENCES;

    #[test]
    fn features_from_iter_keeps_order() {
        let features = Features::from_iter(vec![("feature2", "y"), ("feature1", "x")]);

        assert_eq!(
            features.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["feature2", "feature1"]
        );
    }

    #[test]
    fn features_eq_is_order_insensitive() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), "b".to_string());
        map.insert("c".to_string(), "d".to_string());

        assert_eq!(
            Features::from(map),
            Features::from_iter(vec![("c", "d"), ("a", "b")])
        );
    }

    #[test]
    fn token_ids() {
        assert_eq!("5".parse::<TokenId>(), Ok(TokenId::Word(5)));
        assert_eq!("5.1".parse::<TokenId>(), Ok(TokenId::Empty(5, 1)));
        assert_eq!("0".parse::<TokenId>(), Ok(TokenId::ROOT));
        assert_eq!(TokenId::Empty(12, 3).to_string(), "12.3");
        assert!(TokenId::Empty(12, 3).is_empty_node());
        assert!(!TokenId::Word(12).is_empty_node());
    }

    #[test]
    fn invalid_token_ids_are_rejected() {
        for invalid in &["", "_", "a", "5.", ".1", "1-2", "+5", "5.1.2"] {
            assert_eq!(
                invalid.parse::<TokenId>(),
                Err(LabelError::InvalidTokenId {
                    value: invalid.to_string()
                })
            );
        }
    }

    #[test]
    fn token_ids_hash_by_value() {
        let ids = hashset! { TokenId::Word(5), TokenId::Empty(5, 1), TokenId::Word(5) };
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn tokens() {
        let mut iter = TEST_SENTENCES[0].tokens();
        assert_eq!(iter.next(), TEST_SENTENCES[0][1].token());
        assert_eq!(iter.next(), TEST_SENTENCES[0][2].token());
        assert_eq!(iter.next(), TEST_SENTENCES[0][3].token());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn tokens_mut() {
        let mut sentence = TEST_SENTENCES[0].clone();

        {
            let mut iter = sentence.tokens_mut();
            let token = iter.next().unwrap();
            assert_eq!(&*token, TEST_SENTENCES[0][1].token().unwrap());
            token.set_upos(Some("mutable"));
            assert_eq!(iter.next().map(|t| &*t), TEST_SENTENCES[0][2].token());
        }

        assert_eq!(sentence[1].token().unwrap().upos(), Some("mutable"));
    }
}
