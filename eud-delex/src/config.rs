//! Delexicalisation configuration.

use std::collections::{HashMap, HashSet};
use std::iter::FromIterator;

use log::info;

use eudgraph::graph::{DepTriple, Sentence};
use eudgraph::label::SEGMENT_SEPARATOR;
use eudgraph::token::{Token, Tokens};

/// Morphological feature that holds grammatical case.
pub const CASE_FEATURE: &str = "Case";

/// Relation segments that never carry lexical material.
pub const EXTRA_FORBIDDEN: [&str; 13] = [
    "root",
    "poss",
    "parataxis",
    "ref",
    "relcl",
    "pass",
    "xsubj",
    "prt",
    "npmod",
    "tmod",
    "predet",
    "preconj",
    "agent",
];

fn lowercased_case(token: &Token) -> Option<String> {
    token
        .features()
        .get(CASE_FEATURE)
        .map(|case| case.to_lowercase())
}

fn count(counts: &mut HashMap<String, usize>, key: impl Into<String>) {
    *counts.entry(key.into()).or_insert(0) += 1;
}

/// Frequencies of the units of a corpus.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Vocab {
    forms: HashMap<String, usize>,
    features: HashMap<(String, String), usize>,
    deprels: HashMap<String, usize>,
    enhanced_relations: HashMap<String, usize>,
    enhanced_bases: HashMap<String, usize>,
    cases: HashMap<String, usize>,
}

impl Vocab {
    /// Count the vocabulary of a corpus.
    pub fn from_sentences<'a>(sentences: impl IntoIterator<Item = &'a Sentence>) -> Self {
        let mut vocab = Vocab::default();

        for sentence in sentences {
            let graph = sentence.dep_graph();
            for idx in 1..sentence.len() {
                if let Some(deprel) = graph.head(idx).and_then(DepTriple::into_relation) {
                    count(&mut vocab.deprels, deprel);
                }
            }

            for token in sentence.tokens() {
                count(&mut vocab.forms, token.form());

                for (feature, value) in token.features().iter() {
                    *vocab
                        .features
                        .entry((feature.clone(), value.clone()))
                        .or_insert(0) += 1;
                }

                if let Some(case) = lowercased_case(token) {
                    count(&mut vocab.cases, case);
                }

                for dep in token.deps().iter() {
                    count(&mut vocab.enhanced_relations, dep.relation().to_string());
                    count(&mut vocab.enhanced_bases, dep.relation().base());
                }
            }
        }

        vocab
    }

    pub fn forms(&self) -> &HashMap<String, usize> {
        &self.forms
    }

    /// Frequencies of feature-value pairs.
    pub fn features(&self) -> &HashMap<(String, String), usize> {
        &self.features
    }

    /// Frequencies of basic dependency relations.
    pub fn deprels(&self) -> &HashMap<String, usize> {
        &self.deprels
    }

    /// Frequencies of enhanced relations.
    pub fn enhanced_relations(&self) -> &HashMap<String, usize> {
        &self.enhanced_relations
    }

    /// Frequencies of the base (first segment) of enhanced relations.
    pub fn enhanced_bases(&self) -> &HashMap<String, usize> {
        &self.enhanced_bases
    }

    /// Frequencies of lowercased `Case` feature values.
    pub fn cases(&self) -> &HashMap<String, usize> {
        &self.cases
    }
}

/// Relation segments that must not be delexicalised.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ForbiddenWords {
    inner: HashSet<String>,
}

impl ForbiddenWords {
    /// Construct an empty list.
    pub fn new() -> Self {
        ForbiddenWords::default()
    }

    /// Construct a list with the relation segments that never carry
    /// lexical material.
    pub fn extra() -> Self {
        EXTRA_FORBIDDEN.iter().copied().collect()
    }

    /// Construct the list from a corpus vocabulary.
    ///
    /// The list contains the basic relations and their segments, the base
    /// enhanced relations, the lowercased `Case` values and the extra
    /// segments.
    pub fn from_vocab(vocab: &Vocab) -> Self {
        let mut forbidden = ForbiddenWords::extra();

        for deprel in vocab.deprels().keys() {
            forbidden.insert(deprel.as_str());
            for segment in deprel.split(SEGMENT_SEPARATOR) {
                forbidden.insert(segment);
            }
        }

        for base in vocab.enhanced_bases().keys() {
            forbidden.insert(base.as_str());
        }

        for case in vocab.cases().keys() {
            forbidden.insert(case.as_str());
        }

        forbidden
    }

    pub fn contains(&self, word: &str) -> bool {
        self.inner.contains(word)
    }

    /// Add a word, returns `false` if the word was already present.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        self.inner.insert(word.into())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S> FromIterator<S> for ForbiddenWords
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        ForbiddenWords {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Detector of informative morphological case.
///
/// Morphological case is informative for a corpus when tokens carry their
/// `Case` feature value in their enhanced relations, e.g. `obl:in:loc` for
/// a token with `Case=Loc`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CaseDetector {
    max_sentences: usize,
    min_matches: usize,
}

impl CaseDetector {
    /// Construct a detector that samples up to `max_sentences` sentences
    /// and requires at least `min_matches` matching tokens.
    pub fn new(max_sentences: usize, min_matches: usize) -> Self {
        CaseDetector {
            max_sentences,
            min_matches,
        }
    }

    /// Count the tokens whose `Case` value is the trailing segment of one
    /// of their enhanced relations.
    ///
    /// The case must follow a subtype, as in `obl:z:gen`, so `nmod:gen`
    /// does not match. Tokens without a `Case` feature do not match.
    pub fn count_matches<'a>(&self, sentences: impl IntoIterator<Item = &'a Sentence>) -> usize {
        sentences
            .into_iter()
            .take(self.max_sentences)
            .flat_map(|sentence| sentence.tokens())
            .filter(|token| match lowercased_case(token) {
                Some(case) => token.deps().iter().any(|dep| {
                    let relation = dep.relation();
                    relation.len() >= 3
                        && relation
                            .last()
                            .map(|segment| segment.as_str() == case)
                            .unwrap_or(false)
                }),
                None => false,
            })
            .count()
    }

    /// Returns `true` if morphological case is informative.
    pub fn detect<'a>(&self, sentences: impl IntoIterator<Item = &'a Sentence>) -> bool {
        self.count_matches(sentences) >= self.min_matches
    }
}

impl Default for CaseDetector {
    fn default() -> Self {
        CaseDetector::new(1000, 50)
    }
}

/// Delexicalisation configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelexConfig {
    morphological_case: bool,
    forbidden: ForbiddenWords,
}

impl DelexConfig {
    /// Construct a configuration without morphological case, which only
    /// forbids the extra segments.
    pub fn new() -> Self {
        DelexConfig {
            morphological_case: false,
            forbidden: ForbiddenWords::extra(),
        }
    }

    /// Derive the configuration from a corpus.
    pub fn from_corpus(sentences: &[Sentence]) -> Self {
        let vocab = Vocab::from_sentences(sentences);
        let forbidden = ForbiddenWords::from_vocab(&vocab);
        let detector = CaseDetector::default();
        let matches = detector.count_matches(sentences);
        let morphological_case = matches >= detector.min_matches;

        info!(
            "{} sentences, {} forbidden words, {} case matches, morphological case: {}",
            sentences.len(),
            forbidden.len(),
            matches,
            morphological_case
        );

        DelexConfig {
            morphological_case,
            forbidden,
        }
    }

    /// Delexicalise the second-to-last segment, which is followed by
    /// morphological case.
    pub fn morphological_case(mut self, morphological_case: bool) -> Self {
        self.morphological_case = morphological_case;
        self
    }

    /// Set the forbidden words.
    pub fn forbidden(mut self, forbidden: ForbiddenWords) -> Self {
        self.forbidden = forbidden;
        self
    }

    pub fn uses_morphological_case(&self) -> bool {
        self.morphological_case
    }

    pub fn forbidden_words(&self) -> &ForbiddenWords {
        &self.forbidden
    }
}

impl Default for DelexConfig {
    fn default() -> Self {
        DelexConfig::new()
    }
}

#[cfg(test)]
mod tests {
    use std::iter::FromIterator;

    use maplit::hashmap;

    use eudgraph::graph::{DepTriple, Sentence};
    use eudgraph::token::{Features, TokenBuilder};

    use super::{CaseDetector, DelexConfig, ForbiddenWords, Vocab};
    use crate::tests::{read_sentences, TEST_SENTENCES};

    fn case_sentence(case: &str, deps: &str) -> Sentence {
        let mut sentence = Sentence::new();
        sentence
            .push(
                TokenBuilder::new(1, "kota")
                    .deps("0:root".parse().unwrap())
                    .into(),
            )
            .unwrap();
        sentence
            .push(
                TokenBuilder::new(2, "domu")
                    .features(Features::from_iter(vec![("Case", case)]))
                    .deps(deps.parse().unwrap())
                    .into(),
            )
            .unwrap();
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 1))
            .unwrap();
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(1, Some("obl"), 2))
            .unwrap();
        sentence
    }

    #[test]
    fn vocab_counts() {
        let vocab = Vocab::from_sentences(&[case_sentence("Gen", "1:obl:do:gen")]);

        assert_eq!(
            vocab.deprels(),
            &hashmap! { "root".to_string() => 1, "obl".to_string() => 1 }
        );
        assert_eq!(
            vocab.enhanced_bases(),
            &hashmap! { "root".to_string() => 1, "obl".to_string() => 1 }
        );
        assert_eq!(vocab.cases(), &hashmap! { "gen".to_string() => 1 });
        assert_eq!(vocab.forms().get("domu"), Some(&1));
        assert_eq!(
            vocab.features(),
            &hashmap! { ("Case".to_string(), "Gen".to_string()) => 1 }
        );
        assert_eq!(vocab.enhanced_relations().get("obl:do:gen"), Some(&1));
    }

    #[test]
    fn forbidden_words_from_vocab() {
        let vocab = Vocab::from_sentences(&*TEST_SENTENCES);
        let forbidden = ForbiddenWords::from_vocab(&vocab);

        for word in &["nsubj:pass", "nsubj", "pass", "case", "obl", "conj", "agent", "nom"] {
            assert!(forbidden.contains(word), "{} should be forbidden", word);
        }

        for word in &["into", "and", "to"] {
            assert!(!forbidden.contains(word), "{} should be allowed", word);
        }
    }

    #[test]
    fn missing_case_is_no_match() {
        let sentences = read_sentences("testdata/coordination.conllu");
        assert_eq!(CaseDetector::default().count_matches(&sentences), 0);
        assert!(!CaseDetector::default().detect(&sentences));
    }

    #[test]
    fn detects_morphological_case() {
        let matching = case_sentence("Gen", "1:obl:do:gen");
        let other = case_sentence("Nom", "1:nsubj");
        let sentences = vec![matching.clone(), other, matching];

        assert_eq!(CaseDetector::default().count_matches(&sentences), 2);
        assert!(CaseDetector::new(10, 2).detect(&sentences));
        assert!(!CaseDetector::new(10, 3).detect(&sentences));

        // Only the sampled sentences are counted.
        assert!(!CaseDetector::new(2, 2).detect(&sentences));
    }

    #[test]
    fn case_must_be_trailing_segment_after_subtype() {
        let sentences = vec![
            case_sentence("Gen", "1:nmod:gen"),
            case_sentence("Acc", "1:obl:acc:za"),
            case_sentence("Loc", "1:obl:w:loc"),
        ];

        assert_eq!(CaseDetector::default().count_matches(&sentences), 1);
    }

    #[test]
    fn config_from_corpus() {
        let config = DelexConfig::from_corpus(&TEST_SENTENCES);
        assert!(!config.uses_morphological_case());
        assert!(config.forbidden_words().contains("obl"));

        let config = DelexConfig::new()
            .morphological_case(true)
            .forbidden(ForbiddenWords::from_iter(vec!["into"]));
        assert!(config.uses_morphological_case());
        assert!(config.forbidden_words().contains("into"));
        assert!(!config.forbidden_words().contains("root"));
    }
}
