use std::borrow::Cow;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;
use itertools::Itertools;

use eudgraph::graph::{MultiwordToken, Sentence};
use eudgraph::token::{Features, Misc, TokenId, EMPTY_TOKEN};

use crate::error::ParseError;

#[derive(Debug, Eq, PartialEq)]
pub struct ConlluFeatures<'a>(pub Cow<'a, Features>);

impl<'a> ConlluFeatures<'a> {
    pub fn borrowed(features: &'a Features) -> Self {
        ConlluFeatures(Cow::Borrowed(features))
    }

    pub fn into_owned(self) -> Features {
        self.0.into_owned()
    }
}

impl ConlluFeatures<'static> {
    pub fn owned(features: Features) -> Self {
        ConlluFeatures(Cow::Owned(features))
    }

    fn parse_features(feature_string: impl AsRef<str>) -> Result<Self, ParseError> {
        let mut features = IndexMap::new();

        if feature_string.as_ref() == EMPTY_TOKEN {
            return Ok(ConlluFeatures(Cow::Owned(Features::new())));
        }

        for fv in feature_string.as_ref().split('|') {
            let idx = fv.find('=').ok_or_else(|| ParseError::IncorrectFeatureField {
                value: fv.to_owned(),
            })?;

            features.insert(fv[..idx].to_owned(), fv[idx + 1..].to_owned());
        }

        Ok(ConlluFeatures::owned(features.into()))
    }
}

impl<'a> Deref for ConlluFeatures<'a> {
    type Target = IndexMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &**self.0
    }
}

impl<'a> fmt::Display for ConlluFeatures<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "{}", EMPTY_TOKEN)
        } else {
            let features_str = self.0.iter().map(|(k, v)| format!("{}={}", k, v)).join("|");
            write!(f, "{}", features_str)
        }
    }
}

impl TryFrom<&str> for ConlluFeatures<'static> {
    type Error = ParseError;

    fn try_from(feature_string: &str) -> Result<Self, Self::Error> {
        Self::parse_features(feature_string)
    }
}

/// Miscellaneous features in CoNLL-U notation.
///
/// Items without `=` are keys without a value. When a key occurs more
/// than once, the last value wins.
pub struct ConlluMisc<'a>(Cow<'a, Misc>);

impl<'a> ConlluMisc<'a> {
    pub fn borrowed(misc: &'a Misc) -> Self {
        ConlluMisc(Cow::Borrowed(misc))
    }

    pub fn into_owned(self) -> Misc {
        self.0.into_owned()
    }
}

impl ConlluMisc<'static> {
    pub fn owned(misc: Misc) -> Self {
        ConlluMisc(Cow::Owned(misc))
    }

    pub fn parse_misc(misc_string: impl AsRef<str>) -> IndexMap<String, Option<String>> {
        let mut features = IndexMap::new();

        for fv in misc_string.as_ref().split('|') {
            let (k, v) = fv
                .find('=')
                .map(|idx| (fv[..idx].to_owned(), Some(fv[idx + 1..].to_owned())))
                .unwrap_or_else(|| (fv.to_owned(), None));
            features.insert(k, v);
        }

        features
    }
}

impl<'a> fmt::Display for ConlluMisc<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "{}", EMPTY_TOKEN)
        } else {
            let misc_str = self
                .0
                .iter()
                .map(|(k, v)| match *v {
                    Some(ref v) => format!("{}={}", k, v),
                    None => k.to_owned(),
                })
                .join("|");
            write!(f, "{}", misc_str)
        }
    }
}

impl From<&str> for ConlluMisc<'static> {
    fn from(misc_string: &str) -> Self {
        ConlluMisc::owned(Self::parse_misc(misc_string).into())
    }
}

struct ConlluMultiword<'a>(&'a MultiwordToken);

impl<'a> fmt::Display for ConlluMultiword<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}\t{}\t_\t_\t_\t_\t_\t_\t_\t{}",
            self.0.first(),
            self.0.last(),
            self.0.form(),
            ConlluMisc::borrowed(self.0.misc())
        )
    }
}

/// A sentence in CoNLL-U notation, without the terminating blank line.
pub struct ConlluSentence<'a>(pub &'a Sentence);

impl<'a> fmt::Display for ConlluSentence<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let sentence = self.0;

        for comment in sentence.comments() {
            writeln!(fmt, "{}", comment)?
        }

        let graph = sentence.dep_graph();

        for i in 1..sentence.len() {
            let token = match sentence[i].token() {
                Some(token) => token,
                None => continue,
            };

            for multiword in sentence
                .multiwords()
                .iter()
                .filter(|mw| TokenId::Word(mw.first()) == token.id())
            {
                writeln!(fmt, "{}", ConlluMultiword(multiword))?;
            }

            let head_triple = graph.head(i);
            let head = head_triple.as_ref().map(|t| sentence[t.head()].id());
            let head_rel = head_triple
                .as_ref()
                .map(|t| t.relation().unwrap_or(EMPTY_TOKEN));

            writeln!(
                fmt,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                token.id(),
                token.form(),
                token.lemma().unwrap_or(EMPTY_TOKEN),
                token.upos().unwrap_or(EMPTY_TOKEN),
                token.xpos().unwrap_or(EMPTY_TOKEN),
                ConlluFeatures::borrowed(token.features()),
                head.map(|id| id.to_string())
                    .unwrap_or_else(|| EMPTY_TOKEN.to_string()),
                head_rel.unwrap_or(EMPTY_TOKEN),
                token.deps(),
                ConlluMisc::borrowed(token.misc())
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;
    use std::iter::FromIterator;

    use maplit::btreemap;

    use eudgraph::graph::{DepTriple, MultiwordToken, Sentence};
    use eudgraph::token::{Features, Misc, Token, TokenBuilder, TokenId};

    use crate::error::ParseError;
    use crate::wrap::{ConlluFeatures, ConlluMisc, ConlluSentence};

    #[test]
    fn features_as_string_keep_order() {
        let features = Features::from_iter(vec![("feature2", "y"), ("feature1", "x")]);
        let features_string: String = ConlluFeatures::borrowed(&features).to_string();

        assert_eq!(features_string, "feature2=y|feature1=x");

        assert_eq!(ConlluFeatures::owned(Features::new()).to_string(), "_");
    }

    #[test]
    fn features_with_colons() {
        let f = "Some=feature=with|additional=colons";
        let features = ConlluFeatures::try_from(f).unwrap();
        let some = features.get("Some").unwrap();
        assert_eq!(some, "feature=with");
        let additional = features.get("additional").unwrap();
        assert_eq!(additional, "colons");
    }

    #[test]
    fn feature_without_value_results_in_error() {
        assert_eq!(
            ConlluFeatures::try_from("c=d|a"),
            Err(ParseError::IncorrectFeatureField {
                value: "a".to_string()
            })
        );
    }

    #[test]
    fn eq_features_is_order_insensitive() {
        let token1: Token = TokenBuilder::new(1, "a")
            .features(ConlluFeatures::try_from("a=b|c=d").unwrap().into_owned())
            .into();
        let token2 = TokenBuilder::new(1, "a")
            .features(ConlluFeatures::try_from("c=d|a=b").unwrap().into_owned())
            .into();

        assert_eq!(token1, token2);
    }

    #[test]
    fn parse_empty_features() {
        assert_eq!(
            ConlluFeatures::try_from("_").unwrap().into_owned(),
            Features::new()
        );
    }

    #[test]
    fn features() {
        let features = ConlluFeatures::try_from("Case=Nom|Number=Sing|Gender=Masc")
            .unwrap()
            .into_owned();

        let correct = btreemap! {
            "Case" => "Nom",
            "Gender" => "Masc",
            "Number" => "Sing",
        };

        assert_eq!(features.len(), correct.len());
        for (k, v) in correct {
            assert_eq!(features.get(k).map(String::as_str), Some(v));
        }
    }

    #[test]
    fn misc_keys_without_values() {
        let misc = ConlluMisc::from("SpaceAfter=No|Mark|Head=2=3").into_owned();
        assert_eq!(
            misc,
            Misc::from_iter(vec![
                ("SpaceAfter", Some("No")),
                ("Mark", None),
                ("Head", Some("2=3"))
            ])
        );
        assert_eq!(
            ConlluMisc::borrowed(&misc).to_string(),
            "SpaceAfter=No|Mark|Head=2=3"
        );
    }

    #[test]
    fn sentence_with_multiword_and_empty_node() {
        let mut sentence = Sentence::new();
        sentence.push(Token::new(1, "Vamos")).unwrap();
        sentence.push(Token::new(2, "a")).unwrap();
        sentence.push(Token::new(3, "el")).unwrap();
        sentence
            .push(
                TokenBuilder::new(TokenId::Empty(3, 1), "ir")
                    .deps("1:conj".parse().unwrap())
                    .into(),
            )
            .unwrap();
        sentence.multiwords_mut().push(MultiwordToken::new(2, 3, "al"));
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 1))
            .unwrap();
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(3, None::<String>, 2))
            .unwrap();

        assert_eq!(
            ConlluSentence(&sentence).to_string(),
            "1\tVamos\t_\t_\t_\t_\t0\troot\t_\t_\n\
             2-3\tal\t_\t_\t_\t_\t_\t_\t_\t_\n\
             2\ta\t_\t_\t_\t_\t3\t_\t_\t_\n\
             3\tel\t_\t_\t_\t_\t_\t_\t_\t_\n\
             3.1\tir\t_\t_\t_\t_\t_\t_\t1:conj\t_\n"
        );
    }
}
