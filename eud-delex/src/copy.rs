//! Copying of labels between annotation layers.

use std::iter::FromIterator;

use log::info;

use eudgraph::graph::Sentence;
use eudgraph::label::{EnhancedDep, EnhancedDeps};
use eudgraph::token::{Misc, Tokens, EMPTY_TOKEN};

use crate::Error;

/// Misc key for the copied head.
pub const HEAD_KEY: &str = "Head";

/// Misc key for the copied relation.
pub const LABEL_KEY: &str = "Label";

fn basic_misc(sentence: &Sentence, idx: usize) -> Misc {
    let triple = sentence.dep_graph().head(idx);
    let head = triple
        .as_ref()
        .map(|triple| sentence[triple.head()].id().to_string())
        .unwrap_or_else(|| EMPTY_TOKEN.to_string());
    let label = triple
        .as_ref()
        .and_then(|triple| triple.relation())
        .unwrap_or(EMPTY_TOKEN)
        .to_string();

    Misc::from_iter(vec![(HEAD_KEY, Some(head)), (LABEL_KEY, Some(label))])
}

fn check_lengths(gold: &Sentence, secondary: &Sentence) -> Result<(), Error> {
    let gold_len = gold.tokens().count();
    let secondary_len = secondary.tokens().count();

    if gold_len != secondary_len {
        return Err(Error::LengthMismatch {
            gold: gold_len,
            secondary: secondary_len,
        });
    }

    Ok(())
}

/// Copy the basic tree of `secondary` to the misc column of `gold`.
///
/// The misc column of every gold token is replaced by `Head=<id>|Label=<rel>`
/// of the aligned secondary token. Absent heads and relations are written
/// as `_`. No token is modified when the sentences have different lengths.
pub fn copy_basic_to_misc(gold: &mut Sentence, secondary: &Sentence) -> Result<(), Error> {
    check_lengths(gold, secondary)?;

    let annotations = (1..secondary.len())
        .filter(|&idx| secondary[idx].is_token())
        .map(|idx| basic_misc(secondary, idx))
        .collect::<Vec<_>>();

    for (token, misc) in gold.tokens_mut().zip(annotations) {
        token.set_misc(misc);
    }

    Ok(())
}

/// Copy the basic trees of a secondary corpus to the misc columns of a
/// gold corpus.
///
/// The corpora are checked before any sentence is modified.
pub fn copy_corpus_basic_to_misc(
    gold: &mut [Sentence],
    secondary: &[Sentence],
) -> Result<(), Error> {
    if gold.len() != secondary.len() {
        return Err(Error::SentenceCountMismatch {
            gold: gold.len(),
            secondary: secondary.len(),
        });
    }

    for (gold_sentence, secondary_sentence) in gold.iter().zip(secondary) {
        check_lengths(gold_sentence, secondary_sentence)?;
    }

    for (gold_sentence, secondary_sentence) in gold.iter_mut().zip(secondary) {
        copy_basic_to_misc(gold_sentence, secondary_sentence)?;
    }

    info!("Copied basic trees of {} sentences to misc", gold.len());

    Ok(())
}

/// Add the basic relation as the enhanced relation of tokens without
/// enhanced dependencies.
///
/// Returns the number of tokens that were given an enhanced relation.
pub fn copy_basic_to_enhanced(sentence: &mut Sentence) -> usize {
    let mut copies = Vec::new();

    for idx in 1..sentence.len() {
        let token = match sentence[idx].token() {
            Some(token) => token,
            None => continue,
        };

        if !token.deps().is_empty() {
            continue;
        }

        if let Some(triple) = sentence.dep_graph().head(idx) {
            if let Some(relation) = triple.relation() {
                copies.push((idx, EnhancedDep::new(sentence[triple.head()].id(), relation)));
            }
        }
    }

    let n_copies = copies.len();
    for (idx, dep) in copies {
        if let Some(token) = sentence[idx].token_mut() {
            token.set_deps(EnhancedDeps::from(vec![dep]));
        }
    }

    n_copies
}
