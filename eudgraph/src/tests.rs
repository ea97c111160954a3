use std::iter::FromIterator;

use lazy_static::lazy_static;

use crate::graph::{Comment, DepTriple, Sentence};
use crate::token::{Features, Misc, TokenBuilder, TokenId};

lazy_static! {
    pub static ref TEST_SENTENCES: Vec<Sentence> = {
        let mut sentences = Vec::new();

        let mut s1 = Sentence::new();
        s1.comments_mut().push(Comment::AttrVal {
            attr: "sent_id".to_string(),
            val: "1".to_string(),
        });
        s1.push(
            TokenBuilder::new(1, "Die")
                .lemma("die")
                .upos("DET")
                .features(Features::from_iter(vec![
                    ("Case", "Nom"),
                    ("Gender", "Fem"),
                ]))
                .deps("2:det".parse().unwrap())
                .misc(Misc::from_iter(vec![("misc1", None), ("misc2", Some("value"))]))
                .into(),
        )
        .unwrap();
        s1.push(
            TokenBuilder::new(2, "Großaufnahme")
                .lemma("Großaufnahme")
                .upos("NOUN")
                .deps("0:root".parse().unwrap())
                .into(),
        )
        .unwrap();
        s1.push(
            TokenBuilder::new(3, ".")
                .lemma(".")
                .upos("PUNCT")
                .deps("2:punct".parse().unwrap())
                .into(),
        )
        .unwrap();
        s1.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("det"), 1))
            .unwrap();
        s1.dep_graph_mut()
            .add_deprel(DepTriple::new(0, Some("root"), 2))
            .unwrap();
        s1.dep_graph_mut()
            .add_deprel(DepTriple::new(2, Some("punct"), 3))
            .unwrap();
        sentences.push(s1);

        // Gapping: the elided verb of the second conjunct is an empty node.
        let mut s2 = Sentence::new();
        for (id, form, deps) in vec![
            (TokenId::Word(1), "Mary", "2:nsubj"),
            (TokenId::Word(2), "won", "0:root"),
            (TokenId::Word(3), "gold", "2:obj"),
            (TokenId::Word(4), "and", "5.1:cc"),
            (TokenId::Word(5), "Peter", "5.1:nsubj"),
            (TokenId::Empty(5, 1), "won", "2:conj:and"),
            (TokenId::Word(6), "bronze", "5.1:obj"),
        ] {
            s2.push(
                TokenBuilder::new(id, form)
                    .lemma(form.to_lowercase())
                    .deps(deps.parse().unwrap())
                    .into(),
            )
            .unwrap();
        }
        for (head, rel, dependent) in vec![
            (2, "nsubj", 1),
            (0, "root", 2),
            (2, "obj", 3),
            (5, "cc", 4),
            (2, "conj", 5),
            (5, "orphan", 7),
        ] {
            s2.dep_graph_mut()
                .add_deprel(DepTriple::new(head, Some(rel), dependent))
                .unwrap();
        }
        sentences.push(s2);

        sentences
    };
}
