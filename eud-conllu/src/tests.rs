use std::fs::File;
use std::io::BufReader;
use std::iter::FromIterator;

use lazy_static::lazy_static;

use eudgraph::graph::{Comment, DepTriple, Sentence};
use eudgraph::token::{Features, Misc, TokenBuilder};

use crate::io::Reader;

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
        for (head, rel, dependent) in vec![(2, "det", 1), (0, "root", 2), (2, "punct", 3)] {
            s1.dep_graph_mut()
                .add_deprel(DepTriple::new(head, Some(rel), dependent))
                .unwrap();
        }
        sentences.push(s1);

        let mut s2 = Sentence::new();
        s2.comments_mut().push(Comment::AttrVal {
            attr: "sent_id".to_string(),
            val: "2".to_string(),
        });
        s2.comments_mut()
            .push(Comment::String("some random comment".to_string()));
        s2.push(
            TokenBuilder::new(1, "He")
                .lemma("he")
                .upos("PRON")
                .xpos("PRP")
                .features(Features::from_iter(vec![("Case", "Nom")]))
                .deps("2:nsubj".parse().unwrap())
                .into(),
        )
        .unwrap();
        for (id, form, lemma, upos, xpos, deps) in vec![
            (2, "walked", "walk", "VERB", "VBD", "0:root"),
            (3, "into", "into", "ADP", "IN", "5:case"),
            (4, "the", "the", "DET", "DT", "5:det"),
        ] {
            s2.push(
                TokenBuilder::new(id, form)
                    .lemma(lemma)
                    .upos(upos)
                    .xpos(xpos)
                    .deps(deps.parse().unwrap())
                    .into(),
            )
            .unwrap();
        }
        s2.push(
            TokenBuilder::new(5, "room")
                .lemma("room")
                .upos("NOUN")
                .xpos("NN")
                .deps("2:obl:into".parse().unwrap())
                .misc(Misc::from_iter(vec![("SpaceAfter", Some("No"))]))
                .into(),
        )
        .unwrap();
        s2.push(
            TokenBuilder::new(6, ".")
                .lemma(".")
                .upos("PUNCT")
                .xpos(".")
                .deps("2:punct".parse().unwrap())
                .into(),
        )
        .unwrap();
        for (head, rel, dependent) in vec![
            (2, "nsubj", 1),
            (0, "root", 2),
            (5, "case", 3),
            (5, "det", 4),
            (2, "obl", 5),
            (2, "punct", 6),
        ] {
            s2.dep_graph_mut()
                .add_deprel(DepTriple::new(head, Some(rel), dependent))
                .unwrap();
        }
        sentences.push(s2);

        sentences
    };
}

pub fn read_sentences(filename: &str) -> Vec<Sentence> {
    Reader::new(BufReader::new(File::open(filename).unwrap()))
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap()
}
