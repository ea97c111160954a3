//! CoNLL-U format reader and writers.

use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use eudgraph::graph::{Comment, DepTriple, MultiwordToken, Sentence};
use eudgraph::label::EnhancedDeps;
use eudgraph::token::{Features, Misc, Token, TokenId, EMPTY_TOKEN};
use eudgraph::GraphError;

use crate::error::{Error, ParseError};
use crate::wrap::{ConlluFeatures, ConlluMisc, ConlluSentence};

/// Number of columns of a CoNLL-U token line.
pub const N_COLUMNS: usize = 10;

/// A trait for objects that can read CoNLL-U `Sentence`s
pub trait ReadSentence {
    /// Read a `Sentence` from this object.
    ///
    /// # Errors
    ///
    /// A call to `read_sentence` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_sentence(&mut self) -> Result<Option<Sentence>, Error>;

    /// Get an iterator over the sentences in this reader.
    fn sentences(self) -> Sentences<Self>
    where
        Self: Sized,
    {
        Sentences { reader: self }
    }
}

/// A reader for CoNLL-U sentences.
pub struct Reader<R> {
    read: R,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader { read }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<Sentence, Error>;
    type IntoIter = Sentences<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences()
    }
}

impl<R: io::BufRead> ReadSentence for Reader<R> {
    fn read_sentence(&mut self) -> Result<Option<Sentence>, Error> {
        let mut line = String::new();
        let mut sentence = Sentence::new();
        let mut edges = Vec::new();

        loop {
            line.clear();

            // End of reader.
            if self.read.read_line(&mut line)? == 0 {
                if sentence.len() == 1 {
                    if sentence.comments().is_empty() {
                        return Ok(None);
                    }

                    return Err(ParseError::CommentsWithoutTokens {
                        comments: sentence.comments().iter().map(ToString::to_string).collect(),
                    }
                    .into());
                }

                finish_sentence(&mut sentence, edges)?;

                return Ok(Some(sentence));
            }

            let row = line.trim_end_matches(&['\n', '\r'][..]);

            // The blank line is a sentence separator. We want to be robust
            // in the case a CoNLL file is malformed and has two newlines as
            // a separator.
            if row.trim().is_empty() {
                if sentence.len() == 1 {
                    continue;
                }

                finish_sentence(&mut sentence, edges)?;

                return Ok(Some(sentence));
            }

            if let Some(stripped) = row.strip_prefix('#') {
                sentence.comments_mut().push(parse_comment(stripped));
                continue;
            }

            let fields = row.split('\t').collect::<Vec<_>>();
            if fields.len() != N_COLUMNS {
                return Err(ParseError::ColumnCount {
                    expected: N_COLUMNS,
                    found: fields.len(),
                    line: row.to_owned(),
                }
                .into());
            }

            if let Some((first, last)) = parse_range_field(fields[0])? {
                let mut multiword = MultiwordToken::new(first, last, fields[1]);
                multiword.set_misc(parse_misc_field(fields[9]));
                sentence.multiwords_mut().push(multiword);
                continue;
            }

            let mut token = Token::new(parse_identifier_field(fields[0])?, fields[1]);
            token.set_lemma(parse_string_field(fields[2]));
            token.set_upos(parse_string_field(fields[3]));
            token.set_xpos(parse_string_field(fields[4]));
            token.set_features(
                parse_string_field(fields[5])
                    .map(|s| ConlluFeatures::try_from(s.as_str()))
                    .transpose()?
                    .map(ConlluFeatures::into_owned)
                    .unwrap_or_else(Features::new),
            );

            // Head relation. Heads are resolved when the sentence is
            // complete, since a head can follow its dependent.
            if let Some(head) = parse_head_field(fields[6])? {
                let head_rel = parse_string_field(fields[7]);
                edges.push((head, head_rel, sentence.len()));
            } else if parse_string_field(fields[7]).is_some() {
                return Err(ParseError::RelationWithoutHead {
                    token: row.to_owned(),
                }
                .into());
            }

            token.set_deps(fields[8].parse::<EnhancedDeps>().map_err(ParseError::from)?);
            token.set_misc(parse_misc_field(fields[9]));

            sentence.push(token).map_err(ParseError::from)?;
        }
    }
}

/// Add the basic relations and check that all enhanced heads exist.
fn finish_sentence(
    sentence: &mut Sentence,
    edges: Vec<(TokenId, Option<String>, usize)>,
) -> Result<(), ParseError> {
    for (head, head_rel, dependent) in edges {
        let head_idx = sentence
            .index_of(head)
            .ok_or_else(|| GraphError::UnresolvedHead {
                head,
                dependent: sentence[dependent].id(),
            })?;
        sentence
            .dep_graph_mut()
            .add_deprel(DepTriple::new(head_idx, head_rel, dependent))?;
    }

    sentence.enhanced_graph()?;

    Ok(())
}

/// An iterator over the sentences in a `Reader`.
pub struct Sentences<R>
where
    R: ReadSentence,
{
    reader: R,
}

impl<R> Iterator for Sentences<R>
where
    R: ReadSentence,
{
    type Item = Result<Sentence, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_sentence() {
            Ok(None) => None,
            Ok(Some(sent)) => Some(Ok(sent)),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Read all sentences from a CoNLL-U file.
///
/// The file is closed when this function returns, also on error.
pub fn read_sentences_from_path(path: impl AsRef<Path>) -> Result<Vec<Sentence>, Error> {
    let reader = Reader::new(BufReader::new(File::open(path)?));
    reader.sentences().collect()
}

/// Write sentences to a CoNLL-U file, replacing its contents.
pub fn write_sentences_to_path<'a>(
    path: impl AsRef<Path>,
    sentences: impl IntoIterator<Item = &'a Sentence>,
) -> Result<(), Error> {
    let mut writer = Writer::new(BufWriter::new(File::create(path)?));
    for sentence in sentences {
        writer.write_sentence(sentence)?;
    }

    writer.into_inner().flush()?;

    Ok(())
}

fn parse_comment(comment: &str) -> Comment {
    // Only comments that are written back identically become attribute-value
    // pairs, other comments are kept verbatim.
    if let Some(text) = comment.strip_prefix(' ') {
        if let Some(idx) = text.find(" = ") {
            return Comment::AttrVal {
                attr: text[..idx].to_string(),
                val: text[idx + 3..].to_string(),
            };
        }
    }

    Comment::String(comment.to_string())
}

fn parse_string_field(field: &str) -> Option<String> {
    if field == EMPTY_TOKEN {
        None
    } else {
        Some(field.to_string())
    }
}

fn parse_misc_field(field: &str) -> Misc {
    parse_string_field(field)
        .map(|s| ConlluMisc::from(s.as_str()))
        .map(ConlluMisc::into_owned)
        .unwrap_or_else(Misc::new)
}

fn parse_range_field(field: &str) -> Result<Option<(usize, usize)>, ParseError> {
    let idx = match field.find('-') {
        Some(idx) => idx,
        None => return Ok(None),
    };

    let parse = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| ParseError::ParseIdentifierField {
                value: field.to_owned(),
            })
    };

    Ok(Some((parse(&field[..idx])?, parse(&field[idx + 1..])?)))
}

fn parse_identifier_field(field: &str) -> Result<TokenId, ParseError> {
    field
        .parse::<TokenId>()
        .map_err(|_| ParseError::ParseIdentifierField {
            value: field.to_owned(),
        })
}

fn parse_head_field(field: &str) -> Result<Option<TokenId>, ParseError> {
    if field == EMPTY_TOKEN {
        return Ok(None);
    }

    field
        .parse::<TokenId>()
        .map(Some)
        .map_err(|_| ParseError::ParseHeadField {
            value: field.to_owned(),
        })
}

/// A trait for objects that can write CoNLL-U `Sentence`s.
pub trait WriteSentence {
    /// Write a sentence into this object.
    ///
    /// # Errors
    ///
    /// A call to `write_sentence` may generate an error to indicate that
    /// the operation could not be completed.
    fn write_sentence(&mut self, sentence: &Sentence) -> Result<(), Error>;
}

/// A writer for CoNLL-U sentences.
///
/// This writer will write sentences to the embedded writer in CoNLL-U
/// tabular format. Every sentence is terminated by a blank line.
pub struct Writer<W> {
    write: W,
}

impl<W: io::Write> Writer<W> {
    /// Construct a new writer from an object that implements the `io::Write`
    /// trait.
    pub fn new(write: W) -> Writer<W> {
        Writer { write }
    }

    /// Borrow the embedded writer. Getting the underlying writer is often
    /// useful when the writer writes to a memory object.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str;
    ///
    /// use eud_conllu::io::{Writer, WriteSentence};
    /// use eudgraph::graph::Sentence;
    /// use eudgraph::token::Token;
    ///
    /// let output = Vec::new();
    /// let mut writer = Writer::new(output);
    /// let mut sent = Sentence::new();
    /// sent.push(Token::new(1, "hello")).unwrap();
    /// sent.push(Token::new(2, "world")).unwrap();
    ///
    /// writer.write_sentence(&sent).unwrap();
    ///
    /// println!("Output:\n{}", str::from_utf8(writer.get_ref()).unwrap());
    /// ```
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Unwrap the embedded writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: io::Write> WriteSentence for Writer<W> {
    fn write_sentence(&mut self, sentence: &Sentence) -> Result<(), Error> {
        writeln!(self.write, "{}", ConlluSentence(sentence))?;

        Ok(())
    }
}
