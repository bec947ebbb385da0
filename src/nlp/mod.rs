//! Part-of-speech tagging, dependency heads, sentences and noun chunks.
//!
//! The parser only depends on the [`Tagger`] trait. [`RuleTagger`] runs an
//! nlprule English tokenizer; [`LexiconTagger`] is the offline fallback built
//! from word lists and used when no tokenizer binary is configured.

mod dependencies;
mod lexicon_tagger;
mod rule_tagger;

pub use lexicon_tagger::LexiconTagger;
pub use rule_tagger::RuleTagger;

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Verb,
    X,
}

impl PartOfSpeech {
    /// Nouns and proper nouns
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::Propn)
    }
}

/// Dependency relation of a token to its head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dependency {
    Root,
    Amod,
    Advmod,
    Aux,
    Cc,
    Compound,
    Conj,
    Det,
    Dobj,
    Nummod,
    Pobj,
    Prep,
    Punct,
    Dep,
}

/// Position of a token inside a noun phrase, for taggers that chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chunk {
    /// First token of a noun phrase
    Begin,
    /// Any later token of the same phrase
    Inside,
}

/// One tagged token of the input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text exactly as it appears in the input
    pub text: String,
    /// Byte offset of the token in the input
    pub offset: usize,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub dep: Dependency,
    /// Index of the syntactic head; a root token points at itself
    pub head: usize,
    /// Noun phrase membership, when the tagger chunks
    pub chunk: Option<Chunk>,
}

impl Token {
    /// Byte offset just past the token
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is_root(&self) -> bool {
        self.dep == Dependency::Root
    }
}

/// An NLP engine able to tag and segment English text
pub trait Tagger: Send + Sync {
    /// Tokenize `text` and tag every token with its POS, lemma and dependency head.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Sentence spans as token index ranges
    fn sentences(&self, tokens: &[Token]) -> Vec<Range<usize>>;

    /// Noun chunks as byte ranges into the text the tokens came from
    fn noun_chunks(&self, tokens: &[Token]) -> Vec<Range<usize>>;
}
