use super::dependencies::{assign_dependencies, sentence_ranges};
use super::lexicon_tagger::tag_word;
use super::{Chunk, Dependency, PartOfSpeech, Tagger, Token};
use crate::error::RecipeError;
use log::info;
use nlprule::Tokenizer;
use std::ops::Range;
use std::path::Path;

/// Tagger backed by an nlprule English tokenizer binary (`en_tokenizer.bin`).
///
/// nlprule supplies tokens, candidate POS tags with lemmas, and noun-phrase
/// chunks. Where a word has several candidate tags the word-list tagger's
/// guess picks between them, and words nlprule cannot tag fall back to it
/// entirely. Dependency heads come from the shared rule-based attachment.
pub struct RuleTagger {
    tokenizer: Tokenizer,
}

impl RuleTagger {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::new(path)
            .map_err(|e| RecipeError::TaggerError(format!("{}: {e}", path.display())))?;
        info!("Loaded nlprule tokenizer from {}", path.display());
        Ok(Self { tokenizer })
    }
}

impl Tagger for RuleTagger {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut sentences = Vec::new();
        let mut cursor = 0;

        for sentence in self.tokenizer.pipe(text) {
            let start = tokens.len();
            let words: Vec<_> = sentence
                .tokens()
                .iter()
                .filter(|token| !token.word().text().as_str().trim().is_empty())
                .collect();

            for (k, token) in words.iter().enumerate() {
                let word = token.word().text().as_str();
                let Some(offset) = locate(text, word, cursor) else {
                    continue;
                };
                cursor = offset + word.len();

                let prev = if tokens.len() == start {
                    None
                } else {
                    tokens.last().map(|t| t.pos)
                };
                let next = words.get(k + 1).map(|t| t.word().text().as_str());
                let (guess, guess_lemma) = tag_word(word, tokens.len() == start, prev, next);

                let candidates: Vec<(PartOfSpeech, String)> = token
                    .word()
                    .tags()
                    .iter()
                    .filter_map(|data| {
                        let pos = pos_from_tag(data.pos().as_str())?;
                        let lemma = data.lemma().as_str();
                        let lemma = if lemma.is_empty() {
                            word.to_lowercase()
                        } else {
                            lemma.to_lowercase()
                        };
                        Some((pos, lemma))
                    })
                    .collect();
                let (pos, lemma) = candidates
                    .iter()
                    .find(|(pos, _)| *pos == guess)
                    .or_else(|| candidates.first())
                    .cloned()
                    .unwrap_or((guess, guess_lemma));

                let index = tokens.len();
                tokens.push(Token {
                    text: word.to_string(),
                    offset,
                    lemma,
                    pos,
                    dep: Dependency::Dep,
                    head: index,
                    chunk: chunk_from_tags(token.chunks()),
                });
            }
            if tokens.len() > start {
                sentences.push(start..tokens.len());
            }
        }

        for range in sentences {
            assign_dependencies(&mut tokens, range);
        }
        tokens
    }

    fn sentences(&self, tokens: &[Token]) -> Vec<Range<usize>> {
        sentence_ranges(tokens.iter().map(|t| t.text.as_str()))
    }

    fn noun_chunks(&self, tokens: &[Token]) -> Vec<Range<usize>> {
        chunk_ranges(tokens)
    }
}

/// Byte offset of `word` in `text` at or after `from`
fn locate(text: &str, word: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(word).map(|i| from + i)
}

/// Map a Penn Treebank style tag (`NN:UN`, `VBD`, `PCT`) to a universal tag.
/// Sentence markers map to nothing.
fn pos_from_tag(tag: &str) -> Option<PartOfSpeech> {
    use PartOfSpeech::*;

    let base = match tag.split_once(':') {
        Some((base, _)) if !base.is_empty() => base,
        _ => tag,
    };
    let pos = match base {
        "NN" | "NNS" => Noun,
        "NNP" | "NNPS" => Propn,
        "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => Verb,
        "JJ" | "JJR" | "JJS" => Adj,
        "RB" | "RBR" | "RBS" | "WRB" => Adv,
        "IN" => Adp,
        "TO" | "RP" | "POS" => Part,
        "DT" | "PDT" | "WDT" => Det,
        "CD" => Num,
        "CC" => Cconj,
        "PRP" | "PRP$" | "WP" | "WP$" | "EX" => Pron,
        "MD" => Aux,
        "PCT" | "." | "," | ":" | "``" | "''" | "(" | ")" | "-LRB-" | "-RRB-" | "HYPH" => Punct,
        "UH" | "FW" | "SYM" | "LS" => X,
        _ => return None,
    };
    Some(pos)
}

/// nlprule chunk labels look like `B-NP-singular`, `I-NP-plural`, `E-NP-singular`
fn chunk_from_tags<S: AsRef<str>>(tags: &[S]) -> Option<Chunk> {
    let mut chunk = None;
    for tag in tags {
        let tag = tag.as_ref();
        if tag.starts_with("B-NP") {
            return Some(Chunk::Begin);
        }
        if tag.starts_with("I-NP") || tag.starts_with("E-NP") {
            chunk = Some(Chunk::Inside);
        }
    }
    chunk
}

/// Byte ranges of chunked noun phrases, each ending at its last nominal token
fn chunk_ranges(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut groups: Vec<Range<usize>> = Vec::new();
    let mut open: Option<usize> = None;
    for (i, token) in tokens.iter().enumerate() {
        match (token.chunk, open) {
            (Some(Chunk::Begin), Some(start)) => {
                groups.push(start..i);
                open = Some(i);
            }
            (Some(Chunk::Begin), None) | (Some(Chunk::Inside), None) => open = Some(i),
            (None, Some(start)) => {
                groups.push(start..i);
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        groups.push(start..tokens.len());
    }

    groups
        .into_iter()
        .filter_map(|group| {
            let last = group.clone().rev().find(|&i| tokens[i].pos.is_nominal())?;
            Some(tokens[group.start].offset..tokens[last].end())
        })
        .collect()
}
