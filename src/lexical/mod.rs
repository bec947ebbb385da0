//! Lexical knowledge: word senses and their hypernym ("is-a") closures.

mod bundled;
mod classifier;
pub mod morphy;
mod wordnet;

pub use bundled::BundledKnowledgeBase;
pub use classifier::{LexicalClassifier, NounCategory, VerbCategory};
pub use wordnet::WordNet;

use std::collections::HashSet;
use std::fmt;

/// Word classes the knowledge base is queried with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Noun,
    Verb,
}

impl WordClass {
    /// The single-letter tag used in sense names such as `food.n.02`
    pub fn tag(self) -> char {
        match self {
            WordClass::Noun => 'n',
            WordClass::Verb => 'v',
        }
    }
}

/// Opaque identifier of one word sense
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SenseId(pub String);

impl fmt::Display for SenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A queryable synonym/hypernym graph
pub trait LexicalKnowledgeBase: Send + Sync {
    /// Every sense of `word` in the given word class, most common first.
    /// Unknown words have no senses.
    fn senses_for(&self, word: &str, class: WordClass) -> Vec<SenseId>;

    /// All senses reachable from `sense` through hypernym links, including
    /// `sense` itself.
    fn hypernym_closure(&self, sense: &SenseId) -> HashSet<SenseId>;

    /// Look up a sense by its conventional name, e.g. `kitchen_utensil.n.01`.
    fn resolve(&self, name: &str) -> Option<SenseId>;
}

/// Split `lemma.n.02` into its lemma, word class and 1-based sense number.
pub(crate) fn parse_sense_name(name: &str) -> Option<(&str, WordClass, usize)> {
    let mut parts = name.rsplitn(3, '.');
    let number = parts.next()?.parse().ok()?;
    let class = match parts.next()? {
        "n" => WordClass::Noun,
        "v" => WordClass::Verb,
        _ => return None,
    };
    let lemma = parts.next()?;
    Some((lemma, class, number))
}
