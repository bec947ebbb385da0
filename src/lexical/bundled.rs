use super::morphy::{self, Exceptions};
use super::{LexicalKnowledgeBase, SenseId, WordClass};
use crate::error::RecipeError;
use log::debug;
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};

const KNOWLEDGE_BASE: &str = include_str!("../../data/knowledge_base.json");

#[derive(Debug, Deserialize)]
struct RawKnowledgeBase {
    hypernyms: HashMap<String, Vec<String>>,
    #[serde(default)]
    nouns: HashMap<String, Vec<String>>,
    #[serde(default)]
    verbs: HashMap<String, Vec<String>>,
    #[serde(default)]
    exceptions: RawExceptions,
}

#[derive(Debug, Default, Deserialize)]
struct RawExceptions {
    #[serde(default)]
    noun: Exceptions,
    #[serde(default)]
    verb: Exceptions,
}

/// Hypernym graph of kitchen vocabulary compiled into the binary.
///
/// Sense names follow WordNet conventions (`food.n.02`) so the same anchor
/// names work against either this graph or a full [`super::WordNet`].
#[derive(Debug)]
pub struct BundledKnowledgeBase {
    hypernyms: HashMap<String, Vec<String>>,
    nouns: HashMap<String, Vec<String>>,
    verbs: HashMap<String, Vec<String>>,
    noun_exceptions: Exceptions,
    verb_exceptions: Exceptions,
}

impl BundledKnowledgeBase {
    /// Load the graph shipped with the crate
    pub fn load() -> Result<Self, RecipeError> {
        Self::from_json(KNOWLEDGE_BASE)
    }

    /// Build a knowledge base from JSON with `hypernyms`, `nouns`, `verbs`
    /// and optional `exceptions` tables.
    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        let raw: RawKnowledgeBase = serde_json::from_str(json)?;

        let referenced = raw
            .nouns
            .values()
            .chain(raw.verbs.values())
            .chain(raw.hypernyms.values())
            .flatten();
        for sense in referenced {
            if !raw.hypernyms.contains_key(sense) {
                return Err(RecipeError::InvalidLexicon(format!(
                    "sense {sense} is referenced but not defined"
                )));
            }
        }

        debug!(
            "Loaded bundled lexicon: {} senses, {} nouns, {} verbs",
            raw.hypernyms.len(),
            raw.nouns.len(),
            raw.verbs.len()
        );
        Ok(Self {
            hypernyms: raw.hypernyms,
            nouns: raw.nouns,
            verbs: raw.verbs,
            noun_exceptions: raw.exceptions.noun,
            verb_exceptions: raw.exceptions.verb,
        })
    }
}

impl LexicalKnowledgeBase for BundledKnowledgeBase {
    fn senses_for(&self, word: &str, class: WordClass) -> Vec<SenseId> {
        let (words, exceptions) = match class {
            WordClass::Noun => (&self.nouns, &self.noun_exceptions),
            WordClass::Verb => (&self.verbs, &self.verb_exceptions),
        };

        let mut senses: Vec<SenseId> = Vec::new();
        let forms = morphy::base_forms(word, class, Some(exceptions), |w| words.contains_key(w));
        for sense in forms.iter().filter_map(|form| words.get(form)).flatten() {
            let sense = SenseId(sense.clone());
            if !senses.contains(&sense) {
                senses.push(sense);
            }
        }
        senses
    }

    fn hypernym_closure(&self, sense: &SenseId) -> HashSet<SenseId> {
        let mut closure = HashSet::from([sense.clone()]);
        let mut queue = VecDeque::from([sense.0.as_str()]);
        while let Some(current) = queue.pop_front() {
            for parent in self.hypernyms.get(current).into_iter().flatten() {
                if closure.insert(SenseId(parent.clone())) {
                    queue.push_back(parent);
                }
            }
        }
        closure
    }

    fn resolve(&self, name: &str) -> Option<SenseId> {
        self.hypernyms
            .contains_key(name)
            .then(|| SenseId(name.to_string()))
    }
}
