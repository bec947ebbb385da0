use super::morphy;
use super::{LexicalKnowledgeBase, SenseId, WordClass};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Semantic categories a noun can fall into. A word may be in several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NounCategory {
    Food,
    Measure,
    Tool,
    Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerbCategory {
    PrimaryMethod,
    Other,
}

const ANCHORS: &[(NounCategory, &[&str])] = &[
    (
        NounCategory::Tool,
        &["kitchen_utensil.n.01", "kitchen_appliance.n.01", "container.n.01"],
    ),
    (
        NounCategory::Measure,
        &["measure.n.02", "container.n.01", "clove.n.03", "branchlet.n.01"],
    ),
    (
        NounCategory::Food,
        &["food.n.01", "food.n.02", "leaven.n.01", "plant_organ.n.01", "powder.n.01"],
    ),
    (
        NounCategory::Temperature,
        &["temperature.n.01", "fire.n.03", "temperature_unit.n.01"],
    ),
];

/// Words counted as measures whenever they have a noun sense at all
const MEASURE_WORDS: &[&str] = &["stalk", "stick"];

const COOKING_ANCHOR: &str = "cook.v.03";

/// Answers which categories a noun belongs to and whether a verb is a
/// cooking method, by testing hypernym closures against anchor senses.
pub struct LexicalClassifier {
    knowledge: Box<dyn LexicalKnowledgeBase>,
    anchors: Vec<(NounCategory, HashSet<SenseId>)>,
    cooking: Option<SenseId>,
}

impl fmt::Debug for LexicalClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexicalClassifier")
            .field("anchors", &self.anchors)
            .field("cooking", &self.cooking)
            .finish_non_exhaustive()
    }
}

impl LexicalClassifier {
    pub fn new(knowledge: Box<dyn LexicalKnowledgeBase>) -> Self {
        let resolve = |name: &str| {
            let sense = knowledge.resolve(name);
            if sense.is_none() {
                warn!("Anchor sense {name} is missing from the lexical knowledge base");
            }
            sense
        };

        let anchors = ANCHORS
            .iter()
            .map(|(category, names)| {
                let senses = names.iter().filter_map(|name| resolve(name)).collect();
                (*category, senses)
            })
            .collect();
        let cooking = resolve(COOKING_ANCHOR);

        Self {
            knowledge,
            anchors,
            cooking,
        }
    }

    /// Every category any noun sense of `word` falls under. Unknown words get
    /// an empty set.
    pub fn classify_noun(&self, word: &str) -> HashSet<NounCategory> {
        let mut categories = HashSet::new();
        let senses = self.knowledge.senses_for(word, WordClass::Noun);
        if senses.is_empty() {
            return categories;
        }

        let normalized = morphy::normalize(word);
        let singular = normalized.strip_suffix('s').unwrap_or(normalized.as_str());
        if MEASURE_WORDS.contains(&normalized.as_str()) || MEASURE_WORDS.contains(&singular) {
            categories.insert(NounCategory::Measure);
        }

        for sense in &senses {
            let closure = self.knowledge.hypernym_closure(sense);
            for (category, anchors) in &self.anchors {
                if !anchors.is_disjoint(&closure) {
                    categories.insert(*category);
                }
            }
        }
        categories
    }

    pub fn is_food(&self, word: &str) -> bool {
        self.classify_noun(word).contains(&NounCategory::Food)
    }

    pub fn is_measure(&self, word: &str) -> bool {
        self.classify_noun(word).contains(&NounCategory::Measure)
    }

    /// Whether `lemma` names a way of cooking. Plain "cook" is too generic
    /// to count.
    pub fn classify_verb(&self, lemma: &str) -> VerbCategory {
        if lemma.eq_ignore_ascii_case("cook") {
            return VerbCategory::Other;
        }
        let Some(cooking) = &self.cooking else {
            return VerbCategory::Other;
        };

        let is_method = self
            .knowledge
            .senses_for(lemma, WordClass::Verb)
            .iter()
            .any(|sense| self.knowledge.hypernym_closure(sense).contains(cooking));
        if is_method {
            VerbCategory::PrimaryMethod
        } else {
            VerbCategory::Other
        }
    }
}
