use super::morphy::{self, Exceptions};
use super::{parse_sense_name, LexicalKnowledgeBase, SenseId, WordClass};
use crate::error::RecipeError;
use log::{debug, info};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;
use wordnet_types::{Pos, SynsetId};

/// Knowledge base over a WordNet 3.x `dict/` directory.
///
/// Records are loaded by `wordnet_db`; only noun and verb senses are
/// queried, and closures follow hypernym (`@`) and instance-hypernym
/// (`@i`) pointers.
pub struct WordNet {
    db: wordnet_db::WordNet,
    exceptions: HashMap<WordClass, Exceptions>,
}

impl WordNet {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, RecipeError> {
        let dir = dir.as_ref();
        let db = wordnet_db::WordNet::load(dir)
            .map_err(|e| RecipeError::InvalidLexicon(format!("{e:#}")))?;

        let mut exceptions = HashMap::new();
        for class in [WordClass::Noun, WordClass::Verb] {
            exceptions.insert(class, load_exceptions(dir, class)?);
        }

        info!(
            "Loaded WordNet from {}: {} lemmas, {} synsets",
            dir.display(),
            db.lemma_count(),
            db.synset_count()
        );
        Ok(WordNet { db, exceptions })
    }

    fn lemma_senses(&self, class: WordClass, lemma: &str) -> &[SynsetId] {
        self.db.synsets_for_lemma(pos_of(class), lemma)
    }
}

impl LexicalKnowledgeBase for WordNet {
    fn senses_for(&self, word: &str, class: WordClass) -> Vec<SenseId> {
        let forms = morphy::base_forms(word, class, self.exceptions.get(&class), |w| {
            self.db.lemma_exists(pos_of(class), w)
        });

        let mut senses: Vec<SenseId> = Vec::new();
        for form in forms {
            for id in self.lemma_senses(class, &form) {
                let Some(sense) = sense_id(*id) else { continue };
                if !senses.contains(&sense) {
                    senses.push(sense);
                }
            }
        }
        senses
    }

    fn hypernym_closure(&self, sense: &SenseId) -> HashSet<SenseId> {
        let mut closure = HashSet::from([sense.clone()]);
        let Some(start) = synset_id(sense) else {
            return closure;
        };

        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let Some(synset) = self.db.get_synset(current) else { continue };
            for pointer in &synset.pointers {
                if pointer.symbol != "@" && pointer.symbol != "@i" {
                    continue;
                }
                let Some(parent) = sense_id(pointer.target) else { continue };
                if closure.insert(parent) {
                    queue.push_back(pointer.target);
                }
            }
        }
        closure
    }

    fn resolve(&self, name: &str) -> Option<SenseId> {
        let (lemma, class, number) = parse_sense_name(name)?;
        let id = self.lemma_senses(class, lemma).get(number.checked_sub(1)?)?;
        sense_id(*id)
    }
}

/// Irregular forms from `{noun,verb}.exc`, which are optional
fn load_exceptions(dir: &Path, class: WordClass) -> Result<Exceptions, RecipeError> {
    let path = dir.join(format!("{}.exc", file_suffix(class)));
    let mut exceptions = Exceptions::new();
    if !path.exists() {
        debug!("No exception list at {}", path.display());
        return Ok(exceptions);
    }

    for line in fs::read_to_string(&path)?.lines() {
        let mut words = line.split_whitespace();
        if let Some(inflected) = words.next() {
            let bases: Vec<String> = words.map(str::to_string).collect();
            if !bases.is_empty() {
                exceptions.insert(inflected.to_string(), bases);
            }
        }
    }
    Ok(exceptions)
}

fn file_suffix(class: WordClass) -> &'static str {
    match class {
        WordClass::Noun => "noun",
        WordClass::Verb => "verb",
    }
}

fn pos_of(class: WordClass) -> Pos {
    match class {
        WordClass::Noun => Pos::Noun,
        WordClass::Verb => Pos::Verb,
    }
}

fn class_of(pos: Pos) -> Option<WordClass> {
    match pos {
        Pos::Noun => Some(WordClass::Noun),
        Pos::Verb => Some(WordClass::Verb),
        _ => None,
    }
}

/// `n:07802417` for noun synset 7802417; adjective and adverb synsets have no id
fn sense_id(id: SynsetId) -> Option<SenseId> {
    let class = class_of(id.pos)?;
    Some(SenseId(format!("{}:{:08}", class.tag(), id.offset)))
}

fn synset_id(sense: &SenseId) -> Option<SynsetId> {
    let (tag, offset) = sense.0.split_once(':')?;
    let class = match tag {
        "n" => WordClass::Noun,
        "v" => WordClass::Verb,
        _ => return None,
    };
    Some(SynsetId {
        pos: pos_of(class),
        offset: offset.parse().ok()?,
    })
}
