use num_rational::Rational64;
use recipe_transform::lexical::{LexicalKnowledgeBase, SenseId, WordClass};
use recipe_transform::model::Recipe;
use recipe_transform::nlp::LexiconTagger;
use recipe_transform::quantity::{format_quantity, parse_quantity};
use recipe_transform::RecipeParser;
use std::collections::{HashMap, HashSet};

/// A handful of senses wired straight to the classifier's anchors
struct TinyKnowledgeBase {
    senses: Vec<(&'static str, WordClass, &'static str)>,
    parents: HashMap<&'static str, &'static str>,
}

impl TinyKnowledgeBase {
    fn new() -> Self {
        Self {
            senses: vec![
                ("quinoa", WordClass::Noun, "quinoa.n.01"),
                ("cup", WordClass::Noun, "cup.n.01"),
                ("pot", WordClass::Noun, "pot.n.01"),
                ("steam", WordClass::Verb, "steam.v.01"),
            ],
            parents: HashMap::from([
                ("quinoa.n.01", "food.n.02"),
                ("cup.n.01", "measure.n.02"),
                ("pot.n.01", "kitchen_utensil.n.01"),
                ("steam.v.01", "cook.v.03"),
            ]),
        }
    }
}

impl LexicalKnowledgeBase for TinyKnowledgeBase {
    fn senses_for(&self, word: &str, class: WordClass) -> Vec<SenseId> {
        let lower = word.to_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(lower.as_str());
        self.senses
            .iter()
            .filter(|&&(lemma, lemma_class, _)| {
                lemma_class == class && (lemma == lower || lemma == singular)
            })
            .map(|&(_, _, sense)| SenseId(sense.to_string()))
            .collect()
    }

    fn hypernym_closure(&self, sense: &SenseId) -> HashSet<SenseId> {
        let mut closure = HashSet::from([sense.clone()]);
        let mut current = sense.0.as_str();
        while let Some(&parent) = self.parents.get(current) {
            closure.insert(SenseId(parent.to_string()));
            current = parent;
        }
        closure
    }

    fn resolve(&self, name: &str) -> Option<SenseId> {
        let known = self.parents.contains_key(name) || self.parents.values().any(|&p| p == name);
        known.then(|| SenseId(name.to_string()))
    }
}

#[test]
fn test_olive_oil_line() {
    let parser = RecipeParser::bundled().unwrap();
    let ingredient = parser.parse_ingredient("2 1/2 tbsp. olive oil").unwrap();
    assert_eq!(ingredient.quantity, Some(Rational64::new(5, 2)));
    assert_eq!(ingredient.unit.as_deref(), Some("tbsp."));
    assert_eq!(ingredient.name, "olive oil");
    assert_eq!(ingredient.standardized_unit().as_deref(), Some("tablespoon"));
}

#[test]
fn test_lines_without_food() {
    let parser = RecipeParser::bundled().unwrap();
    assert!(parser.parse_ingredient("").is_none());
    assert!(parser.parse_ingredient("a clean bowl").is_none());
}

#[test]
fn test_quantity_round_trip() {
    for n in [0, 1, 7, 12, 250] {
        assert_eq!(format_quantity(&parse_quantity(&n.to_string())), n.to_string());
    }
    assert_eq!(format_quantity(&parse_quantity("1 1/2")), "1 1/2");
}

#[test]
fn test_injected_knowledge_base() {
    let parser = RecipeParser::new(
        Box::new(LexiconTagger::new()),
        Box::new(TinyKnowledgeBase::new()),
    );

    let ingredient = parser.parse_ingredient("2 cups quinoa").unwrap();
    assert_eq!(ingredient.quantity, Some(Rational64::from_integer(2)));
    assert_eq!(ingredient.unit.as_deref(), Some("cups"));
    assert_eq!(ingredient.name, "quinoa");

    // flour is unknown to this knowledge base
    assert!(parser.parse_ingredient("2 cups flour").is_none());

    let recipe = parser.parse_ingredients(Recipe::new("Quinoa"), &["2 cups quinoa"]);
    let recipe = parser.parse_steps(recipe, &["Steam the quinoa in a pot."]);
    assert_eq!(recipe.steps[0].ingredients, vec![0]);
    assert_eq!(recipe.methods.iter().collect::<Vec<_>>(), vec!["steam"]);
    assert_eq!(recipe.tools.iter().collect::<Vec<_>>(), vec!["pot"]);
    assert_eq!(recipe.usages(0).collect::<Vec<_>>(), vec![(0, 0)]);
}
