use super::{find_best_ingredient, RecipeParser};
use crate::lexical::VerbCategory;
use crate::model::{Recipe, Step};
use crate::nlp::PartOfSpeech;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Kitchen tools looked for in step text
pub const COMMON_TOOLS: &[&str] = &[
    "pan",
    "saucepan",
    "skillet",
    "grater",
    "whisk",
    "knife",
    "spatula",
    "bowl",
    "oven",
    "mixer",
    "peeler",
    "measuring cup",
    "blender",
    "microwave",
    "cutting board",
    "tongs",
    "pressure cooker",
    "baking sheet",
    "baking dish",
    "baking tray",
    "pot",
    "wok",
];

static LEADING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A(?:a|an|the)\b\s*").expect("valid regex"));

impl RecipeParser {
    /// Append a step per instruction, collecting methods and tools and
    /// linking noun phrases to the recipe's ingredients.
    pub fn parse_steps<S: AsRef<str>>(&self, mut recipe: Recipe, texts: &[S]) -> Recipe {
        for text in texts {
            let step = self.parse_step(&mut recipe, text.as_ref());
            recipe.steps.push(step);
        }
        recipe
    }

    /// Analyze one instruction that will become step number
    /// `recipe.steps.len()`.
    fn parse_step(&self, recipe: &mut Recipe, text: &str) -> Step {
        let step_index = recipe.steps.len();
        let mut step = Step::new(text);
        let tokens = self.tagger.tokenize(text);

        // Sentences that open with a noun are usually misread imperatives
        let mut candidates: Vec<String> = tokens
            .iter()
            .filter(|token| token.pos == PartOfSpeech::Verb)
            .map(|token| token.lemma.clone())
            .collect();
        for sentence in self.tagger.sentences(&tokens) {
            if let Some(first) = tokens.get(sentence.start).filter(|t| t.pos.is_nominal()) {
                candidates.push(first.lemma.to_lowercase());
            }
        }
        for lemma in candidates {
            if self.classifier.classify_verb(&lemma) == VerbCategory::PrimaryMethod {
                recipe.methods.insert(lemma.clone());
                step.methods.insert(lemma);
            }
        }

        for (tool, pattern) in &self.tools {
            if pattern.is_match(text) {
                recipe.tools.insert(tool.clone());
                step.tools.insert(tool.clone());
            }
        }

        for chunk in self.tagger.noun_chunks(&tokens) {
            let Some(phrase) = text.get(chunk) else {
                continue;
            };
            let phrase = LEADING_ARTICLE.replace(phrase, "");
            let Some(mention) = self.parse_ingredient(&phrase) else {
                continue;
            };
            match find_best_ingredient(&mention.label(), &recipe.ingredients) {
                Some(index) => {
                    debug!("Step {step_index}: {phrase:?} refers to ingredient {index}");
                    recipe.ingredients[index]
                        .used
                        .insert((step_index, step.ingredients.len()));
                    step.ingredients.push(index);
                }
                None => debug!("Step {step_index}: no ingredient matches {phrase:?}"),
            }
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_with_ingredients(parser: &RecipeParser, lines: &[&str]) -> Recipe {
        parser.parse_ingredients(Recipe::new("Test"), lines)
    }

    #[test]
    fn test_methods_tools_and_references() {
        let parser = RecipeParser::bundled().unwrap();
        let recipe = recipe_with_ingredients(
            &parser,
            &[
                "2 cups all-purpose flour",
                "1 teaspoon baking soda",
                "1/2 teaspoon salt",
                "2 large eggs",
            ],
        );
        let recipe = parser.parse_steps(
            recipe,
            &[
                "In a large bowl, whisk together flour, baking soda and the salt.",
                "Bake in the preheated oven for 30 minutes.",
            ],
        );

        let first = &recipe.steps[0];
        assert_eq!(first.ingredients, vec![0, 1, 2]);
        assert!(first.methods.is_empty());
        assert!(first.tools.contains("bowl"));
        assert!(first.tools.contains("whisk"));

        let second = &recipe.steps[1];
        assert!(second.ingredients.is_empty());
        assert!(second.methods.contains("bake"));
        assert!(second.tools.contains("oven"));

        assert_eq!(
            recipe.methods.iter().collect::<Vec<_>>(),
            vec!["bake"]
        );
        assert_eq!(
            recipe.tools.iter().collect::<Vec<_>>(),
            vec!["bowl", "oven", "whisk"]
        );
        assert_eq!(recipe.usages(0).collect::<Vec<_>>(), vec![(0, 0)]);
        assert_eq!(recipe.usages(2).collect::<Vec<_>>(), vec![(0, 2)]);
        assert_eq!(recipe.usages(3).count(), 0);
        assert!(first.times.is_empty() && first.temps.is_empty());
    }

    #[test]
    fn test_sentence_opening_noun_counts_as_verb() {
        let parser = RecipeParser::bundled().unwrap();
        let recipe = parser.parse_steps(Recipe::new("Stew"), &["Brown the beef. Stir well."]);
        assert!(recipe.methods.contains("brown"));
        assert!(!recipe.methods.contains("stir"));
    }

    #[test]
    fn test_generic_cook_is_not_a_method() {
        let parser = RecipeParser::bundled().unwrap();
        let recipe = parser.parse_steps(Recipe::new("Rice"), &["Cook the rice until tender."]);
        assert!(recipe.methods.is_empty());
    }

    #[test]
    fn test_tools_match_whole_words_only() {
        let parser = RecipeParser::bundled().unwrap();
        let recipe = parser.parse_steps(
            Recipe::new("Sauce"),
            &["Melt butter in a saucepan; keep the pantry stocked."],
        );
        assert_eq!(
            recipe.tools.iter().collect::<Vec<_>>(),
            vec!["saucepan"]
        );
    }
}
