//! Rule-based recipe transformations: dietary and regional substitutions and
//! quantity scaling.

pub mod substitutions;

use crate::error::RecipeError;
use crate::model::{Ingredient, Recipe, Step};
use log::{debug, info, warn};
use num_rational::Rational64;
use num_traits::CheckedMul;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

/// Qualifiers left behind once the cut of meat they described is gone
static ORPHANED_QUALIFIERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(deveined|debearded|disjointed|skinned|boned|trimmed)\b")
        .expect("valid regex")
});
static TRAILING_CONJUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\s*\band\b|\s*,)+\s*$").expect("valid regex"));
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.;])").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformation {
    ToVegetarian,
    FromVegetarian,
    ToHealthy,
    FromHealthy,
    Double,
    Half,
    ToItalian,
    ToMexican,
    GlutenFree,
    LactoseFree,
}

/// What a transformation does to a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Multiply every quantity by an exact factor
    Scale(Rational64),
    /// Rewrite ingredient names and step text with a phrase table
    Substitute(&'static [(&'static str, &'static str)]),
}

impl Transformation {
    pub const ALL: [Transformation; 10] = [
        Transformation::ToVegetarian,
        Transformation::FromVegetarian,
        Transformation::ToHealthy,
        Transformation::FromHealthy,
        Transformation::Double,
        Transformation::Half,
        Transformation::ToItalian,
        Transformation::ToMexican,
        Transformation::GlutenFree,
        Transformation::LactoseFree,
    ];

    pub fn action(self) -> Action {
        use substitutions::*;
        match self {
            Transformation::ToVegetarian => Action::Substitute(VEGETARIAN),
            Transformation::FromVegetarian => Action::Substitute(NON_VEGETARIAN),
            Transformation::ToHealthy => Action::Substitute(HEALTHY),
            Transformation::FromHealthy => Action::Substitute(UNHEALTHY),
            Transformation::Double => Action::Scale(Rational64::from_integer(2)),
            Transformation::Half => Action::Scale(Rational64::new(1, 2)),
            Transformation::ToItalian => Action::Substitute(ITALIAN),
            Transformation::ToMexican => Action::Substitute(MEXICAN),
            Transformation::GlutenFree => Action::Substitute(GLUTEN_FREE),
            Transformation::LactoseFree => Action::Substitute(LACTOSE_FREE),
        }
    }

    /// Name accepted on the command line
    pub fn cli_name(self) -> &'static str {
        match self {
            Transformation::ToVegetarian => "vegetarian",
            Transformation::FromVegetarian => "non-vegetarian",
            Transformation::ToHealthy => "healthy",
            Transformation::FromHealthy => "unhealthy",
            Transformation::Double => "double",
            Transformation::Half => "half",
            Transformation::ToItalian => "italian",
            Transformation::ToMexican => "mexican",
            Transformation::GlutenFree => "gluten-free",
            Transformation::LactoseFree => "lactose-free",
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Transformation::ToVegetarian => "Vegetarian",
            Transformation::FromVegetarian => "Non-Vegetarian",
            Transformation::ToHealthy => "Healthy",
            Transformation::FromHealthy => "Unhealthy",
            Transformation::Double => "Double",
            Transformation::Half => "Half",
            Transformation::ToItalian => "Italian Style",
            Transformation::ToMexican => "Mexican Style",
            Transformation::GlutenFree => "Gluten Free",
            Transformation::LactoseFree => "Lactose Free",
        };
        f.write_str(name)
    }
}

impl FromStr for Transformation {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        Transformation::ALL
            .into_iter()
            .find(|t| t.cli_name() == wanted)
            .ok_or_else(|| RecipeError::UnknownTransformation(s.to_string()))
    }
}

/// Build a new recipe from `recipe`; the source is left untouched.
///
/// Tools, methods and metadata are copied as they are. Ingredient positions
/// do not change, so step references stay valid.
pub fn transform(recipe: &Recipe, transformation: Transformation) -> Recipe {
    let rewritten = apply(recipe, transformation.action());
    info!("Applied {transformation} to \"{}\"", recipe.title);
    Recipe {
        title: format!("{transformation} {}", recipe.title),
        ..rewritten
    }
}

/// Run one action over a copy of `recipe`, keeping its title.
pub fn apply(recipe: &Recipe, action: Action) -> Recipe {
    let (ingredients, steps) = match action {
        Action::Scale(factor) => (scale(&recipe.ingredients, factor), recipe.steps.clone()),
        Action::Substitute(table) => {
            let substituter = Substituter::new(table);
            let ingredients = recipe
                .ingredients
                .iter()
                .map(|ingredient| Ingredient {
                    name: substituter.apply(&ingredient.name),
                    ..ingredient.clone()
                })
                .collect();
            let steps = recipe
                .steps
                .iter()
                .map(|step| Step {
                    text: substituter.apply(&step.text),
                    ..step.clone()
                })
                .collect();
            (ingredients, steps)
        }
    };

    Recipe {
        title: recipe.title.clone(),
        ingredients,
        tools: recipe.tools.clone(),
        methods: recipe.methods.clone(),
        steps,
        other: recipe.other.clone(),
    }
}

/// Multiply quantities by `factor`. A product that overflows keeps the
/// original quantity.
fn scale(ingredients: &[Ingredient], factor: Rational64) -> Vec<Ingredient> {
    ingredients
        .iter()
        .map(|ingredient| Ingredient {
            quantity: ingredient.quantity.map(|quantity| {
                quantity.checked_mul(&factor).unwrap_or_else(|| {
                    warn!(
                        "Scaling {quantity} {} by {factor} overflows; keeping it",
                        ingredient.name
                    );
                    quantity
                })
            }),
            ..ingredient.clone()
        })
        .collect()
}

/// Rewrite `text` with a phrase table.
///
/// All phrases are matched in one pass, longest first, so replacement text
/// is never itself rewritten.
pub fn substitute_text(text: &str, table: &[(&str, &str)]) -> String {
    Substituter::new(table).apply(text)
}

struct Substituter<'a> {
    pattern: Option<Regex>,
    replacements: HashMap<String, &'a str>,
}

impl<'a> Substituter<'a> {
    fn new(table: &[(&str, &'a str)]) -> Self {
        let mut keys: Vec<&str> = table.iter().map(|&(key, _)| key).collect();
        // stable, so equal-length keys keep table order
        keys.sort_by_key(|key| std::cmp::Reverse(key.len()));

        let mut replacements = HashMap::new();
        for &(key, replacement) in table {
            replacements.entry(key.to_lowercase()).or_insert(replacement);
        }

        let pattern = if keys.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = keys.iter().map(|key| regex::escape(key)).collect();
            match Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!("Substitution table disabled: {e}");
                    None
                }
            }
        };
        Self {
            pattern,
            replacements,
        }
    }

    fn apply(&self, text: &str) -> String {
        let Some(pattern) = self.pattern.as_ref().filter(|p| p.is_match(text)) else {
            return text.to_string();
        };
        let replaced = pattern.replace_all(text, |caps: &Captures| {
            let found = &caps[0];
            self.replacements
                .get(&found.to_lowercase())
                .copied()
                .unwrap_or(found)
                .to_string()
        });

        let cleaned = ORPHANED_QUALIFIERS.replace_all(&replaced, "");
        let cleaned = WHITESPACE.replace_all(&cleaned, " ");
        let cleaned = SPACE_BEFORE_PUNCT.replace_all(&cleaned, "$1");
        let cleaned = TRAILING_CONJUNCTION.replace(&cleaned, "");
        let cleaned = cleaned.trim().to_string();
        debug!("Substituted {text:?} -> {cleaned:?}");
        cleaned
    }
}

/// Side-by-side record of one transformation
#[derive(Debug, Clone, Copy)]
pub struct TransformationReport<'a> {
    pub transformation: Transformation,
    pub original: &'a Recipe,
    pub transformed: &'a Recipe,
}

impl<'a> TransformationReport<'a> {
    pub fn new(
        transformation: Transformation,
        original: &'a Recipe,
        transformed: &'a Recipe,
    ) -> Self {
        Self {
            transformation,
            original,
            transformed,
        }
    }

    /// Lower-cased transformed title with non-word characters as `_`
    pub fn file_name(&self) -> String {
        let title = self.transformed.title.to_lowercase();
        format!("{}.txt", NON_WORD.replace_all(&title, "_"))
    }

    /// Write the report into `directory`, returning the file's path
    pub fn save(&self, directory: &Path) -> Result<PathBuf, RecipeError> {
        let path = directory.join(self.file_name());
        std::fs::write(&path, self.to_string())?;
        info!("Saved {} report to {}", self.transformation, path.display());
        Ok(path)
    }
}

impl fmt::Display for TransformationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "---------------------";
        writeln!(f, "Transformation: {}", self.transformation)?;
        writeln!(f)?;
        writeln!(f, "{SEPARATOR}")?;
        write!(f, "{}", self.original)?;
        writeln!(f)?;
        writeln!(f, "{SEPARATOR}")?;
        write!(f, "{}", self.transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn chicken_soup() -> Recipe {
        let mut recipe = Recipe::new("Chicken Soup");
        recipe.ingredients.push(Ingredient {
            quantity: Some(Rational64::new(1, 3)),
            unit: Some("cup".to_string()),
            ..Ingredient::new("chicken broth")
        });
        recipe.ingredients.push(Ingredient {
            quantity: Some(Rational64::from_integer(2)),
            descriptors: Some("boneless".to_string()),
            ..Ingredient::new("chicken breast, deveined")
        });
        recipe.ingredients.push(Ingredient::new("salt"));
        recipe.ingredients[1].used.insert((0, 0));
        recipe.steps.push(Step {
            ingredients: vec![1],
            methods: BTreeSet::from(["simmer".to_string()]),
            ..Step::new("Simmer the chicken in the chicken broth.")
        });
        recipe.tools.insert("pot".to_string());
        recipe.methods.insert("simmer".to_string());
        recipe
            .other
            .insert("description".to_string(), "Warming".to_string());
        recipe
    }

    #[test]
    fn test_replaces_whole_words() {
        assert_eq!(
            substitute_text("Add the chicken and stir", &[("chicken", "tofu")]),
            "Add the tofu and stir"
        );
        assert_eq!(
            substitute_text("Add the Chicken; stir", &[("chicken", "tofu")]),
            "Add the tofu; stir"
        );
        assert_eq!(
            substitute_text("chickens and chickpeas", &[("chicken", "tofu")]),
            "chickens and chickpeas"
        );
    }

    #[test]
    fn test_longest_phrase_wins() {
        let table = [("chicken", "tofu"), ("chicken broth", "vegetable broth")];
        assert_eq!(
            substitute_text("1 cup chicken broth", &table),
            "1 cup vegetable broth"
        );
    }

    #[test]
    fn test_replacement_text_is_literal() {
        assert_eq!(substitute_text("salt", &[("salt", "$1 herbs")]), "$1 herbs");
    }

    #[test]
    fn test_vegetarian_cleans_orphaned_qualifiers() {
        assert_eq!(
            substitute_text("chicken breast, deveined", substitutions::VEGETARIAN),
            "extra-firm tofu, cubed"
        );
        assert_eq!(
            substitute_text("shrimp, peeled and deveined", substitutions::VEGETARIAN),
            "jackfruit, peeled"
        );
    }

    #[test]
    fn test_replacements_are_not_rewritten() {
        assert_eq!(
            substitute_text("1 cup whole milk", substitutions::LACTOSE_FREE),
            "1 cup coconut milk (canned or carton, depending on richness needed)"
        );
        assert_eq!(
            substitute_text("cream cheese", substitutions::LACTOSE_FREE),
            "dairy-free cream cheese"
        );
    }

    #[test]
    fn test_empty_table_is_identity() {
        let text = "Stir   well ,  and";
        assert_eq!(substitute_text(text, &[]), text);
        assert_eq!(substitute_text(text, &[("beef", "tofu")]), text);
    }

    #[test]
    fn test_double_is_exact() {
        let recipe = chicken_soup();
        let doubled = transform(&recipe, Transformation::Double);
        assert_eq!(doubled.title, "Double Chicken Soup");
        assert_eq!(doubled.ingredients[0].quantity, Some(Rational64::new(2, 3)));
        assert_eq!(doubled.ingredients[1].quantity, Some(Rational64::from_integer(4)));
        assert_eq!(doubled.ingredients[2].quantity, None);
        assert_eq!(doubled.steps, recipe.steps);
        assert_eq!(doubled.usages(1).collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn test_scaling_overflow_keeps_quantity() {
        let mut recipe = Recipe::new("Huge Batch");
        recipe.ingredients.push(Ingredient {
            quantity: Some(Rational64::from_integer(i64::MAX)),
            ..Ingredient::new("flour")
        });
        recipe.ingredients.push(Ingredient {
            quantity: Some(Rational64::new(1, 2)),
            ..Ingredient::new("salt")
        });

        let doubled = transform(&recipe, Transformation::Double);
        assert_eq!(
            doubled.ingredients[0].quantity,
            Some(Rational64::from_integer(i64::MAX))
        );
        assert_eq!(doubled.ingredients[1].quantity, Some(Rational64::from_integer(1)));
    }

    #[test]
    fn test_empty_table_leaves_recipe_unchanged() {
        let recipe = chicken_soup();
        assert_eq!(apply(&recipe, Action::Substitute(&[])), recipe);
        assert_eq!(apply(&recipe, Action::Scale(Rational64::from_integer(1))), recipe);
    }

    #[test]
    fn test_half() {
        let halved = transform(&chicken_soup(), Transformation::Half);
        assert_eq!(halved.title, "Half Chicken Soup");
        assert_eq!(halved.ingredients[0].quantity, Some(Rational64::new(1, 6)));
        assert_eq!(halved.ingredients[1].quantity, Some(Rational64::from_integer(1)));
    }

    #[test]
    fn test_vegetarian_recipe() {
        let recipe = chicken_soup();
        let original = recipe.clone();
        let vegetarian = transform(&recipe, Transformation::ToVegetarian);

        assert_eq!(recipe, original);
        assert_eq!(vegetarian.title, "Vegetarian Chicken Soup");
        let names: Vec<&str> = vegetarian.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["vegetable broth", "extra-firm tofu, cubed", "salt"]);
        assert_eq!(vegetarian.ingredients[1].descriptors.as_deref(), Some("boneless"));
        assert_eq!(
            vegetarian.steps[0].text,
            "Simmer the extra-firm tofu, cubed in the vegetable broth."
        );
        assert_eq!(vegetarian.steps[0].ingredients, vec![1]);
        assert_eq!(vegetarian.tools, recipe.tools);
        assert_eq!(vegetarian.methods, recipe.methods);
        assert_eq!(vegetarian.description(), Some("Warming"));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "gluten-free".parse::<Transformation>().unwrap(),
            Transformation::GlutenFree
        );
        assert_eq!(
            "Non_Vegetarian".parse::<Transformation>().unwrap(),
            Transformation::FromVegetarian
        );
        for transformation in Transformation::ALL {
            assert_eq!(
                transformation.cli_name().parse::<Transformation>().unwrap(),
                transformation
            );
        }
        assert!(matches!(
            "keto".parse::<Transformation>(),
            Err(RecipeError::UnknownTransformation(_))
        ));
    }

    #[test]
    fn test_italian_display_name() {
        let italian = transform(&Recipe::new("Tacos"), Transformation::ToItalian);
        assert_eq!(italian.title, "Italian Style Tacos");
    }

    #[test]
    fn test_report() {
        let recipe = chicken_soup();
        let transformed = transform(&recipe, Transformation::ToVegetarian);
        let report = TransformationReport::new(Transformation::ToVegetarian, &recipe, &transformed);

        assert_eq!(report.file_name(), "vegetarian_chicken_soup.txt");
        let text = report.to_string();
        assert!(text.starts_with("Transformation: Vegetarian\n\n---------------------\nChicken Soup\n"));
        assert!(text.contains("\n---------------------\nVegetarian Chicken Soup\n"));
        assert!(text.ends_with("1. Simmer the extra-firm tofu, cubed in the vegetable broth.\n"));

        let dir = tempfile::tempdir().unwrap();
        let path = report.save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("vegetarian_chicken_soup.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), text);
    }
}
