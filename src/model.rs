use crate::quantity::format_quantity;
use crate::units::standardize_units;
use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One parsed ingredient line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Option<Rational64>,
    pub unit: Option<String>,
    pub descriptors: Option<String>,
    pub preparation: Option<String>,
    /// `(step index, position in that step's ingredient list)` of every mention
    #[serde(default)]
    pub used: BTreeSet<(usize, usize)>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Descriptors followed by the name; step phrases are matched against this
    pub fn label(&self) -> String {
        match &self.descriptors {
            Some(descriptors) => format!("{descriptors} {}", self.name),
            None => self.name.clone(),
        }
    }

    /// The unit with abbreviations spelled out ("tbsp." -> "tablespoon")
    pub fn standardized_unit(&self) -> Option<String> {
        self.unit.as_deref().map(standardize_units)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(quantity) = &self.quantity {
            parts.push(format_quantity(quantity));
        }
        parts.extend(self.unit.iter().cloned());
        parts.extend(self.descriptors.iter().cloned());
        parts.push(self.name.clone());
        write!(f, "{}", parts.join(" "))?;
        if let Some(preparation) = &self.preparation {
            write!(f, ", {preparation}")?;
        }
        Ok(())
    }
}

/// One instruction step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    pub text: String,
    /// Indices into [`Recipe::ingredients`], in order of appearance
    #[serde(default)]
    pub ingredients: Vec<usize>,
    #[serde(default)]
    pub tools: BTreeSet<String>,
    #[serde(default)]
    pub methods: BTreeSet<String>,
    /// Not extracted yet
    #[serde(default)]
    pub times: Vec<String>,
    /// Not extracted yet
    #[serde(default)]
    pub temps: Vec<String>,
}

impl Step {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    pub tools: BTreeSet<String>,
    pub methods: BTreeSet<String>,
    pub steps: Vec<Step>,
    /// Free-form metadata such as `description`
    #[serde(default)]
    pub other: BTreeMap<String, String>,
}

impl Recipe {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.other.get("description").map(String::as_str)
    }

    /// Ingredients referenced by a step, skipping indices that no longer exist
    pub fn step_ingredients(&self, step: usize) -> impl Iterator<Item = (usize, &Ingredient)> {
        self.steps
            .get(step)
            .into_iter()
            .flat_map(|step| step.ingredients.iter())
            .filter_map(|&index| self.ingredients.get(index).map(|ingredient| (index, ingredient)))
    }

    /// `(step, position)` mentions of an ingredient that still point at a step
    /// entry
    pub fn usages(&self, ingredient: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ingredients
            .get(ingredient)
            .into_iter()
            .flat_map(|entry| entry.used.iter().copied())
            .filter(move |&(step, position)| {
                self.steps
                    .get(step)
                    .is_some_and(|s| s.ingredients.get(position) == Some(&ingredient))
            })
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "Ingredients:")?;
        for ingredient in &self.ingredients {
            writeln!(f, "- {ingredient}")?;
        }
        writeln!(f)?;
        writeln!(f, "Steps:")?;
        for (n, step) in self.steps.iter().enumerate() {
            writeln!(f, "{}. {}", n + 1, step.text)?;
        }
        Ok(())
    }
}

/// Raw recipe content scraped from a page, before any parsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePage {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// Sites whose pages the scraper is known to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSource {
    AllRecipes,
    Unknown,
}

impl RecipeSource {
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_lowercase();
        let path = lower
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.");
        if path.starts_with("allrecipes.com/recipe/") {
            RecipeSource::AllRecipes
        } else {
            RecipeSource::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn olive_oil() -> Ingredient {
        Ingredient {
            name: "olive oil".to_string(),
            quantity: Some(Rational64::new(5, 2)),
            unit: Some("tbsp.".to_string()),
            descriptors: Some("extra-virgin".to_string()),
            preparation: Some("divided".to_string()),
            used: BTreeSet::new(),
        }
    }

    #[test]
    fn test_ingredient_display() {
        assert_eq!(olive_oil().to_string(), "2 1/2 tbsp. extra-virgin olive oil, divided");
        assert_eq!(Ingredient::new("salt").to_string(), "salt");
        assert_eq!(olive_oil().label(), "extra-virgin olive oil");
        assert_eq!(olive_oil().standardized_unit().as_deref(), Some("tablespoon"));
    }

    #[test]
    fn test_recipe_display() {
        let mut recipe = Recipe::new("Pancakes");
        recipe.ingredients.push(Ingredient {
            quantity: Some(Rational64::from_integer(2)),
            unit: Some("cups".to_string()),
            ..Ingredient::new("flour")
        });
        recipe.steps.push(Step::new("Mix everything."));
        recipe.steps.push(Step::new("Fry in a pan."));
        assert_eq!(
            recipe.to_string(),
            "Pancakes\n\nIngredients:\n- 2 cups flour\n\nSteps:\n1. Mix everything.\n2. Fry in a pan.\n"
        );
    }

    #[test]
    fn test_back_references_are_revalidated() {
        let mut recipe = Recipe::new("Soup");
        recipe.ingredients.push(Ingredient::new("carrot"));
        recipe.ingredients.push(Ingredient::new("onion"));
        recipe.steps.push(Step {
            ingredients: vec![1, 0, 7],
            ..Step::new("Add the onion and carrot")
        });
        recipe.ingredients[0].used.insert((0, 1));
        recipe.ingredients[0].used.insert((3, 0));
        recipe.ingredients[1].used.insert((0, 0));

        let names: Vec<&str> = recipe
            .step_ingredients(0)
            .map(|(_, ingredient)| ingredient.name.as_str())
            .collect();
        assert_eq!(names, vec!["onion", "carrot"]);
        assert_eq!(recipe.usages(0).collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(recipe.usages(1).collect::<Vec<_>>(), vec![(0, 0)]);
        assert_eq!(recipe.usages(9).count(), 0);
        assert_eq!(recipe.step_ingredients(5).count(), 0);
    }

    #[test]
    fn test_quantity_serializes_as_pair() {
        let json = serde_json::to_value(olive_oil()).unwrap();
        assert_eq!(json["quantity"], serde_json::json!([5, 2]));
        assert_eq!(json["name"], "olive oil");
    }

    #[test]
    fn test_recipe_source() {
        assert_eq!(
            RecipeSource::from_url("https://www.allrecipes.com/recipe/12345/pancakes/"),
            RecipeSource::AllRecipes
        );
        assert_eq!(
            RecipeSource::from_url("https://example.com/recipe/1"),
            RecipeSource::Unknown
        );
    }
}
