use super::{Extractor, ParsingContext};
use crate::error::RecipeError;
use crate::model::RecipePage;
use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;

const UNKNOWN_TITLE: &str = "Unknown Title";
const NO_DESCRIPTION: &str = "No description available";

/// Reads the first schema.org `Recipe` embedded as JSON-LD.
///
/// The page `<title>` and `<meta name="description">` take precedence over
/// the JSON-LD `name` and `description`.
pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn convert_to_page(&self, json_ld_recipe: JsonLdRecipe, context: &ParsingContext) -> RecipePage {
        let title = page_title(context)
            .or_else(|| json_ld_recipe.name.as_deref().map(decode_html_symbols))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let description = meta_description(context)
            .or_else(|| {
                json_ld_recipe.description.map(|desc| match desc {
                    DescriptionType::String(d) => decode_html_symbols(&d),
                    DescriptionType::Object(d) => decode_html_symbols(&d.text),
                })
            })
            .filter(|description| !description.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        let ingredients = match json_ld_recipe.recipe_ingredient {
            Some(RecipeIngredients::Strings(ingredients)) => ingredients,
            Some(RecipeIngredients::Single(ingredient)) => ingredient
                .lines()
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };
        let ingredients = ingredients
            .iter()
            .map(|ingredient| decode_html_symbols(ingredient))
            .filter(|ingredient| !ingredient.is_empty())
            .collect();

        let steps: Vec<String> = match json_ld_recipe.recipe_instructions {
            Some(RecipeInstructions::String(text)) => vec![text],
            Some(RecipeInstructions::Multiple(texts)) => texts,
            Some(RecipeInstructions::HowTo(items)) => items.into_iter().flat_map(howto_texts).collect(),
            Some(RecipeInstructions::NestedSections(sections)) => sections
                .into_iter()
                .flatten()
                .flat_map(howto_texts)
                .collect(),
            None => Vec::new(),
        };
        let steps = steps
            .iter()
            .map(|step| decode_html_symbols(step))
            .filter(|step| !step.is_empty())
            .collect();

        RecipePage {
            title,
            description,
            ingredients,
            steps,
        }
    }
}

fn howto_texts(item: HowTo) -> Vec<String> {
    match item {
        HowTo::HowToStep(step) => step.into_text().into_iter().collect(),
        HowTo::HowToSection(section) => section
            .item_list_element
            .into_iter()
            .filter_map(HowToStep::into_text)
            .collect(),
    }
}

fn page_title(context: &ParsingContext) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    context
        .document
        .select(&selector)
        .next()
        .map(|title| decode_html_symbols(&title.text().collect::<String>()))
        .filter(|title| !title.is_empty())
}

fn meta_description(context: &ParsingContext) -> Option<String> {
    let selector = Selector::parse("meta[name='description']").unwrap();
    context
        .document
        .select(&selector)
        .find_map(|meta| meta.value().attr("content"))
        .map(decode_html_symbols)
        .filter(|description| !description.is_empty())
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<String>,
    description: Option<DescriptionType>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Strings(Vec<String>),
    Single(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    HowTo(Vec<HowTo>),
    NestedSections(Vec<Vec<HowTo>>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

impl HowToStep {
    /// Prefer text, then name, then description
    fn into_text(self) -> Option<String> {
        self.text.or(self.name).or(self.description)
    }
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

fn decode_html_symbols(text: &str) -> String {
    // entities in scraped JSON-LD are frequently double-escaped
    decode_html_entities(&decode_html_entities(text))
        .trim()
        .to_string()
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

fn find_recipe(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        debug!("JsonLdExtractor: JSON-LD is an array");
        items.iter().find(|item| {
            let has_instructions = item.get("recipeInstructions").is_some();
            has_instructions || is_recipe_type(item)
        })
    } else if is_recipe_type(json_ld) {
        debug!("JsonLdExtractor: Found Recipe type in root");
        Some(json_ld)
    } else if let Some(graph) = json_ld.get("@graph").and_then(Value::as_array) {
        debug!("JsonLdExtractor: Found @graph");
        graph.iter().find(|item| is_recipe_type(item))
    } else {
        None
    }
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipePage, RecipeError> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();
        let scripts: Vec<_> = context.document.select(&selector).collect();
        debug!("JsonLdExtractor: Found {} JSON-LD script tags", scripts.len());

        for (index, script) in scripts.iter().enumerate() {
            let raw_json = script.inner_html();
            let json_ld = match serde_json::from_str::<Value>(&sanitize_json(&raw_json)) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {index}: {e}");
                    continue;
                }
            };
            let Some(recipe) = find_recipe(&json_ld) else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD {index}");
                continue;
            };
            match JsonLdRecipe::try_from(recipe) {
                Ok(recipe) => return Ok(self.convert_to_page(recipe, context)),
                Err(e) => debug!("JsonLdExtractor: Failed to convert JSON-LD {index}: {e}"),
            }
        }

        Err(RecipeError::NoRecipeData)
    }
}

/// Strip insignificant whitespace and repair the missing or doubled commas
/// some sites emit between values.
fn sanitize_json(json_str: &str) -> String {
    let chars: Vec<char> = json_str.chars().collect();
    let mut minified = String::with_capacity(json_str.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut depth = 0usize;

    let next_significant = |i: usize| chars[i + 1..].iter().copied().find(|c| !c.is_whitespace());

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            minified.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                if matches!(next_significant(i), Some('"' | '[' | '{')) {
                    minified.push(',');
                }
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                minified.push(c);
            }
            '[' | '{' => {
                depth += 1;
                minified.push(c);
            }
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                if minified.ends_with(',') {
                    minified.pop();
                }
                minified.push(c);
                if depth > 0 && next_significant(i) == Some('"') {
                    minified.push(',');
                }
            }
            ',' => {
                if !minified.ends_with([',', '[', '{']) {
                    minified.push(c);
                }
            }
            ':' => {
                if minified.ends_with(',') {
                    minified.pop();
                }
                minified.push(c);
            }
            _ if c.is_whitespace() => {}
            _ => minified.push(c),
        }
    }

    minified
}
