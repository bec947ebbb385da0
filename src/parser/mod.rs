//! Turns scraped ingredient lines and instructions into a structured [`Recipe`].

mod ingredient;
mod matcher;
mod steps;

pub use matcher::{find_best_ingredient, match_score, MATCH_THRESHOLD};
pub use steps::COMMON_TOOLS;

use crate::config::Settings;
use crate::error::RecipeError;
use crate::lexical::{BundledKnowledgeBase, LexicalClassifier, LexicalKnowledgeBase, WordNet};
use crate::model::{Recipe, RecipePage};
use crate::nlp::{LexiconTagger, RuleTagger, Tagger};
use log::{debug, info, warn};
use regex::Regex;

/// Recipe parser built from an NLP tagger and a lexical knowledge base
pub struct RecipeParser {
    tagger: Box<dyn Tagger>,
    classifier: LexicalClassifier,
    tools: Vec<(String, Regex)>,
}

impl RecipeParser {
    pub fn new(tagger: Box<dyn Tagger>, knowledge: Box<dyn LexicalKnowledgeBase>) -> Self {
        Self {
            tagger,
            classifier: LexicalClassifier::new(knowledge),
            tools: tool_patterns(COMMON_TOOLS.iter().copied()),
        }
    }

    /// Parser over the built-in tagger and lexicon
    pub fn bundled() -> Result<Self, RecipeError> {
        Ok(Self::new(
            Box::new(LexiconTagger::new()),
            Box::new(BundledKnowledgeBase::load()?),
        ))
    }

    /// Parser configured from settings: an nlprule tokenizer and a WordNet
    /// database when they are configured, and the configured tool vocabulary.
    pub fn from_settings(settings: &Settings) -> Result<Self, RecipeError> {
        let knowledge: Box<dyn LexicalKnowledgeBase> = match &settings.lexicon.wordnet_dir {
            Some(dir) => Box::new(WordNet::open(dir)?),
            None => Box::new(BundledKnowledgeBase::load()?),
        };
        let tagger: Box<dyn Tagger> = match &settings.nlp.tokenizer {
            Some(path) => Box::new(RuleTagger::open(path)?),
            None => Box::new(LexiconTagger::new()),
        };
        let parser = Self::new(tagger, knowledge);
        Ok(match &settings.tools {
            Some(tools) => parser.with_tools(tools),
            None => parser,
        })
    }

    /// Replace the kitchen tool vocabulary
    pub fn with_tools<S: AsRef<str>>(mut self, tools: &[S]) -> Self {
        self.tools = tool_patterns(tools.iter().map(AsRef::as_ref));
        self
    }

    /// Build a recipe from a scraped page: title, then ingredients, then steps
    /// with their tools, methods and ingredient references.
    pub fn parse(&self, page: &RecipePage) -> Recipe {
        let mut recipe = Recipe::new(page.title.clone());
        recipe
            .other
            .insert("description".to_string(), page.description.clone());

        let recipe = self.parse_ingredients(recipe, &page.ingredients);
        let recipe = self.parse_steps(recipe, &page.steps);
        info!(
            "Parsed \"{}\": {} ingredients, {} steps, {} tools, {} methods",
            recipe.title,
            recipe.ingredients.len(),
            recipe.steps.len(),
            recipe.tools.len(),
            recipe.methods.len()
        );
        recipe
    }

    /// Append every line that parses as an ingredient; other lines are dropped.
    pub fn parse_ingredients<S: AsRef<str>>(&self, mut recipe: Recipe, lines: &[S]) -> Recipe {
        for line in lines {
            let line = line.as_ref();
            match self.parse_ingredient(line) {
                Some(ingredient) => recipe.ingredients.push(ingredient),
                None => debug!("Dropping non-ingredient line: {line:?}"),
            }
        }
        recipe
    }
}

fn tool_patterns<'a>(tools: impl Iterator<Item = &'a str>) -> Vec<(String, Regex)> {
    tools
        .filter_map(|tool| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(tool));
            match Regex::new(&pattern) {
                Ok(regex) => Some((tool.to_string(), regex)),
                Err(e) => {
                    warn!("Ignoring tool {tool:?}: {e}");
                    None
                }
            }
        })
        .collect()
}
