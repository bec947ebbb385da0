//! Parse recipe pages into structured recipes and rewrite them with
//! dietary, regional and scaling transformations.

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod lexical;
pub mod model;
pub mod nlp;
pub mod parser;
pub mod quantity;
pub mod transform;
pub mod units;

pub use config::Settings;
pub use error::RecipeError;
pub use model::{Ingredient, Recipe, RecipePage, RecipeSource, Step};
pub use parser::RecipeParser;
pub use transform::{transform, Transformation, TransformationReport};

use extractors::{Extractor, JsonLdExtractor, ParsingContext};
use fetchers::RequestFetcher;
use log::{info, warn};

/// Fetch a page and scrape its recipe content
pub async fn fetch_page(url: &str, settings: &Settings) -> Result<RecipePage, RecipeError> {
    // links pasted from chat clients arrive wrapped in angle brackets
    let url = url.trim().trim_matches(['<', '>']);
    if RecipeSource::from_url(url) == RecipeSource::Unknown {
        warn!("{url} is not from a supported site; trying anyway");
    }

    let fetcher = RequestFetcher::new(&settings.fetch)?;
    let html = fetcher.fetch(url).await?;
    extract_page(url, &html)
}

/// Scrape recipe content out of an already fetched page
pub fn extract_page(url: &str, html: &str) -> Result<RecipePage, RecipeError> {
    let context = ParsingContext::new(url, html);
    let page = JsonLdExtractor.parse(&context)?;
    info!(
        "Scraped \"{}\": {} ingredient lines, {} steps",
        page.title,
        page.ingredients.len(),
        page.steps.len()
    );
    Ok(page)
}

/// Fetch a page and parse it into a [`Recipe`]
pub async fn fetch_recipe(
    url: &str,
    parser: &RecipeParser,
    settings: &Settings,
) -> Result<Recipe, RecipeError> {
    let page = fetch_page(url, settings).await?;
    Ok(parser.parse(&page))
}
