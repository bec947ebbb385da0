use thiserror::Error;

/// Errors that can occur while fetching pages, loading lexical data,
/// configuring the parser or saving reports.
///
/// Ingredient and step parsing never produce these: malformed lines degrade
/// to absent ingredients instead.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Failed to fetch a recipe page
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The page has no JSON-LD block describing a recipe
    #[error("No JSON-LD recipe found in the page")]
    NoRecipeData,

    /// Reading lexical data or writing a report failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Lexical data could not be decoded
    #[error("Invalid lexical data: {0}")]
    InvalidLexicon(String),

    /// The NLP tokenizer could not be loaded
    #[error("Tagger error: {0}")]
    TaggerError(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// A transformation name that is not in the catalogue
    #[error("Unknown transformation: {0}")]
    UnknownTransformation(String),
}
