use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Lexical knowledge base configuration
    #[serde(default)]
    pub lexicon: LexiconConfig,
    /// Part-of-speech tagger configuration
    #[serde(default)]
    pub nlp: NlpConfig,
    /// Page fetching configuration
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Where transformation reports are written
    #[serde(default)]
    pub output: OutputConfig,
    /// Kitchen tool vocabulary; replaces the built-in list when set
    #[serde(default)]
    pub tools: Option<Vec<String>>,
}

/// Configuration for the lexical knowledge base
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LexiconConfig {
    /// Path to a WordNet `dict/` directory. The bundled lexicon is used when unset.
    pub wordnet_dir: Option<PathBuf>,
}

/// Configuration for the part-of-speech tagger
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NlpConfig {
    /// Path to an nlprule `en_tokenizer.bin`. The word-list tagger is used when unset.
    pub tokenizer: Option<PathBuf>,
}

/// Configuration for HTTP fetching
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Configuration for saved reports
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory transformation reports are saved into
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeTransform/0.1)".to_string()
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE__ prefix
    /// 2. recipe-transform.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE__LEXICON__WORDNET_DIR,
    /// RECIPE__NLP__TOKENIZER
    pub fn load() -> Result<Self, ConfigError> {
        load_settings()
    }
}

/// Load configuration from file and environment variables
///
/// See [`Settings::load`] for the priority order.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-transform").required(false))
        // Use double underscore for nested: RECIPE__FETCH__TIMEOUT_SECS
        .add_source(
            Environment::with_prefix("RECIPE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_timeout(), 30);
        assert!(default_user_agent().contains("RecipeTransform"));
        assert_eq!(default_output_directory(), PathBuf::from("."));
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.lexicon.wordnet_dir.is_none());
        assert!(settings.nlp.tokenizer.is_none());
        assert_eq!(settings.fetch.timeout_secs, 30);
        assert!(settings.tools.is_none());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                tools = ["wok", "skillet"]

                [lexicon]
                wordnet_dir = "/usr/share/wordnet"

                [nlp]
                tokenizer = "/opt/nlprule/en_tokenizer.bin"

                [fetch]
                timeout_secs = 5
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(
            settings.lexicon.wordnet_dir,
            Some(PathBuf::from("/usr/share/wordnet"))
        );
        assert_eq!(
            settings.nlp.tokenizer,
            Some(PathBuf::from("/opt/nlprule/en_tokenizer.bin"))
        );
        assert_eq!(settings.fetch.timeout_secs, 5);
        assert_eq!(settings.fetch.user_agent, default_user_agent());
        assert_eq!(settings.output.directory, PathBuf::from("."));
        assert_eq!(
            settings.tools,
            Some(vec!["wok".to_string(), "skillet".to_string()])
        );
    }

    #[test]
    fn test_load_settings_without_file() {
        // Missing file is optional, so loading must fall back to defaults
        let result = load_settings();
        assert!(result.is_ok());
    }
}
