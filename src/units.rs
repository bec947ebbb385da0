use regex::Regex;
use std::sync::LazyLock;

/// Abbreviation patterns and the unit names they expand to.
static UNIT_ABBREVIATIONS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("ounce", r"(?i)\boz(?:\.|\b)"),
        ("pound", r"(?i)\blb(?:\.|s\b|\b)"),
        ("gram", r"(?i)\bg(?:\.|\b)"),
        ("kilogram", r"(?i)\bkg(?:\.|s\b|\b)"),
        ("teaspoon", r"(?i)\btsp(?:\.|s\b|\b)"),
        ("tablespoon", r"(?i)\btbsp(?:\.|s\b|\b)"),
        ("gallon", r"(?i)\bgal(?:\.|s\b|\b)"),
        ("milliliter", r"(?i)\bml(?:\.|\b)"),
        ("liter", r"(?i)\bl(?:\.|\b)"),
    ]
    .into_iter()
    .map(|(unit, pattern)| (unit, Regex::new(pattern).expect("unit pattern is valid")))
    .collect()
});

/// Expand every common cooking-unit abbreviation in `text` to its full name.
///
/// "2 tbsp. oil, 8-oz can" becomes "2 tablespoon oil, 8-ounce can".
pub fn standardize_units(text: &str) -> String {
    UNIT_ABBREVIATIONS
        .iter()
        .fold(text.to_string(), |acc, (unit, pattern)| {
            pattern.replace_all(&acc, *unit).into_owned()
        })
}
