//! WordNet-style morphological reduction ("tomatoes" -> "tomato").

use super::WordClass;
use std::collections::HashMap;

/// Irregular inflections mapped to their base forms
pub type Exceptions = HashMap<String, Vec<String>>;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

/// Normalize a surface word into lookup form: lower case, no trailing
/// period, spaces as underscores.
pub fn normalize(word: &str) -> String {
    word.trim()
        .trim_end_matches('.')
        .to_lowercase()
        .replace(' ', "_")
}

/// Every base form of `word` that `exists` accepts, in priority order.
///
/// Exceptions win outright. Otherwise the word itself and its singly-reduced
/// forms are tried, then reduction is repeated until something matches.
pub fn base_forms(
    word: &str,
    class: WordClass,
    exceptions: Option<&Exceptions>,
    exists: impl Fn(&str) -> bool,
) -> Vec<String> {
    let form = normalize(word);
    if form.is_empty() {
        return Vec::new();
    }

    let keep = |forms: Vec<String>| {
        let mut found: Vec<String> = Vec::new();
        for form in forms {
            if exists(&form) && !found.contains(&form) {
                found.push(form);
            }
        }
        found
    };

    if let Some(bases) = exceptions.and_then(|exc| exc.get(&form)) {
        let mut forms = vec![form.clone()];
        forms.extend(bases.iter().cloned());
        return keep(forms);
    }

    let rules = match class {
        WordClass::Noun => NOUN_RULES,
        WordClass::Verb => VERB_RULES,
    };
    let reduce = |forms: &[String]| -> Vec<String> {
        forms
            .iter()
            .flat_map(|form| {
                rules.iter().filter_map(move |(old, new)| {
                    form.strip_suffix(old).map(|stem| format!("{stem}{new}"))
                })
            })
            .filter(|form| !form.is_empty())
            .collect()
    };

    let mut forms = reduce(std::slice::from_ref(&form));
    let mut candidates = vec![form];
    candidates.extend(forms.iter().cloned());
    let found = keep(candidates);
    if !found.is_empty() {
        return found;
    }

    // Two further passes cover stacked suffixes; inputs are single words
    for _ in 0..2 {
        forms = reduce(&forms);
        if forms.is_empty() {
            break;
        }
        let found = keep(forms.clone());
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}
