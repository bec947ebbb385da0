use crate::model::Ingredient;
use std::collections::HashSet;

/// Best scores at or below this are not a match
pub const MATCH_THRESHOLD: f64 = 0.5;

/// Similarity of two "descriptors name" labels.
///
/// Identical labels score 2 and a label contained in the other scores 1.
/// Anything else scores the shared word count over one more than the longer
/// label's word count, which is always below 1. Empty labels score 0.
pub fn match_score(a: &str, b: &str) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }
    if a == b {
        return 2.0;
    }
    if a.contains(b) || b.contains(a) {
        return 1.0;
    }

    let words = |label: &str| -> HashSet<String> {
        label.split_whitespace().map(str::to_lowercase).collect()
    };
    let shared = words(a).intersection(&words(b)).count();
    let longest = a.split_whitespace().count().max(b.split_whitespace().count());
    shared as f64 / (longest + 1) as f64
}

/// Index of the ingredient whose label best matches `candidate`.
///
/// Ties keep the earliest ingredient.
pub fn find_best_ingredient(candidate: &str, ingredients: &[Ingredient]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, ingredient) in ingredients.iter().enumerate() {
        let score = match_score(candidate, &ingredient.label());
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.filter(|&(_, score)| score > MATCH_THRESHOLD)
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(descriptors: Option<&str>, name: &str) -> Ingredient {
        Ingredient {
            descriptors: descriptors.map(str::to_string),
            ..Ingredient::new(name)
        }
    }

    #[test]
    fn test_score_rules() {
        assert_eq!(match_score("olive oil", "olive oil"), 2.0);
        assert_eq!(match_score("oil", "olive oil"), 1.0);
        assert_eq!(match_score("red onion", "onion rings"), 1.0 / 3.0);
        assert_eq!(match_score("Red Onion", "red pepper flakes"), 1.0 / 4.0);
        assert_eq!(match_score("flour", "sugar"), 0.0);
        assert_eq!(match_score("", "sugar"), 0.0);
        assert_eq!(match_score("", ""), 0.0);
    }

    #[test]
    fn test_score_is_symmetric() {
        let labels = [
            "olive oil",
            "extra-virgin olive oil",
            "Olive Oil",
            "oil olive",
            "salt salt pepper",
            "black pepper",
            "",
        ];
        for a in labels {
            for b in labels {
                assert_eq!(match_score(a, b), match_score(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_fractional_scores_stay_below_one() {
        assert!(match_score("green bell pepper", "pepper bell green") < 1.0);
        assert!(match_score("a b c d", "d c b a") < 1.0);
    }

    #[test]
    fn test_best_ingredient() {
        let ingredients = vec![
            ingredient(Some("all-purpose"), "flour"),
            ingredient(None, "baking soda"),
            ingredient(None, "salt"),
        ];
        assert_eq!(find_best_ingredient("flour", &ingredients), Some(0));
        assert_eq!(find_best_ingredient("baking soda", &ingredients), Some(1));
        assert_eq!(find_best_ingredient("salt", &ingredients), Some(2));
        assert_eq!(find_best_ingredient("pepper", &ingredients), None);
        assert_eq!(find_best_ingredient("flour", &[]), None);
    }

    #[test]
    fn test_first_ingredient_wins_ties() {
        let ingredients = vec![
            ingredient(Some("brown"), "sugar"),
            ingredient(Some("white"), "sugar"),
        ];
        assert_eq!(find_best_ingredient("sugar", &ingredients), Some(0));
    }

    #[test]
    fn test_scores_at_threshold_do_not_match() {
        // one shared word out of two: 1 / 3
        let ingredients = vec![ingredient(Some("red"), "onion")];
        assert_eq!(find_best_ingredient("green onion", &ingredients), None);

        // case differs, so this is word overlap: 1 / 2
        let ingredients = vec![ingredient(None, "leeks")];
        assert_eq!(match_score("leeks", "Leeks"), 0.5);
        assert_eq!(find_best_ingredient("Leeks", &ingredients), None);
    }
}
