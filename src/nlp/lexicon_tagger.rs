use super::dependencies::{assign_dependencies, nominal_runs, sentence_ranges};
use super::{Dependency, PartOfSpeech, Tagger, Token};
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::LazyLock;

fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "a", "an", "the", "some", "any", "each", "every", "all", "this", "that", "these",
        "those", "another", "no", "both", "either", "neither", "few", "several", "many",
        "much", "more", "most", "enough", "your", "my", "its", "their", "our", "his", "her",
    ])
});

static PRONOUNS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "it", "them", "they", "you", "i", "we", "he", "she", "me", "us", "him", "itself",
        "themselves", "yourself", "everything", "something", "anything", "nothing", "what",
        "which", "who",
    ])
});

static ADPOSITIONS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "of", "in", "into", "on", "onto", "with", "without", "to", "for", "at", "from", "by",
        "over", "under", "about", "through", "throughout", "across", "between", "among",
        "around", "before", "after", "during", "per", "like", "off", "out", "up", "down",
        "than", "against", "along", "atop", "beside", "inside", "within", "toward", "towards",
        "upon", "via", "as",
    ])
});

static CONJUNCTIONS: LazyLock<HashSet<&str>> =
    LazyLock::new(|| word_set(&["and", "or", "but", "nor", "plus"]));

static SUBORDINATORS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "until", "while", "when", "if", "because", "once", "unless", "whether", "though",
        "although", "so", "till", "whenever",
    ])
});

static AUXILIARIES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "is", "are", "was", "were", "be", "been", "being", "am", "will", "would", "should",
        "can", "could", "may", "might", "must", "shall", "do", "does", "did", "has", "have",
        "had",
    ])
});

static PARTICLES: LazyLock<HashSet<&str>> = LazyLock::new(|| word_set(&["not", "n't", "'s"]));

static ADVERBS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "very", "well", "then", "again", "together", "also", "just", "too", "almost",
        "already", "still", "now", "here", "there", "aside", "away", "back", "even", "only",
        "often", "always", "never", "twice", "halfway", "meanwhile", "instead", "longer",
        "further", "overnight", "apart", "less", "soon", "lengthwise", "crosswise",
    ])
});

static NUMBER_WORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve",
    ])
});

static ADJECTIVES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "fresh", "large", "small", "medium", "big", "little", "whole", "extra", "virgin",
        "red", "green", "white", "black", "yellow", "orange", "purple", "hot", "cold",
        "lukewarm", "unsalted", "light", "dark", "sweet", "sour", "lean", "firm", "soft",
        "ripe", "raw", "plain", "heavy", "kosher", "clean", "fine", "coarse", "thick", "thin",
        "dry", "wet", "low", "high", "hard", "crisp", "crispy", "tender", "golden", "smooth",
        "mild", "spicy", "sharp", "optional", "additional", "remaining", "favorite", "organic",
        "instant", "quick", "long", "short", "new", "old", "bitter", "juicy", "flaky", "frozen",
        "semisweet", "bittersweet", "italian", "mexican", "greek", "french", "skim", "fat",
        "nonfat", "reduced", "regular", "double", "single", "equal", "separate", "shallow",
        "deep", "wide", "round", "square", "rectangular", "heatproof", "nonstick", "same",
        "other", "first", "second", "third", "last", "next", "few", "halved",
    ])
});

/// Base forms of instruction verbs
static VERBS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "add", "stir", "mix", "combine", "bake", "boil", "fry", "roast", "grill", "broil",
        "simmer", "saute", "sauté", "steam", "poach", "braise", "stew", "toast", "sear",
        "scramble", "barbecue", "microwave", "blanch", "caramelize", "cook", "heat", "preheat",
        "reheat", "place", "put", "pour", "whisk", "beat", "fold", "cut", "chop", "dice",
        "mince", "slice", "peel", "grate", "shred", "crush", "mash", "puree", "purée", "blend",
        "knead", "roll", "spread", "sprinkle", "drizzle", "season", "cover", "uncover",
        "remove", "drain", "rinse", "wash", "pat", "transfer", "serve", "garnish", "top",
        "reduce", "bring", "let", "allow", "set", "rest", "cool", "chill", "refrigerate",
        "freeze", "thaw", "melt", "soften", "whip", "coat", "dip", "dredge", "toss", "layer",
        "arrange", "line", "grease", "flip", "turn", "baste", "marinate", "brush", "squeeze",
        "strain", "sift", "measure", "prepare", "make", "use", "keep", "leave", "continue",
        "repeat", "return", "discard", "reserve", "divide", "form", "shape", "press", "wrap",
        "fill", "stuff", "spoon", "ladle", "scoop", "cube", "quarter", "halve", "trim",
        "devein", "skewer", "insert", "check", "taste", "adjust", "enjoy", "soak", "pulse",
        "process", "crumble", "open", "get", "give", "take", "shake", "swirl", "spray", "warm",
        "deglaze", "glaze", "bone", "skin", "debone", "pound", "tenderize", "smoke", "cure",
        "infuse", "dissolve", "wait", "watch", "lift", "invert", "stand", "begin", "start",
        "finish", "break", "crack", "separate", "scrape", "lower", "raise", "increase",
    ])
});

/// Verbs that are just as often nouns ("over medium heat", "reduce heat")
static NOUN_VERBS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "heat", "cover", "top", "season", "rest", "roll", "spread", "layer", "brush", "spoon",
        "taste", "quarter", "microwave", "whisk", "slice", "cool", "warm", "grill", "roast",
        "stew", "toast", "blend", "mix", "drizzle", "glaze", "coat", "cube", "puree", "press",
        "boil", "simmer", "steam", "line", "turn", "measure", "process", "pulse", "smoke",
        "skin", "bone", "form", "shape", "wrap", "fill", "stuff", "set", "pound", "spray",
    ])
});

static IRREGULAR_VERBS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("beaten", "beat"),
        ("brought", "bring"),
        ("left", "leave"),
        ("made", "make"),
        ("kept", "keep"),
        ("shaken", "shake"),
        ("broken", "break"),
        ("took", "take"),
        ("taken", "take"),
        ("given", "give"),
        ("got", "get"),
        ("stood", "stand"),
        ("began", "begin"),
        ("begun", "begin"),
    ]
    .into_iter()
    .collect()
});

static IRREGULAR_PLURALS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("leaves", "leaf"),
        ("halves", "half"),
        ("loaves", "loaf"),
        ("knives", "knife"),
        ("shelves", "shelf"),
        ("calves", "calf"),
        ("teeth", "tooth"),
        ("feet", "foot"),
        ("geese", "goose"),
        ("mice", "mouse"),
    ]
    .into_iter()
    .collect()
});

/// Words ending in "-ly" or "-ing" that are nouns
static NOUN_EXCEPTIONS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "jelly", "belly", "lily", "family", "pudding", "stuffing", "icing", "frosting",
        "dressing", "topping", "filling", "seasoning", "shortening", "string", "ring",
        "spring", "morning", "evening", "serving", "servings", "dumpling", "dumplings",
        "herring", "whiting", "lasagna", "half-and-half", "agar-agar",
    ])
});

/// Abbreviations that keep their trailing period
static ABBREVIATIONS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
    word_set(&[
        "tbsp", "tbsps", "tbs", "tbl", "tsp", "tsps", "oz", "lb", "lbs", "pkg", "pkgs", "qt",
        "qts", "pt", "pts", "gal", "doz", "fl", "lg", "sm", "med", "c", "t", "g", "kg", "ml",
        "mg", "min", "mins", "hr", "hrs", "sec", "deg", "approx", "env", "sq",
    ])
});

const OPENING: &[char] = &['(', '[', '{', '"', '\'', '\u{201c}', '\u{2018}'];
const CLOSING: &[char] = &[
    ')', ']', '}', '"', '\'', '\u{201d}', '\u{2019}', ',', ';', ':', '!', '?',
];

/// Rule-based English tagger backed by built-in word lists.
///
/// The offline fallback when no nlprule tokenizer is configured. It is
/// deterministic, so ingredient parsing stays reproducible;
/// [`RuleTagger`](super::RuleTagger) covers more vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }
}

impl Tagger for LexiconTagger {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let spans = split_tokens(text);
        let sentence_starts: HashSet<usize> = sentence_ranges(spans.iter().map(|&(_, t)| t))
            .into_iter()
            .map(|range| range.start)
            .collect();

        let mut tokens: Vec<Token> = Vec::with_capacity(spans.len());
        for (i, &(offset, word)) in spans.iter().enumerate() {
            let at_start = sentence_starts.contains(&i);
            let prev = if at_start {
                None
            } else {
                tokens.last().map(|t| t.pos)
            };
            let next = spans.get(i + 1).map(|&(_, t)| t);
            let (pos, lemma) = tag_word(word, at_start, prev, next);
            tokens.push(Token {
                text: word.to_string(),
                offset,
                lemma,
                pos,
                dep: Dependency::Dep,
                head: i,
                chunk: None,
            });
        }

        for range in self.sentences(&tokens) {
            assign_dependencies(&mut tokens, range);
        }
        tokens
    }

    fn sentences(&self, tokens: &[Token]) -> Vec<Range<usize>> {
        sentence_ranges(tokens.iter().map(|t| t.text.as_str()))
    }

    fn noun_chunks(&self, tokens: &[Token]) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        for sentence in self.sentences(tokens) {
            for run in nominal_runs(tokens, sentence) {
                let Some(last_noun) = run.clone().rev().find(|&i| tokens[i].pos.is_nominal())
                else {
                    continue;
                };
                // A determiner inside the run starts a fresh phrase ("all the flour")
                let start = run
                    .clone()
                    .take_while(|&i| i < last_noun)
                    .filter(|&i| tokens[i].pos == PartOfSpeech::Det)
                    .last()
                    .unwrap_or(run.start);
                chunks.push(tokens[start].offset..tokens[last_noun].end());
            }
        }
        chunks
    }
}

/// Split on whitespace, then peel opening and closing punctuation off each word.
fn split_tokens(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut word_start = None;
    for (i, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
        match (c.is_whitespace(), word_start) {
            (true, Some(start)) => {
                split_word(start, &text[start..i], &mut tokens);
                word_start = None;
            }
            (false, None) => word_start = Some(i),
            _ => {}
        }
    }
    tokens
}

fn split_word<'a>(mut offset: usize, mut word: &'a str, tokens: &mut Vec<(usize, &'a str)>) {
    while let Some(c) = word.chars().next() {
        if !OPENING.contains(&c) {
            break;
        }
        let len = c.len_utf8();
        tokens.push((offset, &word[..len]));
        offset += len;
        word = &word[len..];
    }

    let mut trailing = Vec::new();
    while let Some(c) = word.chars().next_back() {
        let cut = word.len() - c.len_utf8();
        let keep_period = c == '.' && {
            let core = &word[..cut];
            core.contains('.') || ABBREVIATIONS.contains(core.to_lowercase().as_str())
        };
        if !(CLOSING.contains(&c) || c == '.') || keep_period {
            break;
        }
        trailing.push((offset + cut, &word[cut..]));
        word = &word[..cut];
    }

    if !word.is_empty() {
        tokens.push((offset, word));
    }
    tokens.extend(trailing.into_iter().rev());
}

fn is_punct(word: &str) -> bool {
    word.chars()
        .all(|c| c.is_ascii_punctuation() || "\u{201c}\u{201d}\u{2018}\u{2019}\u{2013}\u{2014}\u{2026}\u{b0}".contains(c))
}

fn is_vulgar_fraction(c: char) -> bool {
    matches!(c, '\u{bc}'..='\u{be}' | '\u{2150}'..='\u{215e}')
}

fn is_number(word: &str) -> bool {
    let starts_numeric = word
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || is_vulgar_fraction(c) || c == '.');
    starts_numeric
        && word.chars().any(|c| c.is_ascii_digit() || is_vulgar_fraction(c))
        && word.chars().all(|c| {
            c.is_ascii_digit() || is_vulgar_fraction(c) || matches!(c, '/' | '.' | '-' | ',' | '\u{2044}')
        })
}

fn is_closed_class(lower: &str) -> bool {
    DETERMINERS.contains(lower)
        || PRONOUNS.contains(lower)
        || ADPOSITIONS.contains(lower)
        || CONJUNCTIONS.contains(lower)
        || SUBORDINATORS.contains(lower)
        || AUXILIARIES.contains(lower)
        || PARTICLES.contains(lower)
        || ADVERBS.contains(lower)
}

/// Whether the next word reads like the noun a gerund modifies ("baking soda")
fn looks_nominal(word: &str) -> bool {
    let lower = word.to_lowercase();
    lower.chars().all(|c| c.is_alphabetic() || c == '-')
        && !lower.is_empty()
        && !is_closed_class(&lower)
        && !lower.ends_with("ly")
        && !VERBS.contains(lower.as_str())
}

fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == b && !"aeiou".contains(a) => {
            Some(stem[..stem.len() - a.len_utf8()].to_string())
        }
        _ => None,
    }
}

/// Resolve an inflected form to a known verb
fn verb_lemma(lower: &str) -> Option<String> {
    if VERBS.contains(lower) {
        return Some(lower.to_string());
    }
    if let Some(base) = IRREGULAR_VERBS.get(lower) {
        return Some(base.to_string());
    }

    let mut candidates = Vec::new();
    for suffix in ["ied", "ies"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            candidates.push(format!("{stem}y"));
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            candidates.push(stem.to_string());
            candidates.push(format!("{stem}e"));
            candidates.extend(undouble(stem));
        }
    }
    for suffix in ["es", "s"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            candidates.push(stem.to_string());
        }
    }
    candidates
        .into_iter()
        .find(|candidate| VERBS.contains(candidate.as_str()))
}

fn singular(lower: &str) -> String {
    if let Some(base) = IRREGULAR_PLURALS.get(lower) {
        return base.to_string();
    }
    if NOUN_EXCEPTIONS.contains(lower) {
        return lower.to_string();
    }
    if let Some(stem) = lower.strip_suffix("ies").filter(|s| s.len() > 1) {
        return format!("{stem}y");
    }
    for suffix in ["oes", "ches", "shes", "xes", "sses", "zes"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            return format!("{stem}{}", &suffix[..suffix.len() - 2]);
        }
    }
    match lower.strip_suffix('s') {
        Some(stem) if stem.len() > 1 && !stem.ends_with(['s', 'u', 'i']) => stem.to_string(),
        _ => lower.to_string(),
    }
}

pub(super) fn tag_word(
    word: &str,
    at_start: bool,
    prev: Option<PartOfSpeech>,
    next: Option<&str>,
) -> (PartOfSpeech, String) {
    use PartOfSpeech::*;

    if is_punct(word) {
        let pos = if word == "&" { Cconj } else { Punct };
        return (pos, word.to_string());
    }
    let lower = word.to_lowercase();
    if is_number(word) || NUMBER_WORDS.contains(lower.as_str()) {
        return (Num, lower);
    }

    let closed = if DETERMINERS.contains(lower.as_str()) {
        Some(Det)
    } else if PRONOUNS.contains(lower.as_str()) {
        Some(Pron)
    } else if ADPOSITIONS.contains(lower.as_str()) {
        Some(Adp)
    } else if CONJUNCTIONS.contains(lower.as_str()) {
        Some(Cconj)
    } else if SUBORDINATORS.contains(lower.as_str()) {
        Some(Sconj)
    } else if PARTICLES.contains(lower.as_str()) {
        Some(Part)
    } else if AUXILIARIES.contains(lower.as_str()) {
        // "1 (15 ounce) can black beans"
        Some(if lower == "can" && matches!(prev, Some(Num | Punct | Adj)) {
            Noun
        } else {
            Aux
        })
    } else if ADVERBS.contains(lower.as_str()) {
        Some(Adv)
    } else {
        None
    };
    if let Some(pos) = closed {
        return (pos, lower);
    }

    if NOUN_EXCEPTIONS.contains(lower.as_str()) {
        return (Noun, singular(&lower));
    }

    if let Some(lemma) = verb_lemma(&lower) {
        if at_start {
            return (Verb, lemma);
        }
        let inflected = lemma != lower;
        let after_modifier = matches!(prev, Some(Det | Adj | Num));
        if inflected && lower.ends_with("ing") {
            if after_modifier || next.is_some_and(looks_nominal) {
                return (Noun, lower);
            }
            return (Verb, lemma);
        }
        if !inflected
            && (after_modifier
                || (NOUN_VERBS.contains(lower.as_str())
                    && matches!(prev, Some(Verb | Adp | Noun | Propn))))
        {
            return (Noun, singular(&lower));
        }
        return (Verb, lemma);
    }

    if ADJECTIVES.contains(lower.as_str()) {
        return (Adj, lower);
    }

    if let Some((prefix, last)) = lower.rsplit_once('-') {
        if let Some(lemma) = verb_lemma(last) {
            if at_start || matches!(prev, Some(Cconj | Adv | Punct) | None) {
                return (Verb, format!("{prefix}-{lemma}"));
            }
        }
        return (Adj, lower);
    }

    if lower.len() > 4 && lower.ends_with("ed") && !lower.ends_with("eed") {
        let stem = &lower[..lower.len() - 2];
        let lemma = undouble(stem).unwrap_or_else(|| stem.to_string());
        return (Verb, lemma);
    }
    if lower.len() > 3 && lower.ends_with("ly") {
        return (Adv, lower);
    }
    if lower.len() > 5 && lower.ends_with("less") {
        return (Adj, lower);
    }

    if !at_start && word.chars().next().is_some_and(char::is_uppercase) {
        return (Propn, word.to_string());
    }
    (Noun, singular(&lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn tags(tokens: &[Token]) -> Vec<PartOfSpeech> {
        tokens.iter().map(|t| t.pos).collect()
    }

    #[test]
    fn test_tokenize_ingredient_line() {
        let tokens = LexiconTagger.tokenize("2 1/2 tbsp. olive oil, chopped");
        assert_eq!(
            texts(&tokens),
            vec!["2", "1/2", "tbsp.", "olive", "oil", ",", "chopped"]
        );
        use PartOfSpeech::*;
        assert_eq!(tags(&tokens), vec![Num, Num, Noun, Noun, Noun, Punct, Verb]);
        assert_eq!(tokens[2].offset, 6);
        assert_eq!(tokens[6].lemma, "chop");
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "1 (8 ounce) package cream cheese";
        for token in LexiconTagger.tokenize(text) {
            assert_eq!(&text[token.offset..token.end()], token.text);
        }
    }

    #[test]
    fn test_sentence_final_period_is_split() {
        let tokens = LexiconTagger.tokenize("Bake the bread. Serve warm.");
        assert_eq!(
            texts(&tokens),
            vec!["Bake", "the", "bread", ".", "Serve", "warm", "."]
        );
        assert_eq!(LexiconTagger.sentences(&tokens), vec![0..4, 4..7]);
    }

    #[test]
    fn test_imperative_verbs_and_roots() {
        let tokens = LexiconTagger.tokenize("Add the chicken and stir");
        use PartOfSpeech::*;
        assert_eq!(tags(&tokens), vec![Verb, Det, Noun, Cconj, Verb]);
        assert!(tokens[0].is_root());
        assert_eq!(tokens[2].head, 0);
        assert_eq!(tokens[4].lemma, "stir");
        assert_eq!(tokens.iter().filter(|t| t.is_root()).count(), 1);
    }

    #[test]
    fn test_noun_verb_ambiguity() {
        let tokens = LexiconTagger.tokenize("Reduce heat and cook over medium heat");
        assert_eq!(tokens[1].pos, PartOfSpeech::Noun);
        assert_eq!(tokens[3].pos, PartOfSpeech::Verb);
        assert_eq!(tokens[6].pos, PartOfSpeech::Noun);
    }

    #[test]
    fn test_gerund_modifiers_are_nouns() {
        let tokens = LexiconTagger.tokenize("Grease a baking dish, then add baking soda");
        assert_eq!(tokens[2].pos, PartOfSpeech::Noun);
        assert_eq!(tokens[7].pos, PartOfSpeech::Noun);
        assert_eq!(tokens[7].text, "baking");
    }

    #[test]
    fn test_listed_nouns_attach_leftward() {
        let tokens = LexiconTagger.tokenize("salt, pepper");
        assert_eq!(tokens[0].dep, Dependency::Root);
        assert_eq!(tokens[2].head, 0);
        assert_eq!(tokens[2].dep, Dependency::Conj);
    }

    #[test]
    fn test_noun_chunks() {
        let text = "In a large bowl, whisk together flour, baking soda and all the salt.";
        let tokens = LexiconTagger.tokenize(text);
        let chunks: Vec<&str> = LexiconTagger
            .noun_chunks(&tokens)
            .into_iter()
            .map(|range| &text[range])
            .collect();
        assert_eq!(
            chunks,
            vec!["a large bowl", "flour", "baking soda", "the salt"]
        );
    }

    #[test]
    fn test_lemmas() {
        assert_eq!(verb_lemma("stirring").as_deref(), Some("stir"));
        assert_eq!(verb_lemma("baked").as_deref(), Some("bake"));
        assert_eq!(verb_lemma("fried").as_deref(), Some("fry"));
        assert_eq!(verb_lemma("tosses").as_deref(), Some("toss"));
        assert_eq!(verb_lemma("tomato"), None);
        assert_eq!(singular("tomatoes"), "tomato");
        assert_eq!(singular("berries"), "berry");
        assert_eq!(singular("leaves"), "leaf");
        assert_eq!(singular("peaches"), "peach");
        assert_eq!(singular("couscous"), "couscous");
        assert_eq!(singular("glass"), "glass");
    }

    #[test]
    fn test_numbers() {
        assert!(is_number("2"));
        assert!(is_number("1/2"));
        assert!(is_number("½"));
        assert!(is_number("1.5"));
        assert!(!is_number("tbsp."));
        assert!(!is_number("-"));
    }
}
