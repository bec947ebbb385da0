use super::RecipeParser;
use crate::model::Ingredient;
use crate::nlp::{PartOfSpeech, Token};
use crate::quantity::parse_quantity;
use log::debug;
use num_traits::Zero;

/// Characters trimmed off the end of a name that stops mid-line
const NAME_TRIM: &[char] = &[',', ';', ':', '.', '-'];

impl RecipeParser {
    /// Segment an ingredient line into quantity, unit, descriptors, name and
    /// preparation.
    ///
    /// Returns `None` when no word of the name is a food, e.g. for
    /// "a clean bowl" or decorative lines scraped along with the list.
    pub fn parse_ingredient(&self, line: &str) -> Option<Ingredient> {
        let text = line.trim();
        if text.is_empty() {
            return None;
        }
        let tokens = self.tagger.tokenize(text);

        // Quantity: leading run of numeric tokens
        let quantity_end = tokens
            .iter()
            .take_while(|token| !parse_quantity(&token.text).is_zero())
            .count();
        let quantity = (quantity_end > 0)
            .then(|| parse_quantity(&text[tokens[0].offset..tokens[quantity_end - 1].end()]));

        // Unit: first depth-0 token after the quantity, if it is a measure.
        // Parenthesized asides such as "(8 ounce)" are stepped over.
        let mut boundary = quantity_end;
        let mut unit = None;
        let mut depth = 0usize;
        for (i, token) in tokens.iter().enumerate().skip(quantity_end) {
            match token.text.as_str() {
                "(" => depth += 1,
                ")" => depth = depth.saturating_sub(1),
                _ if depth > 0 => {}
                _ => {
                    if self.classifier.is_measure(&token.text) {
                        unit = Some(token.text.clone());
                        boundary = i + 1;
                        if tokens.get(boundary).is_some_and(|t| t.text.eq_ignore_ascii_case("of")) {
                            boundary += 1;
                        }
                    }
                    break;
                }
            }
        }

        // Descriptors: everything up to the first depth-0 noun
        let mut depth = 0usize;
        let first_noun = (boundary..tokens.len()).find(|&i| {
            match tokens[i].text.as_str() {
                "(" => depth += 1,
                ")" => depth = depth.saturating_sub(1),
                _ => {}
            }
            depth == 0 && tokens[i].pos.is_nominal()
        });
        let offset_of = |i: usize| tokens.get(i).map_or(text.len(), |t| t.offset);
        let (descriptors, name_start) = match first_noun {
            Some(noun) => (non_empty(&text[offset_of(boundary)..offset_of(noun)]), noun),
            None => (None, boundary),
        };

        let (stop, is_food) = self.scan_name(&tokens, name_start);
        let cut = stop.map_or(text.len(), offset_of);
        let name = text[offset_of(name_start)..cut]
            .trim_end_matches(|c: char| c.is_whitespace() || NAME_TRIM.contains(&c))
            .trim();
        let preparation = non_empty(&text[cut..]);

        if !is_food || name.is_empty() {
            debug!("No food found in {text:?}");
            return None;
        }
        debug!(
            "Parsed {text:?}: quantity={quantity:?} unit={unit:?} descriptors={descriptors:?} name={name:?} preparation={preparation:?}"
        );
        Some(Ingredient {
            name: name.to_string(),
            quantity,
            unit,
            descriptors,
            preparation,
            used: Default::default(),
        })
    }

    /// Extend the name over nouns, adjectives, the root and commas.
    ///
    /// After a comma the next word must be a noun or adjective that does not
    /// attach to an earlier word, otherwise the list has turned into a
    /// preparation note ("onion, chopped"). Returns the index the name stops
    /// at and whether any word in it is a food.
    fn scan_name(&self, tokens: &[Token], start: usize) -> (Option<usize>, bool) {
        let mut depth = 0usize;
        let mut after_comma = false;
        let mut is_food = false;

        for (i, token) in tokens.iter().enumerate().skip(start) {
            match token.text.as_str() {
                "(" => {
                    depth += 1;
                    continue;
                }
                ")" => {
                    depth = depth.saturating_sub(1);
                    continue;
                }
                _ if depth > 0 => continue,
                _ => {}
            }

            let is_comma = token.text == ",";
            let descriptive = token.pos.is_nominal() || token.pos == PartOfSpeech::Adj;
            if after_comma && (is_comma || !descriptive || token.head < i) {
                return (Some(i), is_food);
            }
            after_comma = false;
            if !(descriptive || token.is_root() || is_comma) {
                return (Some(i), is_food);
            }

            if is_comma {
                after_comma = true;
            } else if token.pos != PartOfSpeech::Punct && self.classifier.is_food(&token.text) {
                is_food = true;
            }
        }
        (None, is_food)
    }
}

fn non_empty(span: &str) -> Option<String> {
    let span = span.trim();
    (!span.is_empty()).then(|| span.to_string())
}
