//! Rule-based dependency heads and sentence splitting shared by the taggers.

use super::{Dependency, PartOfSpeech, Token};
use std::ops::Range;

const SENTENCE_END: &[&str] = &[".", "!", "?"];

pub(super) fn sentence_ranges<'a>(texts: impl Iterator<Item = &'a str>) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut len = 0;
    for (i, text) in texts.enumerate() {
        len = i + 1;
        if SENTENCE_END.contains(&text) {
            ranges.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < len {
        ranges.push(start..len);
    }
    ranges
}

/// Maximal runs of determiners, numbers, adjectives and nouns within `range`
pub(super) fn nominal_runs(tokens: &[Token], range: Range<usize>) -> Vec<Range<usize>> {
    use PartOfSpeech::*;

    let in_run = |pos: PartOfSpeech| matches!(pos, Det | Num | Adj | Noun | Propn);
    let mut runs = Vec::new();
    let mut start = None;
    for i in range.clone() {
        match (in_run(tokens[i].pos), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..range.end);
    }
    runs
}

fn run_head(tokens: &[Token], run: &Range<usize>) -> usize {
    run.clone()
        .rev()
        .find(|&i| tokens[i].pos.is_nominal())
        .unwrap_or(run.end - 1)
}

/// Attach every token of one sentence to a head, with exactly one root.
pub(super) fn assign_dependencies(tokens: &mut [Token], sentence: Range<usize>) {
    use PartOfSpeech::*;

    if sentence.is_empty() {
        return;
    }
    let runs = nominal_runs(tokens, sentence.clone());
    let heads: Vec<usize> = runs.iter().map(|run| run_head(tokens, run)).collect();
    let run_of = |i: usize| runs.iter().position(|run| run.contains(&i));

    let root = if tokens[sentence.start].pos == Verb {
        sentence.start
    } else if let Some(k) = runs
        .iter()
        .position(|run| run.clone().any(|i| tokens[i].pos.is_nominal()))
    {
        heads[k]
    } else {
        sentence
            .clone()
            .find(|&i| tokens[i].pos == Verb)
            .unwrap_or(sentence.start)
    };

    let nearest_before = |i: usize, accept: &dyn Fn(usize) -> bool| {
        (sentence.start..i).rev().find(|&j| accept(j))
    };
    let is_anchor = |j: usize| tokens[j].pos == Verb || heads.contains(&j);

    let mut links = Vec::with_capacity(sentence.len());
    for i in sentence.clone() {
        if i == root {
            links.push((i, Dependency::Root));
            continue;
        }
        let pos = tokens[i].pos;
        let link = if let Some(k) = run_of(i) {
            if i != heads[k] {
                let dep = match pos {
                    Det => Dependency::Det,
                    Num => Dependency::Nummod,
                    Adj => Dependency::Amod,
                    _ => Dependency::Compound,
                };
                (heads[k], dep)
            } else {
                let before = runs[k].start.checked_sub(1).filter(|&p| p >= sentence.start);
                match before.map(|p| (p, tokens[p].pos, tokens[p].text.as_str())) {
                    Some((p, Adp, _)) => (p, Dependency::Pobj),
                    Some((p, Verb, _)) => (p, Dependency::Dobj),
                    Some((p, Cconj, _)) | Some((p, Punct, ",")) => {
                        match heads[..k].last().filter(|&&h| h < p) {
                            Some(&h) => (h, Dependency::Conj),
                            None => (root, Dependency::Dobj),
                        }
                    }
                    _ => (root, Dependency::Dep),
                }
            }
        } else {
            match pos {
                Adp => (
                    nearest_before(i, &is_anchor).unwrap_or(root),
                    Dependency::Prep,
                ),
                Cconj => (nearest_before(i, &is_anchor).unwrap_or(root), Dependency::Cc),
                Punct => (if i > sentence.start { i - 1 } else { root }, Dependency::Punct),
                Verb => {
                    let next_run = runs.iter().position(|run| run.start == i + 1);
                    let prev_noun = nearest_before(i, &|j| tokens[j].pos != Punct)
                        .filter(|&j| tokens[j].pos.is_nominal());
                    match (next_run, prev_noun) {
                        (Some(k), _) if tokens[heads[k]].pos.is_nominal() => {
                            (heads[k], Dependency::Amod)
                        }
                        (_, Some(j)) => (j, Dependency::Amod),
                        _ => (root, Dependency::Conj),
                    }
                }
                Adv => (
                    nearest_before(i, &|j| tokens[j].pos == Verb).unwrap_or(root),
                    Dependency::Advmod,
                ),
                Aux => (root, Dependency::Aux),
                _ => (root, Dependency::Dep),
            }
        };
        links.push(link);
    }

    for (i, (head, dep)) in sentence.zip(links) {
        tokens[i].head = head;
        tokens[i].dep = dep;
    }
}
