use crate::entry::{ElementEmbedding, ScoredElement};

/// Number of query words (split on runs of non-word characters) that occur
/// anywhere in the lowercased candidate content.
pub(crate) fn score(query: &ElementEmbedding, candidates: &[ElementEmbedding]) -> Vec<ScoredElement> {
    let words: Vec<String> = query
        .element
        .content()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    candidates
        .iter()
        .map(|candidate| {
            let content = candidate.element.content().to_lowercase();
            let hits = words.iter().filter(|w| content.contains(w.as_str())).count();
            (candidate.element.clone(), hits as f32)
        })
        .collect()
}
