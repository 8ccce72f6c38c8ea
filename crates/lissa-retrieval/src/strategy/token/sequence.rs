//! Greedy longest-first matching of two token sequences.

/// A matched run of `frame_length` equal tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub pattern_start: usize,
    pub search_start: usize,
    pub frame_length: usize,
}

/// Outcome of comparing two token sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceAnalysis {
    pub score: f64,
    pub matches: Vec<Match>,
}

/// Compares `sequence` with `other`.
///
/// The shorter sequence is the pattern (ties make `sequence` the pattern).
/// Frames shrink from the pattern length down to `minimum_match_length`; at
/// each length every pattern/search offset pair is tried in order. A frame
/// matches when all its tokens are equal ignoring case and none of them
/// belongs to an earlier match. Each match adds `frame_length^exponent`.
pub fn analyze(
    sequence: &[String],
    other: &[String],
    minimum_match_length: usize,
    exponent: f64,
) -> SequenceAnalysis {
    let (search, pattern) = if sequence.len() > other.len() {
        (lowercase(sequence), lowercase(other))
    } else {
        (lowercase(other), lowercase(sequence))
    };

    let mut matched_search = vec![false; search.len()];
    let mut matched_pattern = vec![false; pattern.len()];
    let mut analysis = SequenceAnalysis {
        score: 0.0,
        matches: Vec::new(),
    };

    let minimum = minimum_match_length.max(1);
    let mut frame = pattern.len();
    while frame >= minimum {
        for pattern_start in 0..=(pattern.len() - frame) {
            for search_start in 0..=(search.len() - frame) {
                let matches = (0..frame).all(|i| {
                    !matched_search[search_start + i]
                        && !matched_pattern[pattern_start + i]
                        && search[search_start + i] == pattern[pattern_start + i]
                });
                if !matches {
                    continue;
                }
                analysis.score += (frame as f64).powf(exponent);
                analysis.matches.push(Match {
                    pattern_start,
                    search_start,
                    frame_length: frame,
                });
                matched_search[search_start..search_start + frame].fill(true);
                matched_pattern[pattern_start..pattern_start + frame].fill(true);
            }
        }
        frame -= 1;
    }
    analysis
}

fn lowercase(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| t.to_lowercase()).collect()
}
