//! Handle pattern (§4.6): templated-looking usernames, detected via shared
//! stems and character-class "shapes" across actors.

use std::collections::HashMap;

use sybil_types::Event;

fn normalize(handle: &str) -> String {
    handle.trim().to_lowercase()
}

/// Strips non-alphanumerics, then strips trailing digits.
fn stem(normalized: &str) -> String {
    let alnum: String = normalized.chars().filter(|c| c.is_alphanumeric()).collect();
    alnum.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}

/// Letters collapse to `a`, digits to `d`, any other run collapses to one `_`.
fn shape(normalized: &str) -> String {
    let mut out = String::new();
    let mut in_other_run = false;
    for c in normalized.chars() {
        if c.is_alphabetic() {
            out.push('a');
            in_other_run = false;
        } else if c.is_ascii_digit() {
            out.push('d');
            in_other_run = false;
        } else if !in_other_run {
            out.push('_');
            in_other_run = true;
        }
    }
    out
}

fn trailing_digit_run(normalized: &str) -> usize {
    let alnum: String = normalized.chars().filter(|c| c.is_alphanumeric()).collect();
    alnum.chars().rev().take_while(|c| c.is_ascii_digit()).count()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HandleStats {
    pub handle_pattern_score: f64,
}

pub fn compute(logs: &[Event]) -> HashMap<String, HandleStats> {
    let actors: Vec<&str> = {
        let mut seen = std::collections::HashSet::new();
        logs.iter()
            .map(|e| e.actor.as_str())
            .filter(|a| seen.insert(*a))
            .collect()
    };

    let normalized: HashMap<&str, String> =
        actors.iter().map(|&a| (a, normalize(a))).collect();
    let stems: HashMap<&str, String> =
        normalized.iter().map(|(&a, n)| (a, stem(n))).collect();
    let shapes: HashMap<&str, String> =
        normalized.iter().map(|(&a, n)| (a, shape(n))).collect();

    let mut stem_counts: HashMap<&str, u64> = HashMap::new();
    for s in stems.values() {
        *stem_counts.entry(s.as_str()).or_insert(0) += 1;
    }
    let mut shape_counts: HashMap<&str, u64> = HashMap::new();
    for s in shapes.values() {
        *shape_counts.entry(s.as_str()).or_insert(0) += 1;
    }

    actors
        .into_iter()
        .map(|actor| {
            let n = &normalized[actor];
            let stem_count = stem_counts.get(stems[actor].as_str()).copied().unwrap_or(1);
            let shape_count = shape_counts.get(shapes[actor].as_str()).copied().unwrap_or(1);
            let stem_score = (((stem_count as f64) - 1.0) / 10.0).clamp(0.0, 1.0);
            let shape_score = (((shape_count as f64) - 1.0) / 20.0).clamp(0.0, 1.0);
            let numeric_suffix_score = if trailing_digit_run(n) >= 3 { 0.4 } else { 0.0 };
            let score = (0.5 * stem_score + 0.3 * shape_score + numeric_suffix_score).clamp(0.0, 1.0);
            (
                actor.to_string(),
                HandleStats {
                    handle_pattern_score: score,
                },
            )
        })
        .collect()
}
