//! Glob matching for tag names.
//!
//! `*` matches any run of characters (including none), `?` matches exactly
//! one character, and every other character matches itself. Matching is
//! anchored at both ends and case-sensitive.

/// A glob pattern compiled once and matched against many tag names.
#[derive(Debug, Clone)]
pub struct TagPattern {
    chars: Vec<char>,
    has_wildcards: bool,
}

impl TagPattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            has_wildcards: pattern.contains('*') || pattern.contains('?'),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        if !self.has_wildcards {
            return self.chars.iter().copied().eq(candidate.chars());
        }
        wildcard_matches(&self.chars, candidate)
    }
}

fn wildcard_matches(pattern: &[char], candidate: &str) -> bool {
    let candidate_chars = candidate.chars().collect::<Vec<_>>();

    let mut pattern_index = 0usize;
    let mut candidate_index = 0usize;
    let mut star_index: Option<usize> = None;
    let mut star_candidate_index = 0usize;

    while candidate_index < candidate_chars.len() {
        if pattern_index < pattern.len()
            && pattern[pattern_index] != '*'
            && (pattern[pattern_index] == '?'
                || pattern[pattern_index] == candidate_chars[candidate_index])
        {
            pattern_index += 1;
            candidate_index += 1;
            continue;
        }

        if pattern_index < pattern.len() && pattern[pattern_index] == '*' {
            star_index = Some(pattern_index);
            pattern_index += 1;
            star_candidate_index = candidate_index;
            continue;
        }

        if let Some(last_star_index) = star_index {
            pattern_index = last_star_index + 1;
            star_candidate_index += 1;
            candidate_index = star_candidate_index;
            continue;
        }

        return false;
    }

    while pattern_index < pattern.len() && pattern[pattern_index] == '*' {
        pattern_index += 1;
    }

    pattern_index == pattern.len()
}
