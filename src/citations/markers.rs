//! Recognition of parenthesized paragraph markers such as `(a)(4)(iii)`.
//!
//! Each nesting depth has its own alphabet. The table follows the CFR
//! paragraph convention: lowercase letters, digits, lowercase roman numerals,
//! uppercase letters, then the two italic levels (digits, roman numerals).
//! Runs never go deeper than the table.
//!
//! Depths 4 and 5 follow the Federal Register italic convention; a
//! `max_marker_depth` of 4 keeps only the four levels shared by all CFR text.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Lower,
    Digit,
    Roman,
    Upper,
}

/// Alphabet used at each depth, indexed by depth.
pub const MARKER_TABLE: [MarkerKind; 6] = [
    MarkerKind::Lower,
    MarkerKind::Digit,
    MarkerKind::Roman,
    MarkerKind::Upper,
    MarkerKind::Digit,
    MarkerKind::Roman,
];

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([0-9A-Za-z]{1,7})\)").expect("MARKER_RE should compile"));
static ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:x{0,3})(?:ix|iv|v?i{0,3})$").expect("ROMAN_RE should compile")
});

impl MarkerKind {
    pub fn accepts(self, token: &str) -> bool {
        match self {
            MarkerKind::Lower => is_letter_marker(token, |c| c.is_ascii_lowercase()),
            MarkerKind::Upper => is_letter_marker(token, |c| c.is_ascii_uppercase()),
            MarkerKind::Digit => {
                !token.is_empty() && token.len() <= 3 && token.bytes().all(|b| b.is_ascii_digit())
            }
            MarkerKind::Roman => !token.is_empty() && ROMAN_RE.is_match(token),
        }
    }
}

/// `a`, `z`, and doubled letters past `z` such as `aa`.
fn is_letter_marker(token: &str, class: impl Fn(char) -> bool) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), None, _) => class(first),
        (Some(first), Some(second), None) => class(first) && first == second,
        _ => false,
    }
}

/// A contiguous run of markers found at a fixed offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerRun {
    pub parts: Vec<String>,
    /// Depth of the first part.
    pub depth: usize,
    pub start: usize,
    pub end: usize,
}

impl MarkerRun {
    fn empty(start: usize, depth: usize) -> Self {
        Self {
            parts: Vec::new(),
            depth,
            start,
            end: start,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Depth of the last part.
    pub fn last_depth(&self) -> usize {
        self.depth + self.parts.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkerGrammar {
    max_depth: usize,
}

impl Default for MarkerGrammar {
    fn default() -> Self {
        Self {
            max_depth: MARKER_TABLE.len(),
        }
    }
}

impl MarkerGrammar {
    /// Limit runs to `max_depth` levels (clamped to the table size).
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.clamp(1, MARKER_TABLE.len()),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn kind_at(&self, depth: usize) -> Option<MarkerKind> {
        if depth >= self.max_depth {
            return None;
        }
        MARKER_TABLE.get(depth).copied()
    }

    /// A single `(token)` at `start` valid for `depth`; returns the token and
    /// the offset just past the closing parenthesis.
    pub fn marker_at(&self, text: &str, start: usize, depth: usize) -> Option<(String, usize)> {
        let kind = self.kind_at(depth)?;
        let rest = text.get(start..)?;
        let caps = MARKER_RE.captures(rest)?;
        let token = caps.get(1)?.as_str();
        if !kind.accepts(token) {
            return None;
        }
        Some((token.to_string(), start + caps.get(0)?.end()))
    }

    pub fn recognize_run(&self, text: &str, start: usize) -> MarkerRun {
        self.recognize_run_at_depth(text, start, 0)
    }

    /// Longest run starting exactly at `start` whose first marker sits at
    /// `depth`. One space is allowed between markers when a valid marker
    /// follows it.
    pub fn recognize_run_at_depth(&self, text: &str, start: usize, depth: usize) -> MarkerRun {
        let mut run = MarkerRun::empty(start, depth);
        let mut pos = start;
        let mut current = depth;

        loop {
            let next = self.marker_at(text, pos, current).or_else(|| {
                if run.is_empty() || !text[pos..].starts_with(' ') {
                    return None;
                }
                self.marker_at(text, pos + 1, current)
            });
            match next {
                Some((token, end)) => {
                    run.parts.push(token);
                    run.end = end;
                    pos = end;
                    current += 1;
                }
                None => break,
            }
        }

        run
    }

    /// Run for an enumerated list element following a run whose last marker
    /// sat at `deepest`. Start depths are tried from `deepest` up towards the
    /// top so `(iii)` after `(ii)` stays a roman numeral while `(d)` after
    /// `(a)(1)` is read as a letter.
    pub fn recognize_element(&self, text: &str, start: usize, deepest: usize) -> Option<MarkerRun> {
        (0..=deepest)
            .rev()
            .map(|depth| self.recognize_run_at_depth(text, start, depth))
            .find(|run| !run.is_empty())
    }
}

/// Marker run at `start` using the full depth table.
pub fn recognize_run(text: &str, start: usize) -> MarkerRun {
    MarkerGrammar::default().recognize_run(text, start)
}
