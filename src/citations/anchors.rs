use crate::citations::markers::{MarkerGrammar, MarkerRun};
use crate::config::ScannerConfig;
use crate::types::INTERP_MARK;
use regex::Regex;
use std::sync::LazyLock;

static SECTION_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)").expect("SECTION_NUMBER_RE should compile")
});
static APPENDIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])-(\d+)").expect("APPENDIX_RE should compile"));
static COMMENT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+").expect("COMMENT_NUMBER_RE should compile"));
static SUB_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-(\d+)").expect("SUB_COMMENT_RE should compile"));
static SUB_PART_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.([ivx]+|\d+)").expect("SUB_PART_RE should compile"));
static OF_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ of (?:§|[Ss]ection) ?(\d+)\.(\d+)").expect("OF_SECTION_RE should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Section,
    Appendix,
    Comment,
    Paragraph,
}

/// Order in which anchors are tried at each offset, most specific first.
pub const ANCHOR_ORDER: [AnchorKind; 4] = [
    AnchorKind::Section,
    AnchorKind::Appendix,
    AnchorKind::Comment,
    AnchorKind::Paragraph,
];

/// Hierarchical location of the text being scanned.
#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    /// Regulation part, e.g. "1005".
    pub part: Option<String>,
    /// Part and section, e.g. ["1005", "6"].
    pub section: Option<Vec<String>>,
}

impl ScanContext {
    pub fn new(context: &[String]) -> Self {
        let end = context
            .iter()
            .position(|p| p == INTERP_MARK)
            .unwrap_or(context.len());
        let regulatory = &context[..end];
        Self {
            part: regulatory.first().cloned(),
            section: (regulatory.len() >= 2).then(|| regulatory[..2].to_vec()),
        }
    }
}

/// An anchor plus the marker run attached to it.
#[derive(Debug, Clone)]
pub struct AnchorMatch {
    pub kind: AnchorKind,
    /// Parts before the run; `None` when the context cannot resolve them.
    pub prefix: Option<Vec<String>>,
    pub run: MarkerRun,
    /// Parts after the run (interpretation mark and sub-comment numbers).
    pub suffix: Vec<String>,
    pub span: (usize, usize),
}

impl AnchorMatch {
    pub fn citation(&self) -> Option<Vec<String>> {
        let mut parts = self.prefix.clone()?;
        parts.extend(self.run.parts.iter().cloned());
        parts.extend(self.suffix.iter().cloned());
        Some(parts)
    }
}

/// Keyword lists sorted longest first so "paragraphs" wins over "paragraph".
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub paragraph: Vec<String>,
    pub comment: Vec<String>,
    pub section: Vec<String>,
    pub separators: Vec<String>,
}

impl Vocabulary {
    pub fn from_config(config: &ScannerConfig) -> Self {
        let sorted = |words: &[String]| -> Vec<String> {
            let mut words = words.to_vec();
            words.sort_by(|a, b| b.len().cmp(&a.len()));
            words
        };
        Self {
            paragraph: sorted(&config.paragraph_keywords),
            comment: sorted(&config.comment_keywords),
            section: sorted(&config.section_keywords),
            separators: sorted(&config.separators),
        }
    }

    pub fn separator_at(&self, text: &str, pos: usize) -> Option<usize> {
        let rest = text.get(pos..)?;
        self.separators
            .iter()
            .find(|sep| rest.starts_with(sep.as_str()))
            .map(|sep| pos + sep.len())
    }
}

fn prev_char(text: &str, pos: usize) -> Option<char> {
    text[..pos].chars().next_back()
}

fn next_char(text: &str, pos: usize) -> Option<char> {
    text[pos..].chars().next()
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric())
}

fn skip_whitespace(text: &str, pos: usize) -> usize {
    let rest = &text[pos..];
    pos + (rest.len() - rest.trim_start().len())
}

/// A number such as `1005.6` must not be part of a longer token.
fn number_starts_here(text: &str, pos: usize) -> bool {
    !matches!(prev_char(text, pos), Some(c) if c.is_alphanumeric() || c == '.' || c == '-')
}

fn number_continues(text: &str, end: usize) -> bool {
    let rest = &text[end..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// End offset of a keyword at `pos`, compared case-insensitively and bounded
/// on both sides when the keyword is a word.
fn keyword_at(text: &str, pos: usize, keywords: &[String]) -> Option<usize> {
    keywords.iter().find_map(|keyword| {
        let end = pos + keyword.len();
        let candidate = text.get(pos..end)?;
        if !candidate.eq_ignore_ascii_case(keyword) {
            return None;
        }
        let wordy_start = keyword.chars().next().is_some_and(|c| c.is_alphanumeric());
        let wordy_end = keyword.chars().next_back().is_some_and(|c| c.is_alphanumeric());
        if wordy_start && is_word_char(prev_char(text, pos)) {
            return None;
        }
        if wordy_end && is_word_char(next_char(text, end)) {
            return None;
        }
        Some(end)
    })
}

/// Marker run right after `pos`, allowing a single separating space.
fn run_after(grammar: &MarkerGrammar, text: &str, pos: usize) -> MarkerRun {
    let run = grammar.recognize_run(text, pos);
    if run.is_empty() && text[pos..].starts_with(' ') {
        return grammar.recognize_run(text, pos + 1);
    }
    run
}

/// `§ 1005.6(b)`, `Section 222.87(d)(2)`, or a bare `1005.11 (b)(1)`.
/// Without a leading keyword a marker run is required.
pub fn match_section(
    text: &str,
    pos: usize,
    vocab: &Vocabulary,
    grammar: &MarkerGrammar,
) -> Option<AnchorMatch> {
    let (number_start, has_keyword) = match keyword_at(text, pos, &vocab.section) {
        Some(end) => (skip_whitespace(text, end), true),
        None => (pos, false),
    };
    if !has_keyword && !number_starts_here(text, pos) {
        return None;
    }

    let anchor = section_at(text, number_start, grammar)?;
    if anchor.run.is_empty() && !has_keyword {
        return None;
    }
    Some(anchor)
}

/// `1005.7` or `1005.8(b)` continuing a `§§` list; no marker run is needed.
pub fn match_listed_section(text: &str, pos: usize, grammar: &MarkerGrammar) -> Option<AnchorMatch> {
    if !number_starts_here(text, pos) {
        return None;
    }
    section_at(text, pos, grammar)
}

fn section_at(text: &str, number_start: usize, grammar: &MarkerGrammar) -> Option<AnchorMatch> {
    let caps = SECTION_NUMBER_RE.captures(&text[number_start..])?;
    let number_end = number_start + caps.get(0)?.end();
    if number_continues(text, number_end) {
        return None;
    }

    let run = run_after(grammar, text, number_end);
    let end = if run.is_empty() { number_end } else { run.end };

    Some(AnchorMatch {
        kind: AnchorKind::Section,
        prefix: Some(vec![caps[1].to_string(), caps[2].to_string()]),
        run,
        suffix: Vec::new(),
        span: (number_start, end),
    })
}

/// `A-5`, `Q-2(r)`: appendix letter and number within the current part.
pub fn match_appendix(
    text: &str,
    pos: usize,
    context: &ScanContext,
    grammar: &MarkerGrammar,
) -> Option<AnchorMatch> {
    if is_word_char(prev_char(text, pos)) {
        return None;
    }
    let caps = APPENDIX_RE.captures(&text[pos..])?;
    let number_end = pos + caps.get(0)?.end();
    if is_word_char(next_char(text, number_end)) {
        return None;
    }

    let run = grammar.recognize_run(text, number_end);
    let end = if run.is_empty() { number_end } else { run.end };
    let prefix = context
        .part
        .as_ref()
        .map(|part| vec![part.clone(), caps[1].to_string(), caps[2].to_string()]);

    Some(AnchorMatch {
        kind: AnchorKind::Appendix,
        prefix,
        run,
        suffix: Vec::new(),
        span: (pos, end),
    })
}

/// `comment 32(b)(3)` or `comments 36(a)(2)-3`; the span excludes the keyword.
pub fn match_comment(
    text: &str,
    pos: usize,
    context: &ScanContext,
    vocab: &Vocabulary,
    grammar: &MarkerGrammar,
) -> Option<AnchorMatch> {
    let keyword_end = keyword_at(text, pos, &vocab.comment)?;
    let body_start = skip_whitespace(text, keyword_end);
    if body_start == keyword_end {
        return None;
    }
    match_comment_body(text, body_start, context, grammar)
}

/// `36(a)(2)-3.ii` without the keyword, as repeated in comment lists.
pub fn match_comment_body(
    text: &str,
    pos: usize,
    context: &ScanContext,
    grammar: &MarkerGrammar,
) -> Option<AnchorMatch> {
    if !number_starts_here(text, pos) {
        return None;
    }
    let number = COMMENT_NUMBER_RE.find(&text[pos..])?;
    let number_end = pos + number.end();

    let run = grammar.recognize_run(text, number_end);
    if run.is_empty() {
        return None;
    }

    let mut end = run.end;
    let mut suffix = vec![INTERP_MARK.to_string()];
    if let Some(caps) = SUB_COMMENT_RE.captures(&text[end..]) {
        suffix.push(caps[1].to_string());
        end += caps[0].len();
        // A period directly after the last sub-part ends the sentence.
        while let Some(caps) = SUB_PART_RE.captures(&text[end..]) {
            let after = end + caps[0].len();
            if is_word_char(next_char(text, after)) {
                break;
            }
            suffix.push(caps[1].to_string());
            end = after;
        }
    }

    let prefix = context
        .part
        .as_ref()
        .map(|part| vec![part.clone(), number.as_str().to_string()]);

    Some(AnchorMatch {
        kind: AnchorKind::Comment,
        prefix,
        run,
        suffix,
        span: (pos, end),
    })
}

/// `paragraph (a)(4)(iii)`: a marker run resolved against the section the
/// text belongs to.
pub fn match_paragraph(
    text: &str,
    pos: usize,
    context: &ScanContext,
    vocab: &Vocabulary,
    grammar: &MarkerGrammar,
) -> Option<AnchorMatch> {
    let keyword_end = keyword_at(text, pos, &vocab.paragraph)?;
    let run_start = skip_whitespace(text, keyword_end);
    if run_start == keyword_end {
        return None;
    }
    let run = grammar.recognize_run(text, run_start);
    if run.is_empty() {
        return None;
    }
    let span = (run.start, run.end);

    Some(AnchorMatch {
        kind: AnchorKind::Paragraph,
        prefix: context.section.clone(),
        run,
        suffix: Vec::new(),
        span,
    })
}

/// ` of § 1005.6` after a paragraph list: the section those paragraphs
/// belong to and the span of its number.
pub fn trailing_section(
    text: &str,
    pos: usize,
    grammar: &MarkerGrammar,
) -> Option<(Vec<String>, (usize, usize))> {
    let caps = OF_SECTION_RE.captures(&text[pos..])?;
    let start = pos + caps.get(1)?.start();
    let end = pos + caps.get(2)?.end();
    if number_continues(text, end) || !run_after(grammar, text, end).is_empty() {
        return None;
    }
    Some((vec![caps[1].to_string(), caps[2].to_string()], (start, end)))
}
