use crate::citations::anchors::{
    match_appendix, match_comment, match_comment_body, match_listed_section, match_paragraph,
    match_section, trailing_section, AnchorKind, AnchorMatch, ScanContext, Vocabulary, ANCHOR_ORDER,
};
use crate::citations::markers::MarkerGrammar;
use crate::config::ScannerConfig;
use crate::types::CitationRecord;
use std::sync::LazyLock;

static DEFAULT_SCANNER: LazyLock<CitationScanner> = LazyLock::new(CitationScanner::default);

/// Finds internal citations (paragraphs, sections, appendices and
/// interpretation comments) in regulation text.
#[derive(Debug, Clone)]
pub struct CitationScanner {
    grammar: MarkerGrammar,
    vocab: Vocabulary,
}

impl Default for CitationScanner {
    fn default() -> Self {
        Self::new(&ScannerConfig::default())
    }
}

/// One enumerated element: its marker parts and where it appears.
struct Element {
    prefix: Option<Vec<String>>,
    parts: Vec<String>,
    span: (usize, usize),
}

struct ScanStep {
    records: Vec<CitationRecord>,
    end: usize,
}

impl CitationScanner {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            grammar: MarkerGrammar::new(config.max_marker_depth),
            vocab: Vocabulary::from_config(config),
        }
    }

    /// Citations in `text`, resolved against `context` (the label of the
    /// node the text belongs to), ordered by first offset.
    pub fn scan(&self, text: &str, context: &[String]) -> Vec<CitationRecord> {
        let context = ScanContext::new(context);
        let mut records = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            if let Some(step) = self.match_at(text, pos, &context) {
                records.extend(step.records);
                if step.end > pos {
                    pos = step.end;
                    continue;
                }
            }
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }

        tracing::debug!(
            "Found {} citation(s) in {} byte(s) of text",
            records.len(),
            text.len()
        );
        records
    }

    fn match_at(&self, text: &str, pos: usize, context: &ScanContext) -> Option<ScanStep> {
        for kind in ANCHOR_ORDER {
            let anchor = match kind {
                AnchorKind::Section => match_section(text, pos, &self.vocab, &self.grammar),
                AnchorKind::Appendix => match_appendix(text, pos, context, &self.grammar),
                AnchorKind::Comment => {
                    match_comment(text, pos, context, &self.vocab, &self.grammar)
                }
                AnchorKind::Paragraph => {
                    match_paragraph(text, pos, context, &self.vocab, &self.grammar)
                }
            };
            if let Some(anchor) = anchor {
                return Some(match kind {
                    AnchorKind::Comment => self.expand_comments(text, anchor, context),
                    _ => self.expand_markers(text, anchor),
                });
            }
        }
        None
    }

    /// `comments 31(b)(1)(iv)-1 and 31(b)(1)(vi)-1`: every element is a full
    /// comment reference without the keyword.
    fn expand_comments(&self, text: &str, anchor: AnchorMatch, context: &ScanContext) -> ScanStep {
        let mut end = anchor.span.1;
        let mut matches = vec![anchor];
        while let Some(next) = self.vocab.separator_at(text, end) {
            match match_comment_body(text, next, context, &self.grammar) {
                Some(found) => {
                    end = found.span.1;
                    matches.push(found);
                }
                None => break,
            }
        }

        let records = matches
            .iter()
            .filter_map(|m| Some(CitationRecord::new(m.citation()?, m.span)))
            .collect();
        ScanStep { records, end }
    }

    /// `(b)(1)(ii) and (iii)`: later elements override the trailing parts of
    /// the element before them. In a section list a later element may also
    /// be a full section number, which starts over with its own parts.
    fn expand_markers(&self, text: &str, anchor: AnchorMatch) -> ScanStep {
        let mut elements = vec![Element {
            prefix: anchor.prefix.clone(),
            parts: anchor.run.parts.clone(),
            span: anchor.span,
        }];
        let mut end = anchor.span.1;
        let mut prefix = anchor.prefix.clone();
        let mut current = anchor.run.parts.clone();
        let mut deepest = (!anchor.run.is_empty()).then(|| anchor.run.last_depth());

        while let Some(next) = self.vocab.separator_at(text, end) {
            let run = deepest.and_then(|d| self.grammar.recognize_element(text, next, d));
            if let Some(run) = run {
                let mut parts = current[..run.depth].to_vec();
                parts.extend(run.parts.iter().cloned());

                deepest = Some(run.last_depth());
                end = run.end;
                elements.push(Element {
                    prefix: prefix.clone(),
                    parts: parts.clone(),
                    span: (run.start, run.end),
                });
                current = parts;
                continue;
            }

            if anchor.kind != AnchorKind::Section {
                break;
            }
            let listed = match match_listed_section(text, next, &self.grammar) {
                Some(listed) => listed,
                None => break,
            };
            end = listed.span.1;
            prefix = listed.prefix.clone();
            current = listed.run.parts.clone();
            deepest = (!listed.run.is_empty()).then(|| listed.run.last_depth());
            elements.push(Element {
                prefix: listed.prefix,
                parts: listed.run.parts,
                span: listed.span,
            });
        }

        let mut qualifier = None;
        if anchor.kind == AnchorKind::Paragraph {
            if let Some((section, span)) = trailing_section(text, end, &self.grammar) {
                end = span.1;
                qualifier = Some((section, span));
            }
        }

        let records = elements
            .into_iter()
            .filter_map(|element| {
                let (mut citation, section_span) = match &qualifier {
                    Some((section, span)) => (section.clone(), Some(*span)),
                    None => (element.prefix?, None),
                };
                citation.extend(element.parts);
                let mut offsets = vec![element.span];
                offsets.extend(section_span);
                Some(CitationRecord { citation, offsets })
            })
            .collect();
        ScanStep { records, end }
    }
}

/// Scan with the default vocabulary.
pub fn parse_internal_citations(text: &str, context: &[String]) -> Vec<CitationRecord> {
    DEFAULT_SCANNER.scan(text, context)
}
