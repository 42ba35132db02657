use serde::{Deserialize, Serialize};
use std::fmt;

/// Label part marking that everything after it is interpretive commentary on
/// the parts before it.
pub const INTERP_MARK: &str = "Interp";

/// Position of a node in the regulation hierarchy, e.g. `1005-6-a-4-iii`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelPath(Vec<String>);

impl LabelPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, part: impl Into<String>) {
        self.0.push(part.into());
    }

    /// Prepend `prefix` in place.
    pub fn prepend(&mut self, prefix: &[String]) {
        if prefix.is_empty() {
            return;
        }
        let mut parts = Vec::with_capacity(prefix.len() + self.0.len());
        parts.extend_from_slice(prefix);
        parts.append(&mut self.0);
        self.0 = parts;
    }

    pub fn prefixed(&self, prefix: &[String]) -> Self {
        let mut label = self.clone();
        label.prepend(prefix);
        label
    }

    /// True when `self` is a proper prefix of `other`.
    pub fn is_strict_prefix_of(&self, other: &LabelPath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    pub fn is_interp(&self) -> bool {
        self.0.iter().any(|p| p == INTERP_MARK)
    }

    /// Parts that precede the interpretation mark (all parts if there is none).
    pub fn regulatory_parts(&self) -> &[String] {
        let end = self
            .0
            .iter()
            .position(|p| p == INTERP_MARK)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for LabelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("-"))
    }
}

impl<S: Into<String>> FromIterator<S> for LabelPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for LabelPath {
    fn from(parts: Vec<String>) -> Self {
        Self(parts)
    }
}

impl From<&[&str]> for LabelPath {
    fn from(parts: &[&str]) -> Self {
        parts.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for LabelPath {
    fn from(parts: [&str; N]) -> Self {
        parts.into_iter().collect()
    }
}

impl PartialEq<[&str]> for LabelPath {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for LabelPath {
    fn eq(&self, other: &[&str; N]) -> bool {
        self == &other[..]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub label: LabelPath,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(text: impl Into<String>, label: impl Into<LabelPath>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            title: None,
            children: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            out.push(node);
            pending.extend(node.children.iter().rev());
        }
        out
    }
}

/// A single citation found in a body of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    pub citation: Vec<String>,
    /// Half-open byte spans into the scanned text, ascending.
    pub offsets: Vec<(usize, usize)>,
}

impl CitationRecord {
    pub fn new(citation: Vec<String>, span: (usize, usize)) -> Self {
        Self {
            citation,
            offsets: vec![span],
        }
    }

    pub fn first_offset(&self) -> usize {
        self.offsets.first().map(|(start, _)| *start).unwrap_or(0)
    }

    /// Text covered by each span, in order.
    pub fn span_texts<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.offsets
            .iter()
            .filter_map(|&(start, end)| text.get(start..end))
            .collect()
    }
}
