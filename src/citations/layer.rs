use crate::citations::scanner::CitationScanner;
use crate::types::{CitationRecord, Node};
use std::collections::BTreeMap;

/// Citations for every node of a tree, keyed by the node's dash-joined label.
/// Each node's own label is the context for its text; nodes without
/// citations are left out.
pub fn citation_layer(
    root: &Node,
    scanner: &CitationScanner,
) -> BTreeMap<String, Vec<CitationRecord>> {
    let mut layer = BTreeMap::new();
    for node in root.walk() {
        if node.text.trim().is_empty() {
            continue;
        }
        let records = scanner.scan(&node.text, node.label.parts());
        if !records.is_empty() {
            layer.insert(node.label.to_string(), records);
        }
    }
    tracing::debug!("Citation layer covers {} node(s)", layer.len());
    layer
}
