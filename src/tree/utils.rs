use crate::citations::markers::recognize_run;
use crate::types::Node;
use std::collections::HashSet;

/// Prepend `prefix` to the label of `node` and of every descendant.
pub fn prepend_parts(prefix: &[String], node: &mut Node) {
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        let Node {
            label, children, ..
        } = current;
        label.prepend(prefix);
        pending.extend(children.iter_mut());
    }
}

/// Markers that open a body of text, e.g. `"(a)(1) Scope."` gives `["a", "1"]`.
/// Markers that appear later in the text are ignored.
pub fn paragraph_markers(text: &str) -> Vec<String> {
    recognize_run(text, 0).parts
}

/// Split `text` at the first occurrence of each token, searching in order.
/// Tokens that cannot be found after the previous split point are skipped.
pub fn split_text<'a>(text: &'a str, tokens: &[&str]) -> Vec<&'a str> {
    let mut starts = Vec::with_capacity(tokens.len());
    let mut cursor = 0;
    for token in tokens {
        if let Some(found) = text[cursor..].find(token) {
            let start = cursor + found;
            starts.push(start);
            cursor = start;
        }
    }

    let mut slices = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        slices.push(&text[start..end]);
    }
    slices
}

/// Check that every child label extends its parent's label and that no two
/// siblings share a label.
pub fn check_tree(root: &Node) -> Result<(), String> {
    for node in root.walk() {
        let mut seen = HashSet::new();
        for child in &node.children {
            if !node.label.is_strict_prefix_of(&child.label) {
                return Err(format!(
                    "child label {} does not extend parent label {}",
                    child.label, node.label
                ));
            }
            if !seen.insert(&child.label) {
                return Err(format!(
                    "duplicate sibling label {} under {}",
                    child.label, node.label
                ));
            }
        }
    }
    Ok(())
}
