use regparse::tree::LevelStack;
use regparse::types::Node;

fn node(label: &str) -> Node {
    Node::new(format!("({label})"), [label])
}

#[test]
fn push_requires_deeper_level() {
    let mut stack = LevelStack::new();
    stack.push(1, node("a")).unwrap();
    stack.push(2, node("1")).unwrap();
    let err = stack.push(2, node("2")).unwrap_err();
    assert!(err.contains("level 2"), "{err}");
    assert_eq!(stack.depth(), 2);
}

#[test]
fn push_sibling_requires_same_level() {
    let mut stack = LevelStack::new();
    assert!(stack.push_sibling(1, node("a")).is_err());

    stack.push(1, node("a")).unwrap();
    stack.push_sibling(1, node("b")).unwrap();
    let err = stack.push_sibling(2, node("1")).unwrap_err();
    assert!(err.contains("deepest open level is 1"), "{err}");
    assert_eq!(stack.groups()[0].nodes.len(), 2);
}

#[test]
fn unwind_one_folds_into_last_node() {
    let mut stack = LevelStack::with_root(Node::new("", ["1005", "6"]));
    stack.push(1, node("a")).unwrap();
    stack.push_sibling(1, node("b")).unwrap();
    stack.push(2, node("1")).unwrap();
    stack.push_sibling(2, node("2")).unwrap();

    stack.unwind_one().unwrap();
    assert_eq!(stack.depth(), 2);

    let b = stack.peek_last().unwrap();
    assert_eq!(b.label, ["b"]);
    assert_eq!(b.children.len(), 2);
    assert_eq!(b.children[0].label, ["b", "1"]);
    assert_eq!(b.children[1].label, ["b", "2"]);
    assert!(stack.groups()[1].nodes[0].children.is_empty());
}

#[test]
fn unwind_one_underflow_names_depth() {
    let mut stack = LevelStack::new();
    let err = stack.unwind_one().unwrap_err();
    assert!(err.contains("underflow"), "{err}");

    stack.push(1, node("a")).unwrap();
    let err = stack.unwind_one().unwrap_err();
    assert!(err.contains("stack depth 1"), "{err}");
}

#[test]
fn add_above_bottom_level_is_rejected() {
    let mut stack = LevelStack::new();
    stack.push(2, node("a")).unwrap();
    let err = stack.add(1, node("b")).unwrap_err();
    assert!(err.contains("level 1"), "{err}");
    assert!(err.contains("underflow"), "{err}");
}

#[test]
fn add_unwinds_several_levels_at_once() {
    let mut stack = LevelStack::with_root(Node::new("", ["1005", "6"]));
    stack.add(1, node("a")).unwrap();
    stack.add(2, node("1")).unwrap();
    stack.add(3, node("i")).unwrap();
    stack.add(4, node("A")).unwrap();
    stack.add(1, node("b")).unwrap();

    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.deepest_level(), Some(1));
    let a = &stack.groups()[1].nodes[0];
    assert_eq!(a.children[0].children[0].children[0].label, ["a", "1", "i", "A"]);
}

#[test]
fn add_after_skipped_level_joins_deepest_open_group() {
    let mut stack = LevelStack::with_root(Node::new("", ["r"]));
    stack.add(1, node("a")).unwrap();
    stack.add(3, node("x")).unwrap();
    stack.add(2, node("y")).unwrap();

    // The group keeps the level of its first node.
    assert_eq!(stack.deepest_level(), Some(1));
    assert_eq!(stack.depth(), 2);

    let nodes = stack.unwind_all().unwrap();
    assert_eq!(nodes.len(), 1);
    let root = &nodes[0];
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].label, ["r", "a"]);
    assert_eq!(root.children[0].children[0].label, ["r", "a", "x"]);
    assert_eq!(root.children[1].label, ["r", "y"]);
    assert!(root.children[1].children.is_empty());
}

#[test]
fn unwind_one_appends_after_existing_children() {
    let mut parent = Node::new("", ["a"]);
    parent.children.push(Node::new("", ["a", "1"]));
    let mut stack = LevelStack::with_root(parent);
    stack.push(1, node("2")).unwrap();
    stack.unwind_one().unwrap();

    let labels: Vec<String> = stack.groups()[0].nodes[0]
        .children
        .iter()
        .map(|c| c.label.to_string())
        .collect();
    assert_eq!(labels, vec!["a-1", "a-2"]);
}
