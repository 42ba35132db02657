use crate::tree::stack::LevelStack;
use crate::types::Node;

/// Builds a labeled tree from fragments arriving in reading order, each
/// tagged with its nesting level (0 = direct child of the root).
///
/// Fragment labels are expected to be relative (usually just the fragment's
/// own marker, e.g. `["a"]`); they gain their ancestors' parts as levels are
/// folded.
///
/// ```
/// use regparse::tree::TreeAssembler;
/// use regparse::types::Node;
///
/// let mut assembler = TreeAssembler::new(Node::new("", ["1005", "6"]));
/// assembler.add(0, Node::new("(a) General.", ["a"])).unwrap();
/// assembler.add(1, Node::new("(1) First.", ["1"])).unwrap();
/// assembler.add(0, Node::new("(b) Other.", ["b"])).unwrap();
/// let root = assembler.finish().unwrap();
///
/// assert_eq!(root.children[0].children[0].label, ["1005", "6", "a", "1"]);
/// assert_eq!(root.children[1].label, ["1005", "6", "b"]);
/// ```
#[derive(Debug)]
pub struct TreeAssembler {
    stack: LevelStack,
    fragments: usize,
}

impl TreeAssembler {
    pub fn new(root: Node) -> Self {
        Self {
            stack: LevelStack::with_root(root),
            fragments: 0,
        }
    }

    pub fn add(&mut self, level: usize, node: Node) -> Result<(), String> {
        // The root occupies stack level 0.
        let stack_level = level + 1;
        if let Err(err) = self.stack.add(stack_level, node) {
            tracing::error!(
                "Inconsistent level stream at fragment {} (level {level}, stack depth {}): {err}",
                self.fragments,
                self.stack.depth()
            );
            return Err(err);
        }
        self.fragments += 1;
        Ok(())
    }

    pub fn extend<I>(&mut self, fragments: I) -> Result<(), String>
    where
        I: IntoIterator<Item = (usize, Node)>,
    {
        for (level, node) in fragments {
            self.add(level, node)?;
        }
        Ok(())
    }

    /// Number of fragments accepted so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments
    }

    pub fn finish(self) -> Result<Node, String> {
        let mut nodes = self.stack.unwind_all()?;
        tracing::debug!("Assembled tree from {} fragment(s)", self.fragments);
        match (nodes.pop(), nodes.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err("tree assembly finished without a single root".to_string()),
        }
    }
}

/// Assemble a whole fragment stream under `root`.
pub fn assemble<I>(root: Node, fragments: I) -> Result<Node, String>
where
    I: IntoIterator<Item = (usize, Node)>,
{
    let mut assembler = TreeAssembler::new(root);
    assembler.extend(fragments)?;
    assembler.finish()
}
