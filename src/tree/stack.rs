use crate::tree::utils::prepend_parts;
use crate::types::Node;

/// Sibling nodes currently open at one level.
#[derive(Debug, Clone)]
pub struct LevelGroup {
    pub level: usize,
    pub nodes: Vec<Node>,
}

/// Stack of open levels used while folding a leveled fragment stream into a
/// tree. Groups are ordered by strictly increasing level from bottom to top.
#[derive(Debug, Default)]
pub struct LevelStack {
    groups: Vec<LevelGroup>,
}

impl LevelStack {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// A stack whose bottom group holds `root` at level 0.
    pub fn with_root(root: Node) -> Self {
        Self {
            groups: vec![LevelGroup {
                level: 0,
                nodes: vec![root],
            }],
        }
    }

    /// Number of open groups.
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn deepest_level(&self) -> Option<usize> {
        self.groups.last().map(|g| g.level)
    }

    /// Most recently added node of the deepest group.
    pub fn peek_last(&self) -> Option<&Node> {
        self.groups.last().and_then(|g| g.nodes.last())
    }

    pub fn groups(&self) -> &[LevelGroup] {
        &self.groups
    }

    pub fn push(&mut self, level: usize, node: Node) -> Result<(), String> {
        if let Some(deepest) = self.deepest_level() {
            if level <= deepest {
                return Err(format!(
                    "cannot open level {level}: deepest open level is {deepest} (stack depth {})",
                    self.groups.len()
                ));
            }
        }
        self.groups.push(LevelGroup {
            level,
            nodes: vec![node],
        });
        Ok(())
    }

    pub fn push_sibling(&mut self, level: usize, node: Node) -> Result<(), String> {
        let depth = self.groups.len();
        let group = self
            .groups
            .last_mut()
            .ok_or_else(|| format!("cannot add sibling at level {level}: stack is empty"))?;
        if group.level != level {
            return Err(format!(
                "cannot add sibling at level {level}: deepest open level is {} (stack depth {depth})",
                group.level
            ));
        }
        group.nodes.push(node);
        Ok(())
    }

    /// Close the deepest level, attaching its nodes as children of the last
    /// node one level up and prefixing their labels with that node's label.
    /// Folded nodes are appended after any children the parent already has.
    pub fn unwind_one(&mut self) -> Result<(), String> {
        if self.groups.len() < 2 {
            return Err(format!(
                "level stack underflow: cannot unwind with stack depth {}",
                self.groups.len()
            ));
        }
        let popped = match self.groups.pop() {
            Some(group) => group,
            None => return Err("level stack underflow: stack is empty".to_string()),
        };
        let parent = self
            .groups
            .last_mut()
            .and_then(|g| g.nodes.last_mut())
            .ok_or_else(|| "level stack underflow: parent group has no nodes".to_string())?;

        tracing::debug!(
            "Folding {} node(s) at level {} into {}",
            popped.nodes.len(),
            popped.level,
            parent.label
        );

        let prefix = parent.label.parts().to_vec();
        for mut child in popped.nodes {
            prepend_parts(&prefix, &mut child);
            parent.children.push(child);
        }
        Ok(())
    }

    /// Add a node from a leveled stream, unwinding as many levels as needed.
    pub fn add(&mut self, level: usize, node: Node) -> Result<(), String> {
        let deepest = match self.deepest_level() {
            Some(deepest) => deepest,
            None => return self.push(level, node),
        };

        if level > deepest {
            return self.push(level, node);
        }

        while let Some(current) = self.deepest_level() {
            if current <= level {
                break;
            }
            self.unwind_one()
                .map_err(|e| format!("cannot add node at level {level}: {e}"))?;
        }

        // After skipping a level on the way back up the node joins the group
        // that is now deepest, which keeps the level of its first node.
        let group = self
            .groups
            .last_mut()
            .ok_or_else(|| format!("cannot add node at level {level}: stack is empty"))?;
        if group.level != level {
            tracing::debug!(
                "Adding level {level} node to open group at level {}",
                group.level
            );
        }
        group.nodes.push(node);
        Ok(())
    }

    /// Unwind every open level and return the nodes of the bottom group.
    pub fn unwind_all(mut self) -> Result<Vec<Node>, String> {
        while self.groups.len() > 1 {
            self.unwind_one()?;
        }
        Ok(self.groups.pop().map(|g| g.nodes).unwrap_or_default())
    }
}
