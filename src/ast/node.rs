/// AST vertex in first-child/next-sibling form.
///
/// A node's children are the chain reached by following `sibling` from
/// `child`. Both links own what they point at, so the structure is always a
/// tree.
///
/// Dropping and comparing walk the links with an explicit worklist, so long
/// sibling chains (a tuple with thousands of components) do not recurse.
#[derive(Debug)]
pub struct Node {
    pub(crate) label: String,
    pub(crate) child: Option<Box<Node>>,
    pub(crate) sibling: Option<Box<Node>>,
}

impl Node {
    /// Creates a node with no children and no sibling.
    pub fn leaf(label: impl Into<String>) -> Self {
        Node {
            label: label.into(),
            child: None,
            sibling: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn child(&self) -> Option<&Node> {
        self.child.as_deref()
    }

    pub fn sibling(&self) -> Option<&Node> {
        self.sibling.as_deref()
    }

    /// Iterates over the direct children, left to right.
    pub fn children(&self) -> Children<'_> {
        Children {
            next: self.child.as_deref(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().count()
    }

    /// Number of nodes in the subtree rooted here (siblings excluded).
    pub fn size(&self) -> usize {
        1 + self.children().map(Node::size).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.child.is_none()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = Vec::new();
        pending.extend(self.child.take());
        pending.extend(self.sibling.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.child.take());
            pending.extend(node.sibling.take());
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.label != right.label {
                return false;
            }
            for (a, b) in [(&left.child, &right.child), (&left.sibling, &right.sibling)] {
                match (a.as_deref(), b.as_deref()) {
                    (Some(a), Some(b)) => pending.push((a, b)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for Node {}

/// Iterator over a sibling chain.
pub struct Children<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.sibling.as_deref();
        Some(current)
    }
}
