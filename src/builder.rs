//! Bottom-up tree assembly on a construction stack.

use crate::ast::Node;
use crate::parser::ParseError;

/// Stack of finished subtrees that have not been attached to a parent yet.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes a childless node.
    pub fn leaf(&mut self, label: impl Into<String>) {
        let node = Node::leaf(label);
        tracing::trace!(label = %node.label, depth = self.stack.len() + 1, "leaf");
        self.stack.push(node);
    }

    /// Pops `arity` subtrees and pushes a new `label` node that owns them, in
    /// the order they were originally pushed.
    pub fn reduce(&mut self, label: &str, arity: usize) -> Result<(), ParseError> {
        if arity > self.stack.len() {
            return Err(ParseError::StackUnderflow {
                label: label.to_string(),
                arity,
                depth: self.stack.len(),
            });
        }

        // Linked from the right so each node can take its successor as sibling.
        let children = self.stack.split_off(self.stack.len() - arity);
        let chain = children.into_iter().rev().fold(None, |next, mut node| {
            node.sibling = next;
            Some(Box::new(node))
        });

        let mut parent = Node::leaf(label);
        parent.child = chain;
        self.stack.push(parent);
        tracing::trace!(label, arity, depth = self.stack.len(), "reduce");
        Ok(())
    }

    /// Takes the finished tree. Exactly one tree must be left.
    pub fn finish(mut self) -> Result<Node, ParseError> {
        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(root), true) => Ok(root),
            (root, _) => Err(ParseError::StackImbalance {
                depth: self.stack.len() + usize::from(root.is_some()),
            }),
        }
    }
}

#[test]
fn test_reduce_keeps_push_order() {
    let mut builder = TreeBuilder::new();
    builder.leaf("a");
    builder.leaf("b");
    builder.leaf("c");
    builder.reduce("tau", 3).unwrap();

    let root = builder.finish().unwrap();
    let labels: Vec<&str> = root.children().map(Node::label).collect();
    assert_eq!(root.label(), "tau");
    assert_eq!(labels, ["a", "b", "c"]);
}

#[test]
fn test_reduce_zero_arity_is_leaf() {
    let mut builder = TreeBuilder::new();
    builder.reduce("()", 0).unwrap();
    let root = builder.finish().unwrap();
    assert!(root.is_leaf());
    assert_eq!(root.label(), "()");
}

#[test]
fn test_reduce_takes_only_top_of_stack() {
    let mut builder = TreeBuilder::new();
    builder.leaf("keep");
    builder.leaf("x");
    builder.leaf("y");
    builder.reduce("gamma", 2).unwrap();
    assert_eq!(builder.depth(), 2);
    builder.reduce("tau", 2).unwrap();

    let root = builder.finish().unwrap();
    let labels: Vec<&str> = root.children().map(Node::label).collect();
    assert_eq!(labels, ["keep", "gamma"]);
    let gamma = root.children().nth(1).unwrap();
    assert_eq!(gamma.child_count(), 2);
    assert!(gamma.sibling().is_none());
}

#[test]
fn test_reduce_underflow() {
    let mut builder = TreeBuilder::new();
    builder.leaf("a");
    let err = builder.reduce("gamma", 2).unwrap_err();
    assert!(matches!(err, ParseError::StackUnderflow { arity: 2, depth: 1, .. }));
    assert_eq!(builder.depth(), 1);
}

#[test]
fn test_finish_rejects_leftovers() {
    let mut builder = TreeBuilder::new();
    builder.leaf("a");
    builder.leaf("b");
    assert!(matches!(builder.finish(), Err(ParseError::StackImbalance { depth: 2 })));
    assert!(matches!(TreeBuilder::new().finish(), Err(ParseError::StackImbalance { depth: 0 })));
}
