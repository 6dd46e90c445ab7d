//! Decision tree nodes
//!
//! A node is either a leaf holding a guess or an internal node holding a
//! yes/no question with exactly two branches. Branches are shared via `Arc`
//! so a tree rebuilt after learning keeps the untouched subtrees of the
//! previous one.

use std::sync::Arc;

/// One node of the 20 Questions tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Terminal guess, no children.
    Leaf { guess: String },
    /// Yes/no question with a branch for each answer.
    Internal {
        question: String,
        yes: Arc<Node>,
        no: Arc<Node>,
    },
}

impl Node {
    pub fn leaf(guess: impl Into<String>) -> Self {
        Node::Leaf {
            guess: guess.into(),
        }
    }

    pub fn internal(question: impl Into<String>, yes: Arc<Node>, no: Arc<Node>) -> Self {
        Node::Internal {
            question: question.into(),
            yes,
            no,
        }
    }

    /// Split a rejected leaf into a question separating it from a new item.
    ///
    /// The new item goes to the branch matching `item_says_yes`; the old
    /// leaf is moved, unchanged, to the other one.
    pub fn refine(
        old_leaf: Arc<Node>,
        question: impl Into<String>,
        new_item: impl Into<String>,
        item_says_yes: bool,
    ) -> Self {
        let new_leaf = Arc::new(Node::leaf(new_item));
        if item_says_yes {
            Node::internal(question, new_leaf, old_leaf)
        } else {
            Node::internal(question, old_leaf, new_leaf)
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Question text for internal nodes, guess text for leaves.
    pub fn label(&self) -> &str {
        match self {
            Node::Leaf { guess } => guess,
            Node::Internal { question, .. } => question,
        }
    }

    /// `(yes, no)` for internal nodes, `None` for leaves.
    pub fn branches(&self) -> Option<(&Arc<Node>, &Arc<Node>)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { yes, no, .. } => Some((yes, no)),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { yes, no, .. } => 1 + yes.node_count() + no.node_count(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { yes, no, .. } => yes.leaf_count() + no.leaf_count(),
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { yes, no, .. } => 1 + yes.depth().max(no.depth()),
        }
    }

    /// Leaf labels in pre-order, yes branch first.
    pub fn guesses(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_guesses(&mut out);
        out
    }

    fn collect_guesses<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Leaf { guess } => out.push(guess),
            Node::Internal { yes, no, .. } => {
                yes.collect_guesses(out);
                no.collect_guesses(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seeds::{medium_tree, small_tree};

    #[test]
    fn given_leaf_when_queried_then_has_no_branches() {
        let leaf = Node::leaf("a mouse");
        assert!(leaf.is_leaf());
        assert!(leaf.branches().is_none());
        assert_eq!(leaf.label(), "a mouse");
    }

    #[test]
    fn given_medium_tree_when_counting_then_reports_shape() {
        let tree = medium_tree();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.guesses(), vec!["an elephant", "a tiger", "a mouse"]);
    }

    #[test]
    fn given_yes_for_new_item_when_refining_then_new_item_is_yes_branch() {
        let old = Arc::new(Node::leaf("an elephant"));
        let node = Node::refine(Arc::clone(&old), "Does it live in water?", "a hippo", true);

        let (yes, no) = node.branches().unwrap();
        assert_eq!(yes.label(), "a hippo");
        assert!(Arc::ptr_eq(no, &old));
    }

    #[test]
    fn given_no_for_new_item_when_refining_then_old_leaf_is_yes_branch() {
        let old = Arc::new(Node::leaf("a mouse"));
        let node = Node::refine(Arc::clone(&old), "Does it fly?", "a spider", false);

        let (yes, no) = node.branches().unwrap();
        assert!(Arc::ptr_eq(yes, &old));
        assert_eq!(no.label(), "a spider");
        assert_eq!(node.label(), "Does it fly?");
    }

    #[test]
    fn given_small_tree_when_refined_then_grows_by_two() {
        let tree = small_tree();
        let (_, no) = tree.branches().unwrap();
        let refined = Node::refine(Arc::clone(no), "Does it squeak?", "a hamster", false);
        assert_eq!(refined.node_count(), no.node_count() + 2);
    }
}
