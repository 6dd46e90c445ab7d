//! Built-in starting trees

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Node;

const ROOT_QUESTION: &str = "Is it bigger than a breadbox?";

/// Which built-in tree a fresh session starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    /// One question, two guesses.
    #[default]
    Small,
    /// Two questions, three guesses.
    Medium,
}

impl Seed {
    pub fn tree(self) -> Node {
        match self {
            Seed::Small => small_tree(),
            Seed::Medium => medium_tree(),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Small => write!(f, "small"),
            Seed::Medium => write!(f, "medium"),
        }
    }
}

impl FromStr for Seed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Seed::Small),
            "medium" => Ok(Seed::Medium),
            other => Err(format!("unknown seed tree '{other}' (expected small or medium)")),
        }
    }
}

pub fn small_tree() -> Node {
    Node::internal(
        ROOT_QUESTION,
        Arc::new(Node::leaf("an elephant")),
        Arc::new(Node::leaf("a mouse")),
    )
}

pub fn medium_tree() -> Node {
    Node::internal(
        ROOT_QUESTION,
        Arc::new(Node::internal(
            "Is it gray?",
            Arc::new(Node::leaf("an elephant")),
            Arc::new(Node::leaf("a tiger")),
        )),
        Arc::new(Node::leaf("a mouse")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_seed_names_when_parsing_then_case_insensitive() {
        assert_eq!("Small".parse::<Seed>(), Ok(Seed::Small));
        assert_eq!(" medium ".parse::<Seed>(), Ok(Seed::Medium));
        assert!("large".parse::<Seed>().is_err());
    }

    #[test]
    fn given_small_seed_when_built_then_two_leaves() {
        let tree = Seed::Small.tree();
        assert_eq!(tree.label(), ROOT_QUESTION);
        assert_eq!(tree.guesses(), vec!["an elephant", "a mouse"]);
    }
}
