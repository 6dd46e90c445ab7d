//! Domain layer: the decision tree and its text format
//!
//! This layer is independent of external concerns (no terminal, no filesystem, no config loading).

pub mod answer;
pub mod codec;
pub mod error;
pub mod node;
pub mod render;
pub mod seeds;

pub use answer::{is_affirmative, AFFIRMATIVE_ANSWERS};
pub use codec::{parse_tree, read_tree, to_text, write_tree, TagPolicy, TreeReader};
pub use error::DomainError;
pub use node::Node;
pub use render::{render_lines, to_termtree};
pub use seeds::{medium_tree, small_tree, Seed};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Returns the input unchanged if a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
