//! Tree file persistence
//!
//! Reads and writes the line-oriented tree format through the `FileSystem`
//! boundary.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{read_tree, to_text, Node, TagPolicy};
use crate::infrastructure::traits::FileSystem;

/// Loads and saves decision trees.
pub struct TreeStore {
    fs: Arc<dyn FileSystem>,
    policy: TagPolicy,
}

impl TreeStore {
    pub fn new(fs: Arc<dyn FileSystem>, policy: TagPolicy) -> Self {
        Self { fs, policy }
    }

    /// Read a complete tree from `path`.
    ///
    /// Truncated or malformed files are errors; nothing is returned for them.
    #[instrument(level = "debug", skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Node> {
        let reader = self.fs.open_read(path).with_path_context("open tree file", path)?;
        let tree = read_tree(reader, self.policy).map_err(|source| {
            if source.is_format_error() {
                ApplicationError::MalformedTree {
                    path: path.to_path_buf(),
                    source,
                }
            } else {
                ApplicationError::OperationFailed {
                    context: format!("read tree file: {}", path.display()),
                    source: Box::new(source),
                }
            }
        })?;
        debug!(
            nodes = tree.node_count(),
            leaves = tree.leaf_count(),
            "loaded tree"
        );
        Ok(tree)
    }

    /// Write `tree` to `path`, replacing any previous file.
    #[instrument(level = "debug", skip(self, tree), fields(path = %path.display()))]
    pub fn save(&self, path: &Path, tree: &Node) -> ApplicationResult<()> {
        let text = to_text(tree)?;
        self.fs
            .write_atomic(path, text.as_bytes())
            .with_path_context("save tree file", path)?;
        debug!(nodes = tree.node_count(), "saved tree");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{medium_tree, DomainError};
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    fn store(policy: TagPolicy) -> TreeStore {
        TreeStore::new(Arc::new(RealFileSystem), policy)
    }

    #[test]
    fn given_saved_tree_when_loaded_then_identical() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tree.txt");
        let store = store(TagPolicy::Strict);

        store.save(&path, &medium_tree()).unwrap();
        let loaded = store.load(&path).unwrap();

        assert_eq!(loaded, medium_tree());
    }

    #[test]
    fn given_missing_file_when_loading_then_tree_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.txt");

        let err = store(TagPolicy::Strict).load(&path).unwrap_err();

        assert!(matches!(err, ApplicationError::TreeNotFound(p) if p == path));
    }

    #[test]
    fn given_empty_file_when_loading_then_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        let err = store(TagPolicy::Lenient).load(&path).unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::MalformedTree {
                source: DomainError::UnexpectedEof { line: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn given_existing_file_when_save_fails_then_file_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tree.txt");
        std::fs::write(&path, "Leaf\na mouse\n").unwrap();

        let bad = Node::leaf("two\nlines");
        let err = store(TagPolicy::Strict).save(&path, &bad).unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::MultilineLabel { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Leaf\na mouse\n");
    }
}
