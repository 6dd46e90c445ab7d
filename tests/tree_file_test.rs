//! Tests for the tree file format through TreeStore and RealFileSystem

use std::fs;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use twentyq::application::services::TreeStore;
use twentyq::application::ApplicationError;
use twentyq::domain::{medium_tree, small_tree, DomainError, Node, TagPolicy};
use twentyq::infrastructure::traits::{FileSystem, RealFileSystem};

fn store(policy: TagPolicy) -> TreeStore {
    TreeStore::new(Arc::new(RealFileSystem), policy)
}

#[test]
fn given_small_tree_when_saved_then_file_matches_exactly() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("small.txt");

    // Act
    store(TagPolicy::Strict).save(&path, &small_tree()).unwrap();

    // Assert
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "Internal node\n\
         Is it bigger than a breadbox?\n\
         Leaf\n\
         an elephant\n\
         Leaf\n\
         a mouse\n"
    );
}

#[test]
fn given_medium_tree_when_saved_then_pre_order_yes_before_no() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("medium.txt");

    store(TagPolicy::Strict).save(&path, &medium_tree()).unwrap();

    let lines: Vec<String> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            "Internal node",
            "Is it bigger than a breadbox?",
            "Internal node",
            "Is it gray?",
            "Leaf",
            "an elephant",
            "Leaf",
            "a tiger",
            "Leaf",
            "a mouse",
        ]
    );
}

#[test]
fn given_existing_file_when_saving_then_replaced() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.txt");
    fs::write(&path, "old content that is much longer than a single leaf\n").unwrap();

    store(TagPolicy::Strict)
        .save(&path, &Node::leaf("a mouse"))
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Leaf\na mouse\n");
}

#[rstest]
#[case::unknown_tag("Node\nIs it big?\nLeaf\na\nLeaf\nb\n", TagPolicy::Strict)]
#[case::truncated("Internal node\nIs it big?\nLeaf\na\n", TagPolicy::Lenient)]
#[case::blank_tag("Internal node\nIs it big?\n\nLeaf\na\nLeaf\nb\n", TagPolicy::Lenient)]
#[case::only_tag("Internal node\n", TagPolicy::Strict)]
fn given_malformed_file_when_loading_then_malformed_tree_error(
    #[case] content: &str,
    #[case] policy: TagPolicy,
) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.txt");
    fs::write(&path, content).unwrap();

    let err = store(policy).load(&path).unwrap_err();

    match err {
        ApplicationError::MalformedTree { path: p, source } => {
            assert_eq!(p, path);
            assert!(source.is_format_error());
        }
        other => panic!("expected MalformedTree, got {other:?}"),
    }
}

#[test]
fn given_legacy_tag_when_lenient_then_loads_as_internal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("legacy.txt");
    fs::write(&path, "Question\nIs it big?\nLeaf\nan elephant\nLeaf\na mouse\n").unwrap();

    let tree = store(TagPolicy::Lenient).load(&path).unwrap();

    assert_eq!(tree.label(), "Is it big?");
    assert_eq!(tree.node_count(), 3);
}

#[test]
fn given_legacy_tag_when_strict_then_error_names_line_and_tag() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("legacy.txt");
    fs::write(&path, "Internal node\nIs it big?\nQuestion\nIs it gray?\nLeaf\na\nLeaf\nb\nLeaf\nc\n")
        .unwrap();

    let err = store(TagPolicy::Strict).load(&path).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::MalformedTree {
            source: DomainError::UnknownTag { line: 3, ref tag },
            ..
        } if tag == "Question"
    ));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn given_missing_directory_when_saving_then_operation_failed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no/such/dir/tree.txt");

    let err = store(TagPolicy::Strict)
        .save(&path, &small_tree())
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::TreeNotFound(_) | ApplicationError::OperationFailed { .. }
    ));
    assert!(!RealFileSystem.exists(&path));
}
