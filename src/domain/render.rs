//! Human-readable tree views

use termtree::Tree;

use super::Node;

const YES_BEND: &str = "+-";
const NO_BEND: &str = "`-";
const YES_ANSWER: &str = "Yes: ";
const NO_ANSWER: &str = "No:  ";

/// Classic ASCII view, one string per printed line.
///
/// ```text
/// Is it bigger than a breadbox?
/// +-Yes: It is an elephant
/// `-No:  It is a mouse
/// ```
pub fn render_lines(node: &Node) -> Vec<String> {
    let mut lines = Vec::new();
    render_into(node, "", "", "", &mut lines);
    lines
}

fn render_into(node: &Node, prefix: &str, bend: &str, answer: &str, lines: &mut Vec<String>) {
    match node {
        Node::Leaf { guess } => lines.push(format!("{prefix}{bend}{answer}It is {guess}")),
        Node::Internal { question, yes, no } => {
            lines.push(format!("{prefix}{bend}{answer}{question}"));
            // a yes-bend keeps a bar open for the no-sibling below it
            let prefix = match bend {
                YES_BEND => format!("{prefix}| "),
                NO_BEND => format!("{prefix}  "),
                _ => prefix.to_string(),
            };
            render_into(yes, &prefix, YES_BEND, YES_ANSWER, lines);
            render_into(no, &prefix, NO_BEND, NO_ANSWER, lines);
        }
    }
}

/// Box-drawing view built on `termtree`.
pub fn to_termtree(node: &Node) -> Tree<String> {
    labelled(node, None)
}

fn labelled(node: &Node, answer: Option<&str>) -> Tree<String> {
    let text = match node {
        Node::Leaf { guess } => format!("It is {guess}"),
        Node::Internal { question, .. } => question.clone(),
    };
    let text = match answer {
        Some(answer) => format!("{answer}{text}"),
        None => text,
    };
    match node {
        Node::Leaf { .. } => Tree::new(text),
        Node::Internal { yes, no, .. } => Tree::new(text).with_leaves([
            labelled(yes, Some(YES_ANSWER)),
            labelled(no, Some(NO_ANSWER)),
        ]),
    }
}
