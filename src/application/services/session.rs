//! Game session service
//!
//! Owns the current decision tree and runs rounds against it. Learning never
//! edits a node in place: each step of the walk returns the node that should
//! take its slot, and the caller rebuilds its own node around it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::services::TreeStore;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{is_affirmative, render_lines, Node, Seed};
use crate::infrastructure::traits::Terminal;

/// What happened in a learning round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The final guess was confirmed; the tree is unchanged.
    Guessed,
    /// The guess was wrong and a leaf was split into a new question.
    Learned,
}

/// One player's game: the current tree plus the I/O it talks through.
pub struct GameSession {
    terminal: Arc<dyn Terminal>,
    store: TreeStore,
    seed: Seed,
    tree: Arc<Node>,
}

impl GameSession {
    /// Start a session on the `seed` tree.
    pub fn new(terminal: Arc<dyn Terminal>, store: TreeStore, seed: Seed) -> Self {
        Self {
            terminal,
            store,
            seed,
            tree: Arc::new(seed.tree()),
        }
    }

    pub fn tree(&self) -> &Arc<Node> {
        &self.tree
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Go back to the session's seed tree.
    pub fn reset_default(&mut self) {
        self.reset_to(self.seed);
    }

    pub fn reset_to(&mut self, seed: Seed) {
        debug!(%seed, "reset tree");
        self.seed = seed;
        self.tree = Arc::new(seed.tree());
    }

    /// Play one round on the current tree, learning from a wrong guess.
    #[instrument(level = "debug", skip(self))]
    pub fn play_round(&mut self) -> ApplicationResult<RoundOutcome> {
        let updated = self.play(&self.tree)?;
        let outcome = if Arc::ptr_eq(&updated, &self.tree) {
            RoundOutcome::Guessed
        } else {
            RoundOutcome::Learned
        };
        self.tree = updated;
        info!(?outcome, nodes = self.tree.node_count(), "round finished");
        Ok(outcome)
    }

    /// Walk down from `node`; return the node that replaces it.
    ///
    /// Subtrees off the visited path are shared with the input. When nothing
    /// was learned the returned `Arc` is `node` itself.
    pub fn play(&self, node: &Arc<Node>) -> ApplicationResult<Arc<Node>> {
        match node.as_ref() {
            Node::Leaf { guess } => self.play_leaf(node, guess),
            Node::Internal { question, yes, no } => {
                let answer = self.terminal.ask(question).with_context("ask question")?;
                if is_affirmative(&answer) {
                    let new_yes = self.play(yes)?;
                    if Arc::ptr_eq(&new_yes, yes) {
                        return Ok(Arc::clone(node));
                    }
                    Ok(Arc::new(Node::internal(question.clone(), new_yes, Arc::clone(no))))
                } else {
                    let new_no = self.play(no)?;
                    if Arc::ptr_eq(&new_no, no) {
                        return Ok(Arc::clone(node));
                    }
                    Ok(Arc::new(Node::internal(question.clone(), Arc::clone(yes), new_no)))
                }
            }
        }
    }

    fn play_leaf(&self, leaf: &Arc<Node>, guess: &str) -> ApplicationResult<Arc<Node>> {
        let answer = self
            .terminal
            .ask(&format!("Is it {guess}? "))
            .with_context("ask guess")?;
        if is_affirmative(&answer) {
            self.terminal.say("I got it!").with_context("print result")?;
            return Ok(Arc::clone(leaf));
        }

        let correct = self
            .terminal
            .ask("Drats! What was it? ")
            .with_context("ask correct answer")?
            .trim()
            .to_string();
        let question = self
            .terminal
            .ask(&format!(
                "What's a question that distinguishes between {correct} and {guess}? "
            ))
            .with_context("ask distinguishing question")?
            .trim()
            .to_string();
        let item_answer = self
            .terminal
            .ask(&format!("And what's the answer for {correct}? "))
            .with_context("ask answer for new item")?;
        let item_says_yes = is_affirmative(&item_answer);

        debug!(%guess, %correct, %question, item_says_yes, "learned new item");
        Ok(Arc::new(Node::refine(
            Arc::clone(leaf),
            question,
            correct,
            item_says_yes,
        )))
    }

    /// Play a round without learning; true if the final guess was right.
    #[instrument(level = "debug", skip(self))]
    pub fn quiz(&self) -> ApplicationResult<bool> {
        let mut node = self.tree.as_ref();
        loop {
            match node {
                Node::Leaf { guess } => {
                    let answer = self
                        .terminal
                        .ask(&format!("Is it {guess}? "))
                        .with_context("ask guess")?;
                    return Ok(is_affirmative(&answer));
                }
                Node::Internal { question, yes, no } => {
                    let answer = self
                        .terminal
                        .ask(&format!("{question} "))
                        .with_context("ask question")?;
                    node = if is_affirmative(&answer) {
                        yes.as_ref()
                    } else {
                        no.as_ref()
                    };
                }
            }
        }
    }

    /// Replace the current tree with the one stored at `path`.
    ///
    /// On any error the current tree is kept.
    pub fn load_game(&mut self, path: &Path) -> ApplicationResult<()> {
        let tree = self.store.load(path)?;
        info!(path = %path.display(), nodes = tree.node_count(), "loaded game");
        self.tree = Arc::new(tree);
        Ok(())
    }

    pub fn save_game(&self, path: &Path) -> ApplicationResult<()> {
        self.store.save(path, &self.tree)?;
        info!(path = %path.display(), nodes = self.tree.node_count(), "saved game");
        Ok(())
    }

    /// Classic text view of the current tree.
    pub fn render(&self) -> Vec<String> {
        render_lines(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagPolicy;
    use crate::infrastructure::traits::RealFileSystem;
    use crate::util::testing::{init_test_setup, ScriptedTerminal};

    fn session(answers: &[&str], seed: Seed) -> (GameSession, Arc<ScriptedTerminal>) {
        init_test_setup();
        let terminal = Arc::new(ScriptedTerminal::new(answers.iter().copied()));
        let store = TreeStore::new(Arc::new(RealFileSystem), TagPolicy::Strict);
        (GameSession::new(terminal.clone(), store, seed), terminal)
    }

    #[test]
    fn given_internal_node_when_playing_then_question_has_no_added_space() {
        let (mut session, terminal) = session(&["yes", "yes"], Seed::Small);

        session.play_round().unwrap();

        assert_eq!(
            terminal.prompts(),
            vec!["Is it bigger than a breadbox?", "Is it an elephant? "]
        );
        assert_eq!(terminal.said(), vec!["I got it!"]);
    }

    #[test]
    fn given_correct_guess_when_playing_then_tree_pointer_unchanged() {
        let (mut session, _) = session(&["no", "sure"], Seed::Medium);
        let before = Arc::clone(session.tree());

        let outcome = session.play_round().unwrap();

        assert_eq!(outcome, RoundOutcome::Guessed);
        assert!(Arc::ptr_eq(&before, session.tree()));
    }

    #[test]
    fn given_no_for_new_item_when_learning_then_old_guess_is_yes_branch() {
        let (mut session, _) = session(&["no", "n", "a snake", "Does it have legs?", "no"], Seed::Small);

        session.play_round().unwrap();

        let (_, no) = session.tree().branches().unwrap();
        assert_eq!(no.label(), "Does it have legs?");
        let (yes_leaf, no_leaf) = no.branches().unwrap();
        assert_eq!(yes_leaf.label(), "a mouse");
        assert_eq!(no_leaf.label(), "a snake");
    }

    #[test]
    fn given_padded_answers_when_learning_then_labels_trimmed() {
        let (mut session, terminal) =
            session(&["y", "no", "  a hippo ", " Does it swim? ", "yes"], Seed::Small);

        session.play_round().unwrap();

        let (yes, _) = session.tree().branches().unwrap();
        assert_eq!(yes.label(), "Does it swim?");
        assert_eq!(yes.guesses(), vec!["a hippo", "an elephant"]);
        assert_eq!(
            terminal.prompts()[3],
            "What's a question that distinguishes between a hippo and an elephant? "
        );
    }

    #[test]
    fn given_closed_input_when_playing_then_error_and_tree_kept() {
        let (mut session, _) = session(&["yes"], Seed::Small);

        assert!(session.play_round().is_err());
        assert_eq!(session.tree().as_ref(), &Seed::Small.tree());
    }

    #[test]
    fn given_quiz_when_walking_then_questions_get_trailing_space() {
        let (session, terminal) = session(&["yes", "no", "yes"], Seed::Medium);

        let guessed = session.quiz().unwrap();

        assert!(guessed);
        assert_eq!(
            terminal.prompts(),
            vec![
                "Is it bigger than a breadbox? ",
                "Is it gray? ",
                "Is it a tiger? "
            ]
        );
    }

    #[test]
    fn given_learned_tree_when_reset_then_back_to_seed() {
        let (mut session, _) = session(&["no", "no", "a cat", "Does it purr?", "yes"], Seed::Small);
        session.play_round().unwrap();
        assert_eq!(session.tree().node_count(), 5);

        session.reset_default();
        assert_eq!(session.tree().as_ref(), &Seed::Small.tree());

        session.reset_to(Seed::Medium);
        assert_eq!(session.seed(), Seed::Medium);
        assert_eq!(session.tree().node_count(), 5);
    }
}
