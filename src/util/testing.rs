use std::collections::VecDeque;
use std::env;
use std::io;
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::Terminal;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["config::"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// One exchange seen by a [`ScriptedTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// A prompt and the answer handed back for it.
    Asked { prompt: String, answer: String },
    /// A line printed with `say`.
    Said(String),
}

/// Terminal that replays canned answers and records the conversation.
///
/// Running out of answers behaves like closed stdin (`UnexpectedEof`).
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    answers: Mutex<VecDeque<String>>,
    transcript: Mutex<Vec<Exchange>>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn transcript(&self) -> Vec<Exchange> {
        self.transcript.lock().expect("transcript lock").clone()
    }

    /// Prompts in the order they were asked.
    pub fn prompts(&self) -> Vec<String> {
        self.transcript()
            .into_iter()
            .filter_map(|e| match e {
                Exchange::Asked { prompt, .. } => Some(prompt),
                Exchange::Said(_) => None,
            })
            .collect()
    }

    /// Lines printed with `say`.
    pub fn said(&self) -> Vec<String> {
        self.transcript()
            .into_iter()
            .filter_map(|e| match e {
                Exchange::Said(line) => Some(line),
                Exchange::Asked { .. } => None,
            })
            .collect()
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.lock().expect("answers lock").len()
    }
}

impl Terminal for ScriptedTerminal {
    fn ask(&self, prompt: &str) -> io::Result<String> {
        let answer = self
            .answers
            .lock()
            .expect("answers lock")
            .pop_front()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("no scripted answer for prompt {prompt:?}"),
                )
            })?;
        self.transcript
            .lock()
            .expect("transcript lock")
            .push(Exchange::Asked {
                prompt: prompt.to_string(),
                answer: answer.clone(),
            });
        Ok(answer)
    }

    fn say(&self, line: &str) -> io::Result<()> {
        self.transcript
            .lock()
            .expect("transcript lock")
            .push(Exchange::Said(line.to_string()));
        Ok(())
    }
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn given_script_when_exhausted_then_unexpected_eof() {
        let terminal = ScriptedTerminal::new(["yes"]);
        assert_eq!(terminal.ask("Q? ").unwrap(), "yes");
        let err = terminal.ask("Again? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(terminal.prompts(), vec!["Q? "]);
    }
}
