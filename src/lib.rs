//! Self-learning 20 Questions
//!
//! The game keeps a binary tree of yes/no questions with guesses at the
//! leaves. Every wrong guess teaches it a new item and a question that tells
//! the new item apart from the old guess.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
