//! Command dispatch and the interactive game driver

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument, warn};

use crate::application::services::GameSession;
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands, ShowStyle, TreeSource};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{is_affirmative, to_termtree};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        None => play_interactive(container, &TreeSource::default()),
        Some(Commands::Play { source }) => play_interactive(container, source),
        Some(Commands::Quiz { source }) => quiz(container, source),
        Some(Commands::Show { source, style }) => {
            for line in show_lines(container, source, *style)? {
                output::info(&line);
            }
            Ok(())
        }
        Some(Commands::Check { file }) => check(container, file),
        Some(Commands::Config { command }) => config_command(container, command),
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
    }
}

/// Tree file for a command: the FILE argument wins over the configured one.
///
/// The flag tells whether the path was given explicitly.
fn resolve_tree_file(container: &ServiceContainer, source: &TreeSource) -> Option<(PathBuf, bool)> {
    match &source.file {
        Some(file) => Some((file.clone(), true)),
        None => container
            .settings
            .tree_file
            .clone()
            .map(|file| (file, false)),
    }
}

/// Session on the requested tree; a configured tree file that does not
/// exist yet falls back to the seed tree.
fn open_session(container: &ServiceContainer, source: &TreeSource) -> CliResult<GameSession> {
    let mut session = container.game_session(source.seed);
    if let Some((path, explicit)) = resolve_tree_file(container, source) {
        if explicit || container.fs.exists(&path) {
            session.load_game(&path)?;
        } else {
            debug!(path = %path.display(), "configured tree file missing, using seed tree");
        }
    }
    Ok(session)
}

/// The classic game: optional load, rounds until the player stops, optional save.
#[instrument(level = "debug", skip(container))]
pub fn play_interactive(container: &ServiceContainer, source: &TreeSource) -> CliResult<()> {
    let terminal = &container.terminal;
    let say = |line: &str| terminal.say(line).with_context("print message");
    let ask = |prompt: &str| terminal.ask(prompt).with_context("read answer");

    say("Welcome to 20 Questions!")?;

    let mut session = match resolve_tree_file(container, source) {
        Some(_) => open_session(container, source)?,
        None => {
            let mut session = container.game_session(source.seed);
            let mut loaded = false;
            if is_affirmative(&ask("Would you like to load a tree from a file? ")?) {
                let name = ask("What's the name of the file? ")?;
                let path = Path::new(name.trim());
                match session.load_game(path) {
                    Ok(()) => loaded = true,
                    Err(e) => {
                        warn!(error = %e, "load failed, keeping seed tree");
                        output::warning(&format!("Cannot load tree: {e}"));
                    }
                }
            }
            if !loaded {
                let notice = format!("Starting with the {} default tree. ", session.seed());
                say(notice.as_str())?;
            }
            session
        }
    };

    loop {
        session.play_round()?;
        if !is_affirmative(&ask("Would you like to play again? ")?) {
            break;
        }
    }

    if is_affirmative(&ask("Would you like to save this tree for later? ")?) {
        let name = ask("Please enter a file name: ")?;
        session.save_game(Path::new(name.trim()))?;
        say("Thank you! The file has been saved. ")?;
    }

    say("Bye!")?;
    Ok(())
}

/// One round without learning.
#[instrument(level = "debug", skip(container))]
pub fn quiz(container: &ServiceContainer, source: &TreeSource) -> CliResult<()> {
    let session = open_session(container, source)?;
    let line = if session.quiz()? {
        "I got it!"
    } else {
        "Drats! You win this time."
    };
    container
        .terminal
        .say(line)
        .with_context("print result")?;
    Ok(())
}

/// Tree view as printable lines.
pub fn show_lines(
    container: &ServiceContainer,
    source: &TreeSource,
    style: ShowStyle,
) -> CliResult<Vec<String>> {
    let session = open_session(container, source)?;
    Ok(match style {
        ShowStyle::Classic => session.render(),
        ShowStyle::Unicode => to_termtree(session.tree())
            .to_string()
            .lines()
            .map(str::to_string)
            .collect(),
    })
}

/// Statistics of a valid tree file, one line per fact.
pub fn check_report(container: &ServiceContainer, file: &Path) -> CliResult<Vec<String>> {
    let tree = container.tree_store().load(file)?;
    Ok(vec![
        format!("nodes:     {}", tree.node_count()),
        format!("questions: {}", tree.node_count() - tree.leaf_count()),
        format!("guesses:   {}", tree.leaf_count()),
        format!("depth:     {}", tree.depth()),
    ])
}

#[instrument(level = "debug", skip(container))]
fn check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let report = check_report(container, file)?;
    output::success(&format!("{} is a valid tree file", file.display()));
    for line in report {
        output::detail(&line);
    }
    Ok(())
}

fn config_command(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if path.exists() { "" } else { " (not created)" };
                    output::info(&format!("global: {}{}", path.display(), state));
                }
                None => output::info("global: (no config directory on this platform)"),
            }
            Ok(())
        }
        ConfigCommands::Init => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("no config directory on this platform".to_string())
            })?;
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).with_path_context("create config dir", dir)?;
            }
            container
                .fs
                .write_atomic(&path, Settings::template().as_bytes())
                .with_path_context("write config template", &path)?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
