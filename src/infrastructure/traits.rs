//! I/O boundary traits for testability
//!
//! These traits abstract the player's terminal and the tree files, allowing
//! the game session to be tested with scripted implementations.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Line-based conversation with the player.
pub trait Terminal: Send + Sync {
    /// Print `prompt` without a newline and read one line of input.
    ///
    /// The returned line has its terminator stripped. End of input is an
    /// `UnexpectedEof` error.
    fn ask(&self, prompt: &str) -> io::Result<String>;

    /// Print one line of output.
    fn say(&self, line: &str) -> io::Result<()>;
}

/// Filesystem abstraction for tree files.
pub trait FileSystem: Send + Sync {
    /// Open a file for buffered reading. The handle closes when dropped.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;

    /// Replace the contents of `path` without leaving a partial file behind.
    fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // temp file in the target directory so the rename stays on one device
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Real terminal on stdin/stdout.
#[derive(Debug, Default)]
pub struct StdioTerminal;

impl Terminal for StdioTerminal {
    fn ask(&self, prompt: &str) -> io::Result<String> {
        {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn say(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()
    }
}
