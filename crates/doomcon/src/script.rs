//! Console scripts: files of newline- or `;`-separated command lines.

use std::path::PathBuf;

use memchr::{memchr, memchr2};
use tracing::{error, info};

use crate::ENTRY_SIZE;
use crate::console::Console;
use crate::host::Host;
use crate::scan::Scanner;

#[derive(Debug)]
pub enum ScriptError {
    NotFound(String),
    Unreadable { path: PathBuf, err: std::io::Error },
    LineTooLong(String),
    LineFailed(String),
    TooDeep(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::NotFound(name) => write!(f, "cannot find script file ({name})"),
            ScriptError::Unreadable { path, err } => {
                write!(f, "unable to read script file ({}): {err}", path.display())
            }
            ScriptError::LineTooLong(line) => {
                write!(f, "script line too long: {line:?} (limit {ENTRY_SIZE})")
            }
            ScriptError::LineFailed(line) => write!(f, "script line failed: {line:?}"),
            ScriptError::TooDeep(name) => {
                write!(f, "script nesting too deep at {name} (limit {MAX_SCRIPT_DEPTH})")
            }
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Unreadable { err, .. } => Some(err),
            _ => None,
        }
    }
}

/// Script files that may be running inside one another.
pub const MAX_SCRIPT_DEPTH: usize = 8;

/// Lines starting with `#`, `!` or `/` are comments.
pub fn is_comment(line: &str) -> bool {
    matches!(line.as_bytes().first(), Some(b'#' | b'!' | b'/'))
}

/// Splits script text on newlines and `;`, dropping empty pieces and trailing `\r`.
pub fn split_script(text: &str) -> Vec<&str> {
    split_on(text, |hay| memchr2(b'\n', b';', hay))
}

/// Splits one console entry into its `;`-separated commands, dropping empty pieces.
pub fn split_commands(text: &str) -> Vec<&str> {
    split_on(text, |hay| memchr(b';', hay))
}

fn split_on<'a>(text: &'a str, next_sep: impl Fn(&[u8]) -> Option<usize>) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut rest = text;
    loop {
        let (piece, tail) = match next_sep(rest.as_bytes()) {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        let piece = piece.trim_end_matches('\r');
        if !piece.is_empty() {
            out.push(piece);
        }
        match tail {
            Some(t) => rest = t,
            None => break,
        }
    }
    out
}

/// Dispatches one script line. Blank lines and comments succeed without dispatching.
pub fn run_line(console: &mut Console, host: &mut dyn Host, line: &str) -> Result<(), ScriptError> {
    if line.is_empty() || is_comment(line) {
        return Ok(());
    }
    if line.len() >= ENTRY_SIZE {
        return Err(ScriptError::LineTooLong(line.to_string()));
    }
    if !console.execute(host, line) {
        return Err(ScriptError::LineFailed(line.to_string()));
    }
    Ok(())
}

/// Runs lines in order, aborting at the first error. Returns how many lines were dispatched.
pub fn run_lines<'a>(
    console: &mut Console,
    host: &mut dyn Host,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<usize, ScriptError> {
    let mut dispatched = 0;
    for line in lines {
        run_line(console, host, line)?;
        if !line.is_empty() && !is_comment(line) {
            dispatched += 1;
        }
    }
    Ok(dispatched)
}

/// Resolves `name` through the host's file search and runs the file.
///
/// Fails with [`ScriptError::TooDeep`] once [`MAX_SCRIPT_DEPTH`] files are already running.
pub fn run_file(console: &mut Console, host: &mut dyn Host, name: &str) -> Result<usize, ScriptError> {
    if console.script_depth >= MAX_SCRIPT_DEPTH {
        return Err(ScriptError::TooDeep(name.to_string()));
    }
    let path = host
        .find_file(name)
        .ok_or_else(|| ScriptError::NotFound(name.to_string()))?;
    let text = match std::fs::read_to_string(&path) {
        Ok(v) => v,
        Err(err) => return Err(ScriptError::Unreadable { path, err }),
    };

    console.script_depth += 1;
    let out = run_lines(console, host, split_script(&text));
    console.script_depth -= 1;
    out
}

/// `script.run <file>`
pub(crate) fn script_run(console: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(name) = Scanner::new(args).token() else {
        return false;
    };
    match run_file(console, host, name) {
        Ok(n) => {
            info!(script = name, lines = n, "script executed");
            true
        }
        Err(e) => {
            error!(script = name, err = %e, "script aborted");
            false
        }
    }
}
