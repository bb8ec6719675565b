//! `doomcon`: the in-game debug console and a few HUD text lines.
//!
//! A console line is split into a command name and an argument string, looked up in an
//! immutable [`CommandTable`], authorized against the current session state (demo recording or
//! playback, strict mode) and handed to a handler. Every outcome is reported as one short status
//! message plus a sound cue.
//!
//! Everything a handler reads or mutates lives behind the [`Host`] traits; [`sandbox::Sandbox`]
//! is an in-memory host used by the tests and by the `doomcon_repl` binary.

pub mod command;
pub mod config_store;
pub mod console;
pub mod data_dir;
pub mod handlers;
pub mod host;
pub mod hud;
pub mod player;
pub mod sandbox;
pub mod scan;
pub mod script;
pub mod session;

pub use command::{CommandEntry, CommandFlags, CommandTable, Handler};
pub use console::Console;
pub use host::{Host, SessionState};
pub use session::{Action, ConsoleSession, Cue};

/// Maximum length of one console entry (and of one script line).
pub const ENTRY_SIZE: usize = 64;

/// Number of configurable script slots (`script_0` .. `script_9`).
pub const SCRIPT_COUNT: usize = 10;
