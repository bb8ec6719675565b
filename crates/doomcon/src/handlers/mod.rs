//! Built-in console commands.
//!
//! Each submodule exports a `COMMANDS` list of `(name, handler, flags)`. Handlers validate their
//! own arguments and report only success or failure.

pub mod brute_force;
pub mod build;
pub mod cheats;
pub mod config;
pub mod demo;
pub mod player;
pub mod tracker;

use crate::command::{CommandFlags, CommandTable, Handler};
use crate::console::Console;
use crate::host::Host;
use crate::script::script_run;

const SCRIPT_AND_CONFIG: &[(&str, Handler, CommandFlags)] = &[
    ("script.run", script_run, CommandFlags::ALWAYS),
    ("check", config::check, CommandFlags::ALWAYS),
    ("assign", config::assign, CommandFlags::ALWAYS),
    ("update", config::update, CommandFlags::ALWAYS),
];

const EXIT: &[(&str, Handler, CommandFlags)] = &[
    ("exit", exit, CommandFlags::ALWAYS),
    ("quit", exit, CommandFlags::ALWAYS),
];

pub fn register_standard(table: &mut CommandTable) {
    table.register_all(player::COMMANDS);
    table.register_all(SCRIPT_AND_CONFIG);
    table.register_all(tracker::COMMANDS);
    table.register_all(build::COMMANDS);
    table.register_all(brute_force::COMMANDS);
    table.register_all(demo::COMMANDS);
    for commands in cheats::COMMANDS {
        table.register_all(commands);
    }
    table.register_all(EXIT);
}

fn exit(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    host.close_console();
    true
}
