use std::collections::HashMap;

use crate::console::Console;
use crate::host::Host;

bitflags::bitflags! {
    /// Session contexts a command stays usable in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CommandFlags: u8 {
        /// Usable while a demo is recording or playing back.
        const DEMO   = 1 << 0;
        /// Usable while strict mode is active.
        const STRICT = 1 << 1;
    }
}

impl CommandFlags {
    /// Refused during demos and in strict mode.
    pub const NEVER: Self = Self::empty();
    pub const ALWAYS: Self = Self::DEMO.union(Self::STRICT);
}

/// `(console, host, command, args) -> success`.
///
/// `command` is the name as typed; `args` is everything after it up to the first `;`.
pub type Handler = fn(&mut Console, &mut dyn Host, &str, &str) -> bool;

#[derive(Clone, Copy, Debug)]
pub struct CommandEntry {
    pub name: &'static str,
    pub handler: Handler,
    pub flags: CommandFlags,
}

/// Ordered, case-insensitive command registry. Built once; never mutated after startup.
#[derive(Clone, Debug, Default)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
    by_name: HashMap<String, usize>, // lowercase name -> first entry with that name
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in console command.
    pub fn standard() -> Self {
        let mut t = Self::new();
        crate::handlers::register_standard(&mut t);
        t
    }

    /// Adds a command. A name that is already registered keeps its first entry.
    pub fn register(&mut self, name: &'static str, handler: Handler, flags: CommandFlags) {
        let idx = self.entries.len();
        self.entries.push(CommandEntry {
            name,
            handler,
            flags,
        });
        self.by_name.entry(name.to_ascii_lowercase()).or_insert(idx);
    }

    pub fn register_all(&mut self, commands: &[(&'static str, Handler, CommandFlags)]) {
        for (name, handler, flags) in commands {
            self.register(name, *handler, *flags);
        }
    }

    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        let idx = *self.by_name.get(&name.to_ascii_lowercase())?;
        self.entries.get(idx)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
