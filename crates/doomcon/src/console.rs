use tracing::{debug, error, info};

use crate::command::{CommandEntry, CommandFlags, CommandTable};
use crate::host::{Host, SessionState};
use crate::scan::split_command;
use crate::script;
use crate::session::{Action, ConsoleSession, Cue};
use crate::SCRIPT_COUNT;

pub const MSG_EXECUTED: &str = "command executed";
pub const MSG_INVALID: &str = "command invalid";
pub const MSG_UNKNOWN: &str = "command unknown";

/// Why an existing command was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Denied {
    DemoMode,
    StrictMode,
}

impl Denied {
    pub fn message(self) -> &'static str {
        match self {
            Denied::DemoMode => "command not allowed in demo mode",
            Denied::StrictMode => "command not allowed in strict mode",
        }
    }
}

/// Demo check first, then strict mode.
pub fn authorize(flags: CommandFlags, state: SessionState) -> Result<(), Denied> {
    if !flags.contains(CommandFlags::DEMO) && state.in_demo() {
        return Err(Denied::DemoMode);
    }
    if !flags.contains(CommandFlags::STRICT) && state.strict_mode {
        return Err(Denied::StrictMode);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum Lookup {
    Unknown,
    Found(CommandEntry),
}

#[derive(Debug)]
pub struct Console {
    table: CommandTable,
    session: ConsoleSession,
    // Configured scripts, split on first use.
    scripts: Vec<Option<Vec<String>>>,
    // Script files currently running, outermost first.
    pub(crate) script_depth: usize,
}

impl Console {
    pub fn new(table: CommandTable) -> Self {
        Self {
            table,
            session: ConsoleSession::new(),
            scripts: vec![None; SCRIPT_COUNT],
            script_depth: 0,
        }
    }

    /// Console with every built-in command.
    pub fn standard() -> Self {
        Self::new(CommandTable::standard())
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn session(&self) -> &ConsoleSession {
        &self.session
    }

    pub fn prompt_line(&self) -> String {
        self.session.prompt_line()
    }

    pub fn message_line(&self) -> String {
        self.session.message_line()
    }

    /// Starts a fresh entry. Only possible inside a level.
    pub fn open(&mut self, host: &mut dyn Host) -> bool {
        if !host.in_level() {
            return false;
        }
        self.session.reset_entry();
        true
    }

    /// Runs one command line. A blank line is a successful no-op.
    ///
    /// The pending entry is cleared on every path.
    pub fn execute(&mut self, host: &mut dyn Host, line: &str) -> bool {
        let ok = match split_command(line) {
            Some((command, args)) => self.dispatch(host, command, args),
            None => true,
        };
        self.session.reset_entry();
        ok
    }

    fn lookup(&self, command: &str) -> Lookup {
        match self.table.find(command) {
            Some(entry) => Lookup::Found(*entry),
            None => Lookup::Unknown,
        }
    }

    fn dispatch(&mut self, host: &mut dyn Host, command: &str, args: &str) -> bool {
        let entry = match self.lookup(command) {
            Lookup::Found(entry) => entry,
            Lookup::Unknown => {
                debug!(command, "unknown console command");
                self.report(host, MSG_UNKNOWN, Cue::Failure);
                return false;
            }
        };

        if let Err(denied) = authorize(entry.flags, host.session_state()) {
            debug!(command = entry.name, ?denied, "console command refused");
            self.report(host, denied.message(), Cue::Failure);
            return false;
        }

        let ok = (entry.handler)(self, host, command, args);
        if ok {
            debug!(command = entry.name, args, "console command executed");
            self.report(host, MSG_EXECUTED, Cue::Success);
        } else {
            debug!(command = entry.name, args, "console command invalid");
            self.report(host, MSG_INVALID, Cue::Failure);
        }
        ok
    }

    fn report(&mut self, host: &mut dyn Host, message: &str, cue: Cue) {
        self.session.set_outcome(message, cue);
        host.play_cue(cue);
    }

    /// Feeds typed characters into the pending entry.
    pub fn update_text(&mut self, text: &str) {
        self.session.push_text(text);
    }

    pub fn update_action(&mut self, host: &mut dyn Host, action: Action) {
        match action {
            Action::Backspace => {
                self.session.backspace();
            }
            Action::Enter => {
                let entry = self.session.submit();
                for line in script::split_commands(&entry) {
                    self.execute(host, line);
                }
                self.session.reset_entry();
            }
            Action::Recall => self.session.recall(),
        }
    }

    /// Runs configured script slot `index` (`script_<index>`), stopping at the first failure.
    pub fn run_script(&mut self, host: &mut dyn Host, index: usize) -> bool {
        if !host.in_level() || index >= SCRIPT_COUNT {
            return false;
        }

        let lines = match &self.scripts[index] {
            Some(lines) => lines.clone(),
            None => {
                let text = host
                    .string_config(&format!("script_{index}"))
                    .unwrap_or_default();
                let lines = script::split_commands(&text)
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                self.scripts[index] = Some(lines.clone());
                lines
            }
        };

        match script::run_lines(self, host, lines.iter().map(String::as_str)) {
            Ok(n) => {
                info!(script = index, lines = n, "configured script executed");
                host.print(&format!("Script {index} executed"));
                true
            }
            Err(e) => {
                error!(script = index, err = %e, "configured script failed");
                host.print(&format!("Script {index} failed"));
                false
            }
        }
    }

    /// Drops cached script slots so the next run re-reads the configuration.
    pub fn forget_scripts(&mut self) {
        self.scripts.iter_mut().for_each(|s| *s = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ENTRY_SIZE;
    use crate::sandbox::Sandbox;

    fn ok_handler(_: &mut Console, _: &mut dyn Host, _: &str, _: &str) -> bool {
        true
    }

    fn args_must_be_valid(_: &mut Console, _: &mut dyn Host, _: &str, args: &str) -> bool {
        args == "valid"
    }

    fn sample_console() -> Console {
        let mut t = CommandTable::new();
        t.register("anytime", ok_handler, CommandFlags::ALWAYS);
        t.register("nodemo", ok_handler, CommandFlags::STRICT);
        t.register("nostrict", ok_handler, CommandFlags::DEMO);
        t.register("never", args_must_be_valid, CommandFlags::NEVER);
        Console::new(t)
    }

    #[test]
    fn authorize_checks_demo_before_strict() {
        let both = SessionState {
            demo_recording: true,
            demo_playback: false,
            strict_mode: true,
        };
        assert_eq!(authorize(CommandFlags::NEVER, both), Err(Denied::DemoMode));
        assert_eq!(authorize(CommandFlags::DEMO, both), Err(Denied::StrictMode));
        assert_eq!(authorize(CommandFlags::STRICT, both), Err(Denied::DemoMode));
        assert_eq!(authorize(CommandFlags::ALWAYS, both), Ok(()));
        assert_eq!(authorize(CommandFlags::NEVER, SessionState::default()), Ok(()));
    }

    #[test]
    fn case_variants_dispatch_identically() {
        for state in [
            SessionState::default(),
            SessionState {
                demo_playback: true,
                ..SessionState::default()
            },
            SessionState {
                strict_mode: true,
                ..SessionState::default()
            },
        ] {
            for name in ["anytime", "nodemo", "nostrict", "never"] {
                let mut a = sample_console();
                let mut b = sample_console();
                let mut host_a = Sandbox::new();
                let mut host_b = Sandbox::new();
                host_a.state = state;
                host_b.state = state;

                let ra = a.execute(&mut host_a, &format!("{name} valid"));
                let rb = b.execute(&mut host_b, &format!("{} valid", name.to_ascii_uppercase()));
                assert_eq!(ra, rb, "{name} in {state:?}");
                assert_eq!(a.session().message(), b.session().message());
            }
        }
    }

    #[test]
    fn demo_refusal_ignores_argument_validity() {
        let mut c = sample_console();
        let mut host = Sandbox::new();
        host.state.demo_recording = true;

        for line in ["never valid", "never", "never garbage 1 2 3", "nodemo"] {
            assert!(!c.execute(&mut host, line));
            assert_eq!(c.session().message(), "command not allowed in demo mode");
            assert_eq!(c.session().cue(), Some(Cue::Failure));
        }
    }

    #[test]
    fn strict_refusal_only_after_demo_check_passes() {
        let mut c = sample_console();
        let mut host = Sandbox::new();
        host.state.strict_mode = true;

        assert!(!c.execute(&mut host, "nostrict"));
        assert_eq!(c.session().message(), "command not allowed in strict mode");
        assert!(c.execute(&mut host, "nodemo"));
        assert_eq!(c.session().message(), MSG_EXECUTED);

        host.state.demo_playback = true;
        assert!(!c.execute(&mut host, "nostrict"));
        assert_eq!(c.session().message(), "command not allowed in strict mode");
        assert!(!c.execute(&mut host, "nodemo"));
        assert_eq!(c.session().message(), "command not allowed in demo mode");
    }

    #[test]
    fn unknown_and_invalid_are_distinct() {
        let mut c = sample_console();
        let mut host = Sandbox::new();

        assert!(!c.execute(&mut host, "nosuchcmd"));
        assert_eq!(c.session().message(), MSG_UNKNOWN);
        assert_eq!(host.cues.last(), Some(&Cue::Failure));

        assert!(!c.execute(&mut host, "never nope"));
        assert_eq!(c.session().message(), MSG_INVALID);

        assert!(c.execute(&mut host, "never valid"));
        assert_eq!(c.session().message(), MSG_EXECUTED);
        assert_eq!(host.cues.last(), Some(&Cue::Success));
    }

    #[test]
    fn prefixes_do_not_match() {
        let mut c = sample_console();
        let mut host = Sandbox::new();
        assert!(!c.execute(&mut host, "any"));
        assert_eq!(c.session().message(), MSG_UNKNOWN);
    }

    #[test]
    fn blank_line_is_silent_noop() {
        let mut c = sample_console();
        let mut host = Sandbox::new();
        c.update_text("   ");
        assert!(c.execute(&mut host, "   "));
        assert_eq!(c.session().message(), "");
        assert_eq!(c.session().cue(), None);
        assert!(host.cues.is_empty());
        assert_eq!(c.session().index(), 0);
    }

    #[test]
    fn execute_always_resets_entry() {
        let mut c = sample_console();
        let mut host = Sandbox::new();
        c.update_text("half typed");
        c.execute(&mut host, "nosuchcmd");
        assert_eq!(c.session().entry(), "");
        assert_eq!(c.session().index(), 0);
    }

    #[test]
    fn enter_runs_each_semicolon_piece() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        c.update_text("player.set_health 5; nosuchcmd ;player.set_armor 50 2");
        c.update_action(&mut host, Action::Enter);

        assert_eq!(host.player.health, 5);
        assert_eq!(host.player.armor_points, 50);
        assert_eq!(host.player.armor_type, 2);
        assert_eq!(c.session().message(), MSG_EXECUTED);
        assert_eq!(c.session().entry(), "");
    }

    #[test]
    fn enter_then_recall_restores_entry() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        c.update_text("player.set_health 77");
        c.update_action(&mut host, Action::Enter);
        assert_eq!(c.session().index(), 0);

        c.update_action(&mut host, Action::Recall);
        assert_eq!(c.session().entry(), "player.set_health 77");
        assert_eq!(c.session().index(), "player.set_health 77".len());
    }

    #[test]
    fn backspace_edits_entry() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        c.update_text("iddqdd");
        c.update_action(&mut host, Action::Backspace);
        assert_eq!(c.prompt_line(), "$ iddqd_");
    }

    #[test]
    fn give_ammo_example() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        host.player.ammo[2] = 10;
        assert!(c.execute(&mut host, "player.give_ammo 2 50"));
        assert_eq!(host.player.ammo[2], 60);
        assert_eq!(c.session().message(), "command executed");

        assert!(c.execute(&mut host, "player.give_ammo 2 500"));
        assert_eq!(host.player.ammo[2], host.player.max_ammo[2]);
    }

    #[test]
    fn open_requires_level() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        host.in_level = false;
        assert!(!c.open(&mut host));
        host.in_level = true;
        c.update_text("junk");
        assert!(c.open(&mut host));
        assert_eq!(c.session().entry(), "");
    }

    #[test]
    fn configured_script_runs_and_reports() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        host.config
            .set_string("script_3", "player.set_health 1;#comment;player.set_armor 9");
        assert!(c.run_script(&mut host, 3));
        assert_eq!(host.player.health, 1);
        assert_eq!(host.player.armor_points, 9);
        assert_eq!(host.printed.last().map(String::as_str), Some("Script 3 executed"));
    }

    #[test]
    fn configured_script_is_cached_until_forgotten() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        host.config.set_string("script_0", "player.set_health 1");
        assert!(c.run_script(&mut host, 0));

        host.config.set_string("script_0", "player.set_health 2");
        assert!(c.run_script(&mut host, 0));
        assert_eq!(host.player.health, 1);

        c.forget_scripts();
        assert!(c.run_script(&mut host, 0));
        assert_eq!(host.player.health, 2);
    }

    #[test]
    fn configured_script_stops_at_failure() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        host.config
            .set_string("script_1", "jump.to_tic -5;player.set_health 3");
        assert!(!c.run_script(&mut host, 1));
        assert_eq!(host.player.health, 100);
        assert_eq!(host.printed.last().map(String::as_str), Some("Script 1 failed"));

        let long = format!("player.set_health 4 {}", "x".repeat(ENTRY_SIZE));
        host.config.set_string("script_2", &long);
        assert!(!c.run_script(&mut host, 2));
        assert_eq!(host.player.health, 100);
    }

    #[test]
    fn configured_script_bounds() {
        let mut c = Console::standard();
        let mut host = Sandbox::new();
        assert!(!c.run_script(&mut host, SCRIPT_COUNT));
        host.in_level = false;
        assert!(!c.run_script(&mut host, 0));
        assert!(host.printed.is_empty());
    }

    #[test]
    fn every_standard_command_ignores_case() {
        let table = CommandTable::standard();
        for entry in table.entries() {
            for args in ["", " 1", " 1 2"] {
                let run = |name: String| {
                    let mut c = Console::standard();
                    let mut host = Sandbox::new();
                    let ok = c.execute(&mut host, &format!("{name}{args}"));
                    (ok, c.session().message().to_string(), host.cheats, host.player.health)
                };
                let lower = run(entry.name.to_ascii_lowercase());
                let upper = run(entry.name.to_ascii_uppercase());
                assert_eq!(lower, upper, "{}{args}", entry.name);
                assert_ne!(lower.1, "command unknown", "{}{args}", entry.name);
            }
        }
    }
}
