use tracing::info;

use crate::command::{CommandFlags, Handler};
use crate::console::Console;
use crate::host::Host;
use crate::scan::Scanner;

pub(crate) const COMMANDS: &[(&str, Handler, CommandFlags)] = &[
    ("demo.export", export, CommandFlags::ALWAYS),
    ("demo.start", start, CommandFlags::NEVER),
    ("demo.stop", stop, CommandFlags::ALWAYS),
];

fn export(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(name) = Scanner::new(args).token() else {
        return false;
    };
    info!(demo = name, "exporting demo");
    host.export_demo(name);
    true
}

fn start(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(name) = Scanner::new(args).token() else {
        return false;
    };
    host.start_demo_segment(name)
}

/// Only meaningful while recording; playback is left alone.
fn stop(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    if !host.session_state().demo_recording {
        return false;
    }
    host.end_demo();
    host.refresh_strict_mode();
    info!("demo recording stopped from console");
    true
}

#[cfg(test)]
mod tests {
    use crate::console::Console;
    use crate::sandbox::Sandbox;

    #[test]
    fn export_needs_a_name() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        h.state.demo_playback = true;
        h.state.strict_mode = true;
        assert!(c.execute(&mut h, "demo.export run1"));
        assert_eq!(h.exported_demos, vec![std::path::PathBuf::from("run1")]);
        assert!(!c.execute(&mut h, "demo.export"));
    }

    #[test]
    fn export_lands_in_the_data_directory() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        h.data_dir = Some("data/doomcon_data/doom2".into());
        assert!(c.execute(&mut h, "demo.export run1"));
        assert_eq!(
            h.exported_demos,
            vec![std::path::Path::new("data/doomcon_data/doom2").join("run1")]
        );
    }

    #[test]
    fn start_begins_recording_outside_demos_only() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        assert!(c.execute(&mut h, "demo.start seg"));
        assert!(h.state.demo_recording);
        assert_eq!(h.demo_name.as_deref(), Some("seg"));

        assert!(!c.execute(&mut h, "demo.start again"));
        assert_eq!(c.session().message(), "command not allowed in demo mode");
    }

    #[test]
    fn stop_ends_recording_and_restores_strictness() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        assert!(!c.execute(&mut h, "demo.stop"));
        assert_eq!(c.session().message(), "command invalid");

        h.strict_requested = false;
        h.state.demo_recording = true;
        h.state.strict_mode = true;
        assert!(c.execute(&mut h, "demo.stop"));
        assert!(!h.state.demo_recording);
        assert!(!h.state.strict_mode);
        assert!(h.demo_name.is_none());
    }

    #[test]
    fn stop_leaves_playback_running() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        h.state.demo_playback = true;
        assert!(!c.execute(&mut h, "demo.stop"));
        assert!(h.state.demo_playback);
    }
}
