use crate::command::{CommandFlags, Handler};
use crate::console::Console;
use crate::host::Host;

macro_rules! cheat_codes {
    ($($name:literal),* $(,)?) => {
        &[$(($name, cheat as Handler, CommandFlags::DEMO)),*]
    };
}

/// Codes handed straight to the cheat engine. It decides whether they apply in this game.
const CHEAT_CODES: &[(&str, Handler, CommandFlags)] = cheat_codes![
    "idchoppers", "iddqd", "idkfa", "idfa", "idspispopd", "idclip", "idmypos", "idrate", "iddt",
    "iddst", "iddkt", "iddit", "idclev", "idmus",
    "tntcomp", "tntem", "tnthom", "tntka", "tntsmart", "tntpitch", "tntfast", "tntice", "tntpush",
    "notarget", "fly",
    "quicken", "ponce", "kitty", "massacre", "rambo", "skel", "shazam", "ravmap",
    "cockadoodledoo", "gimme", "engage",
    "satan", "clubmed", "butcher", "nra", "indiana", "locksmith", "sherlock", "casper", "init",
    "mapsco", "deliverance", "shadowcaster", "visit", "puke",
];

const CONSOLE_ONLY: &[(&str, Handler, CommandFlags)] = &[
    ("fullclip", fullclip, CommandFlags::NEVER),
    ("freeze", freeze, CommandFlags::NEVER),
    ("nosleep", nosleep, CommandFlags::NEVER),
];

pub(crate) const COMMANDS: &[&[(&str, Handler, CommandFlags)]] = &[CHEAT_CODES, CONSOLE_ONLY];

fn cheat(_: &mut Console, host: &mut dyn Host, command: &str, args: &str) -> bool {
    host.enter_cheat(&command.to_ascii_lowercase(), args)
}

fn fullclip(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    let p = host.player_mut();
    p.infinite_ammo = !p.infinite_ammo;
    true
}

fn freeze(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    host.toggle_frozen_mode();
    true
}

fn nosleep(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    host.wake_all_sectors();
    true
}

#[cfg(test)]
mod tests {
    use crate::console::Console;
    use crate::sandbox::Sandbox;

    #[test]
    fn codes_reach_the_cheat_engine_lowercased() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        assert!(c.execute(&mut h, "IDDQD"));
        assert!(c.execute(&mut h, "idclev 0107"));
        assert_eq!(
            h.cheats,
            vec![
                ("iddqd".to_string(), String::new()),
                ("idclev".to_string(), "0107".to_string()),
            ]
        );
        assert!(h.player.god_mode);
    }

    #[test]
    fn rejected_codes_fail() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        h.rejected_cheats.push("idclev".to_string());
        assert!(!c.execute(&mut h, "idclev 99"));
        assert_eq!(c.session().message(), "command invalid");
    }

    #[test]
    fn codes_work_during_playback() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        h.state.demo_playback = true;
        assert!(c.execute(&mut h, "iddt"));
        h.state.strict_mode = true;
        assert!(!c.execute(&mut h, "iddt"));
    }

    #[test]
    fn console_only_toggles() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        assert!(c.execute(&mut h, "fullclip"));
        assert!(h.player.infinite_ammo);
        assert!(c.execute(&mut h, "fullclip"));
        assert!(!h.player.infinite_ammo);

        assert!(c.execute(&mut h, "freeze"));
        assert!(h.frozen);
        assert!(c.execute(&mut h, "nosleep"));
        assert_eq!(h.sectors_woken, h.world.sectors);

        h.state.demo_recording = true;
        assert!(!c.execute(&mut h, "freeze"));
        assert!(h.frozen);
    }
}
