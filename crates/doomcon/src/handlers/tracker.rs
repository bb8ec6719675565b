use crate::command::{CommandFlags, Handler};
use crate::console::Console;
use crate::host::{Host, TrackTarget};
use crate::scan::Scanner;

pub(crate) const COMMANDS: &[(&str, Handler, CommandFlags)] = &[
    ("tracker.add_line", add_line, CommandFlags::DEMO),
    ("t.al", add_line, CommandFlags::DEMO),
    ("tracker.remove_line", remove_line, CommandFlags::DEMO),
    ("t.rl", remove_line, CommandFlags::DEMO),
    ("tracker.add_line_distance", add_line_distance, CommandFlags::DEMO),
    ("t.ald", add_line_distance, CommandFlags::DEMO),
    ("tracker.remove_line_distance", remove_line_distance, CommandFlags::DEMO),
    ("t.rld", remove_line_distance, CommandFlags::DEMO),
    ("tracker.add_sector", add_sector, CommandFlags::DEMO),
    ("t.as", add_sector, CommandFlags::DEMO),
    ("tracker.remove_sector", remove_sector, CommandFlags::DEMO),
    ("t.rs", remove_sector, CommandFlags::DEMO),
    ("tracker.add_mobj", add_mobj, CommandFlags::DEMO),
    ("t.am", add_mobj, CommandFlags::DEMO),
    ("tracker.remove_mobj", remove_mobj, CommandFlags::DEMO),
    ("t.rm", remove_mobj, CommandFlags::DEMO),
    ("tracker.add_player", add_player, CommandFlags::DEMO),
    ("t.ap", add_player, CommandFlags::DEMO),
    ("tracker.remove_player", remove_player, CommandFlags::DEMO),
    ("t.rp", remove_player, CommandFlags::DEMO),
    ("tracker.reset", reset, CommandFlags::DEMO),
    ("t.r", reset, CommandFlags::DEMO),
];

fn track(host: &mut dyn Host, args: &str, target: fn(i32) -> TrackTarget) -> bool {
    Scanner::new(args)
        .int()
        .is_some_and(|id| host.track(target(id)))
}

fn untrack(host: &mut dyn Host, args: &str, target: fn(i32) -> TrackTarget) -> bool {
    Scanner::new(args)
        .int()
        .is_some_and(|id| host.untrack(target(id)))
}

fn add_line(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    track(host, args, TrackTarget::Line)
}

fn remove_line(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    untrack(host, args, TrackTarget::Line)
}

fn add_line_distance(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    track(host, args, TrackTarget::LineDistance)
}

fn remove_line_distance(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    untrack(host, args, TrackTarget::LineDistance)
}

fn add_sector(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    track(host, args, TrackTarget::Sector)
}

fn remove_sector(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    untrack(host, args, TrackTarget::Sector)
}

fn add_mobj(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    track(host, args, TrackTarget::Mobj)
}

fn remove_mobj(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    untrack(host, args, TrackTarget::Mobj)
}

// Always the console player.
fn add_player(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    host.track(TrackTarget::Player(0))
}

fn remove_player(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    host.untrack(TrackTarget::Player(0))
}

fn reset(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    host.wipe_trackers();
    true
}
