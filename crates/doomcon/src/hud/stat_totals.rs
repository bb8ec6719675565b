use std::fmt::Write;

use crate::hud::{Color, push_color};

/// One player's tallies for the current level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerTally {
    pub kills: i32,
    /// Kills of monsters that do not count toward the kill requirement.
    pub max_kill_discount: i32,
    pub items: i32,
    pub secrets: i32,
}

impl PlayerTally {
    fn counted_kills(&self) -> i32 {
        self.kills - self.max_kill_discount
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelTotals {
    pub monsters: i32,
    pub items: i32,
    pub secrets: i32,
    /// Kills needed for 100%, not counting monsters that are excluded from it.
    pub kill_requirement: i32,
    pub respawn_monsters: bool,
}

fn progress(have: i32, need: i32) -> Color {
    if have >= need { Color::Blue } else { Color::Gold }
}

/// `K a/b I c/d S e/f` for the players in the game; `display` indexes `players`.
///
/// With two or more players the kill and secret counts are broken down per player.
pub fn stat_totals(players: &[PlayerTally], display: usize, level: &LevelTotals) -> String {
    let mut all_kills = String::new();
    let mut all_secrets = String::new();
    let mut kills = 0;
    let mut raw_kills = 0;
    let mut secrets = 0;

    for (i, p) in players.iter().enumerate() {
        let color = if i == display { Color::Green } else { Color::Gray };
        let sep = if i == 0 { "" } else { "+" };
        push_color(&mut all_kills, color);
        let _ = write!(all_kills, "{sep}{}", p.counted_kills());
        push_color(&mut all_secrets, color);
        let _ = write!(all_secrets, "{sep}{}", p.secrets);

        kills += p.counted_kills();
        raw_kills += p.kills;
        secrets += p.secrets;
    }

    let mut kill_requirement = level.kill_requirement;
    if level.respawn_monsters {
        kills = raw_kills;
        kill_requirement = level.monsters;
    }
    let items = players.get(display).map_or(0, |p| p.items);
    let multiplayer = players.len() >= 2;

    let mut out = String::new();
    push_color(&mut out, Color::Red);
    out.push_str("K ");
    if multiplayer {
        out.push_str(&all_kills);
        out.push(' ');
    }
    push_color(&mut out, progress(kills, kill_requirement));
    let _ = write!(out, "{kills}/{kill_requirement} ");

    push_color(&mut out, Color::Red);
    out.push_str("I ");
    push_color(&mut out, progress(items, level.items));
    let _ = write!(out, "{items}/{} ", level.items);

    push_color(&mut out, Color::Red);
    out.push_str("S ");
    if multiplayer {
        out.push_str(&all_secrets);
        out.push(' ');
    }
    push_color(&mut out, progress(secrets, level.secrets));
    let _ = write!(out, "{secrets}/{}", level.secrets);
    out
}
