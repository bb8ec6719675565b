//! Level and total time shown on the intermission screen, with split comparisons.

use crate::hud::{Color, push_color};

pub const TICRATE: i32 = 35;

/// Differences (in tics) between this run and earlier ones at the same split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitDelta {
    /// Against a reference run, when one was loaded.
    pub reference: Option<i32>,
    pub best: i32,
}

impl SplitDelta {
    fn comparison(&self) -> i32 {
        self.reference.unwrap_or(self.best)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Split {
    /// Nothing to compare against yet.
    pub first_time: bool,
    pub level: SplitDelta,
    pub total: SplitDelta,
}

fn seconds(tics: i32) -> f64 {
    f64::from(tics % (60 * TICRATE)) / f64::from(TICRATE)
}

fn sign_and_color(diff: i32) -> (&'static str, Color) {
    if diff >= 0 {
        ("+", Color::Gray)
    } else {
        ("-", Color::Green)
    }
}

fn comparable(split: Option<&Split>) -> Option<&Split> {
    split.filter(|s| !s.first_time)
}

/// `m:ss.ss`, then ` (+ss.ss)` or ` (+m:ss.ss)` against the split.
pub fn level_time_line(level_tics: i32, split: Option<&Split>) -> String {
    let mut color = Color::Gray;
    let mut delta = String::new();

    if let Some(split) = comparable(split) {
        let diff = split.level.comparison();
        let (sign, c) = sign_and_color(diff);
        color = c;
        let diff = diff.saturating_abs();
        delta = if diff >= 60 * TICRATE {
            format!(
                " ({sign}{}:{:05.2})",
                diff / TICRATE / 60,
                seconds(diff)
            )
        } else {
            format!(" ({sign}{:04.2})", seconds(diff))
        };
    }

    let mut out = String::new();
    push_color(&mut out, color);
    out.push_str(&format!(
        "{}:{:05.2}",
        level_tics / TICRATE / 60,
        seconds(level_tics)
    ));
    out.push_str(&delta);
    out
}

/// `m:ss` of whole seconds, then ` (+s)` or ` (+m:ss)` against the split.
pub fn total_time_line(total_tics: i32, split: Option<&Split>) -> String {
    let mut color = Color::Gray;
    let mut delta = String::new();

    if let Some(split) = comparable(split) {
        let diff = split.total.comparison() / TICRATE;
        let (sign, c) = sign_and_color(diff);
        color = c;
        let diff = diff.saturating_abs();
        delta = if diff >= 60 {
            format!(" ({sign}{}:{:02})", diff / 60, diff % 60)
        } else {
            format!(" ({sign}{})", diff % 60)
        };
    }

    let mut out = String::new();
    push_color(&mut out, color);
    out.push_str(&format!(
        "{}:{:02}",
        total_tics / TICRATE / 60,
        (total_tics / TICRATE) % 60
    ));
    out.push_str(&delta);
    out
}
