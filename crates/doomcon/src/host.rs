//! Collaborators the console reaches into.
//!
//! The console itself owns no game state. Each trait below is one collaborator a handler talks
//! to; [`Host`] bundles them so dispatch can pass a single `&mut dyn Host` around.

use std::path::PathBuf;

use crate::handlers::brute_force::BruteForcePlan;
use crate::player::{Player, Power};
use crate::session::Cue;

/// Demo and strict-mode state, sampled fresh for every dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub demo_recording: bool,
    pub demo_playback: bool,
    pub strict_mode: bool,
}

impl SessionState {
    pub fn in_demo(self) -> bool {
        self.demo_recording || self.demo_playback
    }
}

pub trait Session {
    fn session_state(&self) -> SessionState;
    /// True while a map is loaded and running.
    fn in_level(&self) -> bool;
    /// Re-derives strict mode after the demo state changed.
    fn refresh_strict_mode(&mut self);
}

pub trait PlayerAccess {
    fn player(&self) -> &Player;
    fn player_mut(&mut self) -> &mut Player;
    /// Weapon pickup through the engine's own rules. `weapon` is already range checked.
    fn give_weapon(&mut self, weapon: usize);
    /// Power pickup through the engine's own rules; sets the power's default duration.
    fn give_power(&mut self, power: Power);
    /// Undoes the side effects of a power that was just zeroed.
    fn clear_power_effects(&mut self, power: Power);
}

pub trait World {
    fn line_count(&self) -> usize;
    fn sector_count(&self) -> usize;
    /// Makes every sector's sound target the player, waking all monsters.
    fn wake_all_sectors(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackTarget {
    Line(i32),
    LineDistance(i32),
    Sector(i32),
    Mobj(i32),
    Player(i32),
}

impl TrackTarget {
    pub fn kind(self) -> &'static str {
        match self {
            TrackTarget::Line(_) => "line",
            TrackTarget::LineDistance(_) => "line_distance",
            TrackTarget::Sector(_) => "sector",
            TrackTarget::Mobj(_) => "mobj",
            TrackTarget::Player(_) => "player",
        }
    }
}

pub trait Tracker {
    fn track(&mut self, target: TrackTarget) -> bool;
    fn untrack(&mut self, target: TrackTarget) -> bool;
    fn wipe_trackers(&mut self);
}

pub trait Timeline {
    fn logic_tic(&self) -> i32;
    fn jump_to_logic_tic(&mut self, tic: i32);
}

/// Single-tic input edits available in build mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildStep {
    MoveForward,
    MoveBackward,
    StrafeRight,
    StrafeLeft,
    TurnRight,
    TurnLeft,
}

impl BuildStep {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildStep::MoveForward => "mf",
            BuildStep::MoveBackward => "mb",
            BuildStep::StrafeRight => "sr",
            BuildStep::StrafeLeft => "sl",
            BuildStep::TurnRight => "tr",
            BuildStep::TurnLeft => "tl",
        }
    }
}

pub trait BuildMode {
    fn build_step(&mut self, step: BuildStep, amount: i32) -> bool;
    fn toggle_build_turbo(&mut self);
    fn toggle_frozen_mode(&mut self);
    /// Replaces any previous brute-force conditions and starts the search.
    fn start_brute_force(&mut self, plan: BruteForcePlan);
}

pub trait DemoControl {
    fn export_demo(&mut self, name: &str);
    fn start_demo_segment(&mut self, name: &str) -> bool;
    /// Finishes the demo being recorded or played back.
    fn end_demo(&mut self);
}

pub trait Cheats {
    /// Feeds a cheat code (and its argument text) to the cheat engine.
    fn enter_cheat(&mut self, cheat: &str, args: &str) -> bool;
}

/// Opaque handle for a configuration setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfigId(pub u32);

pub trait Configuration {
    fn config_id(&self, name: &str) -> Option<ConfigId>;
    /// `persist` also changes the value written to disk.
    fn update_int_config(&mut self, id: ConfigId, value: i32, persist: bool) -> bool;
    fn update_string_config(&mut self, id: ConfigId, value: &str, persist: bool) -> bool;
    fn string_config(&self, name: &str) -> Option<String>;
    /// One-line human readable description of a setting.
    fn config_summary(&self, name: &str) -> Option<String>;
}

pub trait Files {
    fn find_file(&self, name: &str) -> Option<PathBuf>;
}

pub trait Feedback {
    fn play_cue(&mut self, cue: Cue);
    /// On-screen player message.
    fn print(&mut self, message: &str);
    fn close_console(&mut self);
}

pub trait Host:
    Session
    + PlayerAccess
    + World
    + Tracker
    + Timeline
    + BuildMode
    + DemoControl
    + Cheats
    + Configuration
    + Files
    + Feedback
{
}

impl<T> Host for T where
    T: Session
        + PlayerAccess
        + World
        + Tracker
        + Timeline
        + BuildMode
        + DemoControl
        + Cheats
        + Configuration
        + Files
        + Feedback
{
}
