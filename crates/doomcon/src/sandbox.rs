//! In-memory [`Host`](crate::host::Host) used by the tests and the REPL.
//!
//! The game side is reduced to counters and logs: every collaborator call lands in a public
//! field so callers can see what a command did.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config_store::{ConfigStore, ConfigValue};
use crate::handlers::brute_force::BruteForcePlan;
use crate::host::{
    BuildMode, BuildStep, Cheats, ConfigId, Configuration, DemoControl, Feedback, Files,
    PlayerAccess, Session, SessionState, Timeline, TrackTarget, Tracker, World,
};
use crate::player::{Player, Power};
use crate::session::Cue;

/// Trackers shown at once.
pub const TRACKER_LIMIT: usize = 16;

const TICRATE: i32 = 35;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxWorld {
    pub lines: usize,
    pub sectors: usize,
    pub mobjs: usize,
    pub logic_tic: i32,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self {
            lines: 100,
            sectors: 20,
            mobjs: 200,
            logic_tic: 0,
        }
    }
}

/// A saved starting point: map sizes plus the console player.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub world: SandboxWorld,
    pub player: Player,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("scenario parse error in {}: {e}", path.display()))
    }
}

#[derive(Debug)]
pub struct Sandbox {
    pub state: SessionState,
    pub in_level: bool,
    pub console_open: bool,
    /// Strict mode as configured; it only takes effect while recording.
    pub strict_requested: bool,

    pub player: Player,
    pub shadow: bool,
    pub world: SandboxWorld,
    /// Sectors whose sound target was set by the last wake-up.
    pub sectors_woken: usize,
    pub trackers: Vec<TrackTarget>,

    pub build_log: Vec<(BuildStep, i32)>,
    pub build_turbo: bool,
    pub frozen: bool,
    pub brute_force: Option<BruteForcePlan>,

    pub demo_name: Option<String>,
    pub exported_demos: Vec<PathBuf>,

    pub cheats: Vec<(String, String)>,
    /// Codes the cheat engine refuses.
    pub rejected_cheats: Vec<String>,

    pub config: ConfigStore,
    pub script_dirs: Vec<PathBuf>,
    /// Per-WAD data directory; exports land here and file lookups fall back to it.
    pub data_dir: Option<PathBuf>,

    pub cues: Vec<Cue>,
    pub printed: Vec<String>,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    pub fn new() -> Self {
        Self::with_config(ConfigStore::with_defaults())
    }

    pub fn with_config(config: ConfigStore) -> Self {
        let strict_requested = config.int("dsda_strict_mode").is_some_and(|v| v != 0);
        Self {
            state: SessionState::default(),
            in_level: true,
            console_open: true,
            strict_requested,
            player: Player::default(),
            shadow: false,
            world: SandboxWorld::default(),
            sectors_woken: 0,
            trackers: Vec::new(),
            build_log: Vec::new(),
            build_turbo: false,
            frozen: false,
            brute_force: None,
            demo_name: None,
            exported_demos: Vec::new(),
            cheats: Vec::new(),
            rejected_cheats: Vec::new(),
            config,
            script_dirs: Vec::new(),
            data_dir: None,
            cues: Vec::new(),
            printed: Vec::new(),
        }
    }

    pub fn apply_scenario(&mut self, scenario: Scenario) {
        self.world = scenario.world;
        self.player = scenario.player;
    }

    fn id_in_bounds(id: i32, len: usize) -> bool {
        usize::try_from(id).is_ok_and(|i| i < len)
    }

    fn target_exists(&self, target: TrackTarget) -> bool {
        match target {
            TrackTarget::Line(id) | TrackTarget::LineDistance(id) => {
                Self::id_in_bounds(id, self.line_count())
            }
            TrackTarget::Sector(id) => Self::id_in_bounds(id, self.sector_count()),
            TrackTarget::Mobj(id) => Self::id_in_bounds(id, self.world.mobjs),
            TrackTarget::Player(id) => id == 0,
        }
    }

    fn give_everything(&mut self, keys: bool) {
        self.player.weapon_owned.iter_mut().for_each(|w| *w = true);
        for i in 0..self.player.ammo.len() {
            self.player.set_ammo_clamped(i, i32::MAX);
        }
        self.player.armor_points = 200;
        self.player.armor_type = 2;
        if keys {
            self.player.cards = [true; crate::player::NUM_CARDS];
        }
    }
}

impl Session for Sandbox {
    fn session_state(&self) -> SessionState {
        self.state
    }

    fn in_level(&self) -> bool {
        self.in_level
    }

    fn refresh_strict_mode(&mut self) {
        self.state.strict_mode = self.strict_requested && self.state.demo_recording;
    }
}

impl PlayerAccess for Sandbox {
    fn player(&self) -> &Player {
        &self.player
    }

    fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    fn give_weapon(&mut self, weapon: usize) {
        if let Some(owned) = self.player.weapon_owned.get_mut(weapon) {
            *owned = true;
        }
    }

    fn give_power(&mut self, power: Power) {
        let tics = match power {
            Power::Invulnerability => 30 * TICRATE,
            Power::Strength | Power::AllMap => 1,
            Power::Invisibility => {
                self.shadow = true;
                60 * TICRATE
            }
            Power::IronFeet => 60 * TICRATE,
            Power::Infrared => 120 * TICRATE,
            Power::WeaponLevel2 => 40 * TICRATE,
            Power::Flight => 60 * TICRATE,
            Power::Speed => 45 * TICRATE,
            Power::Shield | Power::Health2 | Power::Minotaur => 0,
        };
        self.player.set_power(power, tics);
    }

    fn clear_power_effects(&mut self, power: Power) {
        if power == Power::Invisibility {
            self.shadow = false;
        }
    }
}

impl World for Sandbox {
    fn line_count(&self) -> usize {
        self.world.lines
    }

    fn sector_count(&self) -> usize {
        self.world.sectors
    }

    fn wake_all_sectors(&mut self) {
        self.sectors_woken = self.sector_count();
    }
}

impl Tracker for Sandbox {
    fn track(&mut self, target: TrackTarget) -> bool {
        if self.trackers.len() >= TRACKER_LIMIT
            || self.trackers.contains(&target)
            || !self.target_exists(target)
        {
            return false;
        }
        debug!(kind = target.kind(), ?target, "tracker added");
        self.trackers.push(target);
        true
    }

    fn untrack(&mut self, target: TrackTarget) -> bool {
        let before = self.trackers.len();
        self.trackers.retain(|t| *t != target);
        self.trackers.len() != before
    }

    fn wipe_trackers(&mut self) {
        self.trackers.clear();
    }
}

impl Timeline for Sandbox {
    fn logic_tic(&self) -> i32 {
        self.world.logic_tic
    }

    fn jump_to_logic_tic(&mut self, tic: i32) {
        self.world.logic_tic = tic.max(0);
    }
}

impl BuildMode for Sandbox {
    /// Amounts must fit a tic command's signed byte.
    fn build_step(&mut self, step: BuildStep, amount: i32) -> bool {
        if i8::try_from(amount).is_err() {
            return false;
        }
        self.build_log.push((step, amount));
        true
    }

    fn toggle_build_turbo(&mut self) {
        self.build_turbo = !self.build_turbo;
    }

    fn toggle_frozen_mode(&mut self) {
        self.frozen = !self.frozen;
    }

    fn start_brute_force(&mut self, plan: BruteForcePlan) {
        self.brute_force = Some(plan);
    }
}

impl DemoControl for Sandbox {
    fn export_demo(&mut self, name: &str) {
        let path = match &self.data_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        };
        debug!(path = %path.display(), "demo exported");
        self.exported_demos.push(path);
    }

    fn start_demo_segment(&mut self, name: &str) -> bool {
        if self.state.in_demo() {
            return false;
        }
        self.state.demo_recording = true;
        self.demo_name = Some(name.to_string());
        self.refresh_strict_mode();
        true
    }

    fn end_demo(&mut self) {
        self.state.demo_recording = false;
        self.state.demo_playback = false;
        self.demo_name = None;
    }
}

impl Cheats for Sandbox {
    fn enter_cheat(&mut self, cheat: &str, args: &str) -> bool {
        if self.rejected_cheats.iter().any(|c| c == cheat) {
            return false;
        }
        debug!(cheat, args, "cheat entered");
        self.cheats.push((cheat.to_string(), args.to_string()));
        match cheat {
            "iddqd" | "satan" | "quicken" => self.player.god_mode = !self.player.god_mode,
            "idclip" | "idspispopd" | "casper" | "kitty" => {
                self.player.no_clip = !self.player.no_clip
            }
            "idkfa" | "gimme" => self.give_everything(true),
            "idfa" | "rambo" | "nra" => self.give_everything(false),
            _ => {}
        }
        true
    }
}

impl Configuration for Sandbox {
    fn config_id(&self, name: &str) -> Option<ConfigId> {
        self.config.id(name)
    }

    fn update_int_config(&mut self, id: ConfigId, value: i32, persist: bool) -> bool {
        self.config.update(id, ConfigValue::Int(value), persist)
    }

    fn update_string_config(&mut self, id: ConfigId, value: &str, persist: bool) -> bool {
        self.config
            .update(id, ConfigValue::Str(value.to_string()), persist)
    }

    fn string_config(&self, name: &str) -> Option<String> {
        self.config.string(name)
    }

    fn config_summary(&self, name: &str) -> Option<String> {
        self.config.summary(name)
    }
}

impl Files for Sandbox {
    /// Tries `name` as given, then under each script directory in order, then the data directory.
    fn find_file(&self, name: &str) -> Option<PathBuf> {
        let direct = PathBuf::from(name);
        if direct.is_file() {
            return Some(direct);
        }
        self.script_dirs
            .iter()
            .chain(self.data_dir.iter())
            .map(|dir| dir.join(name))
            .find(|p| p.is_file())
    }
}

impl Feedback for Sandbox {
    fn play_cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn print(&mut self, message: &str) {
        self.printed.push(message.to_string());
    }

    fn close_console(&mut self) {
        self.console_open = false;
    }
}
