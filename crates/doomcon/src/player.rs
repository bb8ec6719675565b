use serde::{Deserialize, Serialize};

pub const FRACBITS: i32 = 16;
pub const FRACUNIT: i32 = 1 << FRACBITS;

/// Blue/yellow/red keycards followed by the three skull keys.
pub const NUM_CARDS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Power {
    Invulnerability,
    Strength,
    Invisibility,
    IronFeet,
    AllMap,
    Infrared,
    WeaponLevel2,
    Flight,
    Shield,
    Health2,
    Speed,
    Minotaur,
}

impl Power {
    pub const COUNT: usize = 12;

    pub const ALL: [Power; Power::COUNT] = [
        Power::Invulnerability,
        Power::Strength,
        Power::Invisibility,
        Power::IronFeet,
        Power::AllMap,
        Power::Infrared,
        Power::WeaponLevel2,
        Power::Flight,
        Power::Shield,
        Power::Health2,
        Power::Speed,
        Power::Minotaur,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: i32) -> Option<Self> {
        usize::try_from(i).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Power::Invulnerability => "invulnerability",
            Power::Strength => "strength",
            Power::Invisibility => "invisibility",
            Power::IronFeet => "ironfeet",
            Power::AllMap => "allmap",
            Power::Infrared => "infrared",
            Power::WeaponLevel2 => "weaponlevel2",
            Power::Flight => "flight",
            Power::Shield => "shield",
            Power::Health2 => "health2",
            Power::Speed => "speed",
            Power::Minotaur => "minotaur",
        }
    }

    /// Powers that only exist as item side effects cannot be granted or revoked by hand.
    pub fn console_editable(self) -> bool {
        !matches!(self, Power::Shield | Power::Health2 | Power::Minotaur)
    }
}

/// The console player's state as the handlers see it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub health: i32,
    pub armor_points: i32,
    pub armor_type: i32,
    pub weapon_owned: Vec<bool>,
    pub ammo: Vec<i32>,
    pub max_ammo: Vec<i32>,
    pub cards: [bool; NUM_CARDS],
    pub powers: [i32; Power::COUNT],
    /// Fixed-point map position.
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub infinite_ammo: bool,
    pub god_mode: bool,
    pub no_clip: bool,
}

impl Default for Player {
    fn default() -> Self {
        let mut weapon_owned = vec![false; 9];
        weapon_owned[0] = true;
        weapon_owned[1] = true;
        Self {
            health: 100,
            armor_points: 0,
            armor_type: 0,
            weapon_owned,
            ammo: vec![50, 0, 0, 0],
            max_ammo: vec![200, 50, 300, 50],
            cards: [false; NUM_CARDS],
            powers: [0; Power::COUNT],
            x: 0,
            y: 0,
            z: 0,
            infinite_ammo: false,
            god_mode: false,
            no_clip: false,
        }
    }
}

impl Player {
    pub fn power(&self, p: Power) -> i32 {
        self.powers[p.index()]
    }

    pub fn set_power(&mut self, p: Power, tics: i32) {
        self.powers[p.index()] = tics;
    }

    /// Ammo slot `i`, after `value` has been clamped to its maximum.
    pub fn set_ammo_clamped(&mut self, i: usize, value: i32) {
        let max = self.max_ammo.get(i).copied().unwrap_or(i32::MAX);
        if let Some(slot) = self.ammo.get_mut(i) {
            *slot = value.min(max);
        }
    }
}

/// Rounds a fixed-point coordinate to the nearest whole map unit, halves away from zero.
pub fn round_coordinate(x: i32) -> i32 {
    let magnitude = i64::from(x).abs();
    let mut whole = magnitude & !0xffff;
    if (magnitude & 0xffff) >= 0x8000 {
        whole += i64::from(FRACUNIT);
    }
    let rounded = if x < 0 { -whole } else { whole };
    rounded.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
