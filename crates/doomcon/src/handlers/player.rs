use crate::command::{CommandFlags, Handler};
use crate::console::Console;
use crate::host::Host;
use crate::player::{NUM_CARDS, Player, Power, round_coordinate};
use crate::scan::Scanner;

pub(crate) const COMMANDS: &[(&str, Handler, CommandFlags)] = &[
    ("player.set_health", set_health, CommandFlags::NEVER),
    ("player.set_armor", set_armor, CommandFlags::NEVER),
    ("player.give_weapon", give_weapon, CommandFlags::NEVER),
    ("player.give_ammo", give_ammo, CommandFlags::NEVER),
    ("player.set_ammo", set_ammo, CommandFlags::NEVER),
    ("player.give_key", give_key, CommandFlags::NEVER),
    ("player.remove_key", remove_key, CommandFlags::NEVER),
    ("player.give_power", give_power, CommandFlags::NEVER),
    ("player.remove_power", remove_power, CommandFlags::NEVER),
    ("player.set_x", set_x, CommandFlags::NEVER),
    ("player.set_y", set_y, CommandFlags::NEVER),
    ("player.set_z", set_z, CommandFlags::NEVER),
    ("player.round_x", round_x, CommandFlags::NEVER),
    ("player.round_y", round_y, CommandFlags::NEVER),
    ("player.round_xy", round_xy, CommandFlags::NEVER),
];

fn set_health(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(health) = Scanner::new(args).int() else {
        return false;
    };
    host.player_mut().health = health;
    true
}

/// `points [type]`: an invalid or missing type keeps the current one.
fn set_armor(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let mut sc = Scanner::new(args);
    let Some(points) = sc.int() else {
        return false;
    };
    let p = host.player_mut();
    let mut armor_type = match sc.int() {
        Some(t @ (1 | 2)) => t,
        _ => p.armor_type,
    };
    if armor_type == 0 {
        armor_type = 1;
    }
    p.armor_points = points;
    p.armor_type = armor_type;
    true
}

fn give_weapon(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(weapon) = Scanner::new(args).int() else {
        return false;
    };
    let Some(weapon) = index_below(weapon, host.player().weapon_owned.len()) else {
        return false;
    };
    host.give_weapon(weapon);
    true
}

/// `type amount` adds, `type` alone fills to max.
fn give_ammo(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let mut sc = Scanner::new(args);
    let Some(ammo) = sc.int() else {
        return false;
    };
    let p = host.player_mut();
    let Some(i) = index_below(ammo, p.ammo.len()) else {
        return false;
    };

    match sc.int() {
        Some(amount) if amount <= 0 => false,
        Some(amount) => {
            let v = p.ammo[i].saturating_add(amount);
            p.set_ammo_clamped(i, v);
            true
        }
        None => {
            p.set_ammo_clamped(i, i32::MAX);
            true
        }
    }
}

fn set_ammo(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let mut sc = Scanner::new(args);
    let (Some(ammo), Some(amount)) = (sc.int(), sc.int()) else {
        return false;
    };
    let p = host.player_mut();
    let Some(i) = index_below(ammo, p.ammo.len()) else {
        return false;
    };
    if amount < 0 {
        return false;
    }
    p.set_ammo_clamped(i, amount);
    true
}

fn set_card(host: &mut dyn Host, args: &str, owned: bool) -> bool {
    let Some(key) = Scanner::new(args).int() else {
        return false;
    };
    let Some(k) = index_below(key, NUM_CARDS) else {
        return false;
    };
    host.player_mut().cards[k] = owned;
    true
}

fn give_key(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    set_card(host, args, true)
}

fn remove_key(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    set_card(host, args, false)
}

fn editable_power(sc: &mut Scanner<'_>) -> Option<Power> {
    Power::from_index(sc.int()?).filter(|p| p.console_editable())
}

/// `power [duration]`: duration defaults to -1. Strength keeps the pickup's own timer.
fn give_power(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let mut sc = Scanner::new(args);
    let Some(power) = editable_power(&mut sc) else {
        return false;
    };
    let duration = sc.int().unwrap_or(-1);

    host.player_mut().set_power(power, 0);
    host.give_power(power);
    if power != Power::Strength {
        host.player_mut().set_power(power, duration);
    }
    true
}

fn remove_power(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(power) = editable_power(&mut Scanner::new(args)) else {
        return false;
    };
    host.player_mut().set_power(power, 0);
    host.clear_power_effects(power);
    true
}

fn set_coordinate(host: &mut dyn Host, args: &str, axis: fn(&mut Player) -> &mut i32) -> bool {
    let Some(v) = Scanner::new(args).coordinate() else {
        return false;
    };
    *axis(host.player_mut()) = v;
    true
}

fn set_x(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    set_coordinate(host, args, |p| &mut p.x)
}

fn set_y(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    set_coordinate(host, args, |p| &mut p.y)
}

fn set_z(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    set_coordinate(host, args, |p| &mut p.z)
}

fn round_x(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    let p = host.player_mut();
    p.x = round_coordinate(p.x);
    true
}

fn round_y(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    let p = host.player_mut();
    p.y = round_coordinate(p.y);
    true
}

fn round_xy(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    let p = host.player_mut();
    p.x = round_coordinate(p.x);
    p.y = round_coordinate(p.y);
    true
}

fn index_below(v: i32, len: usize) -> Option<usize> {
    usize::try_from(v).ok().filter(|i| *i < len)
}
