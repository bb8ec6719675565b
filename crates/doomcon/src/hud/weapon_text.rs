use crate::hud::{Color, push_color};
use crate::player::{Player, Power};

const SLOTS: usize = 9;

/// `WPN 1 2 3 ...`: owned weapon slots, blank where missing. Slot 1 turns blue under berserk.
pub fn weapon_text(player: &Player) -> String {
    let owned = |slot: usize| player.weapon_owned.get(slot).copied().unwrap_or(false);
    let digit = |slot: usize| {
        if owned(slot) {
            char::from(b'1' + slot as u8)
        } else {
            ' '
        }
    };

    let mut out = String::from("WPN ");
    let fist = if player.power(Power::Strength) != 0 {
        Color::Blue
    } else {
        Color::Green
    };
    push_color(&mut out, fist);
    out.push(digit(0));
    push_color(&mut out, Color::Green);
    for slot in 1..SLOTS {
        out.push(' ');
        out.push(digit(slot));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::strip_colors;

    #[test]
    fn starting_loadout() {
        let p = Player::default();
        assert_eq!(weapon_text(&p), "WPN \x1b31\x1b3 2              ");
        assert_eq!(strip_colors(&weapon_text(&p)), "WPN 1 2              ");
    }

    #[test]
    fn berserk_and_gaps() {
        let mut p = Player::default();
        p.set_power(Power::Strength, 1);
        p.weapon_owned[0] = false;
        p.weapon_owned[5] = true;
        p.weapon_owned[8] = true;
        assert_eq!(weapon_text(&p), "WPN \x1b7 \x1b3 2       6     9");
    }
}
