//! `brute_force.start depth fmin:fmax smin:smax amin:amax conditions`
//!
//! Conditions are comma separated. Each one is `skip <line>`, `act <line>`,
//! `<attr> <op> <value>` or `<attr> <max|min>`.

use crate::command::{CommandFlags, Handler};
use crate::console::Console;
use crate::host::Host;
use crate::scan::Scanner;

pub(crate) const COMMANDS: &[(&str, Handler, CommandFlags)] = &[
    ("brute_force.start", start, CommandFlags::DEMO),
    ("bf.start", start, CommandFlags::DEMO),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    X,
    Y,
    Z,
    MomX,
    MomY,
    Speed,
    Damage,
    Rng,
}

impl Attribute {
    pub const ALL: &'static [Attribute] = &[
        Attribute::X,
        Attribute::Y,
        Attribute::Z,
        Attribute::MomX,
        Attribute::MomY,
        Attribute::Speed,
        Attribute::Damage,
        Attribute::Rng,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::Z => "z",
            Attribute::MomX => "vx",
            Attribute::MomY => "vy",
            Attribute::Speed => "spd",
            Attribute::Damage => "dmg",
            Attribute::Rng => "rng",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl Operator {
    pub const ALL: &'static [Operator] = &[
        Operator::Less,
        Operator::LessOrEqual,
        Operator::Greater,
        Operator::GreaterOrEqual,
        Operator::Equal,
        Operator::NotEqual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.as_str() == s)
    }
}

/// Optimisation goal for an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Max,
    Min,
}

impl Target {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "max" => Some(Target::Max),
            "min" => Some(Target::Min),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    LineSkip(i32),
    LineActivation(i32),
    Compare {
        attr: Attribute,
        op: Operator,
        value: i32,
    },
    Goal {
        attr: Attribute,
        target: Target,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BruteForcePlan {
    pub depth: i32,
    pub forward: (i32, i32),
    pub side: (i32, i32),
    pub turn: (i32, i32),
    pub conditions: Vec<Condition>,
}

/// Parses one condition; line numbers must be below `line_count`.
pub fn parse_condition(s: &str, line_count: usize) -> Option<Condition> {
    let mut sc = Scanner::new(s);
    let first = sc.token()?;

    if first == "skip" || first == "act" {
        let line = sc.int()?;
        if usize::try_from(line).ok()? >= line_count {
            return None;
        }
        return Some(if first == "skip" {
            Condition::LineSkip(line)
        } else {
            Condition::LineActivation(line)
        });
    }

    let attr = Attribute::parse(first)?;
    let second = sc.token()?;
    match sc.int() {
        Some(value) => Some(Condition::Compare {
            attr,
            op: Operator::parse(second)?,
            value,
        }),
        None => Some(Condition::Goal {
            attr,
            target: Target::parse(second)?,
        }),
    }
}

/// Parses the whole argument string. Every condition must parse for the plan to be accepted.
pub fn parse_plan(args: &str, line_count: usize) -> Option<BruteForcePlan> {
    let mut sc = Scanner::new(args);
    let depth = sc.int()?;
    let forward = sc.range()?;
    let side = sc.range()?;
    let turn = sc.range()?;
    let raw = sc.until_semicolon()?;

    let conditions = raw
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| parse_condition(c, line_count))
        .collect::<Option<Vec<_>>>()?;

    Some(BruteForcePlan {
        depth,
        forward,
        side,
        turn,
        conditions,
    })
}

fn start(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(plan) = parse_plan(args, host.line_count()) else {
        return false;
    };
    host.start_brute_force(plan);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::Sandbox;

    #[test]
    fn parses_a_full_plan() {
        let plan = parse_plan("3 40:50 -10:10 0:0 skip 12,act 7, x >= 1024,spd max", 100)
            .expect("valid plan");
        assert_eq!(plan.depth, 3);
        assert_eq!(plan.forward, (40, 50));
        assert_eq!(plan.side, (-10, 10));
        assert_eq!(plan.turn, (0, 0));
        assert_eq!(
            plan.conditions,
            vec![
                Condition::LineSkip(12),
                Condition::LineActivation(7),
                Condition::Compare {
                    attr: Attribute::X,
                    op: Operator::GreaterOrEqual,
                    value: 1024,
                },
                Condition::Goal {
                    attr: Attribute::Speed,
                    target: Target::Max,
                },
            ]
        );
    }

    #[test]
    fn rejects_bad_pieces() {
        assert!(parse_plan("3 40:50 -10:10 0:0", 100).is_none());
        assert!(parse_plan("3 40 -10:10 0:0 x max", 100).is_none());
        assert!(parse_plan("3 40:50 -10:10 0:0 skip 100", 100).is_none());
        assert!(parse_plan("3 40:50 -10:10 0:0 act -1", 100).is_none());
        assert!(parse_plan("3 40:50 -10:10 0:0 hp > 3", 100).is_none());
        assert!(parse_plan("3 40:50 -10:10 0:0 x => 3", 100).is_none());
        assert!(parse_plan("3 40:50 -10:10 0:0 x most", 100).is_none());
    }

    #[test]
    fn command_hands_plan_to_host() {
        let mut c = Console::standard();
        let mut h = Sandbox::new();
        assert!(c.execute(&mut h, "bf.start 2 50:50 0:0 -5:5 vx > 10"));
        let plan = h.brute_force.as_ref().expect("started");
        assert_eq!(plan.depth, 2);
        assert_eq!(plan.conditions.len(), 1);

        assert!(!c.execute(&mut h, "brute_force.start 2 50:50 0:0 -5:5 bogus"));
        assert_eq!(h.brute_force.as_ref().map(|p| p.depth), Some(2));
    }
}
