//! Build mode and timeline travel: the frame-by-frame editing tools.

use crate::command::{CommandFlags, Handler};
use crate::console::Console;
use crate::host::{BuildStep, Host};
use crate::scan::Scanner;

pub(crate) const COMMANDS: &[(&str, Handler, CommandFlags)] = &[
    ("jump.to_tic", jump_to_tic, CommandFlags::DEMO),
    ("jump.by_tic", jump_by_tic, CommandFlags::DEMO),
    ("build.turbo", turbo, CommandFlags::DEMO),
    ("b.turbo", turbo, CommandFlags::DEMO),
    ("mf", move_forward, CommandFlags::DEMO),
    ("mb", move_backward, CommandFlags::DEMO),
    ("sr", strafe_right, CommandFlags::DEMO),
    ("sl", strafe_left, CommandFlags::DEMO),
    ("tr", turn_right, CommandFlags::DEMO),
    ("tl", turn_left, CommandFlags::DEMO),
];

fn jump_to_tic(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(tic) = Scanner::new(args).int() else {
        return false;
    };
    if tic < 0 {
        return false;
    }
    host.jump_to_logic_tic(tic);
    true
}

fn jump_by_tic(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(delta) = Scanner::new(args).int() else {
        return false;
    };
    let tic = host.logic_tic().saturating_add(delta);
    host.jump_to_logic_tic(tic);
    true
}

fn turbo(_: &mut Console, host: &mut dyn Host, _: &str, _: &str) -> bool {
    host.toggle_build_turbo();
    true
}

fn step(host: &mut dyn Host, args: &str, step: BuildStep) -> bool {
    Scanner::new(args)
        .int()
        .is_some_and(|amount| host.build_step(step, amount))
}

fn move_forward(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    step(host, args, BuildStep::MoveForward)
}

fn move_backward(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    step(host, args, BuildStep::MoveBackward)
}

fn strafe_right(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    step(host, args, BuildStep::StrafeRight)
}

fn strafe_left(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    step(host, args, BuildStep::StrafeLeft)
}

fn turn_right(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    step(host, args, BuildStep::TurnRight)
}

fn turn_left(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    step(host, args, BuildStep::TurnLeft)
}
