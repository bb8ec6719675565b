//! `check`, `assign` and `update`: reading and changing configuration settings by name.

use tracing::info;

use crate::console::Console;
use crate::host::Host;
use crate::scan::Scanner;

/// `check <name>` logs the setting's summary.
pub(crate) fn check(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    let Some(name) = Scanner::new(args).token() else {
        return false;
    };
    match host.config_summary(name) {
        Some(summary) => {
            info!("{summary}");
            true
        }
        None => false,
    }
}

/// `assign <name> <value>` changes the live value only.
pub(crate) fn assign(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    change(host, args, false)
}

/// `update <name> <value>` also changes the value saved to disk.
pub(crate) fn update(_: &mut Console, host: &mut dyn Host, _: &str, args: &str) -> bool {
    change(host, args, true)
}

// An integer value wins; anything else is taken as a single string token.
fn change(host: &mut dyn Host, args: &str, persist: bool) -> bool {
    let mut sc = Scanner::new(args);
    let Some(name) = sc.token() else {
        return false;
    };
    let Some(id) = host.config_id(name) else {
        return false;
    };

    if let Some(value) = sc.int() {
        return host.update_int_config(id, value, persist);
    }
    match sc.token() {
        Some(value) => host.update_string_config(id, value, persist),
        None => false,
    }
}
