use std::path::{Path, PathBuf};

use anyhow::Context;
use doomcon::config_store::ConfigStore;
use doomcon::data_dir;
use doomcon::host::Session;
use doomcon::hud::{intermission, stat_totals, to_ansi, weapon_text};
use doomcon::sandbox::{Sandbox, Scenario};
use doomcon::{Action, Console, ENTRY_SIZE, script};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

fn usage_and_exit() -> ! {
    eprintln!(
        "doomcon_repl\n\n\
USAGE:\n  doomcon_repl [--strict] [--demo-recording] [--demo-playback] [--script FILE]\n               [--data-dir DIR] [--wad FILE]...\n\n\
  \x20 --wad may repeat; the first one is the IWAD. Their names pick the data subdirectory.\n\n\
ENV:\n  DOOMCON_CONFIG      default var/doomcon.json\n  DOOMCON_SCRIPT_DIR  default . (where script.run looks for files)\n  DOOMCON_WORLD       optional scenario json (world sizes + player)\n  DOOMCON_DATA_DIR    data file base (default: the executable's directory)\n\n\
INPUT:\n  one console line per stdin line; `!!` repeats the last entry,\n  `:hud` prints the hud lines, `:script N` runs configured script N\n"
    );
    std::process::exit(2);
}

#[derive(Clone, Debug)]
struct Config {
    config_path: PathBuf,
    script_dir: PathBuf,
    world_path: Option<PathBuf>,
    strict: bool,
    demo_recording: bool,
    demo_playback: bool,
    script: Option<PathBuf>,
    data_base: PathBuf,
    data_dir: Option<String>,
    wads: Vec<String>,
}

fn parse_args() -> Config {
    let config_path: PathBuf = std::env::var("DOOMCON_CONFIG")
        .unwrap_or_else(|_| "var/doomcon.json".to_string())
        .into();
    let script_dir: PathBuf = std::env::var("DOOMCON_SCRIPT_DIR")
        .unwrap_or_else(|_| ".".to_string())
        .into();
    let world_path: Option<PathBuf> = std::env::var("DOOMCON_WORLD")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let data_base = data_dir::default_base(std::env::var("DOOMCON_DATA_DIR").ok().as_deref());

    let mut cfg = Config {
        config_path,
        script_dir,
        world_path,
        strict: false,
        demo_recording: false,
        demo_playback: false,
        script: None,
        data_base,
        data_dir: None,
        wads: Vec::new(),
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--strict" => cfg.strict = true,
            "--demo-recording" => cfg.demo_recording = true,
            "--demo-playback" => cfg.demo_playback = true,
            "--script" => {
                let v = it.next().unwrap_or_else(|| usage_and_exit());
                cfg.script = Some(v.into());
            }
            "--data-dir" => {
                let v = it.next().unwrap_or_else(|| usage_and_exit());
                cfg.data_dir = Some(v);
            }
            "--wad" => {
                let v = it.next().unwrap_or_else(|| usage_and_exit());
                cfg.wads.push(v);
            }
            "-h" | "--help" => usage_and_exit(),
            _ => usage_and_exit(),
        }
    }
    cfg
}

fn build_host(cfg: &Config) -> anyhow::Result<Sandbox> {
    let config = ConfigStore::load(&cfg.config_path)
        .with_context(|| format!("load config {}", cfg.config_path.display()))?;
    let mut host = Sandbox::with_config(config);
    host.script_dirs.push(cfg.script_dir.clone());

    let base = data_dir::resolve_base(cfg.data_base.clone(), cfg.data_dir.as_deref());
    let mut wads = cfg.wads.iter().map(String::as_str);
    let subdirs = data_dir::wad_subdirs(wads.next(), wads);
    host.data_dir = Some(data_dir::create(&base, &subdirs)?);

    if let Some(path) = &cfg.world_path {
        let scenario =
            Scenario::load(path).with_context(|| format!("load world {}", path.display()))?;
        host.apply_scenario(scenario);
    }

    host.state.demo_recording = cfg.demo_recording;
    host.state.demo_playback = cfg.demo_playback;
    host.refresh_strict_mode();
    if cfg.strict {
        host.state.strict_mode = true;
    }
    Ok(host)
}

fn hud_lines(host: &Sandbox) -> Vec<String> {
    let tally = stat_totals::PlayerTally::default();
    let level = stat_totals::LevelTotals {
        monsters: i32::try_from(host.world.mobjs).unwrap_or(i32::MAX),
        kill_requirement: i32::try_from(host.world.mobjs).unwrap_or(i32::MAX),
        ..Default::default()
    };
    vec![
        weapon_text::weapon_text(&host.player),
        stat_totals::stat_totals(&[tally], 0, &level),
        intermission::level_time_line(host.world.logic_tic, None),
    ]
}

/// Feeds lines from `rd` into the console until EOF or until a command closes the console.
/// Returns the number of lines read.
async fn pump_lines<R, W>(
    console: &mut Console,
    host: &mut Sandbox,
    rd: R,
    out: &mut W,
) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = rd.lines();
    let mut n = 0;

    while host.console_open {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        n += 1;
        let line = line.trim();

        if line == ":hud" {
            for l in hud_lines(host) {
                out.write_all(to_ansi(&l).as_bytes()).await?;
                out.write_all(b"\n").await?;
            }
            continue;
        }
        if let Some(slot) = line.strip_prefix(":script") {
            let Ok(index) = slot.trim().parse::<usize>() else {
                out.write_all(b"usage: :script N\n").await?;
                continue;
            };
            console.run_script(host, index);
            if let Some(msg) = host.printed.last() {
                out.write_all(format!("{msg}\n").as_bytes()).await?;
            }
            continue;
        }

        if line == "!!" {
            console.update_action(host, Action::Recall);
        } else if line.is_empty() {
            continue;
        } else if line.len() > ENTRY_SIZE {
            // Longer than the entry buffer holds.
            warn!(len = line.len(), limit = ENTRY_SIZE, "console line too long");
            out.write_all(format!("  entry too long (limit {ENTRY_SIZE})\n").as_bytes())
                .await?;
            continue;
        } else {
            console.open(host);
            console.update_text(line);
        }
        console.update_action(host, Action::Enter);
        out.write_all(console.message_line().as_bytes()).await?;
        out.write_all(b"\n").await?;
    }

    out.flush().await?;
    Ok(n)
}

async fn run_batch(console: &mut Console, host: &mut Sandbox, path: &Path) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read script {}", path.display()))?;
    let n = script::run_lines(console, host, script::split_script(&text))
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    info!(script = %path.display(), lines = n, "batch script finished");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,doomcon=info".into()),
        )
        .with_target(false)
        .init();

    let cfg = parse_args();
    let mut host = build_host(&cfg)?;
    let mut console = Console::standard();
    info!(
        commands = console.table().len(),
        config = %cfg.config_path.display(),
        state = ?host.session_state(),
        "console ready"
    );

    if let Some(path) = &cfg.script {
        return run_batch(&mut console, &mut host, path).await;
    }

    if !console.open(&mut host) {
        warn!("not in a level; console unavailable");
        return Ok(());
    }
    let mut stdout = tokio::io::stdout();
    let n = pump_lines(
        &mut console,
        &mut host,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
    )
    .await?;
    info!(lines = n, "console closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pump(host: &mut Sandbox, input: &str) -> (usize, String) {
        let mut console = Console::standard();
        let mut out = Vec::new();
        let n = pump_lines(&mut console, host, input.as_bytes(), &mut out)
            .await
            .unwrap();
        (n, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn lines_report_outcomes() {
        let mut host = Sandbox::new();
        let (n, out) = pump(&mut host, "player.set_health 42\nbogus\n\nt.al 1\n").await;
        assert_eq!(n, 4);
        assert_eq!(
            out,
            "  command executed\n  command unknown\n  command executed\n"
        );
        assert_eq!(host.player.health, 42);
    }

    #[tokio::test]
    async fn bang_bang_repeats_last_entry() {
        let mut host = Sandbox::new();
        let (_, out) = pump(&mut host, "player.give_ammo 1 5\n!!\n").await;
        assert_eq!(out.lines().count(), 2);
        assert_eq!(host.player.ammo[1], 10);
    }

    #[tokio::test]
    async fn long_lines_are_refused_not_cut() {
        let mut host = Sandbox::new();
        let line = "player.set_armor 10;player.set_armor 20;player.set_health 1234567";
        assert!(line.len() > ENTRY_SIZE);
        let (n, out) = pump(&mut host, &format!("{line}\n")).await;
        assert_eq!(n, 1);
        assert_eq!(out, format!("  entry too long (limit {ENTRY_SIZE})\n"));
        assert_eq!(host.player.health, 100);
        assert_eq!(host.player.armor_points, 0);

        let exact = format!("player.set_health{}7", " ".repeat(ENTRY_SIZE - 18));
        assert_eq!(exact.len(), ENTRY_SIZE);
        let (_, out) = pump(&mut host, &format!("{exact}\n")).await;
        assert_eq!(out, "  command executed\n");
        assert_eq!(host.player.health, 7);
    }

    #[test]
    fn host_gets_a_per_wad_data_dir() {
        let base = std::env::temp_dir().join(format!("doomcon-repl-data-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&base);
        std::fs::create_dir_all(&base).unwrap();
        let cfg = Config {
            config_path: base.join("doomcon.json"),
            script_dir: base.clone(),
            world_path: None,
            strict: false,
            demo_recording: false,
            demo_playback: false,
            script: None,
            data_base: base.clone(),
            data_dir: Some(base.join("missing").display().to_string()),
            wads: vec!["iwads/DOOM2.WAD".to_string(), "Scythe.wad".to_string()],
        };
        let host = build_host(&cfg).unwrap();
        let expected = base.join(data_dir::DATA_ROOT).join("doom2").join("scythe");
        assert_eq!(host.data_dir.as_deref(), Some(expected.as_path()));
        assert!(expected.is_dir());

        let _ = std::fs::remove_dir_all(&base);
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let mut host = Sandbox::new();
        let (n, _) = pump(&mut host, "quit\nplayer.set_health 1\n").await;
        assert_eq!(n, 1);
        assert_eq!(host.player.health, 100);
    }

    #[tokio::test]
    async fn meta_lines() {
        let mut host = Sandbox::new();
        host.config.set_string("script_2", "player.set_armor 5");
        let (_, out) = pump(&mut host, ":script 2\n:script x\n:hud\n").await;
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Script 2 executed"));
        assert_eq!(lines.next(), Some("usage: :script N"));
        assert!(lines.next().is_some_and(|l| l.contains("WPN")));
        assert_eq!(host.player.armor_points, 5);
    }
}
