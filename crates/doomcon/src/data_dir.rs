//! Data file directory: `<base>/doomcon_data/<iwad>/<pwad>...`.
//!
//! Exported demos and other per-game files land in a directory named after the loaded WADs, so
//! runs of different mods never share one folder. The base comes from `DOOMCON_DATA_DIR` (or the
//! executable's directory) and can be overridden on the command line.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{error, info};

pub const DATA_ROOT: &str = "doomcon_data";

/// Path components below the base, the root included.
pub const DATA_DIR_LIMIT: usize = 9;

/// Backslashes become `/` and one trailing separator is dropped.
pub fn normalize_slashes(path: &str) -> String {
    let mut out = path.replace('\\', "/");
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Base directory when nothing is requested on the command line: the environment value if it is
/// set, else the directory holding the executable, else `.`.
pub fn default_base(env: Option<&str>) -> PathBuf {
    if let Some(v) = env.map(str::trim).filter(|v| !v.is_empty()) {
        return PathBuf::from(normalize_slashes(v));
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A requested base is only used when it names an existing directory.
pub fn resolve_base(default: PathBuf, requested: Option<&str>) -> PathBuf {
    let Some(requested) = requested else {
        return default;
    };
    let path = PathBuf::from(normalize_slashes(requested));
    if path.is_dir() {
        return path;
    }
    error!(
        path = %path.display(),
        fallback = %default.display(),
        "data directory does not exist"
    );
    default
}

fn wad_stem(path: &str) -> Option<String> {
    let normalized = normalize_slashes(path);
    let file = normalized.rsplit('/').next()?;
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || !ext.eq_ignore_ascii_case("wad") {
        return None;
    }
    Some(stem.to_ascii_lowercase())
}

/// Lowercased stems of the IWAD then each PWAD. Files without a `.wad` extension are skipped.
pub fn wad_subdirs<'a>(
    iwad: Option<&'a str>,
    pwads: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    iwad.into_iter()
        .chain(pwads)
        .filter_map(wad_stem)
        .take(DATA_DIR_LIMIT - 1)
        .collect()
}

/// Creates `base/doomcon_data/<subdirs...>` and returns it.
pub fn create(base: &Path, subdirs: &[String]) -> anyhow::Result<PathBuf> {
    let mut dir = base.join(DATA_ROOT);
    for sub in subdirs.iter().take(DATA_DIR_LIMIT - 1) {
        dir.push(sub);
    }
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create data directory {}", dir.display()))?;
    info!(dir = %dir.display(), "using data file directory");
    Ok(dir)
}
