//! Named configuration settings with a live value and a saved value.
//!
//! `assign` only touches the live value; `update` changes both and rewrites the backing file
//! (when there is one). The file is a flat JSON object of `name: value`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::SCRIPT_COUNT;
use crate::host::ConfigId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i32),
    Str(String),
}

impl ConfigValue {
    fn same_kind(&self, other: &ConfigValue) -> bool {
        matches!(
            (self, other),
            (ConfigValue::Int(_), ConfigValue::Int(_)) | (ConfigValue::Str(_), ConfigValue::Str(_))
        )
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::Int(v) => write!(f, "{v}"),
            ConfigValue::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

#[derive(Clone, Debug)]
struct Setting {
    name: String,
    current: ConfigValue,
    saved: ConfigValue,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    settings: Vec<Setting>,
    by_name: HashMap<String, usize>,
    path: Option<PathBuf>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The settings a fresh install starts with.
    pub fn with_defaults() -> Self {
        let mut out = Self::new();
        out.define("sfx_volume", ConfigValue::Int(8));
        out.define("music_volume", ConfigValue::Int(8));
        out.define("screenblocks", ConfigValue::Int(10));
        out.define("usegamma", ConfigValue::Int(0));
        out.define("dsda_strict_mode", ConfigValue::Int(1));
        out.define("dsda_exhud", ConfigValue::Int(0));
        out.define("player_name", ConfigValue::Str("player".to_string()));
        for i in 0..SCRIPT_COUNT {
            out.define(&format!("script_{i}"), ConfigValue::Str(String::new()));
        }
        out
    }

    /// Defaults overlaid with the values saved at `path`. A missing file is not an error, and
    /// later `update`s are written back to the same path.
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let mut out = Self::with_defaults();

        let raw = match std::fs::read_to_string(&path) {
            Ok(v) => Some(v),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        if let Some(raw) = raw {
            let values: BTreeMap<String, ConfigValue> = serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("config parse error in {}: {e}", path.display()))?;
            for (name, value) in values {
                match out.index(&name) {
                    Some(i) if !out.settings[i].current.same_kind(&value) => {
                        warn!(setting = %name, "ignoring saved value of the wrong type");
                    }
                    Some(i) => {
                        out.settings[i].current = value.clone();
                        out.settings[i].saved = value;
                    }
                    None => out.define(&name, value),
                }
            }
            info!(path = %path.display(), settings = out.settings.len(), "config loaded");
        }

        out.path = Some(path);
        Ok(out)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes every saved value to the backing file, if there is one.
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let values: BTreeMap<&str, &ConfigValue> = self
            .settings
            .iter()
            .map(|s| (s.name.as_str(), &s.saved))
            .collect();
        let mut out = serde_json::to_string_pretty(&values)?;
        out.push('\n');
        std::fs::write(path, out)?;
        Ok(())
    }

    fn define(&mut self, name: &str, value: ConfigValue) {
        let key = name.to_ascii_lowercase();
        if let Some(&i) = self.by_name.get(&key) {
            self.settings[i].current = value.clone();
            self.settings[i].saved = value;
            return;
        }
        self.by_name.insert(key.clone(), self.settings.len());
        self.settings.push(Setting {
            name: key,
            current: value.clone(),
            saved: value,
        });
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    /// Sets (or creates) a string setting, live and saved alike.
    pub fn set_string(&mut self, name: &str, value: &str) {
        self.define(name, ConfigValue::Str(value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.index(name).map(|i| &self.settings[i].current)
    }

    pub fn saved(&self, name: &str) -> Option<&ConfigValue> {
        self.index(name).map(|i| &self.settings[i].saved)
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            ConfigValue::Int(v) => Some(*v),
            ConfigValue::Str(_) => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            ConfigValue::Str(s) => Some(s.clone()),
            ConfigValue::Int(_) => None,
        }
    }

    /// Ids start at 1.
    pub fn id(&self, name: &str) -> Option<ConfigId> {
        let i = self.index(name)?;
        u32::try_from(i + 1).ok().map(ConfigId)
    }

    fn by_id(&mut self, id: ConfigId) -> Option<&mut Setting> {
        let i = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.settings.get_mut(i)
    }

    /// Replaces a setting's value. The new value must have the setting's type.
    pub fn update(&mut self, id: ConfigId, value: ConfigValue, persist: bool) -> bool {
        let Some(setting) = self.by_id(id) else {
            return false;
        };
        if !setting.current.same_kind(&value) {
            return false;
        }
        info!(setting = %setting.name, %value, persist, "config changed");
        setting.current = value.clone();
        if !persist {
            return true;
        }
        setting.saved = value;
        if let Err(e) = self.save() {
            warn!(err = %e, "failed to write config");
        }
        true
    }

    pub fn summary(&self, name: &str) -> Option<String> {
        let s = &self.settings[self.index(name)?];
        if s.current == s.saved {
            Some(format!("{}: {}", s.name, s.current))
        } else {
            Some(format!("{}: {} (saved: {})", s.name, s.current, s.saved))
        }
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("doomcon-config-{tag}-{}", std::process::id()))
            .join("doomcon.json")
    }

    #[test]
    fn defaults_include_script_slots() {
        let c = ConfigStore::with_defaults();
        for i in 0..SCRIPT_COUNT {
            assert_eq!(c.string(&format!("script_{i}")).as_deref(), Some(""));
        }
        assert_eq!(c.int("sfx_volume"), Some(8));
        assert!(c.path().is_none());
    }

    #[test]
    fn ids_are_one_based_and_case_insensitive() {
        let c = ConfigStore::with_defaults();
        assert_eq!(c.id("sfx_volume"), Some(ConfigId(1)));
        assert_eq!(c.id("SFX_Volume"), Some(ConfigId(1)));
        assert_eq!(c.id("nope"), None);
    }

    #[test]
    fn update_checks_type() {
        let mut c = ConfigStore::with_defaults();
        let id = c.id("player_name").unwrap();
        assert!(!c.update(id, ConfigValue::Int(3), false));
        assert!(c.update(id, ConfigValue::Str("doomguy".into()), false));
        assert_eq!(c.string("player_name").as_deref(), Some("doomguy"));
        assert_eq!(c.saved("player_name"), Some(&ConfigValue::Str("player".into())));
        assert!(!c.update(ConfigId(0), ConfigValue::Int(1), false));
        assert!(!c.update(ConfigId(9999), ConfigValue::Int(1), false));
    }

    #[test]
    fn summary_shows_unsaved_changes() {
        let mut c = ConfigStore::with_defaults();
        assert_eq!(c.summary("sfx_volume").as_deref(), Some("sfx_volume: 8"));
        let id = c.id("sfx_volume").unwrap();
        c.update(id, ConfigValue::Int(2), false);
        assert_eq!(
            c.summary("sfx_volume").as_deref(),
            Some("sfx_volume: 2 (saved: 8)")
        );
        assert_eq!(c.summary("missing"), None);
    }

    #[test]
    fn persisted_updates_survive_reload() {
        let path = scratch_file("reload");
        let _ = std::fs::remove_file(&path);

        let mut c = ConfigStore::load(&path).unwrap();
        let id = c.id("music_volume").unwrap();
        assert!(c.update(id, ConfigValue::Int(3), true));
        let id = c.id("script_4").unwrap();
        assert!(c.update(id, ConfigValue::Str("iddqd;idkfa".into()), false));

        let again = ConfigStore::load(&path).unwrap();
        assert_eq!(again.int("music_volume"), Some(3));
        assert_eq!(again.string("script_4").as_deref(), Some(""));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn load_rejects_garbage_and_keeps_unknown_settings() {
        let path = scratch_file("garbage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        std::fs::write(&path, "not json").unwrap();
        assert!(ConfigStore::load(&path).is_err());

        std::fs::write(&path, r#"{"sfx_volume": "loud", "custom_bind": 7}"#).unwrap();
        let c = ConfigStore::load(&path).unwrap();
        assert_eq!(c.int("sfx_volume"), Some(8));
        assert_eq!(c.int("custom_bind"), Some(7));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
