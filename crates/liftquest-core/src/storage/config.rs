//! TOML-based engine configuration.
//!
//! Holds every tunable the engines read:
//! - Level curve (base experience, growth factor)
//! - Milestone rewards (skill point and title intervals)
//! - Experience bonuses and level penalties
//! - Progressive-overload cut points, steps and warning limits
//! - Calorie estimate timings and coefficients
//!
//! Configuration is stored at `<data dir>/config.toml` and validated on load,
//! so the engines never see a curve that cannot terminate or inverted RPE
//! cut points.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calories::CalorieConfig;
use crate::error::ConfigError;
use crate::experience::ExperienceConfig;
use crate::leveling::{LevelingConfig, RewardPolicy};
use crate::overload::OverloadConfig;

/// Engine configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub leveling: LevelingConfig,
    #[serde(default)]
    pub rewards: RewardPolicy,
    #[serde(default)]
    pub experience: ExperienceConfig,
    #[serde(default)]
    pub overload: OverloadConfig,
    #[serde(default)]
    pub calories: CalorieConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::MissingKey(key.to_string());
        let unparsable = |what: &str| ConfigError::invalid(key, format!("cannot parse '{value}' as {what}"));

        let mut parts = key.split('.').filter(|p| !p.is_empty()).peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => {
                        serde_json::Value::Bool(value.parse::<bool>().map_err(|_| unparsable("bool"))?)
                    }
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| unparsable("number"))?
                        } else {
                            return Err(unparsable("number"));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|_| unparsable("JSON"))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// `<data dir>/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("."),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing the defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or fails
    /// validation, or if the defaults cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the defaults there when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::debug!(path = %path.display(), "wrote default configuration");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values the engines cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.leveling.validate()?;
        self.rewards.validate()?;
        self.experience.validate()?;
        self.overload.validate()?;
        self.calories.validate()?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving. The result must
    /// still validate; `self` is unchanged otherwise.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::invalid(key, e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the result is invalid, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[leveling]\ngrowth_factor = 1.2\n").unwrap();
        assert_eq!(parsed.leveling.growth_factor, 1.2);
        assert_eq!(parsed.leveling.base_exp, 1000.0);
        assert_eq!(parsed.overload.rep_ceiling, 12);
        assert_eq!(parsed.calories.rest_seconds, 60);
        assert_eq!(parsed.overload.min_weight_step_kg, 0.1);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("leveling.growth_factor").as_deref(), Some("1.15"));
        assert_eq!(cfg.get("rewards.skill_point_interval").as_deref(), Some("5"));
        assert_eq!(cfg.get("rewards.title_template").as_deref(), Some("{level}레벨 달성"));
        assert!(cfg.get("leveling.missing_key").is_none());
    }

    #[test]
    fn set_value_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set_value("overload.weight_step_percent", "5").unwrap();
        assert_eq!(cfg.overload.weight_step_percent, 5.0);
        cfg.set_value("leveling.growth_factor", "1.2").unwrap();
        assert_eq!(cfg.leveling.growth_factor, 1.2);
    }

    #[test]
    fn set_value_rejects_invalid_calorie_timing() {
        let mut cfg = Config::default();
        cfg.set_value("calories.rest_seconds", "90").unwrap();
        assert_eq!(cfg.calories.rest_seconds, 90);
        assert!(cfg.set_value("calories.set_minutes", "0").is_err());
        assert_eq!(cfg.calories.set_minutes, 2.0);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("leveling.nonexistent_key", "1"),
            Err(ConfigError::MissingKey(_))
        ));
    }

    #[test]
    fn set_value_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("leveling.growth_factor", "fast").is_err());
    }

    #[test]
    fn set_value_rejects_non_terminating_curve() {
        let mut cfg = Config::default();
        let err = cfg.set_value("leveling.growth_factor", "1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.leveling.growth_factor, 1.15);
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let mut changed = first.clone();
        changed.set_value("overload.rep_ceiling", "15").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().overload.rep_ceiling, 15);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[overload]\neasy_rpe_below = 9.5\nnear_max_rpe = 9.0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
