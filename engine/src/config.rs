use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CpuPolicy {
    pub use_eye_chance: f64,
}

impl Default for CpuPolicy {
    fn default() -> Self { Self { use_eye_chance: 0.6 } }
}

impl CpuPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chance = self.use_eye_chance;
        if !(0.0..=1.0).contains(&chance) { return Err(ConfigError::ChanceOutOfRange(chance)); }
        Ok(())
    }
}

// Rule constants (target, dice, catalogue) are deliberately absent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub user_name: String,
    pub cpu_name: String,
    /// 0 selects an OS-seeded source.
    pub seed: u64,
    pub cpu_policy: CpuPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { user_name: "You".into(), cpu_name: "CPU".into(), seed: 0, cpu_policy: CpuPolicy::default() }
    }
}

impl EngineConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> { self.cpu_policy.validate() }
}
