use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EyeRejected {
    #[error("buffs are locked once the endgame starts")]
    BuffsLocked,
    #[error("no eyes left in the bag")]
    EmptyBag,
    #[error("eye index {index} out of range for a bag of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("use_eye_chance must be within 0..=1, got {0}")]
    ChanceOutOfRange(f64),
}
