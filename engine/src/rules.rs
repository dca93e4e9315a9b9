use std::fmt;

use serde::Serialize;

use crate::rng::RandomSource;

pub const TARGET: u32 = 21;
pub const DIE_SIDES: u32 = 6;
pub const CATALOGUE_LEN: u32 = 5;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum EffectKind {
    SelfAdd,
    SelfMultiply,
    SelfSubtract,
    OppSubtract,
    OppDivide,
}

impl EffectKind {
    #[inline] pub fn targets_opponent(self) -> bool { matches!(self, EffectKind::OppSubtract | EffectKind::OppDivide) }
    #[inline] pub fn is_immediate(self) -> bool { matches!(self, EffectKind::OppDivide) }
}

/// Payload of an eye. Only [`random_effect`] creates these.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub struct Effect {
    kind: EffectKind,
    magnitude: u32,
}

impl Effect {
    const fn new(kind: EffectKind, magnitude: u32) -> Self { Self { kind, magnitude } }
    pub fn kind(&self) -> EffectKind { self.kind }
    pub fn magnitude(&self) -> u32 { self.magnitude }

    pub fn apply_to_roll(&self, base: u32) -> u32 {
        match self.kind {
            EffectKind::SelfAdd => base + self.magnitude,
            EffectKind::SelfMultiply => base * self.magnitude,
            EffectKind::SelfSubtract | EffectKind::OppSubtract => base.saturating_sub(self.magnitude),
            EffectKind::OppDivide => base,
        }
    }

    pub fn apply_to_total(&self, total: u32) -> u32 {
        match self.kind {
            EffectKind::OppDivide => total / self.magnitude.max(1),
            _ => total,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EffectKind::SelfAdd => write!(f, "+{}", self.magnitude),
            EffectKind::SelfMultiply => write!(f, "x{}", self.magnitude),
            EffectKind::SelfSubtract => write!(f, "-{}", self.magnitude),
            EffectKind::OppSubtract => write!(f, "Opponent -{}", self.magnitude),
            EffectKind::OppDivide => write!(f, "Opponent /{}", self.magnitude),
        }
    }
}

// Index order matters: scripted sources pick effects by position.
const CATALOGUE: [Effect; CATALOGUE_LEN as usize] = [
    Effect::new(EffectKind::OppDivide, 2),
    Effect::new(EffectKind::OppSubtract, 1),
    Effect::new(EffectKind::SelfAdd, 1),
    Effect::new(EffectKind::SelfMultiply, 2),
    Effect::new(EffectKind::SelfSubtract, 1),
];

pub fn random_effect<R: RandomSource + ?Sized>(rng: &mut R) -> Effect {
    let idx = rng.next_below(CATALOGUE_LEN) as usize;
    CATALOGUE[idx.min(CATALOGUE.len() - 1)]
}

pub fn roll_die<R: RandomSource + ?Sized>(rng: &mut R) -> u32 { 1 + rng.next_below(DIE_SIDES) }

#[inline] pub fn distance_to_target(total: u32) -> u32 { total.abs_diff(TARGET) }
#[inline] pub fn reached_target(total: u32) -> bool { total >= TARGET }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    #[test]
    fn catalogue_follows_draw_index() {
        let mut src = ScriptedSource::new([0, 1, 2, 3, 4]);
        let labels: Vec<String> = (0..5).map(|_| random_effect(&mut src).to_string()).collect();
        assert_eq!(labels, ["Opponent /2", "Opponent -1", "+1", "x2", "-1"]);
    }

    #[test]
    fn subtract_clamps_at_zero() {
        let minus = CATALOGUE[4];
        assert_eq!(minus.apply_to_roll(1), 0);
        assert_eq!(minus.apply_to_roll(0), 0);
        assert_eq!(CATALOGUE[1].apply_to_roll(4), 3);
    }

    #[test]
    fn add_and_multiply() {
        assert_eq!(CATALOGUE[2].apply_to_roll(6), 7);
        assert_eq!(CATALOGUE[3].apply_to_roll(6), 12);
    }

    #[test]
    fn divide_floors_totals() {
        let halve = CATALOGUE[0];
        assert_eq!(halve.apply_to_total(15), 7);
        assert_eq!(halve.apply_to_total(1), 0);
        assert_eq!(halve.apply_to_roll(5), 5);
        assert!(halve.kind().is_immediate() && halve.kind().targets_opponent());
    }

    #[test]
    fn distances() {
        assert_eq!(distance_to_target(19), 2);
        assert_eq!(distance_to_target(23), 2);
        assert!(reached_target(21) && !reached_target(20));
    }
}
