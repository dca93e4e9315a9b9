use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::rules::{distance_to_target, Effect, EffectKind};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Side { User, Cpu }

impl Side {
    pub fn opponent(self) -> Side { match self { Side::User => Side::Cpu, Side::Cpu => Side::User } }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum EventType {
    RoundStart,
    Roll,
    EyeGranted,
    EffectChosen,
    EndgameTriggered,
    GameOver,
}

#[derive(Clone, Debug, Serialize)]
pub struct Event {
    pub seq: u64,
    pub ty: EventType,
    pub payload: serde_json::Value,
    pub state_hash: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Player {
    name: String,
    side: Side,
    pub(crate) total: u32,
    eyes: VecDeque<Effect>,
    pub(crate) pending: Option<Effect>,
    pub(crate) last_base_roll: u32,
    pub(crate) last_final_roll: u32,
}

impl Player {
    pub(crate) fn new(name: impl Into<String>, side: Side) -> Self {
        Self { name: name.into(), side, total: 0, eyes: VecDeque::new(), pending: None, last_base_roll: 0, last_final_roll: 0 }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn side(&self) -> Side { self.side }
    pub fn total(&self) -> u32 { self.total }
    pub fn pending_effect(&self) -> Option<Effect> { self.pending }
    pub fn last_base_roll(&self) -> u32 { self.last_base_roll }
    pub fn last_final_roll(&self) -> u32 { self.last_final_roll }

    pub fn eyes_view(&self) -> Vec<Effect> { self.eyes.iter().copied().collect() }
    pub fn eye_count(&self) -> usize { self.eyes.len() }

    pub fn find_eye(&self, kind: EffectKind) -> Option<usize> {
        self.eyes.iter().position(|e| e.kind() == kind)
    }

    pub(crate) fn grant(&mut self, effect: Effect) { self.eyes.push_back(effect); }
    pub(crate) fn consume(&mut self, index: usize) -> Option<Effect> { self.eyes.remove(index) }
    pub(crate) fn consume_first(&mut self) -> Option<Effect> { self.consume(0) }
    pub(crate) fn clear_all(&mut self) { self.eyes.clear(); }

    pub(crate) fn reset(&mut self) {
        self.total = 0;
        self.eyes.clear();
        self.pending = None;
        self.last_base_roll = 0;
        self.last_final_roll = 0;
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum OutcomeKind { UserWins, CpuWins, Tie }

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub user_total: u32,
    pub cpu_total: u32,
}

impl Outcome {
    pub fn score(user_total: u32, cpu_total: u32) -> Self {
        let du = distance_to_target(user_total);
        let dc = distance_to_target(cpu_total);
        let kind = if du < dc { OutcomeKind::UserWins } else if dc < du { OutcomeKind::CpuWins } else { OutcomeKind::Tie };
        Self { kind, user_total, cpu_total }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OutcomeKind::UserWins => write!(f, "You win! ({} vs {})", self.user_total, self.cpu_total),
            OutcomeKind::CpuWins => write!(f, "CPU wins! ({} vs {})", self.cpu_total, self.user_total),
            OutcomeKind::Tie => write!(f, "It's a tie at {} and {}.", self.user_total, self.cpu_total),
        }
    }
}

/// `first` is whoever reached the target first; it exists only outside `Normal`.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum Phase {
    Normal,
    Endgame { first: Side },
    Over { first: Side, outcome: Outcome },
}
