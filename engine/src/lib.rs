pub mod bot;
pub mod config;
pub mod error;
pub mod model;
pub mod observer;
pub mod rng;
pub mod rules;

use std::cmp::Ordering;

use config::{CpuPolicy, EngineConfig};
pub use error::{ConfigError, EyeRejected};
pub use model::{Outcome, OutcomeKind, Phase, Player, Side};
pub use observer::{EventLog, NoopObserver, Observer, TracingObserver};
pub use rng::{DiceRng, RandomSource, ScriptedSource};
pub use rules::{Effect, EffectKind, TARGET};
use rules::{distance_to_target, random_effect, reached_target, roll_die};

pub struct Engine<O = NoopObserver, R = DiceRng> {
    user: Player,
    cpu: Player,
    round_index: u32,
    phase: Phase,
    observer: O,
    rng: R,
    cpu_policy: CpuPolicy,
}

impl<O: Observer> Engine<O, DiceRng> {
    pub fn new(user_name: impl Into<String>, cpu_name: impl Into<String>, observer: O, seed: u64) -> Self {
        Self::with_source(user_name, cpu_name, observer, DiceRng::new(seed))
    }

    pub fn from_config(cfg: &EngineConfig, observer: O) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut engine = Self::new(cfg.user_name.clone(), cfg.cpu_name.clone(), observer, cfg.seed);
        engine.cpu_policy = cfg.cpu_policy.clone();
        Ok(engine)
    }
}

impl<O: Observer, R: RandomSource> Engine<O, R> {
    pub fn with_source(user_name: impl Into<String>, cpu_name: impl Into<String>, observer: O, rng: R) -> Self {
        Self {
            user: Player::new(user_name, Side::User),
            cpu: Player::new(cpu_name, Side::Cpu),
            round_index: 1,
            phase: Phase::Normal,
            observer,
            rng,
            cpu_policy: CpuPolicy::default(),
        }
    }

    pub fn user(&self) -> &Player { &self.user }
    pub fn cpu(&self) -> &Player { &self.cpu }
    pub fn player(&self, side: Side) -> &Player { match side { Side::User => &self.user, Side::Cpu => &self.cpu } }
    pub fn round_index(&self) -> u32 { self.round_index }
    pub fn phase(&self) -> Phase { self.phase }
    // Stays true once Over.
    pub fn is_endgame(&self) -> bool { !matches!(self.phase, Phase::Normal) }
    pub fn is_over(&self) -> bool { matches!(self.phase, Phase::Over { .. }) }

    pub fn first_to_reach_target(&self) -> Option<Side> {
        match self.phase {
            Phase::Normal => None,
            Phase::Endgame { first } | Phase::Over { first, .. } => Some(first),
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase { Phase::Over { outcome, .. } => Some(outcome), _ => None }
    }

    pub fn observer(&self) -> &O { &self.observer }
    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }
    pub fn source_mut(&mut self) -> &mut R { &mut self.rng }
    pub fn into_observer(self) -> O { self.observer }
    pub fn cpu_policy(&self) -> &CpuPolicy { &self.cpu_policy }

    pub fn set_cpu_policy(&mut self, policy: CpuPolicy) -> Result<(), ConfigError> {
        policy.validate()?;
        self.cpu_policy = policy;
        Ok(())
    }

    /// Must not be called from inside an observer callback.
    pub fn advance_round(&mut self) -> bool {
        match self.phase {
            Phase::Normal => self.play_normal_round(),
            Phase::Endgame { first } => self.play_chase(first),
            Phase::Over { .. } => false,
        }
    }

    pub fn use_eye(&mut self, side: Side, index: usize) -> Option<Effect> {
        self.try_use_eye(side, index).ok()
    }

    pub fn use_first_eye(&mut self, side: Side) -> Option<Effect> {
        self.spend(side, 0, Player::consume_first).ok()
    }

    pub fn try_use_eye(&mut self, side: Side, index: usize) -> Result<Effect, EyeRejected> {
        self.spend(side, index, |p| p.consume(index))
    }

    pub fn reset(&mut self) {
        self.user.reset();
        self.cpu.reset();
        self.round_index = 1;
        self.phase = Phase::Normal;
        tracing::debug!("engine reset");
    }

    fn spend(&mut self, side: Side, index: usize, take: impl FnOnce(&mut Player) -> Option<Effect>) -> Result<Effect, EyeRejected> {
        let res = self.spend_inner(side, index, take);
        if let Err(why) = &res {
            tracing::debug!(?side, index, %why, "eye rejected");
        }
        res
    }

    fn spend_inner(&mut self, side: Side, index: usize, take: impl FnOnce(&mut Player) -> Option<Effect>) -> Result<Effect, EyeRejected> {
        if self.is_endgame() { return Err(EyeRejected::BuffsLocked); }
        let (owner, opp) = match side {
            Side::User => (&mut self.user, &mut self.cpu),
            Side::Cpu => (&mut self.cpu, &mut self.user),
        };
        let len = owner.eye_count();
        let eff = take(&mut *owner).ok_or(if len == 0 { EyeRejected::EmptyBag } else { EyeRejected::IndexOutOfRange { index, len } })?;

        if eff.kind().is_immediate() {
            opp.total = eff.apply_to_total(opp.total);
        } else {
            let target = if eff.kind().targets_opponent() { &mut *opp } else { &mut *owner };
            // Overwrites without refund.
            if let Some(dropped) = target.pending.replace(eff) {
                tracing::debug!(player = target.name(), dropped = %dropped, "pending effect overwritten");
            }
        }
        self.observer.on_effect_chosen(owner, eff);
        Ok(eff)
    }

    fn play_normal_round(&mut self) -> bool {
        self.observer.on_round_start(self.round_index, &self.user, &self.cpu);

        let ur = self.roll_once(Side::User);
        let cr = self.roll_once(Side::Cpu);
        self.user.total += ur;
        self.cpu.total += cr;

        match ur.cmp(&cr) {
            Ordering::Less => self.grant_eye(Side::User),
            Ordering::Greater => self.grant_eye(Side::Cpu),
            Ordering::Equal => {}
        }

        let user_in = reached_target(self.user.total);
        let cpu_in = reached_target(self.cpu.total);
        if user_in || cpu_in {
            // Equal distance favours the user; arbitrary but stable.
            let first = match (user_in, cpu_in) {
                (true, true) if distance_to_target(self.user.total) <= distance_to_target(self.cpu.total) => Side::User,
                (true, true) => Side::Cpu,
                (true, false) => Side::User,
                _ => Side::Cpu,
            };
            self.enter_endgame(first);
            if user_in && cpu_in {
                self.finish(first);
                return false;
            }
            return true;
        }

        self.round_index += 1;
        true
    }

    fn play_chase(&mut self, first: Side) -> bool {
        let chaser = first.opponent();
        let r = self.roll_once(chaser);
        let total = match chaser {
            Side::User => { self.user.total += r; self.user.total }
            Side::Cpu => { self.cpu.total += r; self.cpu.total }
        };
        if reached_target(total) {
            self.finish(first);
            return false;
        }
        true
    }

    fn roll_once(&mut self, side: Side) -> u32 {
        let base = roll_die(&mut self.rng);
        let player = match side { Side::User => &mut self.user, Side::Cpu => &mut self.cpu };
        let consumed = player.pending.take();
        let final_roll = consumed.map_or(base, |eff| eff.apply_to_roll(base));
        player.last_base_roll = base;
        player.last_final_roll = final_roll;
        tracing::debug!(player = player.name(), base, final_roll, "roll");
        self.observer.on_roll(player, base, final_roll, consumed);
        final_roll
    }

    fn grant_eye(&mut self, side: Side) {
        let eff = random_effect(&mut self.rng);
        let player = match side { Side::User => &mut self.user, Side::Cpu => &mut self.cpu };
        player.grant(eff);
        self.observer.on_eye_granted(player, eff);
    }

    fn enter_endgame(&mut self, first: Side) {
        for p in [&mut self.user, &mut self.cpu] {
            p.clear_all();
            p.pending = None;
        }
        self.phase = Phase::Endgame { first };
        let first_player = match first { Side::User => &self.user, Side::Cpu => &self.cpu };
        tracing::info!(player = first_player.name(), total = first_player.total(), round = self.round_index, "endgame triggered");
        self.observer.on_endgame_triggered(first_player);
    }

    fn finish(&mut self, first: Side) {
        let outcome = Outcome::score(self.user.total, self.cpu.total);
        self.phase = Phase::Over { first, outcome };
        tracing::info!(result = %outcome, "game over");
        self.observer.on_game_over(&outcome, &self.user, &self.cpu);
    }
}
