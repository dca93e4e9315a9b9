use serde_json::json;

use crate::model::{Event, EventType, Outcome, Player};
use crate::rules::Effect;

// Callbacks must not call back into the engine.
pub trait Observer {
    fn on_round_start(&mut self, _round_index: u32, _user: &Player, _cpu: &Player) {}
    fn on_roll(&mut self, _who: &Player, _base: u32, _final_roll: u32, _consumed: Option<Effect>) {}
    fn on_eye_granted(&mut self, _who: &Player, _granted: Effect) {}
    fn on_effect_chosen(&mut self, _who: &Player, _effect: Effect) {}
    fn on_endgame_triggered(&mut self, _first: &Player) {}
    /// `outcome.to_string()` is the human-readable result line.
    fn on_game_over(&mut self, _outcome: &Outcome, _user: &Player, _cpu: &Player) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_round_start(&mut self, round_index: u32, user: &Player, cpu: &Player) { (**self).on_round_start(round_index, user, cpu) }
    fn on_roll(&mut self, who: &Player, base: u32, final_roll: u32, consumed: Option<Effect>) { (**self).on_roll(who, base, final_roll, consumed) }
    fn on_eye_granted(&mut self, who: &Player, granted: Effect) { (**self).on_eye_granted(who, granted) }
    fn on_effect_chosen(&mut self, who: &Player, effect: Effect) { (**self).on_effect_chosen(who, effect) }
    fn on_endgame_triggered(&mut self, first: &Player) { (**self).on_endgame_triggered(first) }
    fn on_game_over(&mut self, outcome: &Outcome, user: &Player, cpu: &Player) { (**self).on_game_over(outcome, user, cpu) }
}

fn hash_player_stub(p: &Player) -> String {
    format!("h:{:?}:{}:{}", p.side(), p.total(), p.eye_count())
}

#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    seq: u64,
}

impl EventLog {
    pub fn new() -> Self { Self::default() }
    pub fn events(&self) -> &[Event] { &self.events }
    pub fn count(&self, ty: EventType) -> usize { self.events.iter().filter(|e| e.ty == ty).count() }
    pub fn kinds(&self) -> Vec<EventType> { self.events.iter().map(|e| e.ty).collect() }
    pub fn clear(&mut self) { self.events.clear(); self.seq = 0; }

    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(&self.events) }

    fn push(&mut self, ty: EventType, payload: serde_json::Value, state_hash: String) {
        self.seq += 1;
        self.events.push(Event { seq: self.seq, ty, payload, state_hash });
    }
}

impl Observer for EventLog {
    fn on_round_start(&mut self, round_index: u32, user: &Player, cpu: &Player) {
        let hash = format!("{}|{}", hash_player_stub(user), hash_player_stub(cpu));
        self.push(EventType::RoundStart, json!({ "round": round_index, "userTotal": user.total(), "cpuTotal": cpu.total() }), hash);
    }

    fn on_roll(&mut self, who: &Player, base: u32, final_roll: u32, consumed: Option<Effect>) {
        self.push(EventType::Roll, json!({ "side": who.side(), "base": base, "final": final_roll, "consumed": consumed }), hash_player_stub(who));
    }

    fn on_eye_granted(&mut self, who: &Player, granted: Effect) {
        self.push(EventType::EyeGranted, json!({ "side": who.side(), "effect": granted, "label": granted.to_string() }), hash_player_stub(who));
    }

    fn on_effect_chosen(&mut self, who: &Player, effect: Effect) {
        self.push(EventType::EffectChosen, json!({ "side": who.side(), "effect": effect, "label": effect.to_string() }), hash_player_stub(who));
    }

    fn on_endgame_triggered(&mut self, first: &Player) {
        self.push(EventType::EndgameTriggered, json!({ "first": first.side(), "total": first.total() }), hash_player_stub(first));
    }

    fn on_game_over(&mut self, outcome: &Outcome, user: &Player, cpu: &Player) {
        let hash = format!("{}|{}", hash_player_stub(user), hash_player_stub(cpu));
        self.push(EventType::GameOver, json!({ "outcome": outcome, "text": outcome.to_string() }), hash);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_round_start(&mut self, round_index: u32, user: &Player, cpu: &Player) {
        tracing::info!(round = round_index, user = user.total(), cpu = cpu.total(), "round started");
    }

    fn on_roll(&mut self, who: &Player, base: u32, final_roll: u32, consumed: Option<Effect>) {
        match consumed {
            Some(eff) => tracing::info!(player = who.name(), base, final_roll, effect = %eff, "rolled"),
            None => tracing::info!(player = who.name(), base, final_roll, "rolled"),
        }
    }

    fn on_eye_granted(&mut self, who: &Player, granted: Effect) {
        tracing::info!(player = who.name(), effect = %granted, "eye granted");
    }

    fn on_effect_chosen(&mut self, who: &Player, effect: Effect) {
        tracing::info!(player = who.name(), effect = %effect, "eye used");
    }

    fn on_endgame_triggered(&mut self, first: &Player) {
        tracing::info!(player = first.name(), total = first.total(), "endgame: no more buffs");
    }

    fn on_game_over(&mut self, outcome: &Outcome, _user: &Player, _cpu: &Player) {
        tracing::info!(result = %outcome, "game over");
    }
}
