use rand::{rngs::StdRng, Rng};

use crate::{model::{Outcome, Side}, observer::Observer, rng::RandomSource, rules::Effect, Engine};

// Own RNG so the engine's dice sequence is untouched.
pub fn cpu_maybe_use_eye<O: Observer, R: RandomSource>(engine: &mut Engine<O, R>, rng: &mut StdRng) -> Option<Effect> {
    if engine.is_endgame() || engine.cpu().eye_count() == 0 { return None; }
    let chance = engine.cpu_policy().use_eye_chance;
    if chance.is_nan() || chance <= 0.0 { return None; }
    if chance < 1.0 && !rng.gen_bool(chance) { return None; }
    let eff = engine.use_first_eye(Side::Cpu)?;
    tracing::debug!(effect = %eff, "cpu used eye");
    Some(eff)
}

pub fn autoplay<O: Observer, R: RandomSource>(engine: &mut Engine<O, R>, rng: &mut StdRng, max_rounds: usize) -> Option<Outcome> {
    for _ in 0..max_rounds {
        cpu_maybe_use_eye(engine, rng);
        if !engine.advance_round() { break; }
    }
    engine.outcome()
}
