use eye_roller_engine::{Engine, NoopObserver, Phase, Side, TARGET};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Advance,
    UseEye(Side, usize),
    UseFirst(Side),
}

fn step() -> impl Strategy<Value = Step> {
    let side = prop_oneof![Just(Side::User), Just(Side::Cpu)];
    prop_oneof![
        3 => Just(Step::Advance),
        1 => (side.clone(), 0usize..4).prop_map(|(s, i)| Step::UseEye(s, i)),
        1 => side.prop_map(Step::UseFirst),
    ]
}

fn snapshot(e: &Engine) -> serde_json::Value {
    serde_json::json!({
        "user": e.user(),
        "cpu": e.cpu(),
        "phase": e.phase(),
        "round": e.round_index(),
    })
}

proptest! {
    #[test]
    fn invariants_hold_for_any_play(seed in 1u64.., steps in prop::collection::vec(step(), 1..200)) {
        let mut e = Engine::new("You", "CPU", NoopObserver, seed);
        for s in steps {
            let before = (e.user().eye_count(), e.cpu().eye_count(), e.phase());
            match s {
                Step::Advance => {
                    let cont = e.advance_round();
                    prop_assert_eq!(cont, !e.is_over());
                    if before.2 == Phase::Normal && e.phase() == Phase::Normal {
                        let (u, c) = (e.user().last_final_roll(), e.cpu().last_final_roll());
                        let gained = (e.user().eye_count() - before.0, e.cpu().eye_count() - before.1);
                        let expected = if u < c { (1, 0) } else if c < u { (0, 1) } else { (0, 0) };
                        prop_assert_eq!(gained, expected);
                    }
                }
                Step::UseEye(side, idx) => {
                    let used = e.use_eye(side, idx);
                    if e.is_endgame() { prop_assert!(used.is_none()); }
                }
                Step::UseFirst(side) => {
                    let used = e.use_first_eye(side);
                    if e.is_endgame() { prop_assert!(used.is_none()); }
                }
            }

            match e.phase() {
                Phase::Normal => {
                    prop_assert!(e.first_to_reach_target().is_none());
                    prop_assert!(e.user().total() < TARGET && e.cpu().total() < TARGET);
                }
                Phase::Endgame { first } => {
                    prop_assert_eq!(e.first_to_reach_target(), Some(first));
                    prop_assert!(e.player(first).total() >= TARGET);
                    prop_assert!(e.player(first.opponent()).total() < TARGET);
                }
                Phase::Over { .. } => {
                    prop_assert!(e.user().total() >= TARGET && e.cpu().total() >= TARGET);
                }
            }
            if e.is_endgame() {
                prop_assert_eq!(e.user().eye_count() + e.cpu().eye_count(), 0);
                prop_assert!(e.user().pending_effect().is_none() && e.cpu().pending_effect().is_none());
            }
        }
    }

    #[test]
    fn reset_is_idempotent(seed in 1u64.., rounds in 0usize..30) {
        let mut e = Engine::new("You", "CPU", NoopObserver, seed);
        for _ in 0..rounds {
            e.use_first_eye(Side::User);
            if !e.advance_round() { break; }
        }
        e.reset();
        let once = snapshot(&e);
        e.reset();
        prop_assert_eq!(once, snapshot(&e));
        prop_assert_eq!(e.round_index(), 1);
    }

    #[test]
    fn same_seed_same_game(seed in 1u64.., rounds in 1usize..40) {
        let mut a = Engine::new("You", "CPU", NoopObserver, seed);
        let mut b = Engine::new("You", "CPU", NoopObserver, seed);
        for _ in 0..rounds {
            let (ca, cb) = (a.advance_round(), b.advance_round());
            prop_assert_eq!(ca, cb);
        }
        prop_assert_eq!(snapshot(&a), snapshot(&b));
    }
}
