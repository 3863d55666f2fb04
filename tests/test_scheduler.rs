use centipede::scheduler::{path_due, PathScheduler};

use proptest::prelude::*;

#[test]
fn due_on_exact_multiples() {
    assert!(path_due(0, 5));
    assert!(path_due(5, 5));
    assert!(path_due(10, 5));
    assert!(!path_due(4, 5));
    assert!(!path_due(6, 5));
}

#[test]
fn slowdown_zero_is_treated_as_every_tick() {
    for tick in 0..20 {
        assert!(path_due(tick, 0));
    }
}

#[test]
fn collision_path_is_or_of_both() {
    let s = PathScheduler::new(2, 3);
    // tick 2: starship only; tick 3: centipede only; tick 6: both; tick 5: neither.
    assert!(s.collision_due(2));
    assert!(s.collision_due(3));
    assert!(s.collision_due(6));
    assert!(!s.collision_due(5));
    assert!(!s.collision_due(1));
}

#[test]
fn paths_are_independent() {
    let s = PathScheduler::new(1, 4);
    assert!(s.starship_due(7));
    assert!(!s.centipede_due(7));
    assert!(s.centipede_due(8));
}

proptest! {
    #[test]
    fn due_matches_modulo(tick in 0u64..100_000, slowdown in 1u32..128) {
        prop_assert_eq!(path_due(tick, slowdown), tick % u64::from(slowdown) == 0);
    }

    #[test]
    fn slowdown_one_holds_every_tick(tick in 0u64..100_000) {
        prop_assert!(path_due(tick, 1));
    }

    #[test]
    fn collision_never_lags_movement(tick in 0u64..100_000, a in 1u32..64, b in 1u32..64) {
        let s = PathScheduler::new(a, b);
        if s.starship_due(tick) || s.centipede_due(tick) {
            prop_assert!(s.collision_due(tick));
        } else {
            prop_assert!(!s.collision_due(tick));
        }
    }
}
