/// Collision resolution: bullets against mushrooms, bullets against
/// centipede chains (including the split state machine), and chain heads
/// against the starship.
///
/// The bullet/chain scan order is load-bearing: chains outer (collection
/// order, splits appended at the back and scanned later in the same pass),
/// bullets inner (collection order). A chain shortened or split earlier in
/// the pass stays eligible for further hits on the same tick.

use crate::entities::{ChainHit, GameState};
use crate::score::{increase_score, ScoreKind};

/// Each bullet sitting in an occupied mushroom cell knocks one durability
/// point off that cell and is consumed. Clearing a cell scores a mushroom
/// kill.
pub fn collide_bullets_mushrooms(state: &mut GameState) {
    let mut i = 0;
    while i < state.bullets.len() {
        let pos = state.bullets[i].position;
        if state.mushrooms.hit(pos) {
            if state.mushrooms.durability(pos) == 0 {
                increase_score(state, ScoreKind::MushroomKill);
            }
            state.bullets.remove(i);
            continue;
        }
        i += 1;
    }
}

/// Run every bullet against every chain.
///
/// Tail hit: the struck segment and everything behind it leave the chain;
/// trailing segments come back as a new chain appended to the collection.
/// Head hit: the whole chain dies and no further bullets are tested against
/// it. Either way the bullet is consumed, a centipede hit is scored, and a
/// mushroom grows where the struck segment stood.
pub fn collide_bullets_centipedes(state: &mut GameState) {
    let mut ci = 0;
    while ci < state.centipedes.len() {
        let mut head_hit = false;
        let mut bi = 0;
        while bi < state.bullets.len() {
            let pos = state.bullets[bi].position;
            match state.centipedes[ci].hit_test(pos) {
                ChainHit::Miss => {
                    bi += 1;
                    continue;
                }
                ChainHit::Head => {
                    head_hit = true;
                }
                ChainHit::Tail(split) => {
                    if let Some(chain) = split {
                        state.centipedes.push(chain);
                    }
                }
            }
            state.bullets.remove(bi);
            increase_score(state, ScoreKind::CentipedeHit);
            let durability = state.settings.mushroom_durability;
            state.mushrooms.grow(pos, durability);
            if head_hit {
                break;
            }
        }

        if head_hit {
            state.centipedes.remove(ci);
            continue;
        }
        ci += 1;
    }
}

/// Count chains whose head sits in the starship's cell. One life-loss event
/// fires per matching chain, so two heads landing on the player in the same
/// tick cost two lives.
pub fn collide_centipedes_starship(state: &GameState) -> usize {
    let ship = state.starship.position;
    state
        .centipedes
        .iter()
        .filter(|chain| chain.head() == ship)
        .count()
}
