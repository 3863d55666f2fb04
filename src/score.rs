/// Scoring: maps game events to the point deltas configured in settings.

use crate::entities::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreKind {
    CentipedeHit,
    MushroomKill,
    RoundEnd,
}

/// Purely additive; the score never decreases and has no cap short of the
/// counter itself, which saturates rather than wrapping.
pub fn increase_score(state: &mut GameState, kind: ScoreKind) {
    let delta = match kind {
        ScoreKind::CentipedeHit => state.settings.points_centipede_hit,
        ScoreKind::MushroomKill => state.settings.points_mushroom_kill,
        ScoreKind::RoundEnd => state.settings.points_round_end,
    };
    state.score = state.score.saturating_add(delta);
}
