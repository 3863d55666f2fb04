/// Movement rules for bullets, the starship, and centipede chains.
///
/// All functions mutate the aggregate state in place; nothing here touches
/// the score or the lives counter.

use crate::entities::{Direction, GameState, Position};

/// Fire a bullet from the starship's cell. The bullet surfaces one line up
/// once `move_bullets` runs in the same path.
pub fn spawn_bullet(state: &mut GameState) {
    let bullet = state.starship.shoot();
    state.bullets.push(bullet);
}

/// Every bullet climbs one line; bullets that leave the top of the field are
/// dropped. Relative order of the survivors is preserved.
pub fn move_bullets(state: &mut GameState) {
    state.bullets.retain_mut(|bullet| bullet.advance());
}

/// Apply at most one queued movement command. The move is skipped when the
/// destination is out of bounds or holds a mushroom.
pub fn move_starship(state: &mut GameState, direction: Direction) {
    let (dl, dc) = match direction {
        Direction::Up => (-1, 0),
        Direction::Down => (1, 0),
        Direction::Left => (0, -1),
        Direction::Right => (0, 1),
        Direction::None => return,
    };
    let current = state.starship.position;
    let target = Position::new(current.line + dl, current.column + dc);
    if state.mushrooms.in_bounds(target) && !state.mushrooms.blocks(target) {
        state.starship.position = target;
    }
}

/// Advance every chain one step, head first, body following the leader.
pub fn move_centipedes(state: &mut GameState) {
    let width = state.settings.field_width;
    let height = state.settings.field_height;
    for chain in &mut state.centipedes {
        let head = chain.segments[0];
        let ahead = Position::new(head.line, head.column + chain.direction.step());
        let blocked = ahead.column < 0 || ahead.column >= width || state.mushrooms.blocks(ahead);

        let next_head = if blocked {
            // Wall or mushroom: descend one line and turn around. On the
            // bottom line there is nowhere to descend, so the chain only
            // turns and sits out this step.
            chain.direction = chain.direction.reversed();
            if head.line + 1 >= height {
                continue;
            }
            Position::new(head.line + 1, head.column)
        } else {
            ahead
        };

        // Each trailing segment steps into the cell its leader just left.
        for i in (1..chain.segments.len()).rev() {
            chain.segments[i] = chain.segments[i - 1];
        }
        chain.segments[0] = next_head;
    }
}
