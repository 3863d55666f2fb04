/// Path gating: decides which update paths run on a given tick.
///
/// A slowdown of N means "run once every N ticks". The player path uses a
/// constant slowdown from settings; the centipede path's slowdown is
/// recomputed each round. Collisions must never lag behind movement, so the
/// collision path is due whenever either movement path is.

/// `tick % slowdown == 0`. A slowdown below 1 is treated as 1 (every tick).
pub fn path_due(tick: u64, slowdown: u32) -> bool {
    tick % u64::from(slowdown.max(1)) == 0
}

#[derive(Clone, Copy, Debug)]
pub struct PathScheduler {
    pub starship_slowdown: u32,
    pub centipede_slowdown: u32,
}

impl PathScheduler {
    pub fn new(starship_slowdown: u32, centipede_slowdown: u32) -> PathScheduler {
        PathScheduler {
            starship_slowdown,
            centipede_slowdown,
        }
    }

    pub fn starship_due(&self, tick: u64) -> bool {
        path_due(tick, self.starship_slowdown)
    }

    pub fn centipede_due(&self, tick: u64) -> bool {
        path_due(tick, self.centipede_slowdown)
    }

    /// Collisions run whenever anything moved this tick.
    pub fn collision_due(&self, tick: u64) -> bool {
        self.starship_due(tick) || self.centipede_due(tick)
    }
}
