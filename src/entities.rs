/// Game entity types: positions, bullets, the starship, the mushroom grid,
/// centipede chains, and the aggregate `GameState`.
///
/// Everything here is plain data except the chain's hit/split surgery, which
/// is kept next to the segment list it rearranges.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: i32,
    pub column: i32,
}

impl Position {
    pub fn new(line: i32, column: i32) -> Position {
        Position { line, column }
    }
}

/// A queued player movement command. `None` means no key was pressed since
/// the last consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

/// Horizontal travel direction shared by every segment of one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainDirection {
    Left,
    Right,
}

impl ChainDirection {
    pub fn reversed(self) -> ChainDirection {
        match self {
            ChainDirection::Left => ChainDirection::Right,
            ChainDirection::Right => ChainDirection::Left,
        }
    }

    /// Column delta of one step in this direction.
    pub fn step(self) -> i32 {
        match self {
            ChainDirection::Left => -1,
            ChainDirection::Right => 1,
        }
    }
}

// ── Projectiles & player ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Position,
}

impl Bullet {
    /// Advance one line toward the top. Returns false once the bullet has
    /// left the playfield and should be removed.
    pub fn advance(&mut self) -> bool {
        self.position.line -= 1;
        self.position.line >= 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starship {
    pub position: Position,
}

impl Starship {
    /// A freshly fired bullet starts in the starship's own cell; the same
    /// tick's bullet movement lifts it one line up.
    pub fn shoot(&self) -> Bullet {
        Bullet { position: self.position }
    }
}

// ── Mushroom grid ────────────────────────────────────────────────────────────

/// Per-cell durability counters; 0 means the cell is clear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MushroomMap {
    width: i32,
    height: i32,
    cells: Vec<i32>,
}

impl MushroomMap {
    pub fn empty(settings: &Settings) -> MushroomMap {
        MushroomMap {
            width: settings.field_width,
            height: settings.field_height,
            cells: vec![0; (settings.field_width * settings.field_height) as usize],
        }
    }

    /// Random field for a new game. The chain spawn line and the starship's
    /// starting line stay clear.
    pub fn seeded(settings: &Settings, rng: &mut impl rand::Rng) -> MushroomMap {
        let mut map = MushroomMap::empty(settings);
        for line in 0..settings.field_height {
            if line == settings.centipede_spawn_line || line == settings.initial_starship_line {
                continue;
            }
            for column in 0..settings.field_width {
                if rng.gen_range(0..100) < settings.mushroom_spawn_percent {
                    map.grow(Position::new(line, column), settings.mushroom_durability);
                }
            }
        }
        map
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.line >= 0 && pos.line < self.height && pos.column >= 0 && pos.column < self.width
    }

    fn index(&self, pos: Position) -> usize {
        (pos.line * self.width + pos.column) as usize
    }

    /// Remaining durability at a cell; out-of-bounds reads as clear.
    pub fn durability(&self, pos: Position) -> i32 {
        if self.in_bounds(pos) {
            self.cells[self.index(pos)]
        } else {
            0
        }
    }

    /// True when a mushroom occupies the cell.
    pub fn blocks(&self, pos: Position) -> bool {
        self.durability(pos) > 0
    }

    /// Bullet impact: decrement durability by one if the cell is occupied.
    /// Returns true when a mushroom was struck.
    pub fn hit(&mut self, pos: Position) -> bool {
        if !self.blocks(pos) {
            return false;
        }
        let idx = self.index(pos);
        self.cells[idx] -= 1;
        true
    }

    /// Place (or restore) a mushroom with the given durability.
    pub fn grow(&mut self, pos: Position, durability: i32) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx] = durability;
        }
    }
}

// ── Centipede chains ─────────────────────────────────────────────────────────

/// Outcome of testing one bullet against one chain.
#[derive(Debug, PartialEq, Eq)]
pub enum ChainHit {
    Miss,
    /// The head segment was struck: the whole chain dies.
    Head,
    /// A body segment was struck. When segments trailed behind it, they come
    /// back as a brand-new chain.
    Tail(Option<CentipedeChain>),
}

/// One enemy: an ordered run of segments, head at index 0, all sharing one
/// moving direction. Never empty while alive — an emptied chain is a dead
/// chain and must be dropped from the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentipedeChain {
    pub segments: Vec<Position>,
    pub direction: ChainDirection,
}

impl CentipedeChain {
    /// Spawn a chain of `size` segments trailing out of the spawn cell,
    /// opposite its moving direction.
    pub fn spawn(at: Position, direction: ChainDirection, size: u32) -> CentipedeChain {
        let back = direction.reversed().step();
        let segments = (0..size.max(1) as i32)
            .map(|i| Position::new(at.line, at.column + i * back))
            .collect();
        CentipedeChain { segments, direction }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Test a bullet position against the segments, head to tail.
    ///
    /// A tail hit at depth `d` removes segments `d..len` from this chain; the
    /// ones behind the struck segment (if any) split off as a new chain that
    /// keeps the current direction.
    pub fn hit_test(&mut self, pos: Position) -> ChainHit {
        match self.segments.iter().position(|&s| s == pos) {
            None => ChainHit::Miss,
            Some(0) => ChainHit::Head,
            Some(depth) => {
                let mut removed = self.segments.split_off(depth);
                // removed[0] is the struck segment itself.
                removed.remove(0);
                if removed.is_empty() {
                    ChainHit::Tail(None)
                } else {
                    ChainHit::Tail(Some(CentipedeChain {
                        segments: removed,
                        direction: self.direction,
                    }))
                }
            }
        }
    }
}

// ── Aggregate game state ─────────────────────────────────────────────────────

/// The whole simulation state. Mutated exclusively by the round loop's
/// thread; the lives counter is atomic because the clock thread reads it as
/// its liveness predicate.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    /// Per-game tick counter; never reset between rounds (path gating is
    /// modulo arithmetic, correct at any absolute value).
    pub tick: u64,
    pub round: u32,
    /// Centipede-path slowdown for the current round.
    pub centipede_slowdown: u32,
    pub score: u32,
    #[serde(with = "atomic_lives")]
    pub lives: Arc<AtomicI32>,
    pub bullets: Vec<Bullet>,
    pub centipedes: Vec<CentipedeChain>,
    pub mushrooms: MushroomMap,
    pub starship: Starship,
    pub died_this_round: bool,
}

impl GameState {
    /// Fresh state for a new game: round 0, no chains, seeded mushroom field.
    pub fn new(settings: Settings, rng: &mut impl rand::Rng) -> GameState {
        let mushrooms = MushroomMap::seeded(&settings, rng);
        let starship = Starship {
            position: Position::new(settings.initial_starship_line, settings.initial_starship_column),
        };
        GameState {
            tick: 0,
            round: 0,
            centipede_slowdown: settings.initial_centipede_slowdown,
            score: 0,
            lives: Arc::new(AtomicI32::new(settings.initial_lives)),
            bullets: Vec::new(),
            centipedes: Vec::new(),
            mushrooms,
            starship,
            died_this_round: false,
            settings,
        }
    }

    pub fn lives(&self) -> i32 {
        self.lives.load(Ordering::Acquire)
    }

    /// The shared liveness predicate: the game runs while lives remain.
    pub fn alive(&self) -> bool {
        self.lives() > 0
    }
}

/// Serde adapter for the shared lives counter: snapshots store the plain
/// integer, loading rebuilds a fresh atomic.
mod atomic_lives {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(lives: &Arc<AtomicI32>, ser: S) -> Result<S::Ok, S::Error> {
        lives.load(Ordering::Acquire).serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Arc<AtomicI32>, D::Error> {
        Ok(Arc::new(AtomicI32::new(i32::deserialize(de)?)))
    }
}
