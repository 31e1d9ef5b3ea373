/// All game entity types — plain data plus the box geometry they share.

use crate::score::ScoreLedger;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in logical pixels, used for drawing and collisions alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict intersection: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Player, projectiles, enemies ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

/// Identifier handed out at spawn time; unique within a session.
pub type EnemyId = u64;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub rect: Rect,
}

// ── Signals ───────────────────────────────────────────────────────────────────

/// Something the resolver noticed during a tick.  The game loop consumes
/// these directly; nothing is queued across ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    BulletFired,
    EnemyDestroyed(EnemyId),
    PlayerHit,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One session's worth of state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Firing order is preserved.
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: ScoreLedger,
    pub status: GameStatus,
    pub frame: u64,
    pub next_enemy_id: EnemyId,
}
