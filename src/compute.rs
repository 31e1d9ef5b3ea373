/// Pure game-logic functions.
///
/// Every public function takes an immutable view of the current state (and,
/// where needed, an RNG handle) and returns fresh values.  Side effects are
/// limited to the injected RNG.  Nothing here touches the score or the
/// session status; the resolver reports what happened through `Signal`s and
/// the game loop decides what that means.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, GameState, GameStatus, Player, Rect, Signal};
use crate::input::FrameInput;
use crate::score::ScoreLedger;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state of a session: ship centred near the bottom,
/// no bullets, no enemies, score zero.
pub fn init_state(config: &GameConfig) -> GameState {
    GameState {
        player: Player {
            rect: Rect::new(
                config.screen_width / 2 - config.player_width / 2,
                config.screen_height - config.player_bottom_offset,
                config.player_width,
                config.player_height,
            ),
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: ScoreLedger::new(),
        status: GameStatus::Playing,
        frame: 0,
        next_enemy_id: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply held left/right keys.  The result is always clamped to
/// `[0, screen_width - player_width]`.
pub fn move_player(state: &GameState, left: bool, right: bool, config: &GameConfig) -> GameState {
    let mut x = state.player.rect.x;
    if left {
        x -= config.player_velocity;
    }
    if right {
        x += config.player_velocity;
    }
    let x = x.clamp(0, config.player_max_x());

    GameState {
        player: Player {
            rect: Rect { x, ..state.player.rect },
        },
        ..state.clone()
    }
}

/// Fire a bullet from the centre of the ship, unless `max_bullets` are
/// already in flight.  The flag tells the caller whether a shot went out.
pub fn player_shoot(state: &GameState, config: &GameConfig) -> (GameState, bool) {
    if state.bullets.len() >= config.max_bullets {
        return (state.clone(), false);
    }
    let ship = &state.player.rect;
    let bullet = Bullet {
        rect: Rect::new(
            ship.center_x() - config.bullet_width / 2,
            ship.y,
            config.bullet_width,
            config.bullet_height,
        ),
    };
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    (
        GameState {
            bullets,
            ..state.clone()
        },
        true,
    )
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Add one enemy at a random spot in the top band when under the cap.
pub fn spawn_enemy(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    if state.enemies.len() >= config.max_enemies {
        return state.clone();
    }
    let x = rng.gen_range(0..=config.screen_width - config.enemy_width);
    let y = rng.gen_range(0..=config.spawn_band_bottom());

    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        id: state.next_enemy_id,
        rect: Rect::new(x, y, config.enemy_width, config.enemy_height),
    });
    GameState {
        enemies,
        next_enemy_id: state.next_enemy_id + 1,
        ..state.clone()
    }
}

// ── Movement & collision ─────────────────────────────────────────────────────

#[derive(Debug)]
pub struct BulletStep {
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub signals: Vec<Signal>,
}

/// Move every bullet up and resolve bullet ↔ enemy hits.
///
/// A bullet takes out at most one enemy (the first it overlaps) and is
/// consumed by it.  Only bullets that survived collision are checked
/// against the top edge, so no bullet is removed twice.
pub fn advance_bullets(bullets: &[Bullet], enemies: &[Enemy], config: &GameConfig) -> BulletStep {
    let mut enemies = enemies.to_vec();
    let mut survivors = Vec::with_capacity(bullets.len());
    let mut signals = Vec::new();

    for bullet in bullets {
        let moved = Rect {
            y: bullet.rect.y - config.bullet_velocity,
            ..bullet.rect
        };

        if let Some(hit) = enemies.iter().position(|e| moved.overlaps(&e.rect)) {
            let enemy = enemies.remove(hit);
            signals.push(Signal::EnemyDestroyed(enemy.id));
            continue;
        }

        if moved.y < 0 {
            continue;
        }
        survivors.push(Bullet { rect: moved });
    }

    BulletStep {
        bullets: survivors,
        enemies,
        signals,
    }
}

#[derive(Debug)]
pub struct EnemyStep {
    pub enemies: Vec<Enemy>,
    pub player_hit: bool,
}

/// Move every enemy down, checking each against the ship.
///
/// The first enemy to touch the ship ends processing: it stays in the list,
/// and enemies after it keep their old positions.  Otherwise an enemy whose
/// top has passed the bottom edge is dropped.
pub fn advance_enemies(player: &Player, enemies: &[Enemy], config: &GameConfig) -> EnemyStep {
    let mut kept = Vec::with_capacity(enemies.len());

    for (i, enemy) in enemies.iter().enumerate() {
        let moved = Enemy {
            rect: Rect {
                y: enemy.rect.y + config.enemy_velocity,
                ..enemy.rect
            },
            ..enemy.clone()
        };

        if player.rect.overlaps(&moved.rect) {
            kept.push(moved);
            kept.extend_from_slice(&enemies[i + 1..]);
            return EnemyStep {
                enemies: kept,
                player_hit: true,
            };
        }
        if moved.rect.y > config.screen_height {
            continue;
        }
        kept.push(moved);
    }

    EnemyStep {
        enemies: kept,
        player_hit: false,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

#[derive(Debug)]
pub struct TickResult {
    pub state: GameState,
    pub signals: Vec<Signal>,
}

/// Advance the simulation by one frame: fire, spawn, move the ship, then
/// bullets, then enemies.  All randomness comes through `rng` so callers
/// control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    input: &FrameInput,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> TickResult {
    let mut signals = Vec::new();
    let mut state = GameState {
        frame: state.frame + 1,
        ..state.clone()
    };

    // ── 1. Fire on the key-down edge ─────────────────────────────────────────
    if input.fire {
        let (next, fired) = player_shoot(&state, config);
        state = next;
        if fired {
            signals.push(Signal::BulletFired);
        }
    }

    // ── 2. One spawn attempt per tick ────────────────────────────────────────
    state = spawn_enemy(&state, config, rng);

    // ── 3. Ship movement ─────────────────────────────────────────────────────
    state = move_player(&state, input.left, input.right, config);

    // ── 4. Bullets ↔ enemies ─────────────────────────────────────────────────
    let step = advance_bullets(&state.bullets, &state.enemies, config);
    signals.extend(step.signals);

    // ── 5. Enemies ↔ ship ────────────────────────────────────────────────────
    let enemy_step = advance_enemies(&state.player, &step.enemies, config);
    if enemy_step.player_hit {
        signals.push(Signal::PlayerHit);
    }

    TickResult {
        state: GameState {
            bullets: step.bullets,
            enemies: enemy_step.enemies,
            ..state
        },
        signals,
    }
}
