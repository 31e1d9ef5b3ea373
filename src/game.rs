//! The game loop and its two-state machine.
//!
//! `Playing` ticks at the configured rate until an enemy touches the ship.
//! `GameOver` shows the result for a fixed pause and then a fresh session,
//! with its own background cue, starts in the same loop.  The only way out is
//! a close request: one seen while playing ends the loop after that tick, and
//! one seen on the losing tick or during the pause ends it after the pause.

use std::thread;
use std::time::Instant;

use rand::Rng;

use crate::audio::{Audio, Cue};
use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::display::Renderer;
use crate::entities::{GameState, GameStatus, Signal};
use crate::error::Result;
use crate::input::{FrameInput, InputSource};
use crate::score::HighScoreStore;

/// What one tick of a session amounted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub enemies_destroyed: u32,
    pub bullet_fired: bool,
    pub player_hit: bool,
}

/// A single play-through, from fresh state to the first hit on the ship.
pub struct Session<'a, R: Rng> {
    config: &'a GameConfig,
    state: GameState,
    rng: R,
}

impl<'a, R: Rng> Session<'a, R> {
    pub fn new(config: &'a GameConfig, rng: R) -> Self {
        Self {
            config,
            state: init_state(config),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Throw away the current play-through, keeping the RNG stream.
    pub fn restart(&mut self) {
        self.state = init_state(self.config);
    }

    /// Run one `Playing` tick and consume its signals.  Does nothing once
    /// the session is over.
    pub fn step(&mut self, input: &FrameInput, audio: &mut impl Audio) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.state.status != GameStatus::Playing {
            return outcome;
        }

        let result = tick(&self.state, input, self.config, &mut self.rng);
        self.state = result.state;

        for signal in result.signals {
            match signal {
                Signal::BulletFired => {
                    outcome.bullet_fired = true;
                    audio.play(Cue::Fire);
                }
                Signal::EnemyDestroyed(id) => {
                    tracing::trace!(enemy = id, "enemy destroyed");
                    outcome.enemies_destroyed += 1;
                    self.state.score.record_enemy_destroyed();
                }
                Signal::PlayerHit => {
                    outcome.player_hit = true;
                    self.state.status = GameStatus::GameOver;
                    audio.play(Cue::Destruction);
                }
            }
        }
        outcome
    }
}

/// Drive sessions until a close request arrives.
pub fn run<D, A, I, R>(
    config: &GameConfig,
    store: &HighScoreStore,
    renderer: &mut D,
    audio: &mut A,
    input: &mut I,
    rng: R,
) -> Result<()>
where
    D: Renderer,
    A: Audio,
    I: InputSource,
    R: Rng,
{
    let tick_duration = config.tick_duration();
    let mut session = Session::new(config, rng);
    let mut quit_requested = false;
    let mut sessions_played: u64 = 1;

    audio.play(Cue::Background);
    tracing::info!(session = sessions_played, "session started");

    loop {
        if quit_requested {
            break;
        }
        let frame_start = Instant::now();

        let frame_input = input.poll(session.state().frame + 1);
        quit_requested = frame_input.quit;

        let outcome = session.step(&frame_input, audio);
        renderer.draw_frame(session.state(), config)?;

        if outcome.player_hit {
            let final_score = session.state().score.current();
            let high_score = store.finalize(final_score)?;
            tracing::info!(
                session = sessions_played,
                score = final_score,
                high_score,
                frames = session.state().frame,
                "session over"
            );
            renderer.draw_game_over(final_score, high_score, config)?;
            thread::sleep(config.game_over_pause());

            // Keys pressed during the pause are dropped, except a close request
            let paused_input = input.poll(session.state().frame + 1);
            input.reset();
            if quit_requested || paused_input.quit {
                break;
            }

            session.restart();
            sessions_played += 1;
            audio.play(Cue::Background);
            tracing::info!(session = sessions_played, "session started");
            continue;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < tick_duration {
            thread::sleep(tick_duration - elapsed);
        }
    }

    tracing::info!(sessions = sessions_played, "quit requested");
    Ok(())
}
