//! Sound cues.
//!
//! The game only ever triggers cues and never waits on them.  The terminal
//! build has no mixer, so the one cue worth hearing (the ship exploding)
//! rings the terminal bell.

use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Looping track started at launch.
    Background,
    Fire,
    Destruction,
}

pub trait Audio {
    fn play(&mut self, cue: Cue);
}

impl<T: Audio + ?Sized> Audio for Box<T> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}

/// Rings BEL on destruction; every cue is logged at debug level.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Audio for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        tracing::debug!(?cue, "play cue");
        if cue == Cue::Destruction {
            if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
                tracing::debug!("bell failed: {e}");
            }
        }
    }
}

/// `--mute`.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, cue: Cue) {
        tracing::trace!(?cue, "muted cue");
    }
}
