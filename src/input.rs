/// Keyboard input.
///
/// The game loop asks for one `FrameInput` per tick.  Fire and quit are
/// discrete key-down events; left/right are sampled as "currently held".
///
/// Held-key model: a `key_frame` map records the frame of the last
/// press/repeat event for every key.  A key counts as held while it is
/// fresh (within `HOLD_WINDOW` frames), which lets Space and an arrow be
/// held together.  Terminals with keyboard-enhancement support also send
/// `Release` events, which drop the key immediately; classic terminals
/// only repeat `Press`, and the key expires after `HOLD_WINDOW` frames of
/// silence.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  At 60 FPS that is ≈133 ms, longer than the OS
/// key-repeat interval.
pub const HOLD_WINDOW: u64 = 8;

/// Everything the game loop needs to know about the keyboard for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Fire key went down since the last poll.
    pub fire: bool,
    pub left: bool,
    pub right: bool,
    /// A close request arrived since the last poll.
    pub quit: bool,
}

pub trait InputSource {
    /// Drain pending events and sample held keys for `frame`.
    fn poll(&mut self, frame: u64) -> FrameInput;

    /// Forget held keys, e.g. when a new session starts.
    fn reset(&mut self) {}
}

/// Spawn a thread dedicated to blocking event reads, so the game loop
/// never has to block on terminal I/O.
pub fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                tracing::error!("event reader stopped: {e}");
                break;
            }
        }
    });
    rx
}

/// Turns crossterm key events into per-frame input.
pub struct KeyTracker {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
        }
    }

    /// Fold one event into the held-key map and the discrete flags of `input`.
    pub fn handle_event(&mut self, event: Event, frame: u64, input: &mut FrameInput) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, frame);
                match code {
                    KeyCode::Char(' ') => input.fire = true,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => input.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        input.quit = true;
                    }
                    _ => {}
                }
            }
            // Repeat keeps a key held but never re-fires
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Sample left/right from the held-key map.
    pub fn sample(&self, frame: u64, input: &mut FrameInput) {
        input.left = self.is_held(KeyCode::Left, frame)
            || self.is_held(KeyCode::Char('a'), frame)
            || self.is_held(KeyCode::Char('A'), frame);
        input.right = self.is_held(KeyCode::Right, frame)
            || self.is_held(KeyCode::Char('d'), frame)
            || self.is_held(KeyCode::Char('D'), frame);
    }
}

impl InputSource for KeyTracker {
    fn poll(&mut self, frame: u64) -> FrameInput {
        let mut input = FrameInput::default();
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event, frame, &mut input);
        }
        self.sample(frame, &mut input);
        input
    }

    fn reset(&mut self) {
        self.key_frame.clear();
    }
}
