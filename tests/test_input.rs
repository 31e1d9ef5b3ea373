use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use space_shooter::input::{FrameInput, InputSource, KeyTracker, HOLD_WINDOW};

fn tracker() -> (mpsc::Sender<Event>, KeyTracker) {
    let (tx, rx) = mpsc::channel();
    (tx, KeyTracker::new(rx))
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn with_kind(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

#[test]
fn no_events_means_no_input() {
    let (_tx, mut keys) = tracker();
    assert_eq!(keys.poll(1), FrameInput::default());
}

#[test]
fn fire_is_an_edge() {
    let (tx, mut keys) = tracker();
    tx.send(press(KeyCode::Char(' '))).unwrap();
    assert!(keys.poll(1).fire);
    // Still "held", but no new key-down
    assert!(!keys.poll(2).fire);
}

#[test]
fn key_repeat_does_not_fire() {
    let (tx, mut keys) = tracker();
    tx.send(with_kind(KeyCode::Char(' '), KeyEventKind::Repeat)).unwrap();
    assert!(!keys.poll(1).fire);
}

#[test]
fn arrow_stays_held_within_window() {
    let (tx, mut keys) = tracker();
    tx.send(press(KeyCode::Left)).unwrap();
    assert!(keys.poll(10).left);
    assert!(keys.poll(10 + HOLD_WINDOW).left);
    assert!(!keys.poll(11 + HOLD_WINDOW).left);
}

#[test]
fn repeat_refreshes_hold() {
    let (tx, mut keys) = tracker();
    tx.send(press(KeyCode::Right)).unwrap();
    keys.poll(1);
    tx.send(with_kind(KeyCode::Right, KeyEventKind::Repeat)).unwrap();
    assert!(keys.poll(6).right);
    assert!(keys.poll(6 + HOLD_WINDOW).right);
}

#[test]
fn release_drops_key_immediately() {
    let (tx, mut keys) = tracker();
    tx.send(press(KeyCode::Char('a'))).unwrap();
    assert!(keys.poll(1).left);
    tx.send(with_kind(KeyCode::Char('a'), KeyEventKind::Release)).unwrap();
    assert!(!keys.poll(2).left);
}

#[test]
fn fire_and_move_together() {
    let (tx, mut keys) = tracker();
    tx.send(press(KeyCode::Char('d'))).unwrap();
    tx.send(press(KeyCode::Char(' '))).unwrap();
    let input = keys.poll(1);
    assert!(input.fire && input.right && !input.left);
}

#[test]
fn quit_keys() {
    for event in [
        press(KeyCode::Char('q')),
        press(KeyCode::Esc),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ] {
        let (tx, mut keys) = tracker();
        tx.send(event).unwrap();
        assert!(keys.poll(1).quit);
    }
}

#[test]
fn plain_c_is_not_quit() {
    let (tx, mut keys) = tracker();
    tx.send(press(KeyCode::Char('c'))).unwrap();
    assert!(!keys.poll(1).quit);
}

#[test]
fn non_key_events_are_ignored() {
    let (tx, mut keys) = tracker();
    tx.send(Event::Resize(80, 24)).unwrap();
    tx.send(press(KeyCode::Char(' '))).unwrap();
    // The resize must not stop the drain before the key
    assert!(keys.poll(1).fire);
}

#[test]
fn reset_forgets_held_keys() {
    let (tx, mut keys) = tracker();
    tx.send(press(KeyCode::Left)).unwrap();
    assert!(keys.poll(1).left);
    keys.reset();
    assert!(!keys.poll(2).left);
}
