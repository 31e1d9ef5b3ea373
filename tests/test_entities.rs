use space_shooter::compute::init_state;
use space_shooter::config::GameConfig;
use space_shooter::entities::*;

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0, 0, 10, 10);
    // Sharing an edge is not a collision
    assert!(!a.overlaps(&Rect::new(10, 0, 10, 10)));
    assert!(!a.overlaps(&Rect::new(0, 10, 10, 10)));
    // One pixel of overlap is
    assert!(a.overlaps(&Rect::new(9, 9, 10, 10)));
    // Containment counts both ways
    let inner = Rect::new(2, 2, 3, 3);
    assert!(a.overlaps(&inner));
    assert!(inner.overlaps(&a));
}

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(368, 500, 64, 64);
    assert_eq!(r.right(), 432);
    assert_eq!(r.bottom(), 564);
    assert_eq!(r.center_x(), 400);
}

#[test]
fn enums_compare() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(Signal::EnemyDestroyed(3), Signal::EnemyDestroyed(3));
    assert_ne!(Signal::EnemyDestroyed(3), Signal::EnemyDestroyed(4));
    assert_ne!(Signal::PlayerHit, Signal::BulletFired);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(&GameConfig::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99;
    cloned.score.record_enemy_destroyed();
    cloned.enemies.push(Enemy {
        id: 0,
        rect: Rect::new(5, 5, 64, 64),
    });

    assert_eq!(original.player.rect.x, 368);
    assert_eq!(original.score.current(), 0);
    assert!(original.enemies.is_empty());
}
