use space_shooter::compute::init_state;
use space_shooter::config::GameConfig;
use space_shooter::display::{CellBox, Renderer, TerminalRenderer, Viewport};
use space_shooter::entities::{Bullet, Enemy, Rect};

const VIEW: Viewport = Viewport { cols: 80, rows: 24 };

fn rendered(renderer: &TerminalRenderer<Vec<u8>>) -> String {
    String::from_utf8_lossy(renderer.get_ref()).into_owned()
}

// ── Projection ────────────────────────────────────────────────────────────────

#[test]
fn full_canvas_fills_play_area() {
    let cfg = GameConfig::default();
    let cells = VIEW.project(&Rect::new(0, 0, 800, 600), &cfg).unwrap();
    // Row 0 is the HUD, row 23 the controls hint
    assert_eq!(
        cells,
        CellBox {
            col: 0,
            row: 1,
            width: 80,
            height: 22
        }
    );
}

#[test]
fn tiny_box_gets_at_least_one_cell() {
    let cfg = GameConfig::default();
    let cells = VIEW.project(&Rect::new(394, 300, 1, 1), &cfg).unwrap();
    assert_eq!((cells.width, cells.height), (1, 1));
    assert_eq!(cells.col, 39);
}

#[test]
fn off_canvas_boxes_are_skipped() {
    let cfg = GameConfig::default();
    assert!(VIEW.project(&Rect::new(10, -20, 13, 15), &cfg).is_none());
    assert!(VIEW.project(&Rect::new(10, 601, 64, 64), &cfg).is_none());
    assert!(VIEW.project(&Rect::new(800, 10, 64, 64), &cfg).is_none());
}

#[test]
fn partly_visible_box_is_clipped() {
    let cfg = GameConfig::default();
    let cells = VIEW.project(&Rect::new(760, 580, 64, 64), &cfg).unwrap();
    assert!(cells.col + cells.width <= VIEW.cols);
    assert!(cells.row + cells.height <= VIEW.rows - 1);
}

#[test]
fn degenerate_terminal_projects_nothing() {
    let cfg = GameConfig::default();
    let rect = Rect::new(368, 500, 64, 64);
    // No columns at all
    assert!(Viewport { cols: 0, rows: 24 }.project(&rect, &cfg).is_none());
    // HUD and hint rows leave no play row
    assert!(Viewport { cols: 80, rows: 2 }.project(&rect, &cfg).is_none());
    assert!(Viewport { cols: 80, rows: 0 }.project(&rect, &cfg).is_none());
    // One play row is enough
    let cells = Viewport { cols: 80, rows: 3 }.project(&rect, &cfg).unwrap();
    assert_eq!((cells.row, cells.height), (1, 1));
}

// ── Terminal renderer ─────────────────────────────────────────────────────────

#[test]
fn frame_shows_score_and_title() {
    let cfg = GameConfig::default();
    let mut state = init_state(&cfg);
    for _ in 0..7 {
        state.score.record_enemy_destroyed();
    }
    state.enemies.push(Enemy {
        id: 0,
        rect: Rect::new(100, 100, 64, 64),
    });
    state.bullets.push(Bullet {
        rect: Rect::new(394, 400, 13, 15),
    });

    let mut renderer = TerminalRenderer::with_viewport(Vec::new(), VIEW);
    renderer.draw_frame(&state, &cfg).unwrap();

    let out = rendered(&renderer);
    assert!(out.contains("Score: 7"));
    assert!(out.contains("Space Invaders Original!"));
    assert!(out.contains("▲"));
    assert!(out.contains("◉"));
    assert!(out.contains("║"));
}

#[test]
fn game_over_shows_both_scores() {
    let cfg = GameConfig::default();
    let mut renderer = TerminalRenderer::with_viewport(Vec::new(), VIEW);
    renderer.draw_game_over(3, 12, &cfg).unwrap();

    let out = rendered(&renderer);
    assert!(out.contains("You Lose!"));
    assert!(out.contains("Your final score: 3"));
    assert!(out.contains("Highest Score: 12"));
}

#[test]
fn degenerate_terminal_draws_only_the_hud() {
    let cfg = GameConfig::default();
    let mut state = init_state(&cfg);
    state.enemies.push(Enemy {
        id: 0,
        rect: Rect::new(100, 100, 64, 64),
    });

    for view in [Viewport { cols: 0, rows: 24 }, Viewport { cols: 80, rows: 1 }] {
        let mut renderer = TerminalRenderer::with_viewport(Vec::new(), view);
        renderer.draw_frame(&state, &cfg).unwrap();
        let out = rendered(&renderer);
        assert!(out.contains("Score: 0"));
        assert!(!out.contains("▲"));
        assert!(!out.contains("◉"));
    }
}
