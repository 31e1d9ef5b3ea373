/// Rendering layer — all terminal drawing lives here.
///
/// The game runs on a fixed logical canvas (800×600 by default).  Each frame
/// the renderer projects that canvas onto whatever terminal it finds: row 0
/// is the HUD, the last row holds the controls hint, and everything in
/// between is play area.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{GameState, Rect};
use crate::error::Result;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_TITLE: Color = Color::DarkCyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_LOSER: Color = Color::Red;
const C_FINAL_SCORE: Color = Color::White;
const C_HIGH_SCORE: Color = Color::Yellow;

/// Every `STAR_SPACING`-th cell of the play area gets a background star.
const STAR_SPACING: usize = 37;

pub trait Renderer {
    /// Draw one complete frame and present it.
    fn draw_frame(&mut self, state: &GameState, config: &GameConfig) -> Result<()>;

    /// Draw the result screen on top of the last frame and present it.
    fn draw_game_over(&mut self, final_score: u32, high_score: u32, config: &GameConfig)
        -> Result<()>;
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Terminal size in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

/// A box in terminal cells, already clipped to the play area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBox {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    fn play_rows(&self) -> i64 {
        self.rows as i64 - 2
    }

    /// Map a logical box to cells.  Boxes entirely off the canvas, or any box
    /// when the terminal has no play area, yield `None`; anything else is at
    /// least one cell in each direction.
    pub fn project(&self, rect: &Rect, config: &GameConfig) -> Option<CellBox> {
        if self.cols == 0 || self.play_rows() < 1 {
            return None;
        }
        if rect.right() <= 0
            || rect.bottom() <= 0
            || rect.x >= config.screen_width
            || rect.y >= config.screen_height
        {
            return None;
        }
        let cols = self.cols as i64;
        let rows = self.play_rows();
        let sw = config.screen_width as i64;
        let sh = config.screen_height as i64;

        let left = (rect.x.max(0) as i64 * cols / sw).min(cols - 1);
        let top = (rect.y.max(0) as i64 * rows / sh).min(rows - 1);
        let right = (rect.right().min(config.screen_width) as i64 * cols / sw).max(left + 1);
        let bottom = (rect.bottom().min(config.screen_height) as i64 * rows / sh).max(top + 1);

        Some(CellBox {
            col: left as u16,
            row: (top + 1) as u16, // below the HUD
            width: (right.min(cols) - left) as u16,
            height: (bottom.min(rows) - top) as u16,
        })
    }
}

// ── Terminal renderer ─────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    /// `None` follows the live terminal size on every frame.
    fixed: Option<Viewport>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, fixed: None }
    }

    /// Render into a viewport of a known size instead of asking the terminal.
    pub fn with_viewport(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            fixed: Some(viewport),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn viewport(&self) -> Result<Viewport> {
        match self.fixed {
            Some(v) => Ok(v),
            None => {
                let (cols, rows) = terminal::size()?;
                Ok(Viewport { cols, rows })
            }
        }
    }

    fn present(&mut self, view: Viewport) -> Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw_frame(&mut self, state: &GameState, config: &GameConfig) -> Result<()> {
        let view = self.viewport()?;
        let out = &mut self.out;

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        draw_background(out, view)?;
        draw_hud(out, view, state.score.current(), config)?;

        if let Some(cells) = view.project(&state.player.rect, config) {
            draw_player(out, cells)?;
        }
        for enemy in &state.enemies {
            if let Some(cells) = view.project(&enemy.rect, config) {
                draw_enemy(out, cells)?;
            }
        }
        for bullet in &state.bullets {
            if let Some(cells) = view.project(&bullet.rect, config) {
                draw_bullet(out, cells)?;
            }
        }

        draw_controls_hint(out, view)?;
        self.present(view)
    }

    fn draw_game_over(
        &mut self,
        final_score: u32,
        high_score: u32,
        _config: &GameConfig,
    ) -> Result<()> {
        let view = self.viewport()?;
        let score_line = format!("Your final score: {final_score}");
        let high_line = format!("Highest Score: {high_score}");
        let lines: [(&str, Color); 5] = [
            ("╔══════════════════╗", C_LOSER),
            ("║    You Lose!     ║", C_LOSER),
            ("╚══════════════════╝", C_LOSER),
            (&score_line, C_FINAL_SCORE),
            (&high_line, C_HIGH_SCORE),
        ];

        let cx = view.cols / 2;
        let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

        for (i, (msg, color)) in lines.iter().enumerate() {
            let row = start_row + i as u16;
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*msg))?;
        }

        self.present(view)
    }
}

// ── Background & HUD ──────────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W, view: Viewport) -> Result<()> {
    if view.cols == 0 || view.play_rows() < 1 {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(C_STAR))?;
    let play_rows = view.play_rows() as usize;
    let cols = view.cols as usize;
    for cell in (0..play_rows * cols).step_by(STAR_SPACING) {
        // Skew by row so the stars don't line up in columns
        let row = cell / cols;
        let col = (cell + row * 7) % cols;
        out.queue(cursor::MoveTo(col as u16, (row + 1) as u16))?;
        out.queue(Print("."))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, view: Viewport, score: u32, config: &GameConfig) -> Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {score}")))?;

    let tx = view
        .cols
        .saturating_sub(config.title.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TITLE))?;
    out.queue(Print(&config.title))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(out: &mut W, cells: CellBox, glyph: &str) -> Result<()> {
    let line = glyph.repeat(cells.width as usize);
    for dy in 0..cells.height {
        out.queue(cursor::MoveTo(cells.col, cells.row + dy))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, cells: CellBox) -> Result<()> {
    // Nose on the top row, hull below it
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(cells.col + cells.width / 2, cells.row))?;
    out.queue(Print("▲"))?;
    if cells.height > 1 {
        fill(
            out,
            CellBox {
                row: cells.row + 1,
                height: cells.height - 1,
                ..cells
            },
            "█",
        )?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, cells: CellBox) -> Result<()> {
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    fill(out, cells, "◉")
}

fn draw_bullet<W: Write>(out: &mut W, cells: CellBox) -> Result<()> {
    out.queue(style::SetForegroundColor(C_BULLET))?;
    fill(out, cells, "║")
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
