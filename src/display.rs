/// Rendering layer — all terminal drawing lives here.
///
/// `TerminalUi` translates game state into queued crossterm commands; no
/// game logic is performed. The core treats rendering as infallible, so I/O
/// errors are logged and swallowed at this boundary instead of bubbling into
/// the round loop.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::GameState;
use crate::game::Presenter;

// Screen offsets: HUD on row 0, border on row 1, playfield starts at (1, 2).
const FIELD_LEFT: u16 = 1;
const FIELD_TOP: u16 = 2;

/// Glyphs and colours for everything on screen.
#[derive(Clone, Debug)]
pub struct Theme {
    pub starship: char,
    pub starship_color: Color,
    pub bullet: char,
    pub bullet_color: Color,
    pub centipede_head: char,
    pub centipede_body: char,
    pub centipede_color: Color,
    pub mushroom: char,
    pub mushroom_color: Color,
    /// Used once a mushroom is down to its last durability point.
    pub mushroom_weak_color: Color,
    pub border_color: Color,
    pub hud_color: Color,
    pub hint_color: Color,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            starship: '▲',
            starship_color: Color::White,
            bullet: '│',
            bullet_color: Color::Cyan,
            centipede_head: '◉',
            centipede_body: 'o',
            centipede_color: Color::Green,
            mushroom: '♣',
            mushroom_color: Color::Magenta,
            mushroom_weak_color: Color::DarkMagenta,
            border_color: Color::DarkBlue,
            hud_color: Color::Yellow,
            hint_color: Color::DarkGrey,
        }
    }
}

pub struct TerminalUi<W: Write> {
    out: W,
}

impl<W: Write> TerminalUi<W> {
    pub fn new(out: W) -> TerminalUi<W> {
        TerminalUi { out }
    }

    fn cell(&self, line: i32, column: i32) -> cursor::MoveTo {
        cursor::MoveTo(FIELD_LEFT + column as u16, FIELD_TOP + line as u16)
    }

    fn draw_frame(&mut self, state: &GameState, theme: &Theme) -> std::io::Result<()> {
        let width = state.settings.field_width as usize;
        let height = state.settings.field_height as u16;

        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        // HUD row.
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(theme.hud_color))?;
        self.out.queue(Print(format!(
            "Score: {:>6}   Round: {:>3}   Lives: {}",
            state.score,
            state.round,
            "♥".repeat(state.lives().max(0) as usize)
        )))?;

        // Border box around the playfield.
        self.out.queue(style::SetForegroundColor(theme.border_color))?;
        self.out.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(width))))?;
        self.out.queue(cursor::MoveTo(0, FIELD_TOP + height))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(width))))?;
        for line in 0..height {
            self.out.queue(cursor::MoveTo(0, FIELD_TOP + line))?;
            self.out.queue(Print("│"))?;
            self.out
                .queue(cursor::MoveTo(FIELD_LEFT + width as u16, FIELD_TOP + line))?;
            self.out.queue(Print("│"))?;
        }

        // Mushrooms.
        for line in 0..state.settings.field_height {
            for column in 0..state.settings.field_width {
                let pos = crate::entities::Position::new(line, column);
                let durability = state.mushrooms.durability(pos);
                if durability > 0 {
                    let colour = if durability == 1 {
                        theme.mushroom_weak_color
                    } else {
                        theme.mushroom_color
                    };
                    self.out.queue(self.cell(line, column))?;
                    self.out.queue(style::SetForegroundColor(colour))?;
                    self.out.queue(Print(theme.mushroom))?;
                }
            }
        }

        // Bullets.
        self.out.queue(style::SetForegroundColor(theme.bullet_color))?;
        for bullet in &state.bullets {
            self.out.queue(self.cell(bullet.position.line, bullet.position.column))?;
            self.out.queue(Print(theme.bullet))?;
        }

        // Centipede chains, head glyph first. Freshly spawned chains trail
        // out of the field behind the spawn cell; those segments have no
        // on-screen cell yet and are skipped until they slide in.
        self.out.queue(style::SetForegroundColor(theme.centipede_color))?;
        for chain in &state.centipedes {
            for (i, segment) in chain.segments.iter().enumerate() {
                if !state.mushrooms.in_bounds(*segment) {
                    continue;
                }
                let glyph = if i == 0 {
                    theme.centipede_head
                } else {
                    theme.centipede_body
                };
                self.out.queue(self.cell(segment.line, segment.column))?;
                self.out.queue(Print(glyph))?;
            }
        }

        // Starship.
        let ship = state.starship.position;
        self.out.queue(self.cell(ship.line, ship.column))?;
        self.out.queue(style::SetForegroundColor(theme.starship_color))?;
        self.out.queue(Print(theme.starship))?;

        // Controls hint under the box.
        self.out.queue(cursor::MoveTo(1, FIELD_TOP + height + 1))?;
        self.out.queue(style::SetForegroundColor(theme.hint_color))?;
        self.out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   ESC : Pause"))?;

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn draw_menu(
        &mut self,
        title: &str,
        colour: Color,
        body: &[String],
        options: &[String],
        selected: Option<usize>,
        theme: &Theme,
    ) -> std::io::Result<()> {
        let (width, height) = terminal::size()?;
        let cx = width / 2;
        let total = 2 + body.len() + options.len();
        let mut row = (height / 2).saturating_sub(total as u16 / 2);

        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.out.queue(cursor::MoveTo(
            cx.saturating_sub(title.chars().count() as u16 / 2),
            row,
        ))?;
        self.out.queue(style::SetForegroundColor(colour))?;
        self.out.queue(Print(title))?;
        row += 2;

        self.out.queue(style::SetForegroundColor(theme.hud_color))?;
        for line in body {
            self.out.queue(cursor::MoveTo(
                cx.saturating_sub(line.chars().count() as u16 / 2),
                row,
            ))?;
            self.out.queue(Print(line))?;
            row += 1;
        }
        row += 1;

        for (i, option) in options.iter().enumerate() {
            let marked = selected == Some(i);
            let text = if marked {
                format!("▶ {option} ◀")
            } else {
                option.clone()
            };
            let colour = if marked { Color::White } else { theme.hint_color };
            self.out.queue(cursor::MoveTo(
                cx.saturating_sub(text.chars().count() as u16 / 2),
                row,
            ))?;
            self.out.queue(style::SetForegroundColor(colour))?;
            self.out.queue(Print(text))?;
            row += 1;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalUi<W> {
    fn render_frame(&mut self, state: &GameState, theme: &Theme) {
        if let Err(e) = self.draw_frame(state, theme) {
            log::error!("frame render failed: {e}");
        }
    }

    fn render_menu(
        &mut self,
        title: &str,
        colour: Color,
        body: &[String],
        options: &[String],
        selected: Option<usize>,
        theme: &Theme,
    ) {
        if let Err(e) = self.draw_menu(title, colour, body, options, selected, theme) {
            log::error!("menu render failed: {e}");
        }
    }
}
