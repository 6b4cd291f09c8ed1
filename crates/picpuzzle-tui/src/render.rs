use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use picpuzzle_core::{GridSize, ScreenState};
use std::io;

/// Each tile is a 6x2 interior inside a shared `+------+` frame
const TILE_WIDTH: u16 = 7;
const TILE_HEIGHT: u16 = 3;
const INFO_WIDTH: u16 = 40;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;
    let theme = &app.theme;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(theme.bg),
        Clear(ClearType::All)
    )?;

    let (grid_width, grid_height) = grid_extent(app.session.engine().grid_size());

    // Center the grid horizontally, leave room for info panel
    let total_width = grid_width + 3 + INFO_WIDTH;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 6 { 2 } else { 1 };

    match app.session.state() {
        ScreenState::Loading | ScreenState::Error(_) => {}
        _ => render_grid(stdout, app, start_x, start_y)?,
    }

    render_info_panel(stdout, app, start_x + grid_width + 3, start_y)?;
    render_controls(stdout, app, start_x, start_y + grid_height + 1)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width, start_y + grid_height + 3)?;
    }

    Ok(())
}

/// Width and height of the framed grid in terminal cells
fn grid_extent(grid_size: GridSize) -> (u16, u16) {
    // GridSize::MAX keeps this well inside u16
    let size = grid_size.get() as u16;
    (size * TILE_WIDTH + 1, size * TILE_HEIGHT + 1)
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let engine = app.session.engine();
    let grid_size = engine.grid_size();
    let preview = *app.session.state() == ScreenState::Preview;

    for (slot, tile) in engine.tiles().iter().enumerate() {
        let (row, col) = grid_size.row_col(slot);
        let tile_x = x + col as u16 * TILE_WIDTH;
        let tile_y = y + row as u16 * TILE_HEIGHT;

        // The preview shows the solved picture
        let id = if preview { slot } else { tile.id() };
        let fill = app.tile_color(id);
        let bg = fill
            .map(|[r, g, b]| Color::Rgb { r, g, b })
            .unwrap_or(theme.tile_bg);
        let fg = fill.map(|rgb| theme.label_on(rgb)).unwrap_or(theme.fg);

        execute!(stdout, SetBackgroundColor(bg))?;
        for line in 1..TILE_HEIGHT {
            execute!(stdout, MoveTo(tile_x + 1, tile_y + line), Print("      "))?;
        }
        if !preview {
            let marker = if tile.is_locked() { "*" } else { " " };
            let label = format!("{:>3}{:<3}", id, marker);
            execute!(
                stdout,
                MoveTo(tile_x + 1, tile_y + 1),
                SetForegroundColor(fg),
                Print(label)
            )?;
            if tile.is_locked() {
                execute!(
                    stdout,
                    MoveTo(tile_x + 4, tile_y + 1),
                    SetForegroundColor(theme.locked),
                    Print("*")
                )?;
            }
        }

        execute!(stdout, SetBackgroundColor(theme.bg))?;
        draw_frame(stdout, tile_x, tile_y, theme.border)?;
    }

    if *app.session.state() == ScreenState::Ready {
        if let Some(picked) = app.picked {
            let (row, col) = grid_size.row_col(picked);
            draw_frame(
                stdout,
                x + col as u16 * TILE_WIDTH,
                y + row as u16 * TILE_HEIGHT,
                theme.picked,
            )?;
        }
        let (row, col) = grid_size.row_col(app.cursor);
        draw_frame(
            stdout,
            x + col as u16 * TILE_WIDTH,
            y + row as u16 * TILE_HEIGHT,
            theme.cursor,
        )?;
    }

    Ok(())
}

fn draw_frame(stdout: &mut io::Stdout, x: u16, y: u16, color: Color) -> io::Result<()> {
    execute!(
        stdout,
        SetForegroundColor(color),
        MoveTo(x, y),
        Print("+------+"),
        MoveTo(x, y + TILE_HEIGHT),
        Print("+------+")
    )?;
    for line in 1..TILE_HEIGHT {
        execute!(
            stdout,
            MoveTo(x, y + line),
            Print("|"),
            MoveTo(x + TILE_WIDTH, y + line),
            Print("|")
        )?;
    }
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let engine = session.engine();

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print("TileSwap"),
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Grid: {:>10}", session.config().grid_size.to_string())),
        MoveTo(x, y + 3),
        Print(format!("Moves: {:>9}", session.moves())),
        MoveTo(x, y + 4),
        Print(format!(
            "Locked: {:>8}",
            format!("{}/{}", engine.locked_count(), engine.total_tiles())
        ))
    )?;

    let status_color = match session.state() {
        ScreenState::Error(_) => theme.error,
        ScreenState::Completed => theme.success,
        _ => theme.info,
    };
    execute!(
        stdout,
        MoveTo(x, y + 6),
        SetForegroundColor(status_color),
        Print(session.state().description())
    )?;

    if app.completion_visible() {
        execute!(
            stdout,
            MoveTo(x, y + 8),
            SetForegroundColor(theme.success),
            Print("Congratulations! You've completed the puzzle!"),
            MoveTo(x, y + 9),
            SetForegroundColor(theme.info),
            Print("Press Enter for a new puzzle")
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let bindings: &[(&str, &str)] = match app.session.state() {
        ScreenState::Ready => &[
            ("arrows/hjkl", "move"),
            ("space", "pick/swap"),
            ("esc", "cancel"),
            ("n", "new"),
            ("q", "quit"),
        ],
        ScreenState::Preview => &[("any key", "start"), ("n", "new"), ("q", "quit")],
        _ => &[("n", "new puzzle"), ("q", "quit")],
    };

    execute!(stdout, MoveTo(x, y))?;
    for (key, action) in bindings {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!(" {}  ", action))
        )?;
    }
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    y: u16,
) -> io::Result<()> {
    let x = term_width.saturating_sub(msg.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(app.theme.bg),
        SetForegroundColor(app.theme.key),
        Print(msg)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_extent() {
        assert_eq!(grid_extent(GridSize::new(3).unwrap()), (22, 10));
    }

    #[test]
    fn test_largest_grid_fits_terminal_coordinates() {
        let size = u16::try_from(GridSize::MAX).unwrap();
        let width = size.checked_mul(TILE_WIDTH).and_then(|w| w.checked_add(1));
        let height = size.checked_mul(TILE_HEIGHT).and_then(|h| h.checked_add(1));
        let (width, height) = (width.unwrap(), height.unwrap());
        assert!(width.checked_add(3 + INFO_WIDTH).is_some());
        assert!(height.checked_add(6).is_some());
        assert_eq!(grid_extent(GridSize::new(GridSize::MAX).unwrap()), (width, height));
    }
}
