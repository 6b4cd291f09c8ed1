use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use image::{DynamicImage, Rgb, RgbImage};
use log::{debug, info};
use picpuzzle_core::{GameConfig, Picture, PuzzleSession, ScreenState};
use std::time::Duration;

/// Redraw and timer resolution
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state
pub struct App {
    /// Current puzzle
    pub session: PuzzleSession,
    /// Slot under the cursor
    pub cursor: usize,
    /// Slot picked as the first half of a swap
    pub picked: Option<usize>,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Ticks left before the preview ends
    preview_ticks: u32,
    /// Ticks left before the completion banner shows
    completion_ticks: u32,
    /// Average color of each picture piece, indexed by tile id
    tile_colors: Vec<[u8; 3]>,
    /// Picture reused for every new puzzle
    picture: Option<Picture>,
}

impl App {
    pub fn new(config: GameConfig, seed: u64, picture: Option<Picture>) -> Self {
        let mut app = Self {
            session: PuzzleSession::with_seed(config, seed),
            cursor: 0,
            picked: None,
            theme: Theme::dark(),
            message: None,
            message_timer: 0,
            preview_ticks: 0,
            completion_ticks: 0,
            tile_colors: Vec::new(),
            picture,
        };
        app.load_picture();
        app
    }

    fn load_picture(&mut self) {
        self.session.image_loaded(self.picture.as_ref());
        self.tile_colors = (0..self.session.engine().total_tiles())
            .filter_map(|id| self.session.piece_for(id))
            .map(|piece| piece.average_color())
            .collect();
        self.preview_ticks = ticks_for(self.session.config().preview_duration);
        self.completion_ticks = 0;
        self.cursor = 0;
        self.picked = None;
    }

    /// Average color of the piece shown by a tile
    pub fn tile_color(&self, tile_id: usize) -> Option<[u8; 3]> {
        self.tile_colors.get(tile_id).copied()
    }

    /// Whether the completion banner should be shown
    pub fn completion_visible(&self) -> bool {
        *self.session.state() == ScreenState::Completed && self.completion_ticks == 0
    }

    /// Update timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if *self.session.state() == ScreenState::Preview {
            self.preview_ticks = self.preview_ticks.saturating_sub(1);
            if self.preview_ticks == 0 {
                self.session.start();
            }
        } else if *self.session.state() == ScreenState::Completed {
            self.completion_ticks = self.completion_ticks.saturating_sub(1);
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms ticks
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => {
                self.new_puzzle();
                return AppAction::Continue;
            }
            _ => {}
        }

        let state = self.session.state().clone();
        match state {
            // Any key skips the preview
            ScreenState::Preview => {
                self.session.start();
            }
            ScreenState::Ready => self.handle_game_key(key),
            ScreenState::Completed => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.new_puzzle();
                }
            }
            ScreenState::Loading | ScreenState::Error(_) => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        let size = self.session.engine().grid_size();
        let (row, col) = size.row_col(self.cursor);
        let last = size.get() - 1;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') if row > 0 => {
                self.cursor = size.index(row - 1, col);
            }
            KeyCode::Down | KeyCode::Char('j') if row < last => {
                self.cursor = size.index(row + 1, col);
            }
            KeyCode::Left | KeyCode::Char('h') if col > 0 => {
                self.cursor = size.index(row, col - 1);
            }
            KeyCode::Right | KeyCode::Char('l') if col < last => {
                self.cursor = size.index(row, col + 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.select(),
            KeyCode::Esc => self.picked = None,
            _ => {}
        }
    }

    /// Pick the tile under the cursor, or swap it with the picked one
    fn select(&mut self) {
        match self.picked.take() {
            None => {
                let locked = self
                    .session
                    .engine()
                    .tile(self.cursor)
                    .is_some_and(|tile| tile.is_locked());
                if locked {
                    self.show_message("That tile is locked in place");
                } else {
                    self.picked = Some(self.cursor);
                }
            }
            // Dropping a tile on itself just cancels the pick
            Some(from) if from == self.cursor => {}
            Some(from) => {
                if !self.session.swap(from, self.cursor) {
                    self.show_message("Those tiles cannot be swapped");
                    return;
                }
                debug!("swapped slots {} and {}", from, self.cursor);
                if self.session.is_completed() {
                    info!("puzzle solved in {} moves", self.session.moves());
                    self.completion_ticks = ticks_for(self.session.config().completion_delay);
                }
            }
        }
    }

    fn new_puzzle(&mut self) {
        self.session.reset();
        self.load_picture();
        let msg = format!("New {} puzzle", self.session.config().grid_size);
        self.show_message(&msg);
    }
}

fn ticks_for(duration: Duration) -> u32 {
    (duration.as_millis() / TICK_RATE.as_millis()) as u32
}

/// Built-in picture used when no image file is given: a hue sweep with a
/// vertical fade, so neighbouring pieces get distinct colors
pub fn fallback_picture() -> Picture {
    const SIDE: u32 = 240;
    let image = RgbImage::from_fn(SIDE, SIDE, |x, y| {
        let hue = x as f32 / SIDE as f32 * 300.0;
        let value = 1.0 - y as f32 / SIDE as f32 * 0.7;
        Rgb(hsv_to_rgb(hue, 0.8, value))
    });
    Picture::new(DynamicImage::ImageRgb8(image))
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let c = value * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    [r, g, b].map(|channel| ((channel + m) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) -> AppAction {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn playing_app(seed: u64) -> App {
        let mut app = App::new(GameConfig::easy(), seed, Some(fallback_picture()));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.session.state(), &ScreenState::Ready);
        app
    }

    #[test]
    fn test_preview_ends_after_ticks() {
        let mut app = App::new(GameConfig::easy(), 1, Some(fallback_picture()));
        assert_eq!(app.session.state(), &ScreenState::Preview);

        for _ in 0..ticks_for(GameConfig::easy().preview_duration) {
            app.tick();
        }
        assert_eq!(app.session.state(), &ScreenState::Ready);
    }

    #[test]
    fn test_tile_colors_follow_pieces() {
        let app = App::new(GameConfig::medium(), 1, Some(fallback_picture()));
        assert!(app.tile_color(0).is_some());
        assert!(app.tile_color(15).is_some());
        assert!(app.tile_color(16).is_none());
        assert_ne!(app.tile_color(0), app.tile_color(3));
    }

    #[test]
    fn test_cursor_navigation() {
        let mut app = playing_app(2);
        assert_eq!(app.cursor, 0);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 4);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, 3);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_cursor_boundary() {
        let mut app = playing_app(2);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, 0);

        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.cursor, 8);
    }

    #[test]
    fn test_pick_and_swap_counts_move() {
        let mut app = playing_app(4);
        let (from, to) = {
            let engine = app.session.engine();
            (0..9)
                .flat_map(|i| (0..9).map(move |j| (i, j)))
                .find(|&(i, j)| engine.can_swap(i, j))
                .unwrap()
        };
        let (from_id, to_id) = (
            app.session.engine().tile(from).unwrap().id(),
            app.session.engine().tile(to).unwrap().id(),
        );

        app.cursor = from;
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.picked, Some(from));

        app.cursor = to;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.picked, None);
        assert_eq!(app.session.moves(), 1);
        assert_eq!(app.session.engine().tile(from).unwrap().id(), to_id);
        assert_eq!(app.session.engine().tile(to).unwrap().id(), from_id);
    }

    #[test]
    fn test_escape_and_same_slot_cancel_pick() {
        let mut app = playing_app(4);
        app.cursor = (0..9)
            .find(|&slot| !app.session.engine().tile(slot).unwrap().is_locked())
            .unwrap();

        press(&mut app, KeyCode::Char(' '));
        assert!(app.picked.is_some());
        press(&mut app, KeyCode::Esc);
        assert!(app.picked.is_none());

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.picked.is_none());
        assert_eq!(app.session.moves(), 0);
    }

    #[test]
    fn test_locked_tile_cannot_be_picked() {
        let mut app = playing_app(8);
        // Bring tile 0 home so slot 0 locks
        if !app.session.engine().tile(0).unwrap().is_locked() {
            let from = app
                .session
                .engine()
                .tiles()
                .iter()
                .position(|tile| tile.id() == 0)
                .unwrap();
            app.cursor = from;
            press(&mut app, KeyCode::Char(' '));
            app.cursor = 0;
            press(&mut app, KeyCode::Char(' '));
        }
        assert!(app.session.engine().tile(0).unwrap().is_locked());

        app.cursor = 0;
        press(&mut app, KeyCode::Char(' '));
        assert!(app.picked.is_none());
        assert!(app.message.is_some());
    }

    #[test]
    fn test_solving_shows_completion_after_delay() {
        let mut app = playing_app(12);
        for slot in 0..9 {
            let engine = app.session.engine();
            if engine.tile(slot).unwrap().is_locked() {
                continue;
            }
            let from = engine
                .tiles()
                .iter()
                .position(|tile| tile.id() == slot)
                .unwrap();
            app.cursor = from;
            press(&mut app, KeyCode::Char(' '));
            app.cursor = slot;
            press(&mut app, KeyCode::Char(' '));
        }
        assert_eq!(app.session.state(), &ScreenState::Completed);
        assert!(!app.completion_visible());

        for _ in 0..ticks_for(GameConfig::easy().completion_delay) {
            app.tick();
        }
        assert!(app.completion_visible());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.state(), &ScreenState::Preview);
        assert_eq!(app.session.moves(), 0);
    }

    #[test]
    fn test_missing_picture_shows_error() {
        let mut app = App::new(GameConfig::easy(), 3, None);
        assert!(matches!(app.session.state(), ScreenState::Error(_)));
        press(&mut app, KeyCode::Char(' '));
        assert!(matches!(app.session.state(), ScreenState::Error(_)));
        press(&mut app, KeyCode::Char('n'));
        assert!(matches!(app.session.state(), ScreenState::Error(_)));
    }

    #[test]
    fn test_quit_key() {
        let mut app = playing_app(1);
        assert!(matches!(press(&mut app, KeyCode::Char('q')), AppAction::Quit));
        assert!(matches!(press(&mut app, KeyCode::Char('x')), AppAction::Continue));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
    }
}
