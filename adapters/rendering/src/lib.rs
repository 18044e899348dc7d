#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake Pilot adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use serde::Deserialize;
use snake_pilot_core::{CellCoord, Direction, TerminalReason};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);

    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::from_rgb_u8(red, green, blue)
    }
}

/// Colors used to draw the board, snake, food and overlays.
///
/// Loaded from the `[palette]` table of a configuration file; every entry is
/// an `[r, g, b]` byte triple and missing entries keep their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Board background.
    pub background: Color,
    /// Body segments behind the head.
    pub snake: Color,
    /// Head segment.
    pub head: Color,
    /// Food cell.
    pub food: Color,
    /// Planned route overlay.
    pub path: Color,
    /// Score and prompt text.
    pub text: Color,
    /// Game over banner text.
    pub game_over: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            snake: Color::from_rgb_u8(66, 245, 84),
            head: Color::from_rgb_u8(26, 92, 44),
            food: Color::BLACK,
            path: Color::from_rgb_u8(128, 0, 0),
            text: Color::from_rgb_u8(0, 0, 128),
            game_over: Color::from_rgb_u8(128, 0, 0),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Directional keys pressed during the frame, oldest first.
    pub directions: Vec<Direction>,
    /// Whether the pause key was pressed.
    pub pause_toggled: bool,
    /// Whether the restart key was pressed.
    pub restart: bool,
    /// Whether the new-game prompt was accepted.
    pub confirm_new_game: bool,
    /// Whether the new-game prompt was declined.
    pub decline_new_game: bool,
    /// Whether the player asked to close the window.
    pub quit: bool,
}

/// Receives cell-sized draw requests while a scene is painted.
pub trait RenderSink {
    /// Fills `cell` with `color`.
    fn draw(&mut self, cell: CellCoord, color: Color);
}

/// Describes the square-celled board rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns on the board.
    pub columns: u32,
    /// Number of rows on the board.
    pub rows: u32,
    /// Side length of a single cell in world units.
    pub cell_length: f32,
}

impl GridPresentation {
    /// Side length of a cell in the classic 1200 unit board.
    pub const DEFAULT_CELL_LENGTH: f32 = 60.0;

    /// Creates a new grid descriptor.
    ///
    /// Returns an error when either dimension is zero or the cell length is
    /// not a positive finite number.
    pub fn new(columns: u32, rows: u32, cell_length: f32) -> Result<Self, RenderingError> {
        if columns == 0 || rows == 0 {
            return Err(RenderingError::EmptyGrid { columns, rows });
        }
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
        })
    }

    /// Calculates the total width of the board.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the board.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Top-left corner of `cell` in world units.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.cell_length
    }

    /// Centre of `cell` in world units.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.cell_length * 0.5)
    }
}

/// Message drawn across the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    /// Asks whether another game should start.
    NewGamePrompt,
    /// Announces why the game ended.
    GameOver(TerminalReason),
    /// Signals that the simulation is paused.
    Paused,
}

impl Banner {
    /// Text shown for the banner.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::NewGamePrompt => "Start a New Game? [Y/N]".to_owned(),
            Self::GameOver(reason) => format!("Game Over: {}", reason.message()),
            Self::Paused => "Paused".to_owned(),
        }
    }
}

/// Scene description combining the board, its inhabitants and overlays.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board the scene is drawn on.
    pub grid: GridPresentation,
    /// Colors used for every element.
    pub palette: Palette,
    /// Snake body, head first.
    pub snake: Vec<CellCoord>,
    /// Food cell, if any.
    pub food: Option<CellCoord>,
    /// Planned route drawn as an overlay, source first.
    pub path: Vec<CellCoord>,
    /// Score shown at the top of the board.
    pub score: u64,
    /// Message drawn across the board, if any.
    pub banner: Option<Banner>,
}

impl Scene {
    /// Creates an empty scene on the provided board.
    #[must_use]
    pub fn new(grid: GridPresentation, palette: Palette) -> Self {
        Self {
            grid,
            palette,
            snake: Vec::new(),
            food: None,
            path: Vec::new(),
            score: 0,
            banner: None,
        }
    }

    /// Paints food and snake cells into `sink`, head last so it stays on top.
    pub fn paint<S>(&self, sink: &mut S)
    where
        S: RenderSink + ?Sized,
    {
        if let Some(food) = self.food {
            sink.draw(food, self.palette.food);
        }

        for (index, &cell) in self.snake.iter().enumerate().rev() {
            let color = if index == 0 {
                self.palette.head
            } else {
                self.palette.snake
            };
            sink.draw(cell, color);
        }
    }

    /// Route overlay as a polyline through cell centres.
    #[must_use]
    pub fn path_points(&self) -> Vec<Vec2> {
        self.path
            .iter()
            .map(|&cell| self.grid.cell_center(cell))
            .collect()
    }

    /// Score line shown above the board.
    #[must_use]
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

/// Tells the backend whether to keep presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep running.
    Continue,
    /// Close the window and return from [`RenderingBackend::run`].
    Exit,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Snake Pilot scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, mutates the scene before it is drawn,
    /// and decides whether the backend keeps running.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Boards need at least one cell along each axis.
    #[error("grid dimensions must be positive (received {columns}x{rows})")]
    EmptyGrid {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// Cells must have a positive, finite size.
    #[error("cell_length must be positive (received {cell_length})")]
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        draws: Vec<(CellCoord, Color)>,
    }

    impl RenderSink for RecordingSink {
        fn draw(&mut self, cell: CellCoord, color: Color) {
            self.draws.push((cell, color));
        }
    }

    fn grid() -> GridPresentation {
        GridPresentation::new(20, 20, GridPresentation::DEFAULT_CELL_LENGTH).expect("valid grid")
    }

    #[test]
    fn grid_creation_rejects_degenerate_descriptors() {
        assert_eq!(
            GridPresentation::new(0, 4, 10.0),
            Err(RenderingError::EmptyGrid {
                columns: 0,
                rows: 4
            })
        );
        assert!(matches!(
            GridPresentation::new(4, 4, 0.0),
            Err(RenderingError::InvalidCellLength { .. })
        ));
        assert!(GridPresentation::new(4, 4, f32::NAN).is_err());
    }

    #[test]
    fn classic_board_is_twelve_hundred_units_wide() {
        let grid = grid();

        assert_eq!(grid.width(), 1200.0);
        assert_eq!(grid.height(), 1200.0);
        assert_eq!(
            grid.cell_center(CellCoord::new(1, 2)),
            Vec2::new(90.0, 150.0)
        );
    }

    #[test]
    fn paint_draws_food_then_body_with_head_last() {
        let palette = Palette::default();
        let mut scene = Scene::new(grid(), palette);
        scene.snake = vec![
            CellCoord::new(3, 3),
            CellCoord::new(3, 2),
            CellCoord::new(3, 1),
        ];
        scene.food = Some(CellCoord::new(7, 7));
        let mut sink = RecordingSink::default();

        scene.paint(&mut sink);

        assert_eq!(
            sink.draws,
            vec![
                (CellCoord::new(7, 7), palette.food),
                (CellCoord::new(3, 1), palette.snake),
                (CellCoord::new(3, 2), palette.snake),
                (CellCoord::new(3, 3), palette.head),
            ]
        );
    }

    #[test]
    fn path_points_pass_through_cell_centres() {
        let mut scene = Scene::new(grid(), Palette::default());
        scene.path = vec![CellCoord::new(0, 0), CellCoord::new(1, 0)];

        assert_eq!(
            scene.path_points(),
            vec![Vec2::new(30.0, 30.0), Vec2::new(90.0, 30.0)]
        );
    }

    #[test]
    fn banners_carry_player_facing_text() {
        assert_eq!(
            Banner::GameOver(TerminalReason::OutOfBounds).text(),
            "Game Over: Snake hit a wall!"
        );
        assert_eq!(
            Banner::GameOver(TerminalReason::SelfCollided).text(),
            "Game Over: Snake ate itself!"
        );
        assert_eq!(Banner::NewGamePrompt.text(), "Start a New Game? [Y/N]");
    }

    #[test]
    fn palette_overrides_merge_with_defaults() {
        let palette: Palette = toml::from_str("food = [255, 0, 0]\nhead = [1, 2, 3]\n")
            .expect("valid palette");

        assert_eq!(palette.food, Color::from_rgb_u8(255, 0, 0));
        assert_eq!(palette.head, Color::from_rgb_u8(1, 2, 3));
        assert_eq!(palette.snake, Palette::default().snake);
        assert!(toml::from_str::<Palette>("border = [0, 0, 0]").is_err());
    }
}
