#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake Pilot.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

mod hud;

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    input::{is_key_pressed, KeyCode},
    shapes::{draw_line, draw_rectangle},
};
use snake_pilot_core::{CellCoord, Direction};
use snake_pilot_rendering::{
    Banner, Color, FrameControl, FrameInput, Presentation, RenderSink, RenderingBackend, Scene,
};
use std::time::Duration;
use tracing::info;

/// Keys that steer the snake, paired with the direction they request.
const DIRECTION_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::W, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::S, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::A, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::D, Direction::Right),
];

/// Every key the adapter reacts to.
const OBSERVED_KEYS: [KeyCode; 13] = [
    KeyCode::Up,
    KeyCode::W,
    KeyCode::Down,
    KeyCode::S,
    KeyCode::Left,
    KeyCode::A,
    KeyCode::Right,
    KeyCode::D,
    KeyCode::Space,
    KeyCode::R,
    KeyCode::Y,
    KeyCode::N,
    KeyCode::Escape,
];

/// Translates the keys pressed during a frame into a [`FrameInput`].
///
/// Directions keep the order of `pressed`; unrelated keys are ignored.
#[doc(hidden)]
#[must_use]
pub fn frame_input_from_keys(pressed: &[KeyCode]) -> FrameInput {
    let mut input = FrameInput::default();
    for &key in pressed {
        if let Some(direction) = direction_for_key(key) {
            input.directions.push(direction);
            continue;
        }

        match key {
            KeyCode::Space => input.pause_toggled = true,
            KeyCode::R => input.restart = true,
            KeyCode::Y => input.confirm_new_game = true,
            KeyCode::N => input.decline_new_game = true,
            KeyCode::Escape => input.quit = true,
            _ => {}
        }
    }
    input
}

fn direction_for_key(key: KeyCode) -> Option<Direction> {
    DIRECTION_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|&(_, direction)| direction)
}

fn poll_keyboard() -> FrameInput {
    let pressed: Vec<KeyCode> = OBSERVED_KEYS
        .into_iter()
        .filter(|&key| is_key_pressed(key))
        .collect();
    frame_input_from_keys(&pressed)
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 800,
            window_height: 840,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_input = poll_keyboard();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                if update_scene(frame_dt, frame_input, &mut scene) == FrameControl::Exit {
                    break;
                }

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_scene(&scene, &metrics);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!("frame rate: {per_second:.2} fps");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene, metrics: &SceneMetrics) {
    let palette = scene.palette;
    draw_rectangle(
        metrics.offset_x,
        metrics.grid_offset_y,
        metrics.board_width,
        metrics.board_height,
        to_macroquad_color(palette.background),
    );

    let mut sink = MacroquadSink { metrics };
    scene.paint(&mut sink);
    draw_path(&scene.path_points(), metrics, palette.path);

    hud::draw_score(&scene.score_text(), metrics, to_macroquad_color(palette.text));
    if let Some(banner) = scene.banner {
        let color = match banner {
            Banner::GameOver(_) => palette.game_over,
            _ => palette.text,
        };
        hud::draw_banner(
            &banner.text(),
            metrics,
            to_macroquad_color(color),
            to_macroquad_color(palette.background.with_alpha(0.85)),
        );
    }
}

fn draw_path(points: &[Vec2], metrics: &SceneMetrics, color: Color) {
    let color = to_macroquad_color(color);
    let thickness = (metrics.cell_step * 0.1).max(1.0);
    for segment in points.windows(2) {
        let start = metrics.world_to_screen(segment[0]);
        let end = metrics.world_to_screen(segment[1]);
        draw_line(start.x, start.y, end.x, end.y, thickness, color);
    }
}

/// Render sink that fills whole cells with solid rectangles.
struct MacroquadSink<'a> {
    metrics: &'a SceneMetrics,
}

impl RenderSink for MacroquadSink<'_> {
    fn draw(&mut self, cell: CellCoord, color: Color) {
        let origin = self.metrics.cell_origin(cell);
        draw_rectangle(
            origin.x,
            origin.y,
            self.metrics.cell_step,
            self.metrics.cell_step,
            to_macroquad_color(color),
        );
    }
}

/// Screen-space layout of the board: a header band for the score above the grid.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    header_height: f32,
    grid_offset_y: f32,
    board_width: f32,
    board_height: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let grid = scene.grid;
        let header = grid.cell_length;
        let world_width = grid.width();
        let world_height = grid.height() + header;
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        let offset_x = ((screen_width - world_width * scale) * 0.5).max(0.0);
        let offset_y = ((screen_height - world_height * scale) * 0.5).max(0.0);
        let header_height = header * scale;

        Self {
            scale,
            offset_x,
            offset_y,
            header_height,
            grid_offset_y: offset_y + header_height,
            board_width: grid.width() * scale,
            board_height: grid.height() * scale,
            cell_step: grid.cell_length * scale,
        }
    }

    fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            self.offset_x + cell.column() as f32 * self.cell_step,
            self.grid_offset_y + cell.row() as f32 * self.cell_step,
        )
    }

    fn world_to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.grid_offset_y + position.y * self.scale,
        )
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
