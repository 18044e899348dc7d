//! Text overlays drawn on top of the board.
//!
//! All uses of `macroquad::text` live here so the rest of the adapter only
//! deals with shapes and scene metrics.

use macroquad::{
    color::Color,
    shapes::draw_rectangle,
    text::{draw_text, measure_text},
};

use crate::SceneMetrics;

/// Fraction of a cell used as the font size for every overlay.
const FONT_SCALE: f32 = 0.8;

/// Draws the score centred inside the header band above the board.
pub(crate) fn draw_score(text: &str, metrics: &SceneMetrics, color: Color) {
    let font_size = font_size(metrics);
    let dimensions = measure_text(text, None, font_size, 1.0);
    let x = centred_start(metrics.offset_x, metrics.board_width, dimensions.width);
    let baseline = metrics.offset_y + (metrics.header_height + dimensions.height) * 0.5;
    draw_text(text, x, baseline, f32::from(font_size), color);
}

/// Draws `text` across the middle of the board over a translucent backdrop.
pub(crate) fn draw_banner(text: &str, metrics: &SceneMetrics, color: Color, backdrop: Color) {
    let font_size = font_size(metrics);
    let dimensions = measure_text(text, None, font_size, 1.0);
    let band_height = metrics.cell_step * 2.0;
    let band_top = metrics.grid_offset_y + (metrics.board_height - band_height) * 0.5;
    draw_rectangle(
        metrics.offset_x,
        band_top,
        metrics.board_width,
        band_height,
        backdrop,
    );

    let x = centred_start(metrics.offset_x, metrics.board_width, dimensions.width);
    let baseline = band_top + (band_height + dimensions.height) * 0.5;
    draw_text(text, x, baseline, f32::from(font_size), color);
}

fn font_size(metrics: &SceneMetrics) -> u16 {
    let size = (metrics.cell_step * FONT_SCALE).round().clamp(8.0, 200.0);
    size as u16
}

/// Left edge that centres a span of `content` width inside `[start, start + available]`.
pub(crate) fn centred_start(start: f32, available: f32, content: f32) -> f32 {
    start + ((available - content) * 0.5).max(0.0)
}
