//! Resting positions and sizes of container entries.
//!
//! Everything here is a pure function of the entry count (or matrix shape),
//! so the layout after any push or pop equals the layout built from scratch.

use crate::config::Metrics;
use crate::types::{CaptionAlign, Vec2};

/// Center x of slot `index` in a row of `count` entries.
pub fn linear_x(count: usize, index: usize, pitch: f32) -> f32 {
    -(count as f32 * pitch) / 2.0 + index as f32 * pitch + pitch / 2.0
}

/// Body size of a linear container holding `count` entries.
pub fn linear_size(count: usize, metrics: &Metrics) -> Vec2 {
    Vec2::new(
        count as f32 * metrics.pitch + metrics.container_padding,
        metrics.container_height,
    )
}

/// Center y of row `row` in a matrix of `rows` rows.
pub fn grid_row_y(rows: usize, row: usize, pitch: f32) -> f32 {
    linear_x(rows, row, pitch)
}

/// Center of cell `(row, col)` relative to the matrix body.
pub fn grid_position(rows: usize, cols: usize, row: usize, col: usize, pitch: f32) -> Vec2 {
    Vec2::new(linear_x(cols, col, pitch), grid_row_y(rows, row, pitch))
}

/// Body size of a `rows` x `cols` matrix.
pub fn grid_size(rows: usize, cols: usize, metrics: &Metrics) -> Vec2 {
    Vec2::new(
        cols as f32 * metrics.pitch + metrics.container_padding,
        rows as f32 * metrics.pitch + metrics.container_padding,
    )
}

/// Center y of a caption for a body of the given height.
pub fn caption_y(align: CaptionAlign, body_height: f32, metrics: &Metrics) -> f32 {
    let offset = body_height / 2.0 + metrics.caption_offset;
    match align {
        CaptionAlign::Top => -offset,
        CaptionAlign::Bottom => offset,
    }
}
