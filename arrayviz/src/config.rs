//! Stage configuration: geometry, default durations and playback.

use std::time::Duration;

use crate::types::ColorSpace;

/// Geometry shared by every container and entry, in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Distance between the centers of neighbouring entries.
    pub pitch: f32,

    /// Side of an entry's inner box.
    pub box_size: f32,
    pub box_radius: f32,
    pub box_padding: f32,
    /// Space between an entry's value and its label.
    pub box_gap: f32,
    pub line_width: f32,

    /// Extra width (and matrix height) around the row of entries.
    pub container_padding: f32,
    /// Height of a linear container's body.
    pub container_height: f32,
    pub container_radius: f32,

    /// Space between a container's name and its suffix.
    pub caption_gap: f32,
    /// Distance between the body edge and the caption's center line.
    pub caption_offset: f32,

    /// How far above the row a pushed entry starts.
    pub push_rise: f32,
    /// How far below the row a popped entry falls.
    pub pop_drop: f32,

    /// Label font size relative to the theme font.
    pub label_scale: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            pitch: 80.0,
            box_size: 60.0,
            box_radius: 10.0,
            box_padding: 15.0,
            box_gap: 40.0,
            line_width: 8.0,
            container_padding: 20.0,
            container_height: 100.0,
            container_radius: 20.0,
            caption_gap: 10.0,
            caption_offset: 30.0,
            push_rise: 50.0,
            pop_drop: 50.0,
            label_scale: 0.7,
        }
    }
}

/// Default durations for container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub highlight: Duration,
    pub swap: Duration,
    /// Swap step of a swap-and-highlight choreography.
    pub highlighted_swap: Duration,
    pub push: Duration,
    pub pop: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            highlight: Duration::from_millis(200),
            swap: Duration::from_millis(200),
            highlighted_swap: Duration::from_millis(500),
            push: Duration::from_millis(300),
            pop: Duration::from_millis(300),
        }
    }
}

/// Configuration of a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageConfig {
    pub metrics: Metrics,
    pub timing: Timing,
    /// Space used for every color transition.
    pub color_space: ColorSpace,
}

impl StageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the geometry.
    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the default durations.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the color interpolation space.
    pub fn color_space(mut self, space: ColorSpace) -> Self {
        self.color_space = space;
        self
    }
}

/// Playback settings for a [`Player`](crate::animation::Player).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Frames per second; each frame advances the clock by `1 / fps`.
    pub fps: u32,

    /// Complete every task in a single frame (accessibility).
    pub reduced_motion: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            reduced_motion: false,
        }
    }
}

impl PlayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame rate. Zero is treated as one frame per second.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable or disable reduced motion.
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}
