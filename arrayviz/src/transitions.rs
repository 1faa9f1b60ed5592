use crate::types::{Color, ColorSpace, Vec2};

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Cubic ease-in-out; the curve every highlight and swap uses.
    EaseInOutCubic,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Linear remap of progress `t` onto `from..to`, unclamped.
pub fn map(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Values that can be interpolated by a transition.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: f32, t: f32) -> f32 {
        if t >= 1.0 {
            return to;
        }
        map(self, to, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        Vec2::new(Lerp::lerp(self.x, to.x, t), Lerp::lerp(self.y, to.y, t))
    }
}

impl Lerp for Color {
    fn lerp(self, to: Color, t: f32) -> Color {
        self.lerp_in(to, t, ColorSpace::default())
    }
}
