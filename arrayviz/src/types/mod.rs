mod color;
mod enums;
mod theme;
mod value;
mod vec2;

pub use color::{Color, ColorSpace, Rgb};
pub use enums::{Align, CaptionAlign, Direction, HighlightSubject, Justify};
pub use theme::{Font, Theme};
pub use value::Value;
pub use vec2::Vec2;
