/// A rectangle of terminal cells. Coordinates may be negative or extend
/// past the buffer; drawing clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True for cells on the outermost ring.
    pub const fn on_edge(&self, x: i32, y: i32) -> bool {
        self.contains(x, y)
            && (x == self.x || x == self.right() - 1 || y == self.y || y == self.bottom() - 1)
    }
}
