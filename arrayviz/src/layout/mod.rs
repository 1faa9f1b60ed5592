mod container;
mod flex;
mod rect;

pub use container::{caption_y, grid_position, grid_row_y, grid_size, linear_size, linear_x};
pub use flex::{layout, layout_subtree, measure_text, FlexLayout};
pub use rect::Rect;
