use crate::buffer::{Buffer, Cell};
use crate::error::Result;
use crate::layout::Rect;
use crate::scene::{Node, NodeId, Scene};
use crate::text::{centered_start, char_width, display_width, truncate_to_width};
use crate::types::{Color, Vec2};

/// Maps scene pixels onto terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Scene pixels per cell column.
    pub cell_width: f32,
    /// Scene pixels per cell row.
    pub cell_height: f32,
    /// Scene point shown at the middle of the buffer.
    pub center: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            cell_width: 10.0,
            cell_height: 20.0,
            center: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    fn column(&self, x: f32, buf: &Buffer) -> f32 {
        (x - self.center.x) / self.cell_width + buf.width() as f32 / 2.0
    }

    fn row(&self, y: f32, buf: &Buffer) -> f32 {
        (y - self.center.y) / self.cell_height + buf.height() as f32 / 2.0
    }

    /// Cell containing a scene point.
    pub fn project(&self, point: Vec2, buf: &Buffer) -> (i32, i32) {
        (
            self.column(point.x, buf).round() as i32,
            self.row(point.y, buf).round() as i32,
        )
    }

    /// Cells covered by a box centered on `center`.
    pub fn rect(&self, center: Vec2, size: Vec2, buf: &Buffer) -> Rect {
        let left = self.column(center.x - size.x / 2.0, buf).round() as i32;
        let right = self.column(center.x + size.x / 2.0, buf).round() as i32;
        let top = self.row(center.y - size.y / 2.0, buf).round() as i32;
        let bottom = self.row(center.y + size.y / 2.0, buf).round() as i32;
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// Paint the scene into `buf`, back to front.
pub fn render_scene(scene: &Scene, buf: &mut Buffer, viewport: &Viewport) -> Result<()> {
    buf.clear(scene.theme().background.to_rgb());
    for id in scene.walk(scene.root())? {
        render_node(scene, id, buf, viewport)?;
    }
    Ok(())
}

fn render_node(scene: &Scene, id: NodeId, buf: &mut Buffer, viewport: &Viewport) -> Result<()> {
    let node = scene.node(id)?;
    let opacity = scene.effective_opacity(id)?;
    if opacity <= 0.0 {
        return Ok(());
    }
    let center = scene.absolute_position(id)?;

    if let Some(text) = &node.text {
        let color = node.fill.unwrap_or(Color::WHITE);
        render_text(&text.text, color, opacity, center, buf, viewport);
        return Ok(());
    }
    if node.size.x <= 0.0 || node.size.y <= 0.0 {
        return Ok(());
    }

    let rect = viewport.rect(center, node.size, buf);
    if let Some(fill) = node.fill {
        fill_rect(buf, rect, fill, opacity);
    }
    render_border(node, rect, opacity, buf);
    Ok(())
}

fn fill_rect(buf: &mut Buffer, rect: Rect, color: Color, opacity: f32) {
    let rgb = color.to_rgb();
    let alpha = color.a * opacity;
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = cell.bg.blend(rgb, alpha);
            }
        }
    }
}

fn render_border(node: &Node, rect: Rect, opacity: f32, buf: &mut Buffer) {
    let Some(stroke) = node.stroke else {
        return;
    };
    if node.line_width <= 0.0 || rect.width < 2 || rect.height < 2 {
        return;
    }

    let (tl, tr, bl, br) = if node.radius > 0.0 {
        ('╭', '╮', '╰', '╯')
    } else {
        ('┌', '┐', '└', '┘')
    };
    let alpha = stroke.a * opacity;
    let rgb = stroke.to_rgb();
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if !rect.on_edge(x, y) {
                continue;
            }
            let ch = match (x, y) {
                (x, y) if x == rect.x && y == rect.y => tl,
                (x, y) if x == right && y == rect.y => tr,
                (x, y) if x == rect.x && y == bottom => bl,
                (x, y) if x == right && y == bottom => br,
                (_, y) if y == rect.y || y == bottom => '─',
                _ => '│',
            };
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = ch;
                cell.fg = cell.bg.blend(rgb, alpha);
                cell.wide_continuation = false;
            }
        }
    }
}

fn render_text(
    text: &str,
    color: Color,
    opacity: f32,
    center: Vec2,
    buf: &mut Buffer,
    viewport: &Viewport,
) {
    let text = truncate_to_width(text, buf.width() as usize);
    let (cx, y) = viewport.project(center, buf);
    let mut x = centered_start(cx, display_width(&text));
    let alpha = color.a * opacity;
    let rgb = color.to_rgb();

    for ch in text.chars() {
        let width = char_width(ch) as i32;
        if width == 0 {
            continue;
        }
        if let Some(cell) = buf.get_mut(x, y) {
            let fg = cell.bg.blend(rgb, alpha);
            *cell = Cell::new(ch).with_fg(fg).with_bg(cell.bg).bold();
        }
        if width == 2 {
            if let Some(cell) = buf.get_mut(x + 1, y) {
                cell.wide_continuation = true;
            }
        }
        x += width;
    }
}
