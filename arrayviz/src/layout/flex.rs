use crate::error::Result;
use crate::scene::{NodeId, Scene, TextContent};
use crate::text::display_width;
use crate::types::{Align, Direction, Justify, Vec2};

/// Advance of one monospace cell, relative to the font size.
const ADVANCE: f32 = 0.6;

/// Flex container settings. Children of a node carrying one are positioned
/// by [`layout`]; everything else is left where animations put it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlexLayout {
    pub direction: Direction,
    pub gap: f32,
    pub padding: f32,
    pub justify: Justify,
    pub align: Align,
    /// Take the node's size from its content instead of keeping it fixed.
    pub fit_content: bool,
}

impl FlexLayout {
    pub fn row() -> Self {
        Self {
            direction: Direction::Row,
            ..Default::default()
        }
    }

    pub fn column() -> Self {
        Self {
            direction: Direction::Column,
            ..Default::default()
        }
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fit_content(mut self) -> Self {
        self.fit_content = true;
        self
    }
}

/// Size of a single line of text.
pub fn measure_text(text: &TextContent) -> Vec2 {
    Vec2::new(
        display_width(&text.text) as f32 * text.font_size * ADVANCE,
        text.line_height,
    )
}

/// Lay out the whole scene.
pub fn layout(scene: &mut Scene) -> Result<()> {
    let root = scene.root();
    layout_subtree(scene, root)?;
    Ok(())
}

/// Lay out the subtree under `id` and return the node's size.
///
/// Children are measured first so fit-content containers can size
/// themselves before placing them.
pub fn layout_subtree(scene: &mut Scene, id: NodeId) -> Result<Vec2> {
    let children = scene.children(id)?.to_vec();
    let mut sizes = Vec::with_capacity(children.len());
    for &child in &children {
        sizes.push(layout_subtree(scene, child)?);
    }

    let node = scene.node_mut(id)?;
    if let Some(text) = &node.text {
        node.size = measure_text(text);
    }
    let Some(flex) = node.layout else {
        return Ok(node.size);
    };

    let is_row = flex.direction == Direction::Row;
    let main = |v: Vec2| if is_row { v.x } else { v.y };
    let cross = |v: Vec2| if is_row { v.y } else { v.x };

    let gaps = flex.gap * sizes.len().saturating_sub(1) as f32;
    let content_main = sizes.iter().map(|&s| main(s)).sum::<f32>() + gaps;
    let content_cross = sizes.iter().map(|&s| cross(s)).fold(0.0, f32::max);

    if flex.fit_content {
        let m = content_main + 2.0 * flex.padding;
        let c = content_cross + 2.0 * flex.padding;
        node.size = if is_row { Vec2::new(m, c) } else { Vec2::new(c, m) };
    }
    let own = node.size;

    let free = main(own) - 2.0 * flex.padding - content_main;
    let mut cursor = -main(own) / 2.0
        + flex.padding
        + match flex.justify {
            Justify::Start => 0.0,
            Justify::Center => free / 2.0,
            Justify::End => free,
        };

    for (&child, size) in children.iter().zip(sizes) {
        let m = cursor + main(size) / 2.0;
        cursor += main(size) + flex.gap;

        let half = cross(own) / 2.0 - flex.padding - cross(size) / 2.0;
        let c = match flex.align {
            Align::Start => -half,
            Align::Center => 0.0,
            Align::End => half,
        };

        scene.node_mut(child)?.position = if is_row {
            Vec2::new(m, c)
        } else {
            Vec2::new(c, m)
        };
    }

    Ok(own)
}
