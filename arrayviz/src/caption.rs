use crate::error::Result;
use crate::layout::{caption_y, FlexLayout};
use crate::scene::{Node, NodeId, Scene};
use crate::types::{CaptionAlign, Color, Vec2};

/// A container's title: its name followed by a colored type suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caption {
    pub node: NodeId,
    pub name: NodeId,
    pub suffix: NodeId,
}

impl Caption {
    pub(crate) fn spawn(
        scene: &mut Scene,
        parent: NodeId,
        text: (&str, &str),
        suffix_color: Color,
        align: CaptionAlign,
        body_height: f32,
    ) -> Result<Caption> {
        let m = *scene.metrics();
        let theme = scene.theme().clone();
        let (name_text, suffix_text) = text;

        let node = scene.spawn(
            parent,
            Node::group()
                .name("caption")
                .position(Vec2::new(0.0, caption_y(align, body_height, &m)))
                .layout(FlexLayout::row().gap(m.caption_gap).fit_content()),
        )?;
        let name = scene.spawn(
            node,
            Node::text(name_text, theme.font.size)
                .name("name")
                .fill(theme.white_label),
        )?;
        let suffix = scene.spawn(
            node,
            Node::text(suffix_text, theme.font.size)
                .name("suffix")
                .fill(suffix_color),
        )?;
        Ok(Caption { node, name, suffix })
    }

    /// Keep the caption clear of a body that changed height.
    pub(crate) fn place(
        self,
        scene: &mut Scene,
        align: CaptionAlign,
        body_height: f32,
    ) -> Result<()> {
        let y = caption_y(align, body_height, scene.metrics());
        scene.node_mut(self.node)?.position = Vec2::new(0.0, y);
        Ok(())
    }
}
