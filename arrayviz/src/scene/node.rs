use super::NodeId;
use crate::layout::FlexLayout;
use crate::types::{Color, Vec2};

/// Text drawn centered on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub text: String,
    pub font_size: f32,
    pub line_height: f32,
}

/// One element of the scene tree.
///
/// `position` is relative to the parent's center. Groups have no fill and no
/// size of their own; rects and texts do.
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug name, shown in logs.
    pub name: String,

    // Geometry
    pub position: Vec2,
    pub size: Vec2,

    // Visual
    opacity: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f32,
    pub radius: f32,

    // Content
    pub text: Option<TextContent>,
    /// When set, children are positioned by the layout pass.
    pub layout: Option<FlexLayout>,

    // Topology, owned by the scene
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            opacity: 1.0,
            fill: None,
            stroke: None,
            line_width: 0.0,
            radius: 0.0,
            text: None,
            layout: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    pub fn group() -> Self {
        Self::default()
    }

    pub fn rect(size: Vec2) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// A text node; its size is measured by the layout pass.
    pub fn text(content: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: Some(TextContent {
                text: content.into(),
                font_size,
                line_height: font_size,
            }),
            ..Default::default()
        }
    }

    // Builder methods

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some(color);
        self.line_width = width;
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        if let Some(text) = &mut self.text {
            text.line_height = line_height;
        }
        self
    }

    pub fn layout(mut self, layout: FlexLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    // Accessors

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set opacity, clamped to `0.0..=1.0`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        if let Some(text) = &mut self.text {
            text.text = content.into();
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
