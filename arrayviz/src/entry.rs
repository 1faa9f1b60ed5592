//! A single value box with an index label underneath.

use std::time::Duration;

use log::debug;

use crate::animation::{all, animate, defer, Property, Thread};
use crate::error::Result;
use crate::layout::FlexLayout;
use crate::scene::{Node, NodeId, Scene};
use crate::transitions::Easing;
use crate::types::{Align, Color, HighlightSubject, Justify, Value, Vec2};

/// Settings for [`Entry::highlight`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightProps {
    /// Target color; `None` means the theme background, which resets the
    /// entry.
    pub color: Option<Color>,
    pub subject: HighlightSubject,
    /// `None` uses the stage's default highlight duration.
    pub duration: Option<Duration>,
    /// Also recolor the box border.
    pub highlight_border: bool,
}

impl Default for HighlightProps {
    fn default() -> Self {
        Self {
            color: None,
            subject: HighlightSubject::Both,
            duration: None,
            highlight_border: true,
        }
    }
}

impl HighlightProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn subject(mut self, subject: HighlightSubject) -> Self {
        self.subject = subject;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn highlight_border(mut self, enabled: bool) -> Self {
        self.highlight_border = enabled;
        self
    }
}

/// What to put in a freshly spawned entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryProps {
    pub index: usize,
    pub value: Value,
    pub label: Option<Value>,
    pub position: Vec2,
    pub opacity: f32,
}

impl EntryProps {
    pub fn new(index: usize, value: impl Into<Value>) -> Self {
        Self {
            index,
            value: value.into(),
            label: None,
            position: Vec2::ZERO,
            opacity: 1.0,
        }
    }

    pub fn label(mut self, label: Option<Value>) -> Self {
        self.label = label;
        self
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EntryData {
    pub(crate) index: usize,
    pub(crate) value: Value,
    pub(crate) label: Option<Value>,
    /// The rounded box; carries fill, stroke and the column layout.
    pub(crate) inner: NodeId,
    pub(crate) value_text: NodeId,
    /// The label element under the box. Swaps lend it out, so it is not
    /// always a child of `inner`.
    pub(crate) sub_label: NodeId,
}

impl EntryData {
    pub(crate) fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.to_string(),
            None => self.index.to_string(),
        }
    }
}

/// Handle to an entry in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    node: NodeId,
}

impl Entry {
    /// Build an entry's node tree under `parent`.
    pub fn spawn(scene: &mut Scene, parent: NodeId, props: EntryProps) -> Result<Entry> {
        let m = *scene.metrics();
        let theme = scene.theme().clone();
        let font = theme.font.size;

        let node = scene.spawn(
            parent,
            Node::group()
                .name(format!("entry[{}]", props.index))
                .position(props.position)
                .with_opacity(props.opacity),
        )?;
        let inner = scene.spawn(
            node,
            Node::rect(Vec2::splat(m.box_size))
                .name("box")
                .radius(m.box_radius)
                .fill(theme.background)
                .stroke(theme.background, m.line_width)
                .layout(
                    FlexLayout::column()
                        .padding(m.box_padding)
                        .gap(m.box_gap)
                        .justify(Justify::Start)
                        .align(Align::Center),
                ),
        )?;
        let value_text = scene.spawn(
            inner,
            Node::text(props.value.to_string(), font)
                .name("value")
                .fill(theme.white_label),
        )?;
        let label_text = match &props.label {
            Some(label) => label.to_string(),
            None => props.index.to_string(),
        };
        let sub_label = scene.spawn(
            inner,
            Node::text(label_text, font * m.label_scale)
                .name("label")
                .fill(theme.white_label),
        )?;

        scene.entries.insert(
            node,
            EntryData {
                index: props.index,
                value: props.value,
                label: props.label,
                inner,
                value_text,
                sub_label,
            },
        );
        Ok(Entry { node })
    }

    pub fn node(self) -> NodeId {
        self.node
    }

    pub(crate) fn data(self, scene: &Scene) -> Result<&EntryData> {
        scene
            .entries
            .get(&self.node)
            .ok_or_else(|| scene.missing(self.node, "entry"))
    }

    pub(crate) fn data_mut(self, scene: &mut Scene) -> Result<&mut EntryData> {
        let missing = scene.missing(self.node, "entry");
        scene.entries.get_mut(&self.node).ok_or(missing)
    }

    // -- Reads --

    pub fn value(self, scene: &Scene) -> Result<Value> {
        Ok(self.data(scene)?.value.clone())
    }

    pub fn label(self, scene: &Scene) -> Result<Option<Value>> {
        Ok(self.data(scene)?.label.clone())
    }

    pub fn index(self, scene: &Scene) -> Result<usize> {
        Ok(self.data(scene)?.index)
    }

    /// The text shown under the box: the label, or the index when unset.
    pub fn display_label(self, scene: &Scene) -> Result<String> {
        Ok(self.data(scene)?.display_label())
    }

    pub fn box_node(self, scene: &Scene) -> Result<NodeId> {
        Ok(self.data(scene)?.inner)
    }

    pub fn label_node(self, scene: &Scene) -> Result<NodeId> {
        Ok(self.data(scene)?.sub_label)
    }

    pub fn box_color(self, scene: &Scene) -> Result<Color> {
        let inner = self.data(scene)?.inner;
        Ok(scene.node(inner)?.fill.unwrap_or(Color::TRANSPARENT))
    }

    pub fn border_color(self, scene: &Scene) -> Result<Color> {
        let inner = self.data(scene)?.inner;
        Ok(scene.node(inner)?.stroke.unwrap_or(Color::TRANSPARENT))
    }

    pub fn value_color(self, scene: &Scene) -> Result<Color> {
        let text = self.data(scene)?.value_text;
        Ok(scene.node(text)?.fill.unwrap_or(Color::TRANSPARENT))
    }

    pub fn label_color(self, scene: &Scene) -> Result<Color> {
        let text = self.data(scene)?.sub_label;
        Ok(scene.node(text)?.fill.unwrap_or(Color::TRANSPARENT))
    }

    pub fn position(self, scene: &Scene) -> Result<Vec2> {
        Ok(scene.node(self.node)?.position)
    }

    pub fn absolute_position(self, scene: &Scene) -> Result<Vec2> {
        scene.absolute_position(self.node)
    }

    pub fn opacity(self, scene: &Scene) -> Result<f32> {
        Ok(scene.node(self.node)?.opacity())
    }

    // -- Transitions --

    /// Recolor the box border.
    pub fn highlight_border(self, color: Color, duration: Duration) -> Thread {
        defer(move |scene| {
            let inner = self.data(scene)?.inner;
            Ok(animate(
                inner,
                Property::Stroke(color),
                duration,
                Easing::EaseInOutCubic,
            ))
        })
    }

    /// Recolor the value text.
    pub fn highlight_value(self, color: Color, duration: Duration) -> Thread {
        defer(move |scene| {
            let text = self.data(scene)?.value_text;
            Ok(animate(
                text,
                Property::Fill(color),
                duration,
                Easing::EaseInOutCubic,
            ))
        })
    }

    /// Recolor the label text.
    pub fn highlight_label(self, color: Color, duration: Duration) -> Thread {
        defer(move |scene| {
            let text = self.data(scene)?.sub_label;
            Ok(animate(
                text,
                Property::Fill(color),
                duration,
                Easing::EaseInOutCubic,
            ))
        })
    }

    /// Recolor the border and the chosen texts concurrently.
    ///
    /// Highlighting both texts with the background color restores them to
    /// the neutral label color instead, so the same call un-highlights.
    pub fn highlight(self, props: HighlightProps) -> Thread {
        defer(move |scene| {
            self.data(scene)?;
            let theme = scene.theme();
            let color = props.color.unwrap_or(theme.background);
            let duration = props.duration.unwrap_or(scene.timing().highlight);
            let text_color =
                if props.subject == HighlightSubject::Both && color == theme.background {
                    theme.white_label
                } else {
                    color
                };
            debug!(
                "highlight {} ({:?}) over {:?}",
                self.node, props.subject, duration
            );

            let mut tasks = Vec::with_capacity(3);
            if props.highlight_border {
                tasks.push(self.highlight_border(color, duration));
            }
            if props.subject != HighlightSubject::Label {
                tasks.push(self.highlight_value(text_color, duration));
            }
            if props.subject != HighlightSubject::Value {
                tasks.push(self.highlight_label(text_color, duration));
            }
            Ok(all(tasks))
        })
    }

    /// Return border, value and label to their resting colors.
    pub fn unhighlight(self, duration: Duration) -> Thread {
        defer(move |scene| {
            self.data(scene)?;
            let theme = scene.theme();
            Ok(all(vec![
                self.highlight_border(theme.background, duration),
                self.highlight_value(theme.white_label, duration),
                self.highlight_label(theme.white_label, duration),
            ]))
        })
    }
}
