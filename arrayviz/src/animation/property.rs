use std::time::Duration;

use super::{defer, tween, Thread};
use crate::error::Result;
use crate::scene::{NodeId, Scene};
use crate::transitions::{Easing, Lerp};
use crate::types::{Color, ColorSpace, Vec2};

/// An animatable node property together with a value for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    /// Position relative to the parent.
    Position(Vec2),
    /// Position in scene coordinates.
    AbsolutePosition(Vec2),
    Size(Vec2),
    Opacity(f32),
    Fill(Color),
    Stroke(Color),
}

impl Property {
    /// Current value of the same property on `node`.
    fn read(&self, scene: &Scene, node: NodeId) -> Result<Property> {
        let n = scene.node(node)?;
        Ok(match self {
            Property::Position(_) => Property::Position(n.position),
            Property::AbsolutePosition(_) => {
                Property::AbsolutePosition(scene.absolute_position(node)?)
            }
            Property::Size(_) => Property::Size(n.size),
            Property::Opacity(_) => Property::Opacity(n.opacity()),
            Property::Fill(_) => Property::Fill(n.fill.unwrap_or(Color::TRANSPARENT)),
            Property::Stroke(_) => Property::Stroke(n.stroke.unwrap_or(Color::TRANSPARENT)),
        })
    }

    fn write(self, scene: &mut Scene, node: NodeId) -> Result<()> {
        if let Property::AbsolutePosition(p) = self {
            return scene.set_absolute_position(node, p);
        }
        let n = scene.node_mut(node)?;
        match self {
            Property::Position(p) => n.position = p,
            Property::AbsolutePosition(_) => {}
            Property::Size(s) => n.size = s,
            Property::Opacity(o) => n.set_opacity(o),
            Property::Fill(c) => n.fill = Some(c),
            Property::Stroke(c) => n.stroke = Some(c),
        }
        Ok(())
    }

    fn interpolate(self, to: Property, t: f32, space: ColorSpace) -> Property {
        match (self, to) {
            (Property::Position(a), Property::Position(b)) => Property::Position(a.lerp(b, t)),
            (Property::AbsolutePosition(a), Property::AbsolutePosition(b)) => {
                Property::AbsolutePosition(a.lerp(b, t))
            }
            (Property::Size(a), Property::Size(b)) => Property::Size(a.lerp(b, t)),
            (Property::Opacity(a), Property::Opacity(b)) => Property::Opacity(Lerp::lerp(a, b, t)),
            (Property::Fill(a), Property::Fill(b)) => Property::Fill(a.lerp_in(b, t, space)),
            (Property::Stroke(a), Property::Stroke(b)) => Property::Stroke(a.lerp_in(b, t, space)),
            // read() always snapshots the target's own variant.
            _ => to,
        }
    }
}

/// Transition one property of `node` to `target`.
///
/// The starting value is read when the task starts, so chained animations
/// pick up wherever the previous one left the node.
pub fn animate(node: NodeId, target: Property, duration: Duration, easing: Easing) -> Thread {
    defer(move |scene| {
        let start = target.read(scene, node)?;
        let space = scene.config().color_space;
        Ok(tween(duration, move |scene, t| {
            start
                .interpolate(target, easing.apply(t), space)
                .write(scene, node)
        }))
    })
}
