//! Animated linear container.
//!
//! An [`Array`] keeps three things in step: the logical `values` (plus an
//! optional label per slot), the pool of [`Entry`] boxes showing them, and
//! the continuous state those boxes are animated through. Operations return
//! a [`Thread`] that validates against the scene when it starts, animates,
//! and only then commits the change to `values` and the pool.

use std::time::Duration;

use log::{debug, warn};

use crate::animation::{all, animate, call, chain, defer, noop, tween, Property, Thread};
use crate::caption::Caption;
use crate::entry::{Entry, EntryProps, HighlightProps};
use crate::error::{Error, Result};
use crate::inflight::InFlight;
use crate::layout::{linear_size, linear_x};
use crate::scene::{Node, NodeId, Scene};
use crate::scratch::SwapScratch;
use crate::transitions::{map, Easing, Lerp};
use crate::types::{CaptionAlign, Color, Value, Vec2};

const KIND: &str = "array";

/// Construction settings for an [`Array`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayProps {
    pub values: Vec<Value>,
    /// One optional label per value; unset labels show the index.
    pub labels: Vec<Option<Value>>,
    pub name: String,
    pub suffix: String,
    /// `None` uses the theme blue.
    pub suffix_color: Option<Color>,
    pub align: CaptionAlign,
    pub position: Vec2,
}

impl Default for ArrayProps {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            labels: Vec::new(),
            name: "array".to_string(),
            suffix: "[]".to_string(),
            suffix_color: None,
            align: CaptionAlign::Top,
            position: Vec2::ZERO,
        }
    }
}

impl ArrayProps {
    pub fn new<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self {
            labels: vec![None; values.len()],
            values,
            ..Default::default()
        }
    }

    /// Values keyed by labels, e.g. the entries of a map.
    pub fn labeled<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let (labels, values) = pairs
            .into_iter()
            .map(|(k, v)| (Some(k.into()), v.into()))
            .unzip();
        Self {
            values,
            labels,
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn suffix_color(mut self, color: Color) -> Self {
        self.suffix_color = Some(color);
        self
    }

    pub fn align(mut self, align: CaptionAlign) -> Self {
        self.align = align;
        self
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }
}

/// Settings for a swap framed by highlights.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwapHighlightProps {
    /// Highlight applied before the swap; a `None` color means theme blue.
    pub highlight: HighlightProps,
    /// `None` uses the stage's default for highlighted swaps.
    pub swap_duration: Option<Duration>,
    /// Highlight and reset one entry at a time instead of both at once.
    pub segment: bool,
}

impl SwapHighlightProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlight(mut self, highlight: HighlightProps) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.highlight = self.highlight.color(color);
        self
    }

    pub fn swap_duration(mut self, duration: Duration) -> Self {
        self.swap_duration = Some(duration);
        self
    }

    pub fn segment(mut self, segment: bool) -> Self {
        self.segment = segment;
        self
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ArrayData {
    values: Vec<Value>,
    labels: Vec<Option<Value>>,
    pool: Vec<Entry>,
    body: NodeId,
    caption: Caption,
    /// A push, pop or swap has started and not yet committed.
    in_flight: InFlight,
}

/// Handle to a linear container in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Array {
    node: NodeId,
}

impl Array {
    pub fn spawn(scene: &mut Scene, parent: NodeId, props: ArrayProps) -> Result<Array> {
        let m = *scene.metrics();
        let theme = scene.theme().clone();
        if props.labels.len() != props.values.len() {
            return Err(violation(format!(
                "{} labels given for {} values",
                props.labels.len(),
                props.values.len()
            )));
        }

        let node = scene.spawn(
            parent,
            Node::group()
                .name(format!("array:{}", props.name))
                .position(props.position),
        )?;
        let body_size = linear_size(props.values.len(), &m);
        let body = scene.spawn(
            node,
            Node::rect(body_size)
                .name("body")
                .radius(m.container_radius)
                .fill(theme.surface),
        )?;
        let caption = Caption::spawn(
            scene,
            node,
            (&props.name, &props.suffix),
            props.suffix_color.unwrap_or(theme.blue),
            props.align,
            body_size.y,
        )?;

        scene.arrays.insert(
            node,
            ArrayData {
                values: Vec::new(),
                labels: Vec::new(),
                pool: Vec::new(),
                body,
                caption,
                in_flight: InFlight::default(),
            },
        );

        let array = Array { node };
        array.rebuild(scene, props.values, props.labels)?;
        debug!("spawned {} '{}' at {}", KIND, props.name, node);
        Ok(array)
    }

    fn data(self, scene: &Scene) -> Result<&ArrayData> {
        scene
            .arrays
            .get(&self.node)
            .ok_or_else(|| scene.missing(self.node, KIND))
    }

    fn data_mut(self, scene: &mut Scene) -> Result<&mut ArrayData> {
        let missing = scene.missing(self.node, KIND);
        scene.arrays.get_mut(&self.node).ok_or(missing)
    }

    // -- Reads --

    pub fn node(self) -> NodeId {
        self.node
    }

    pub fn values(self, scene: &Scene) -> Result<&[Value]> {
        Ok(&self.data(scene)?.values)
    }

    pub fn labels(self, scene: &Scene) -> Result<&[Option<Value>]> {
        Ok(&self.data(scene)?.labels)
    }

    pub fn len(self, scene: &Scene) -> Result<usize> {
        Ok(self.data(scene)?.values.len())
    }

    pub fn is_empty(self, scene: &Scene) -> Result<bool> {
        Ok(self.len(scene)? == 0)
    }

    pub fn entries(self, scene: &Scene) -> Result<&[Entry]> {
        Ok(&self.data(scene)?.pool)
    }

    pub fn entry(self, scene: &Scene, index: usize) -> Result<Entry> {
        let pool = &self.data(scene)?.pool;
        pool.get(index).copied().ok_or_else(|| {
            warn!("{KIND} index {index} out of bounds for length {}", pool.len());
            Error::IndexOutOfBounds {
                index,
                len: pool.len(),
            }
        })
    }

    /// The rounded body the entries sit on.
    pub fn body(self, scene: &Scene) -> Result<NodeId> {
        Ok(self.data(scene)?.body)
    }

    pub fn caption(self, scene: &Scene) -> Result<Caption> {
        Ok(self.data(scene)?.caption)
    }

    /// Current body size; interpolated while a push or pop runs.
    pub fn size(self, scene: &Scene) -> Result<Vec2> {
        let body = self.data(scene)?.body;
        Ok(scene.node(body)?.size)
    }

    pub fn is_busy(self, scene: &Scene) -> Result<bool> {
        Ok(self.data(scene)?.in_flight.is_busy())
    }

    /// Verify that the pool mirrors `values` slot for slot.
    pub fn check_invariant(self, scene: &Scene) -> Result<()> {
        let data = self.data(scene)?;
        if data.pool.len() != data.values.len() || data.labels.len() != data.values.len() {
            return Err(violation(format!(
                "pool holds {} entries for {} values and {} labels",
                data.pool.len(),
                data.values.len(),
                data.labels.len()
            )));
        }
        for (k, (entry, value)) in data.pool.iter().zip(&data.values).enumerate() {
            let shown = &entry.data(scene)?.value;
            if shown != value {
                return Err(violation(format!(
                    "slot {k} shows {shown} but holds {value}"
                )));
            }
        }
        Ok(())
    }

    // -- Rebuild --

    /// Replace the contents immediately, rebuilding every entry.
    pub fn set_values<V: Into<Value>>(
        self,
        scene: &mut Scene,
        values: impl IntoIterator<Item = V>,
    ) -> Result<()> {
        let props = ArrayProps::new(values);
        self.replace(scene, props.values, props.labels)
    }

    /// Replace the contents with labeled values immediately.
    pub fn set_labeled_values<K, V>(
        self,
        scene: &mut Scene,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<()>
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let props = ArrayProps::labeled(pairs);
        self.replace(scene, props.values, props.labels)
    }

    fn replace(
        self,
        scene: &mut Scene,
        values: Vec<Value>,
        labels: Vec<Option<Value>>,
    ) -> Result<()> {
        self.ensure_idle(scene)?;
        self.rebuild(scene, values, labels)
    }

    /// Abandon any push, pop or swap in flight and rebuild every entry from
    /// the committed values and labels.
    ///
    /// An abandoned task fails with [`Error::Abandoned`] if it is ticked
    /// again.
    pub fn reset(self, scene: &mut Scene) -> Result<()> {
        let data = self.data_mut(scene)?;
        if let Some(ticket) = data.in_flight.abandon() {
            warn!("{KIND} {} abandoned operation #{ticket}", self.node);
        }
        let (values, labels) = (data.values.clone(), data.labels.clone());
        self.rebuild(scene, values, labels)
    }

    fn rebuild(
        self,
        scene: &mut Scene,
        values: Vec<Value>,
        labels: Vec<Option<Value>>,
    ) -> Result<()> {
        let m = *scene.metrics();
        self.data_mut(scene)?.pool.clear();
        // Anything left in the body by an unfinished operation goes too.
        let body = self.data(scene)?.body;
        for child in scene.children(body)?.to_vec() {
            scene.destroy(child)?;
        }

        let n = values.len();
        let mut pool = Vec::with_capacity(n);
        for (i, (value, label)) in values.iter().zip(&labels).enumerate() {
            let props = EntryProps::new(i, value.clone())
                .label(label.clone())
                .position(Vec2::new(linear_x(n, i, m.pitch), 0.0));
            pool.push(Entry::spawn(scene, body, props)?);
        }
        scene.node_mut(body)?.size = linear_size(n, &m);

        let data = self.data_mut(scene)?;
        data.values = values;
        data.labels = labels;
        data.pool = pool;
        self.check_invariant(scene)
    }

    // -- Structural bookkeeping --

    fn ensure_idle(self, scene: &Scene) -> Result<()> {
        if self.data(scene)?.in_flight.is_busy() {
            return Err(busy());
        }
        Ok(())
    }

    /// Take the in-flight ticket. Call only after every fallible setup step.
    fn claim(self, scene: &mut Scene) -> Result<u64> {
        self.data_mut(scene)?.in_flight.start().ok_or_else(busy)
    }

    /// Release `ticket` ahead of a commit. Fails without touching anything
    /// if the container was reset in the meantime.
    fn settle(self, scene: &mut Scene, ticket: u64) -> Result<()> {
        if !self.data_mut(scene)?.in_flight.finish(ticket) {
            warn!("{KIND} {} dropped stale commit #{ticket}", self.node);
            return Err(Error::Abandoned { container: KIND });
        }
        Ok(())
    }

    /// The two entries of a swap, after validating the indices.
    fn swap_pair(self, scene: &Scene, i: usize, j: usize) -> Result<(Entry, Entry)> {
        let a = self.entry(scene, i)?;
        let b = self.entry(scene, j)?;
        if i == j {
            warn!("{KIND} swap of slot {i} with itself");
            return Err(Error::SelfSwap);
        }
        Ok((a, b))
    }

    // -- Highlights --

    /// Highlight the entry in slot `index`.
    pub fn highlight(self, index: usize, props: HighlightProps) -> Thread {
        defer(move |scene| {
            self.check_invariant(scene)?;
            Ok(self.entry(scene, index)?.highlight(props))
        })
    }

    /// Recolor the border of the entry in slot `index`.
    pub fn highlight_border(self, index: usize, color: Color, duration: Duration) -> Thread {
        defer(move |scene| {
            self.check_invariant(scene)?;
            Ok(self.entry(scene, index)?.highlight_border(color, duration))
        })
    }

    // -- Swap --

    /// Exchange slots `i` and `j`.
    ///
    /// The two boxes cross over while the slot labels stay where they are;
    /// values and pool references are exchanged once the boxes arrive.
    pub fn swap(self, i: usize, j: usize, duration: Duration) -> Thread {
        defer(move |scene| {
            self.check_invariant(scene)?;
            let (a, b) = self.swap_pair(scene, i, j)?;
            self.ensure_idle(scene)?;

            let body = self.data(scene)?.body;
            let pa = a.position(scene)?;
            let pb = b.position(scene)?;

            let mut scratch = SwapScratch::open(scene, body)?;
            let ticket = match scratch
                .lend(scene, a)
                .and_then(|_| scratch.lend(scene, b))
                .and_then(|_| self.claim(scene))
            {
                Ok(ticket) => ticket,
                Err(err) => {
                    scratch.abort(scene)?;
                    return Err(err);
                }
            };
            debug!("{KIND} {} swap {i} <-> {j} over {duration:?}", self.node);

            Ok(chain(vec![
                all(vec![
                    animate(a.node(), Property::Position(pb), duration, Easing::EaseInOutCubic),
                    animate(b.node(), Property::Position(pa), duration, Easing::EaseInOutCubic),
                ]),
                call(move |scene| self.commit_swap(scene, ticket, (i, j), scratch)),
            ]))
        })
    }

    fn commit_swap(
        self,
        scene: &mut Scene,
        ticket: u64,
        (i, j): (usize, usize),
        mut scratch: SwapScratch,
    ) -> Result<()> {
        self.settle(scene, ticket)?;
        let (a, b) = (self.entry(scene, i)?, self.entry(scene, j)?);
        let labels = &self.data(scene)?.labels;
        let label_i = labels.get(i).cloned().flatten();
        let label_j = labels.get(j).cloned().flatten();

        // Values travel with the boxes; labels belong to the slots.
        self.data_mut(scene)?.values.swap(i, j);

        let slot_i = a.data(scene)?.sub_label;
        let slot_j = b.data(scene)?.sub_label;
        scratch.give_back(scene, slot_i, b)?;
        scratch.give_back(scene, slot_j, a)?;

        let moved = a.data_mut(scene)?;
        moved.index = j;
        moved.label = label_j;
        moved.sub_label = slot_j;
        let moved = b.data_mut(scene)?;
        moved.index = i;
        moved.label = label_i;
        moved.sub_label = slot_i;

        self.data_mut(scene)?.pool.swap(i, j);
        scratch.close(scene)?;
        debug!("{KIND} {} committed swap {i} <-> {j}", self.node);
        self.check_invariant(scene)
    }

    /// Highlight slots `i` and `j`, swap them, then reset both highlights.
    pub fn swap_and_highlight(self, i: usize, j: usize, props: SwapHighlightProps) -> Thread {
        defer(move |scene| {
            self.check_invariant(scene)?;
            self.swap_pair(scene, i, j)?;

            let theme = scene.theme();
            let on = props
                .highlight
                .color(props.highlight.color.unwrap_or(theme.blue));
            let off = props.highlight.color(theme.background);
            let swap_duration = props
                .swap_duration
                .unwrap_or(scene.timing().highlighted_swap);

            let tasks = if props.segment {
                vec![
                    self.highlight(i, on),
                    self.highlight(j, on),
                    self.swap(i, j, swap_duration),
                    self.highlight(i, off),
                    self.highlight(j, off),
                ]
            } else {
                vec![
                    all(vec![self.highlight(i, on), self.highlight(j, on)]),
                    self.swap(i, j, swap_duration),
                    all(vec![self.highlight(i, off), self.highlight(j, off)]),
                ]
            };
            Ok(chain(tasks))
        })
    }

    // -- Push / pop --

    /// Append `value`, fading a new entry in from above while the others
    /// make room.
    pub fn push(self, value: impl Into<Value>, duration: Duration) -> Thread {
        let value = value.into();
        defer(move |scene| {
            self.check_invariant(scene)?;
            self.ensure_idle(scene)?;
            let m = *scene.metrics();
            let (body, pool) = {
                let data = self.data(scene)?;
                (data.body, data.pool.clone())
            };
            let n = pool.len();

            let shifts = pool
                .iter()
                .enumerate()
                .map(|(i, e)| -> Result<(NodeId, f32, f32)> {
                    Ok((e.node(), e.position(scene)?.x, linear_x(n + 1, i, m.pitch)))
                })
                .collect::<Result<Vec<_>>>()?;
            let width = (scene.node(body)?.size.x, linear_size(n + 1, &m).x);

            let entry = Entry::spawn(
                scene,
                body,
                EntryProps::new(n, value.clone())
                    .position(Vec2::new(linear_x(n + 1, n, m.pitch), -m.push_rise))
                    .opacity(0.0),
            )?;
            let ticket = match self.claim(scene) {
                Ok(ticket) => ticket,
                Err(err) => {
                    scene.destroy(entry.node())?;
                    return Err(err);
                }
            };
            debug!("{KIND} {} push {value} over {duration:?}", self.node);

            Ok(chain(vec![
                tween(duration, move |scene, t| {
                    for &(node, from, to) in &shifts {
                        scene.node_mut(node)?.position.x = Lerp::lerp(from, to, t);
                    }
                    let new = scene.node_mut(entry.node())?;
                    new.position.y = Lerp::lerp(-m.push_rise, 0.0, t);
                    new.set_opacity(map(0.0, 2.0, t));
                    scene.node_mut(body)?.size.x = Lerp::lerp(width.0, width.1, t);
                    Ok(())
                }),
                call(move |scene| self.commit_push(scene, ticket, entry, value)),
            ]))
        })
    }

    fn commit_push(self, scene: &mut Scene, ticket: u64, entry: Entry, value: Value) -> Result<()> {
        self.settle(scene, ticket)?;
        let data = self.data_mut(scene)?;
        data.values.push(value);
        data.labels.push(None);
        data.pool.push(entry);
        self.check_invariant(scene)
    }

    /// Remove the last `n` entries; they drop and fade while the rest
    /// close the gap.
    pub fn pop(self, n: usize, duration: Duration) -> Thread {
        defer(move |scene| {
            self.check_invariant(scene)?;
            let len = self.len(scene)?;
            if n > len {
                warn!("{KIND} pop of {n} from length {len}");
                return Err(Error::PopUnderflow { requested: n, len });
            }
            if n == 0 {
                return Ok(noop());
            }
            self.ensure_idle(scene)?;

            let m = *scene.metrics();
            let (body, pool) = {
                let data = self.data(scene)?;
                (data.body, data.pool.clone())
            };
            let keep = len - n;

            let removed = pool[keep..]
                .iter()
                .map(|e| -> Result<(NodeId, f32)> { Ok((e.node(), e.position(scene)?.y)) })
                .collect::<Result<Vec<_>>>()?;
            let shifts = pool[..keep]
                .iter()
                .enumerate()
                .map(|(i, e)| -> Result<(NodeId, f32, f32)> {
                    Ok((e.node(), e.position(scene)?.x, linear_x(keep, i, m.pitch)))
                })
                .collect::<Result<Vec<_>>>()?;
            let width = (scene.node(body)?.size.x, linear_size(keep, &m).x);
            let ticket = self.claim(scene)?;
            debug!("{KIND} {} pop {n} over {duration:?}", self.node);

            Ok(chain(vec![
                tween(duration, move |scene, t| {
                    // The fade runs ahead of the layout so boxes are gone
                    // before their neighbours settle.
                    for &(node, y) in &removed {
                        let gone = scene.node_mut(node)?;
                        gone.set_opacity(map(1.0, 0.0, t * 1.2));
                        gone.position.y = Lerp::lerp(y, y + m.pop_drop, t);
                    }
                    for &(node, from, to) in &shifts {
                        scene.node_mut(node)?.position.x = Lerp::lerp(from, to, t);
                    }
                    scene.node_mut(body)?.size.x = Lerp::lerp(width.0, width.1, t);
                    Ok(())
                }),
                call(move |scene| self.commit_pop(scene, ticket, keep)),
            ]))
        })
    }

    fn commit_pop(self, scene: &mut Scene, ticket: u64, keep: usize) -> Result<()> {
        self.settle(scene, ticket)?;
        let data = self.data_mut(scene)?;
        let removed = data.pool.split_off(keep);
        data.values.truncate(keep);
        data.labels.truncate(keep);
        for entry in removed {
            scene.destroy(entry.node())?;
        }
        self.check_invariant(scene)
    }

    /// Push each value in turn, `duration` per push.
    pub fn chain_push<V: Into<Value>>(
        self,
        values: impl IntoIterator<Item = V>,
        duration: Duration,
    ) -> Thread {
        chain(
            values
                .into_iter()
                .map(|v| self.push(v, duration))
                .collect(),
        )
    }

    /// Pop `n` entries one at a time, splitting `duration` evenly.
    pub fn chain_pop(self, n: usize, duration: Duration) -> Thread {
        defer(move |scene| {
            self.check_invariant(scene)?;
            let len = self.len(scene)?;
            if n > len {
                warn!("{KIND} chained pop of {n} from length {len}");
                return Err(Error::PopUnderflow { requested: n, len });
            }
            if n == 0 {
                return Ok(noop());
            }
            let each = duration / u32::try_from(n).unwrap_or(u32::MAX);
            Ok(chain((0..n).map(|_| self.pop(1, each)).collect()))
        })
    }
}

fn busy() -> Error {
    warn!("{KIND} is busy with another structural operation");
    Error::Busy { container: KIND }
}

fn violation(detail: String) -> Error {
    warn!("{KIND} invariant violated: {detail}");
    Error::Invariant {
        container: KIND,
        detail,
    }
}
