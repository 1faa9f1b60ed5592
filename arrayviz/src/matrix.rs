//! Animated grid container.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::animation::{all, animate, call, chain, defer, Property, Thread};
use crate::array::SwapHighlightProps;
use crate::caption::Caption;
use crate::entry::{Entry, EntryProps, HighlightProps};
use crate::error::{Error, Result};
use crate::inflight::InFlight;
use crate::layout::{grid_row_y, grid_size, linear_x};
use crate::scene::{Node, NodeId, Scene};
use crate::transitions::Easing;
use crate::types::{CaptionAlign, Color, Value, Vec2};

const KIND: &str = "matrix";

/// A cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for Coord {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Construction settings for a [`Matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixProps {
    pub rows: Vec<Vec<Value>>,
    pub name: String,
    pub suffix: String,
    /// `None` uses the theme blue.
    pub suffix_color: Option<Color>,
    pub align: CaptionAlign,
    pub position: Vec2,
}

impl Default for MatrixProps {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            name: "matrix".to_string(),
            suffix: "[][]".to_string(),
            suffix_color: None,
            align: CaptionAlign::Top,
            position: Vec2::ZERO,
        }
    }
}

impl MatrixProps {
    pub fn new<R, V>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            rows: collect_rows(rows),
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

fn collect_rows<R, V>(rows: impl IntoIterator<Item = R>) -> Vec<Vec<Value>>
where
    R: IntoIterator<Item = V>,
    V: Into<Value>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

/// Flatten rows into row-major order, rejecting ragged or empty input.
fn flatten(rows: Vec<Vec<Value>>) -> Result<(Vec<Value>, usize, usize)> {
    let cols = rows.first().map_or(0, Vec::len);
    if rows.is_empty() || cols == 0 {
        warn!("{KIND} with an empty shape");
        return Err(Error::EmptyMatrix);
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
        warn!("{KIND} row {row} is ragged");
        return Err(Error::RaggedMatrix {
            row,
            len: r.len(),
            expected: cols,
        });
    }
    let count = rows.len();
    Ok((rows.into_iter().flatten().collect(), count, cols))
}

#[derive(Debug, Clone)]
pub(crate) struct MatrixData {
    /// Row-major.
    values: Vec<Value>,
    rows: usize,
    cols: usize,
    pool: Vec<Entry>,
    body: NodeId,
    /// One group per row; entries are parented to the row they sit in.
    row_nodes: Vec<NodeId>,
    caption: Caption,
    align: CaptionAlign,
    in_flight: InFlight,
}

/// Handle to a grid container in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    node: NodeId,
}

impl Matrix {
    pub fn spawn(scene: &mut Scene, parent: NodeId, props: MatrixProps) -> Result<Matrix> {
        let (values, rows, cols) = flatten(props.rows)?;
        let m = *scene.metrics();
        let theme = scene.theme().clone();

        let node = scene.spawn(
            parent,
            Node::group()
                .name(format!("matrix:{}", props.name))
                .position(props.position),
        )?;
        let body_size = grid_size(rows, cols, &m);
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

        scene.matrices.insert(
            node,
            MatrixData {
                values: Vec::new(),
                rows: 0,
                cols: 0,
                pool: Vec::new(),
                body,
                row_nodes: Vec::new(),
                caption,
                align: props.align,
                in_flight: InFlight::default(),
            },
        );

        let matrix = Matrix { node };
        matrix.rebuild(scene, values, rows, cols)?;
        debug!("spawned {KIND} '{}' {rows}x{cols} at {node}", props.name);
        Ok(matrix)
    }

    fn data(self, scene: &Scene) -> Result<&MatrixData> {
        scene
            .matrices
            .get(&self.node)
            .ok_or_else(|| scene.missing(self.node, KIND))
    }

    fn data_mut(self, scene: &mut Scene) -> Result<&mut MatrixData> {
        let missing = scene.missing(self.node, KIND);
        scene.matrices.get_mut(&self.node).ok_or(missing)
    }

    // -- Reads --

    pub fn node(self) -> NodeId {
        self.node
    }

    /// `(rows, cols)`.
    pub fn shape(self, scene: &Scene) -> Result<(usize, usize)> {
        let data = self.data(scene)?;
        Ok((data.rows, data.cols))
    }

    /// Values in row-major order.
    pub fn flat_values(self, scene: &Scene) -> Result<&[Value]> {
        Ok(&self.data(scene)?.values)
    }

    /// Values as rows.
    pub fn values(self, scene: &Scene) -> Result<Vec<Vec<Value>>> {
        let data = self.data(scene)?;
        Ok(data.values.chunks(data.cols).map(<[Value]>::to_vec).collect())
    }

    pub fn entries(self, scene: &Scene) -> Result<&[Entry]> {
        Ok(&self.data(scene)?.pool)
    }

    pub fn entry(self, scene: &Scene, at: impl Into<Coord>) -> Result<Entry> {
        let slot = self.slot(scene, at.into())?;
        Ok(self.data(scene)?.pool[slot])
    }

    /// The group holding row `row`.
    pub fn row_node(self, scene: &Scene, row: usize) -> Result<NodeId> {
        let rows = &self.data(scene)?.row_nodes;
        rows.get(row).copied().ok_or(Error::IndexOutOfBounds {
            index: row,
            len: rows.len(),
        })
    }

    pub fn body(self, scene: &Scene) -> Result<NodeId> {
        Ok(self.data(scene)?.body)
    }

    pub fn caption(self, scene: &Scene) -> Result<Caption> {
        Ok(self.data(scene)?.caption)
    }

    pub fn size(self, scene: &Scene) -> Result<Vec2> {
        let body = self.data(scene)?.body;
        Ok(scene.node(body)?.size)
    }

    pub fn is_busy(self, scene: &Scene) -> Result<bool> {
        Ok(self.data(scene)?.in_flight.is_busy())
    }

    /// Flat pool slot of a coordinate.
    fn slot(self, scene: &Scene, at: Coord) -> Result<usize> {
        let data = self.data(scene)?;
        if at.row >= data.rows || at.col >= data.cols {
            warn!("{KIND} coordinate {at} out of bounds");
            return Err(Error::CoordOutOfBounds {
                row: at.row,
                col: at.col,
                rows: data.rows,
                cols: data.cols,
            });
        }
        Ok(at.row * data.cols + at.col)
    }

    /// Verify that the pool mirrors `values` cell for cell.
    pub fn check_invariant(self, scene: &Scene) -> Result<()> {
        let data = self.data(scene)?;
        let cells = data.rows * data.cols;
        if data.pool.len() != cells || data.values.len() != cells {
            return Err(violation(format!(
                "pool holds {} entries and {} values for {}x{} cells",
                data.pool.len(),
                data.values.len(),
                data.rows,
                data.cols
            )));
        }
        for (k, (entry, value)) in data.pool.iter().zip(&data.values).enumerate() {
            let shown = &entry.data(scene)?.value;
            if shown != value {
                return Err(violation(format!(
                    "cell ({}, {}) shows {shown} but holds {value}",
                    k / data.cols,
                    k % data.cols
                )));
            }
        }
        Ok(())
    }

    // -- Rebuild --

    /// Replace the contents immediately. The shape may change.
    pub fn set_values<R, V>(
        self,
        scene: &mut Scene,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<()>
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let (values, rows, cols) = flatten(collect_rows(rows))?;
        let data = self.data(scene)?;
        if data.in_flight.is_busy() {
            return Err(busy());
        }
        let (caption, align) = (data.caption, data.align);
        self.rebuild(scene, values, rows, cols)?;
        let height = self.size(scene)?.y;
        caption.place(scene, align, height)
    }

    /// Abandon a swap in flight and rebuild every cell from the committed
    /// values.
    ///
    /// An abandoned task fails with [`Error::Abandoned`] if it is ticked
    /// again.
    pub fn reset(self, scene: &mut Scene) -> Result<()> {
        let data = self.data_mut(scene)?;
        if let Some(ticket) = data.in_flight.abandon() {
            warn!("{KIND} {} abandoned operation #{ticket}", self.node);
        }
        let (values, rows, cols) = (data.values.clone(), data.rows, data.cols);
        self.rebuild(scene, values, rows, cols)
    }

    fn rebuild(
        self,
        scene: &mut Scene,
        values: Vec<Value>,
        rows: usize,
        cols: usize,
    ) -> Result<()> {
        let m = *scene.metrics();
        let data = self.data_mut(scene)?;
        data.row_nodes.clear();
        data.pool.clear();
        let body = data.body;
        for child in scene.children(body)?.to_vec() {
            scene.destroy(child)?;
        }

        let mut row_nodes = Vec::with_capacity(rows);
        let mut pool = Vec::with_capacity(values.len());
        for r in 0..rows {
            let row = scene.spawn(
                body,
                Node::group()
                    .name(format!("row[{r}]"))
                    .position(Vec2::new(0.0, grid_row_y(rows, r, m.pitch))),
            )?;
            row_nodes.push(row);
            for (c, value) in values[r * cols..(r + 1) * cols].iter().enumerate() {
                let props = EntryProps::new(c, value.clone())
                    .label(Some(Value::text("")))
                    .position(Vec2::new(linear_x(cols, c, m.pitch), 0.0));
                pool.push(Entry::spawn(scene, row, props)?);
            }
        }
        scene.node_mut(body)?.size = grid_size(rows, cols, &m);

        let data = self.data_mut(scene)?;
        data.values = values;
        data.rows = rows;
        data.cols = cols;
        data.pool = pool;
        data.row_nodes = row_nodes;
        self.check_invariant(scene)
    }

    // -- Highlights --

    pub fn highlight(self, at: impl Into<Coord>, props: HighlightProps) -> Thread {
        let at = at.into();
        defer(move |scene| {
            self.check_invariant(scene)?;
            Ok(self.entry(scene, at)?.highlight(props))
        })
    }

    pub fn highlight_border(
        self,
        at: impl Into<Coord>,
        color: Color,
        duration: Duration,
    ) -> Thread {
        let at = at.into();
        defer(move |scene| {
            self.check_invariant(scene)?;
            Ok(self.entry(scene, at)?.highlight_border(color, duration))
        })
    }

    // -- Swap --

    fn swap_slots(self, scene: &Scene, p1: Coord, p2: Coord) -> Result<(usize, usize)> {
        let s1 = self.slot(scene, p1)?;
        let s2 = self.slot(scene, p2)?;
        if s1 == s2 {
            warn!("{KIND} swap of {p1} with itself");
            return Err(Error::SelfSwap);
        }
        Ok((s1, s2))
    }

    /// Exchange two cells. Both boxes travel in scene space straight to
    /// the other's place, then move into the row they landed in.
    pub fn swap(self, p1: impl Into<Coord>, p2: impl Into<Coord>, duration: Duration) -> Thread {
        let (p1, p2) = (p1.into(), p2.into());
        defer(move |scene| {
            self.check_invariant(scene)?;
            let (s1, s2) = self.swap_slots(scene, p1, p2)?;
            let data = self.data(scene)?;
            if data.in_flight.is_busy() {
                return Err(busy());
            }
            let (a, b) = (data.pool[s1], data.pool[s2]);

            let pa = a.absolute_position(scene)?;
            let pb = b.absolute_position(scene)?;
            let ticket = self.data_mut(scene)?.in_flight.start().ok_or_else(busy)?;
            debug!("{KIND} {} swap {p1} <-> {p2} over {duration:?}", self.node);

            Ok(chain(vec![
                all(vec![
                    animate(
                        a.node(),
                        Property::AbsolutePosition(pb),
                        duration,
                        Easing::EaseInOutCubic,
                    ),
                    animate(
                        b.node(),
                        Property::AbsolutePosition(pa),
                        duration,
                        Easing::EaseInOutCubic,
                    ),
                ]),
                call(move |scene| self.commit_swap(scene, ticket, (p1, s1), (p2, s2))),
            ]))
        })
    }

    fn commit_swap(
        self,
        scene: &mut Scene,
        ticket: u64,
        (p1, s1): (Coord, usize),
        (p2, s2): (Coord, usize),
    ) -> Result<()> {
        let data = self.data_mut(scene)?;
        if !data.in_flight.finish(ticket) {
            warn!("{KIND} {} dropped stale commit #{ticket}", self.node);
            return Err(Error::Abandoned { container: KIND });
        }
        let (a, b) = (data.pool[s1], data.pool[s2]);
        let (row1, row2) = (data.row_nodes[p1.row], data.row_nodes[p2.row]);
        data.values.swap(s1, s2);
        data.pool.swap(s1, s2);

        scene.reparent(a.node(), row2)?;
        scene.reparent(b.node(), row1)?;
        a.data_mut(scene)?.index = p2.col;
        b.data_mut(scene)?.index = p1.col;

        debug!("{KIND} {} committed swap {p1} <-> {p2}", self.node);
        self.check_invariant(scene)
    }

    /// Highlight two cells, swap them, then reset both highlights.
    pub fn swap_and_highlight(
        self,
        p1: impl Into<Coord>,
        p2: impl Into<Coord>,
        props: SwapHighlightProps,
    ) -> Thread {
        let (p1, p2) = (p1.into(), p2.into());
        defer(move |scene| {
            self.check_invariant(scene)?;
            self.swap_slots(scene, p1, p2)?;

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
                    self.highlight(p1, on),
                    self.highlight(p2, on),
                    self.swap(p1, p2, swap_duration),
                    self.highlight(p1, off),
                    self.highlight(p2, off),
                ]
            } else {
                vec![
                    all(vec![self.highlight(p1, on), self.highlight(p2, on)]),
                    self.swap(p1, p2, swap_duration),
                    all(vec![self.highlight(p1, off), self.highlight(p2, off)]),
                ]
            };
            Ok(chain(tasks))
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
