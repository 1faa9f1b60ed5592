/// Main axis of a flex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

/// Placement of children along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
}

/// Placement of children across the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

/// Where a container's caption sits relative to its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionAlign {
    #[default]
    Top,
    Bottom,
}

/// Which texts of an entry a highlight recolors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightSubject {
    Label,
    Value,
    #[default]
    Both,
}
