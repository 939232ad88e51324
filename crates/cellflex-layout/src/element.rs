// ABOUTME: Widget elements stored in the tree's arena.
// ABOUTME: Holds flex factors, sizes, inline style, and per-container layout state.

use std::fmt;

use cellflex_core::{Axis, ClassList, Length, Size, Style, WidgetDescriptor, WidgetKind};

use crate::container::{Container, ContainerKind};

/// Handle to a widget in a [`crate::WidgetTree`].
///
/// Handles are arena indices. Elements are never freed, so a handle stays
/// valid (and is never reused) for the lifetime of the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl WidgetId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct Element {
    pub name: String,
    pub kind: WidgetKind,
    pub classes: ClassList,
    pub parent: Option<WidgetId>,
    /// Children in insertion order (pane order for splitters)
    pub children: Vec<WidgetId>,
    pub hflex: f64,
    pub vflex: f64,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub pos: [f64; 2],
    pub text: Option<String>,
    pub style: Style,
    pub container: Option<Container>,
    /// Content size as measured by the host
    pub natural_size: Size,
    /// Current client box size
    pub client_size: Size,
    /// Client position of the element's top-left corner
    pub offset: (f64, f64),
    /// Size seen by the last resize check
    pub(crate) stored_size: Size,
}

impl Element {
    pub(crate) fn from_descriptor(
        descriptor: &WidgetDescriptor,
        parent: Option<WidgetId>,
        container: Option<Container>,
    ) -> Self {
        let mut classes = ClassList::new();
        classes.set(&descriptor.class_name);

        let mut element = Self {
            name: descriptor.id.clone(),
            kind: descriptor.kind,
            classes,
            parent,
            children: Vec::new(),
            hflex: descriptor.hflex,
            vflex: descriptor.vflex,
            min_width: descriptor.min_width,
            min_height: descriptor.min_height,
            pos: descriptor.pos,
            text: descriptor.text.clone(),
            style: Style::new(),
            container,
            natural_size: Size::ZERO,
            client_size: Size::ZERO,
            offset: (0.0, 0.0),
            stored_size: Size::ZERO,
        };
        element.apply_pos();
        if let Some(w) = descriptor.min_width {
            element.style.set("min-width", Length::Px(w));
        }
        if let Some(h) = descriptor.min_height {
            element.style.set("min-height", Length::Px(h));
        }
        element
    }

    /// Write `left`/`top` from the stored position
    pub(crate) fn apply_pos(&mut self) {
        self.style.set("left", Length::from_pos(self.pos[0]));
        self.style.set("top", Length::from_pos(self.pos[1]));
    }

    pub fn container_kind(&self) -> Option<ContainerKind> {
        self.container.as_ref().map(Container::kind)
    }

    /// Flex along the given axis
    pub fn flex(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.hflex,
            Axis::Vertical => self.vflex,
        }
    }
}
