// ABOUTME: Widget tree owning every element in an arena.
// ABOUTME: Creates widgets, routes insertion and layout to container variants, and drives resize and drag events.

use std::collections::HashMap;

use cellflex_core::{Axis, LayoutConfig, Length, Size, WidgetDescriptor};

use crate::adapt::adapt_row_heights;
use crate::container::{Container, ContainerKind};
use crate::element::{Element, WidgetId};
use crate::flex::{FlexPlan, PaneFlex};
use crate::policy::CellPolicy;
use crate::scheduler::{Scheduler, SizeChanged};
use crate::split::{Offset, SplitLayout};
use crate::table::TableLayout;
use crate::LayoutError;

#[derive(Debug)]
pub struct WidgetTree {
    config: LayoutConfig,
    elements: Vec<Element>,
    names: HashMap<String, WidgetId>,
    roots: Vec<WidgetId>,
    scheduler: Scheduler,
    window: Size,
    /// Splitter whose divider the pointer currently holds
    active_drag: Option<WidgetId>,
}

impl WidgetTree {
    pub fn new(config: LayoutConfig) -> Self {
        let window = Size::new(config.window.width, config.window.height);
        Self {
            config,
            elements: Vec::new(),
            names: HashMap::new(),
            roots: Vec::new(),
            scheduler: Scheduler::new(),
            window,
            active_drag: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn window_size(&self) -> Size {
        self.window
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Widgets attached directly to the window
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn active_drag(&self) -> Option<WidgetId> {
        self.active_drag
    }

    pub fn get(&self, id: WidgetId) -> Result<&Element, LayoutError> {
        self.elements
            .get(id.index())
            .ok_or(LayoutError::UnknownWidget(id))
    }

    fn get_mut(&mut self, id: WidgetId) -> Result<&mut Element, LayoutError> {
        self.elements
            .get_mut(id.index())
            .ok_or(LayoutError::UnknownWidget(id))
    }

    /// Resolve a widget id string to its handle
    pub fn id(&self, name: &str) -> Result<WidgetId, LayoutError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::UnknownName(name.to_string()))
    }

    pub fn element(&self, name: &str) -> Result<&Element, LayoutError> {
        self.get(self.id(name)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (WidgetId(i as u32), e))
    }

    pub fn table(&self, id: WidgetId) -> Option<&TableLayout> {
        self.elements.get(id.index())?.container.as_ref()?.as_table()
    }

    pub fn split(&self, id: WidgetId) -> Option<&SplitLayout> {
        self.elements.get(id.index())?.container.as_ref()?.as_split()
    }

    fn split_mut(&mut self, id: WidgetId) -> Result<&mut SplitLayout, LayoutError> {
        let element = self.get_mut(id)?;
        match element.container.as_mut().and_then(Container::as_split_mut) {
            Some(split) => Ok(split),
            None => Err(LayoutError::NotASplit(element.name.clone())),
        }
    }

    /// Create a widget and append it to its parent
    pub fn create(&mut self, descriptor: WidgetDescriptor) -> Result<WidgetId, LayoutError> {
        self.build(&descriptor, None)
    }

    /// Create a widget and insert it at `index` among its splitter parent's panes
    pub fn create_at(
        &mut self,
        descriptor: WidgetDescriptor,
        index: usize,
    ) -> Result<WidgetId, LayoutError> {
        self.build(&descriptor, Some(index))
    }

    fn build(
        &mut self,
        descriptor: &WidgetDescriptor,
        index: Option<usize>,
    ) -> Result<WidgetId, LayoutError> {
        if descriptor.id.is_empty() {
            return Err(LayoutError::EmptyId);
        }
        if self.names.contains_key(&descriptor.id) {
            return Err(LayoutError::DuplicateId(descriptor.id.clone()));
        }
        let parent = descriptor
            .parent
            .as_deref()
            .map(|p| self.id(p))
            .transpose()?;
        match parent {
            Some(p) => self.validate_insert(p, index, descriptor.pos)?,
            None if index.is_some() => return Err(LayoutError::NotASplit("window".to_string())),
            None => {}
        }

        let kind = ContainerKind::for_widget(descriptor.kind);
        let spacing = descriptor.spacing.unwrap_or(self.config.box_spacing);
        let container = kind.map(|k| Container::new(k, spacing, &self.config.split));
        let mut element = Element::from_descriptor(descriptor, parent, container);

        let margin = Length::Px(descriptor.margin.unwrap_or(self.config.box_margin));
        match kind {
            Some(ContainerKind::RowBox) => {
                element.style.set("padding", margin);
                element.style.set_prefixed("align-items", "center");
                element.style.set_prefixed("justify-content", "space-around");
            }
            Some(ContainerKind::ColumnBox) => {
                element.style.set("padding", margin);
                element.style.set_prefixed("align-items", "stretch");
                element.style.set_prefixed("justify-content", "space-around");
            }
            Some(k) if k.cell_policy().is_some() => element.style.set("padding", margin),
            _ => {}
        }
        element.style.merge_css(&descriptor.css);
        if parent.is_none() {
            element.client_size = self.window;
        }

        let id = WidgetId(self.elements.len() as u32);
        self.elements.push(element);
        self.names.insert(descriptor.id.clone(), id);
        match parent {
            Some(p) => self.insert_child(p, id, index)?,
            None => self.roots.push(id),
        }
        // Always check the size once construction has settled
        self.scheduler.schedule_check(id);
        tracing::debug!("Created {:?} '{}' as {}", descriptor.kind, descriptor.id, id);
        Ok(id)
    }

    fn validate_insert(
        &self,
        parent: WidgetId,
        index: Option<usize>,
        pos: [f64; 2],
    ) -> Result<(), LayoutError> {
        let element = self.get(parent)?;
        let Some(container) = &element.container else {
            return Err(LayoutError::NotAContainer(element.name.clone()));
        };
        match (container, index) {
            (Container::Split(split), Some(index)) if index > split.panes().len() => {
                Err(LayoutError::IndexOutOfRange {
                    index,
                    len: split.panes().len(),
                })
            }
            (Container::Table(table), None)
                if table.policy() == CellPolicy::Grid && TableLayout::grid_cell(pos).is_none() =>
            {
                Err(LayoutError::InvalidGridPosition {
                    column: pos[0],
                    row: pos[1],
                })
            }
            (Container::Split(_), _) | (_, None) => Ok(()),
            (_, Some(_)) => Err(LayoutError::NotASplit(element.name.clone())),
        }
    }

    /// Run the parent's insertion policy for a freshly created child
    fn insert_child(
        &mut self,
        parent: WidgetId,
        child: WidgetId,
        index: Option<usize>,
    ) -> Result<(), LayoutError> {
        let (pos, min_width, min_height) = {
            let c = self.get(child)?;
            (c.pos, c.min_width, c.min_height)
        };
        let parent_el = self.get_mut(parent)?;
        let Some(container) = parent_el.container.as_mut() else {
            return Err(LayoutError::NotAContainer(parent_el.name.clone()));
        };
        let kind = container.kind();

        match container {
            Container::Flexbox(flexbox) => {
                let (axis, spacing) = (flexbox.axis, flexbox.spacing);
                parent_el.children.push(child);
                let after_first = parent_el.children.len() > 1;
                let child_el = &mut self.elements[child.index()];
                apply_flex_grow(child_el, axis);
                if axis == Axis::Horizontal && after_first {
                    child_el.style.set("margin-left", Length::Px(spacing));
                }
            }
            Container::Table(table) => {
                let placement = table.insert(child, pos)?;
                if let Some(displaced) = placement.displaced {
                    parent_el.children.retain(|&c| c != displaced);
                    self.elements[displaced.index()].parent = None;
                }
                self.elements[parent.index()].children.push(child);
                if kind == ContainerKind::Form {
                    // Label column stays natural, value column stretches
                    self.elements[child.index()].hflex = if placement.column == 0 { 0.0 } else { 1.0 };
                }
                self.apply_layout(parent)?;
            }
            Container::Freeform => {
                parent_el.children.push(child);
                self.elements[child.index()].style.set("position", "absolute");
            }
            Container::Split(split) => {
                let index = index.unwrap_or(split.panes().len());
                split.insert_pane(child, index, min_width, min_height)?;
                parent_el.children.insert(index, child);
                self.sync_split(parent);
            }
        }
        Ok(())
    }

    /// Re-run the container's layout from current flex values
    pub fn apply_layout(&mut self, id: WidgetId) -> Result<(), LayoutError> {
        let element = self.get(id)?;
        let Some(kind) = element.container_kind() else {
            return Err(LayoutError::NotAContainer(element.name.clone()));
        };
        match kind {
            ContainerKind::RowBox | ContainerKind::ColumnBox => {
                let axis = if kind == ContainerKind::RowBox {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                };
                for child in element.children.clone() {
                    apply_flex_grow(&mut self.elements[child.index()], axis);
                }
            }
            ContainerKind::TableRow
            | ContainerKind::TableColumn
            | ContainerKind::Form
            | ContainerKind::Grid => {
                self.apply_table_layout(id);
                // Fresh percentages ignore natural rows; correct them right away
                if kind.adapts_to_height() && self.elements[id.index()].client_size.height > 0.0 {
                    self.adapt_table_height(id);
                }
            }
            ContainerKind::Freeform | ContainerKind::Split(_) => {}
        }
        Ok(())
    }

    fn apply_table_layout(&mut self, id: WidgetId) {
        let element = &self.elements[id.index()];
        let Some(table) = element.container.as_ref().and_then(Container::as_table) else {
            return;
        };
        let cells = table.occupancy(|pane| {
            let e = &self.elements[pane.index()];
            PaneFlex {
                hflex: e.hflex,
                vflex: e.vflex,
            }
        });
        let Some(plan) = FlexPlan::compute(&cells) else {
            tracing::debug!("Table '{}' is empty, skipping layout", element.name);
            return;
        };
        tracing::debug!(
            "Table layout for '{}': {} rows, cum_vflex={}, cum_hflex={}",
            element.name,
            plan.row_flex.len(),
            plan.cum_vflex,
            plan.cum_hflex
        );
        if let Some(table) = self.elements[id.index()]
            .container
            .as_mut()
            .and_then(Container::as_table_mut)
        {
            table.apply(&plan);
        }
    }

    fn adapt_table_height(&mut self, id: WidgetId) {
        let element = &self.elements[id.index()];
        let height = element.client_size.height;
        let Some(table) = element.container.as_ref().and_then(Container::as_table) else {
            return;
        };
        let natural: Vec<f64> = table
            .rows
            .iter()
            .map(|row| {
                row.panes()
                    .map(|p| self.elements[p.index()].natural_size.height)
                    .fold(0.0, f64::max)
            })
            .collect();
        if let Some(table) = self.elements[id.index()]
            .container
            .as_mut()
            .and_then(Container::as_table_mut)
        {
            adapt_row_heights(table, height, &natural);
        }
    }

    /// Copy split geometry onto the pane elements and the splitter itself
    fn sync_split(&mut self, id: WidgetId) {
        let element = &self.elements[id.index()];
        let Some(split) = element.container.as_ref().and_then(Container::as_split) else {
            return;
        };
        let axis = split.axis();
        let origin = element.offset;
        let cross = match axis {
            Axis::Horizontal => element.client_size.height,
            Axis::Vertical => element.client_size.width,
        };
        let spans: Vec<(WidgetId, f64, f64)> = split
            .panes()
            .iter()
            .map(|p| (p.id, p.start, p.extent))
            .collect();
        let min_size = split.own_min_size();
        let transitioning = split.is_transitioning();

        for (pane, start, extent) in spans {
            let el = &mut self.elements[pane.index()];
            let (size, offset) = match axis {
                Axis::Horizontal => {
                    el.style.set("left", Length::Px(start));
                    el.style.set("width", Length::Px(extent));
                    (Size::new(extent, cross), (origin.0 + start, origin.1))
                }
                Axis::Vertical => {
                    el.style.set("top", Length::Px(start));
                    el.style.set("height", Length::Px(extent));
                    (Size::new(cross, extent), (origin.0, origin.1 + start))
                }
            };
            el.offset = offset;
            // Nested splitters measure pointer events from their own origin
            if let Some(nested) = el.container.as_mut().and_then(Container::as_split_mut) {
                nested.set_origin(along(nested.axis(), offset));
            }
            if el.client_size != size {
                el.client_size = size;
                self.scheduler.schedule_check(pane);
            }
        }

        let element = &mut self.elements[id.index()];
        element.style.set("min-width", Length::Px(min_size.width));
        element.style.set("min-height", Length::Px(min_size.height));
        if transitioning {
            element.classes.add("dotransition");
        } else {
            element.classes.remove("dotransition");
        }
    }

    /// Re-run the parent's layout after a child's flex or position changed
    fn relayout_parent(&mut self, id: WidgetId) -> Result<(), LayoutError> {
        match self.get(id)?.parent {
            Some(parent) => self.apply_layout(parent),
            None => Ok(()),
        }
    }

    pub fn set_flex(&mut self, id: WidgetId, hflex: f64, vflex: f64) -> Result<(), LayoutError> {
        let element = self.get_mut(id)?;
        element.hflex = hflex;
        element.vflex = vflex;
        self.relayout_parent(id)
    }

    /// Set named widget properties from their textual values.
    ///
    /// The whole batch is parsed before anything is written, so a bad entry
    /// leaves the widget untouched.
    pub fn set_props(&mut self, id: WidgetId, props: &[(&str, &str)]) -> Result<(), LayoutError> {
        self.get(id)?;
        let updates = props
            .iter()
            .map(|&(prop, value)| PropUpdate::parse(prop, value))
            .collect::<Result<Vec<_>, _>>()?;

        let mut relayout = false;
        for update in updates {
            match update {
                PropUpdate::HFlex(flex) => {
                    self.elements[id.index()].hflex = flex;
                    relayout = true;
                }
                PropUpdate::VFlex(flex) => {
                    self.elements[id.index()].vflex = flex;
                    relayout = true;
                }
                PropUpdate::MinWidth(px) => self.set_min_width(id, px)?,
                PropUpdate::MinHeight(px) => self.set_min_height(id, px)?,
                PropUpdate::Text(text) => self.elements[id.index()].text = Some(text),
                PropUpdate::ClassName(classes) => self.elements[id.index()].classes.set(&classes),
            }
        }
        if relayout {
            self.relayout_parent(id)?;
        }
        Ok(())
    }

    /// Apply a batch of inline style properties
    pub fn set_style(&mut self, id: WidgetId, props: &[(&str, &str)]) -> Result<(), LayoutError> {
        let element = self.get_mut(id)?;
        for &(prop, value) in props {
            element.style.set(prop, value);
        }
        Ok(())
    }

    /// Apply a flexbox property with its vendor-prefixed variants
    pub fn apply_box_style(&mut self, id: WidgetId, prop: &str, value: &str) -> Result<(), LayoutError> {
        self.get_mut(id)?.style.set_prefixed(prop, value);
        Ok(())
    }

    pub fn set_pos(&mut self, id: WidgetId, pos: [f64; 2]) -> Result<(), LayoutError> {
        let element = self.get_mut(id)?;
        element.pos = pos;
        element.apply_pos();
        self.relayout_parent(id)
    }

    pub fn set_min_width(&mut self, id: WidgetId, width: f64) -> Result<(), LayoutError> {
        let element = self.get_mut(id)?;
        element.min_width = Some(width);
        element.style.set("min-width", Length::Px(width));
        self.update_split_minimums(id);
        Ok(())
    }

    pub fn set_min_height(&mut self, id: WidgetId, height: f64) -> Result<(), LayoutError> {
        let element = self.get_mut(id)?;
        element.min_height = Some(height);
        element.style.set("min-height", Length::Px(height));
        self.update_split_minimums(id);
        Ok(())
    }

    fn update_split_minimums(&mut self, id: WidgetId) {
        let element = &self.elements[id.index()];
        let (min_width, min_height) = (element.min_width, element.min_height);
        let Some(parent) = element.parent else {
            return;
        };
        if let Ok(split) = self.split_mut(parent) {
            split.set_pane_min(id, min_width, min_height);
            self.sync_split(parent);
        }
    }

    /// Record the host-measured content size of a widget
    pub fn set_natural_size(&mut self, id: WidgetId, size: Size) -> Result<(), LayoutError> {
        let element = self.get_mut(id)?;
        element.natural_size = size;
        let Some(parent) = element.parent else {
            return Ok(());
        };
        let parent_el = &self.elements[parent.index()];
        let adapts = parent_el
            .container_kind()
            .is_some_and(|k| k.adapts_to_height());
        if adapts && parent_el.client_size.height > 0.0 {
            self.adapt_table_height(parent);
        }
        Ok(())
    }

    /// Set the client box size and schedule a resize check
    pub fn set_client_size(&mut self, id: WidgetId, size: Size) -> Result<(), LayoutError> {
        self.get_mut(id)?.client_size = size;
        self.scheduler.schedule_check(id);
        Ok(())
    }

    /// Set the widget's client position, used to map pointer coordinates
    pub fn set_offset(&mut self, id: WidgetId, offset: (f64, f64)) -> Result<(), LayoutError> {
        let element = self.get_mut(id)?;
        element.offset = offset;
        if let Some(split) = element.container.as_mut().and_then(Container::as_split_mut) {
            let origin = match split.axis() {
                Axis::Horizontal => offset.0,
                Axis::Vertical => offset.1,
            };
            split.set_origin(origin);
            self.sync_split(id);
        }
        Ok(())
    }

    /// Schedule a resize check for the next tick. Returns false if one is
    /// already pending.
    pub fn check_resize(&mut self, id: WidgetId) -> Result<bool, LayoutError> {
        self.get(id)?;
        Ok(self.scheduler.schedule_check(id))
    }

    /// The window changed size: top-level widgets follow it
    pub fn window_resized(&mut self, size: Size) {
        self.window = size;
        for root in self.roots.clone() {
            self.elements[root.index()].client_size = size;
            self.scheduler.schedule_check(root);
        }
        tracing::info!("Window resized to {}x{}", size.width, size.height);
    }

    /// Run one tick of pending resize checks. Returns the number of
    /// `SizeChanged` messages dispatched.
    pub fn tick(&mut self) -> usize {
        let mut dispatched = 0;
        for id in self.scheduler.take_tick() {
            if let Some(message) = self.check_resize_now(id) {
                self.dispatch(message);
                dispatched += 1;
            }
        }
        dispatched
    }

    /// Tick until no checks are pending. Returns the number of ticks run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ticks = 0;
        while !self.scheduler.is_idle() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    fn check_resize_now(&mut self, id: WidgetId) -> Option<SizeChanged> {
        let element = self.elements.get_mut(id.index())?;
        let width_changed = element.stored_size.width != element.client_size.width;
        let height_changed = element.stored_size.height != element.client_size.height;
        if !width_changed && !height_changed {
            return None;
        }
        element.stored_size = element.client_size;
        Some(SizeChanged {
            target: id,
            width_changed,
            height_changed,
        })
    }

    fn dispatch(&mut self, message: SizeChanged) {
        let id = message.target;
        let element = &mut self.elements[id.index()];
        tracing::trace!(
            "SizeChanged on '{}': width={} height={}",
            element.name,
            message.width_changed,
            message.height_changed
        );
        match element.container_kind() {
            Some(ContainerKind::Split(axis)) => {
                let (origin, length) = match axis {
                    Axis::Horizontal => (element.offset.0, element.client_size.width),
                    Axis::Vertical => (element.offset.1, element.client_size.height),
                };
                if let Some(split) = element.container.as_mut().and_then(Container::as_split_mut) {
                    split.on_resize(origin, length);
                }
                self.sync_split(id);
            }
            Some(kind) if kind.adapts_to_height() && message.height_changed => {
                self.adapt_table_height(id);
            }
            _ => {}
        }
        // Children listen to their parent's resizes
        for child in self.elements[id.index()].children.clone() {
            self.scheduler.schedule_check(child);
        }
    }

    /// Move a splitter divider programmatically
    pub fn move_divider(
        &mut self,
        split: WidgetId,
        divider: usize,
        offset: Offset,
    ) -> Result<f64, LayoutError> {
        let t = self.split_mut(split)?.move_divider(divider, offset)?;
        self.sync_split(split);
        Ok(t)
    }

    /// Pointer pressed on a divider. Only one drag session exists per tree;
    /// returns false while another one is running.
    pub fn pointer_down(
        &mut self,
        split: WidgetId,
        divider: usize,
        pointer: (f64, f64),
    ) -> Result<bool, LayoutError> {
        if self.active_drag.is_some() {
            return Ok(false);
        }
        let layout = self.split_mut(split)?;
        let started = layout.pointer_down(divider, along(layout.axis(), pointer))?;
        if started {
            self.active_drag = Some(split);
            self.sync_split(split);
        }
        Ok(started)
    }

    /// Pointer moved anywhere in the window
    pub fn pointer_move(&mut self, pointer: (f64, f64)) -> bool {
        let Some(id) = self.active_drag else {
            return false;
        };
        match self.split_mut(id) {
            Ok(layout) => layout.pointer_move(along(layout.axis(), pointer)),
            Err(_) => false,
        }
    }

    /// Pointer released anywhere in the window
    pub fn pointer_up(&mut self, pointer: (f64, f64)) -> bool {
        let Some(id) = self.active_drag.take() else {
            return false;
        };
        let released = match self.split_mut(id) {
            Ok(layout) => layout.pointer_up(along(layout.axis(), pointer)),
            Err(_) => false,
        };
        self.sync_split(id);
        released
    }
}

fn along(axis: Axis, pointer: (f64, f64)) -> f64 {
    match axis {
        Axis::Horizontal => pointer.0,
        Axis::Vertical => pointer.1,
    }
}

fn apply_flex_grow(element: &mut Element, axis: Axis) {
    let flex = element.flex(axis);
    element.style.set_prefixed("flex-grow", flex);
    if flex > 0.0 {
        element.style.set_prefixed("flex-basis", 0);
    } else {
        element.style.remove_prefixed("flex-basis");
    }
}

/// One parsed entry of a `set_props` batch
#[derive(Debug, Clone, PartialEq)]
enum PropUpdate {
    HFlex(f64),
    VFlex(f64),
    MinWidth(f64),
    MinHeight(f64),
    Text(String),
    ClassName(String),
}

impl PropUpdate {
    fn parse(prop: &str, value: &str) -> Result<Self, LayoutError> {
        let invalid = || LayoutError::InvalidValue {
            prop: prop.to_string(),
            value: value.to_string(),
        };
        match prop {
            "hflex" => parse_flex(value).map(Self::HFlex).ok_or_else(invalid),
            "vflex" => parse_flex(value).map(Self::VFlex).ok_or_else(invalid),
            "min_width" => parse_px(value).map(Self::MinWidth).ok_or_else(invalid),
            "min_height" => parse_px(value).map(Self::MinHeight).ok_or_else(invalid),
            "text" => Ok(Self::Text(value.to_string())),
            "class_name" => Ok(Self::ClassName(value.to_string())),
            _ => Err(LayoutError::UnknownProperty(prop.to_string())),
        }
    }
}

/// Flex factors are finite and non-negative
fn parse_flex(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
}

fn parse_px(value: &str) -> Option<f64> {
    Length::parse(value)
        .and_then(|l| l.px())
        .filter(|px| px.is_finite() && *px >= 0.0)
}
