// ABOUTME: Container variants and the capabilities they share.
// ABOUTME: Maps widget kinds to flexbox, table, split, and freeform layout state.

use cellflex_core::{Axis, SplitSettings, WidgetKind};

use crate::policy::CellPolicy;
use crate::split::SplitLayout;
use crate::table::TableLayout;

/// The closed set of container kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    RowBox,
    ColumnBox,
    TableRow,
    TableColumn,
    Form,
    Grid,
    Freeform,
    Split(Axis),
}

impl ContainerKind {
    pub fn for_widget(kind: WidgetKind) -> Option<Self> {
        match kind {
            WidgetKind::Widget | WidgetKind::Label | WidgetKind::Button => None,
            WidgetKind::RowBox => Some(ContainerKind::RowBox),
            WidgetKind::ColumnBox => Some(ContainerKind::ColumnBox),
            WidgetKind::TableRow => Some(ContainerKind::TableRow),
            WidgetKind::TableColumn => Some(ContainerKind::TableColumn),
            WidgetKind::Form => Some(ContainerKind::Form),
            WidgetKind::Grid => Some(ContainerKind::Grid),
            WidgetKind::Freeform => Some(ContainerKind::Freeform),
            WidgetKind::Split => Some(ContainerKind::Split(Axis::Horizontal)),
            WidgetKind::VSplit => Some(ContainerKind::Split(Axis::Vertical)),
        }
    }

    /// Cell-layout policy of the table-based kinds
    pub fn cell_policy(&self) -> Option<CellPolicy> {
        match self {
            ContainerKind::TableRow => Some(CellPolicy::RowTable),
            ContainerKind::TableColumn => Some(CellPolicy::ColumnTable),
            ContainerKind::Form => Some(CellPolicy::Form),
            ContainerKind::Grid => Some(CellPolicy::Grid),
            _ => None,
        }
    }

    /// Whether row heights must be re-normalized when the height changes.
    /// Percentage widths already track the available width, so a row table
    /// never needs it.
    pub fn adapts_to_height(&self) -> bool {
        matches!(
            self,
            ContainerKind::TableColumn | ContainerKind::Form | ContainerKind::Grid
        )
    }
}

/// Flexbox row or column
#[derive(Debug, Clone)]
pub struct FlexboxLayout {
    pub axis: Axis,
    pub spacing: f64,
}

/// Layout state owned by a container element
#[derive(Debug)]
pub enum Container {
    Flexbox(FlexboxLayout),
    Table(TableLayout),
    Split(SplitLayout),
    Freeform,
}

impl Container {
    pub fn new(kind: ContainerKind, spacing: f64, split: &SplitSettings) -> Self {
        match kind {
            ContainerKind::RowBox => Container::Flexbox(FlexboxLayout {
                axis: Axis::Horizontal,
                spacing,
            }),
            ContainerKind::ColumnBox => Container::Flexbox(FlexboxLayout {
                axis: Axis::Vertical,
                spacing,
            }),
            ContainerKind::TableRow => Container::Table(TableLayout::new(CellPolicy::RowTable, spacing)),
            ContainerKind::TableColumn => {
                Container::Table(TableLayout::new(CellPolicy::ColumnTable, spacing))
            }
            ContainerKind::Form => Container::Table(TableLayout::new(CellPolicy::Form, spacing)),
            ContainerKind::Grid => Container::Table(TableLayout::new(CellPolicy::Grid, spacing)),
            ContainerKind::Freeform => Container::Freeform,
            ContainerKind::Split(axis) => Container::Split(SplitLayout::new(axis, split.clone())),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::Flexbox(b) => match b.axis {
                Axis::Horizontal => ContainerKind::RowBox,
                Axis::Vertical => ContainerKind::ColumnBox,
            },
            Container::Table(t) => match t.policy() {
                CellPolicy::RowTable => ContainerKind::TableRow,
                CellPolicy::ColumnTable => ContainerKind::TableColumn,
                CellPolicy::Form => ContainerKind::Form,
                CellPolicy::Grid => ContainerKind::Grid,
            },
            Container::Split(s) => ContainerKind::Split(s.axis()),
            Container::Freeform => ContainerKind::Freeform,
        }
    }

    pub fn as_table(&self) -> Option<&TableLayout> {
        match self {
            Container::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut TableLayout> {
        match self {
            Container::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_split(&self) -> Option<&SplitLayout> {
        match self {
            Container::Split(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_split_mut(&mut self) -> Option<&mut SplitLayout> {
        match self {
            Container::Split(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_kinds_map_to_containers() {
        assert_eq!(ContainerKind::for_widget(WidgetKind::Label), None);
        assert_eq!(
            ContainerKind::for_widget(WidgetKind::VSplit),
            Some(ContainerKind::Split(Axis::Vertical))
        );
    }

    #[test]
    fn kind_survives_construction() {
        let settings = SplitSettings::default();
        for kind in [
            ContainerKind::RowBox,
            ContainerKind::ColumnBox,
            ContainerKind::TableRow,
            ContainerKind::TableColumn,
            ContainerKind::Form,
            ContainerKind::Grid,
            ContainerKind::Freeform,
            ContainerKind::Split(Axis::Horizontal),
        ] {
            assert_eq!(Container::new(kind, 0.0, &settings).kind(), kind);
        }
    }

    #[test]
    fn only_vertically_flexing_tables_adapt() {
        assert!(ContainerKind::Form.adapts_to_height());
        assert!(ContainerKind::Grid.adapts_to_height());
        assert!(ContainerKind::TableColumn.adapts_to_height());
        assert!(!ContainerKind::TableRow.adapts_to_height());
        assert!(!ContainerKind::Split(Axis::Horizontal).adapts_to_height());
    }
}
