// ABOUTME: Table structure behind row, column, form, and grid containers.
// ABOUTME: Implements per-variant cell insertion and applies a flex plan through the cell policy.

use cellflex_core::{ClassList, Length, Style};

use crate::flex::{FlexPlan, PaneFlex};
use crate::policy::{CellFlex, CellPolicy};
use crate::{LayoutError, WidgetId};

/// Upper bound on grid rows and columns a position may address
pub const MAX_GRID_TRACKS: usize = 1024;

#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub pane: Option<WidgetId>,
    pub style: Style,
    pub classes: ClassList,
}

#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub style: Style,
    /// Flex assigned by the last layout pass, reused by the resize pass
    pub vflex: f64,
}

impl Row {
    pub fn is_occupied(&self) -> bool {
        self.cells.iter().any(|c| c.pane.is_some())
    }

    pub fn panes(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.cells.iter().filter_map(|c| c.pane)
    }
}

/// Where an inserted pane landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    /// Previous occupant of a grid cell, now detached
    pub displaced: Option<WidgetId>,
}

impl Placement {
    fn at(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            displaced: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableLayout {
    policy: CellPolicy,
    spacing: f64,
    pub rows: Vec<Row>,
}

impl TableLayout {
    pub fn new(policy: CellPolicy, spacing: f64) -> Self {
        let rows = match policy {
            // Column tables grow a row per child; the others start with one
            CellPolicy::ColumnTable => Vec::new(),
            _ => vec![Row::default()],
        };
        Self {
            policy,
            spacing,
            rows,
        }
    }

    pub fn policy(&self) -> CellPolicy {
        self.policy
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(col)
    }

    /// Map a grid position `[column, row]` to a `(row, column)` cell.
    /// Fractions truncate; coordinates outside `0..MAX_GRID_TRACKS` have no cell.
    pub fn grid_cell(pos: [f64; 2]) -> Option<(usize, usize)> {
        let track = |v: f64| {
            let in_range = v.is_finite() && v >= 0.0 && v < MAX_GRID_TRACKS as f64;
            in_range.then(|| v as usize)
        };
        Some((track(pos[1])?, track(pos[0])?))
    }

    /// Place a pane according to the table's insertion policy.
    ///
    /// `grid_pos` is the pane's `[column, row]` and only used by grids.
    pub fn insert(&mut self, pane: WidgetId, grid_pos: [f64; 2]) -> Result<Placement, LayoutError> {
        let placement = match self.policy {
            CellPolicy::RowTable => {
                let row = &mut self.rows[0];
                let mut cell = Cell {
                    pane: Some(pane),
                    ..Cell::default()
                };
                if !row.cells.is_empty() {
                    cell.style.set("padding-left", Length::Px(self.spacing));
                }
                row.cells.push(cell);
                Placement::at(0, row.cells.len() - 1)
            }
            CellPolicy::ColumnTable => {
                self.rows.push(Row {
                    cells: vec![Cell {
                        pane: Some(pane),
                        ..Cell::default()
                    }],
                    ..Row::default()
                });
                Placement::at(self.rows.len() - 1, 0)
            }
            CellPolicy::Form => {
                let full = self.rows.last().map_or(true, |r| r.cells.len() >= 2);
                if full {
                    self.rows.push(Row::default());
                }
                let i = self.rows.len() - 1;
                let row = &mut self.rows[i];
                row.cells.push(Cell {
                    pane: Some(pane),
                    ..Cell::default()
                });
                Placement::at(i, row.cells.len() - 1)
            }
            CellPolicy::Grid => {
                let (i, j) = Self::grid_cell(grid_pos).ok_or(LayoutError::InvalidGridPosition {
                    column: grid_pos[0],
                    row: grid_pos[1],
                })?;
                if self.rows.len() <= i {
                    self.rows.resize_with(i + 1, Row::default);
                }
                let row = &mut self.rows[i];
                if row.cells.len() <= j {
                    row.cells.resize_with(j + 1, Cell::default);
                }
                let displaced = row.cells[j].pane.replace(pane);
                if let Some(previous) = displaced {
                    tracing::warn!("Grid cell ({}, {}) already held {}, replacing it", i, j, previous);
                }
                Placement {
                    row: i,
                    column: j,
                    displaced,
                }
            }
        };
        Ok(placement)
    }

    /// Flex factors of the occupant of every cell, row-major
    pub fn occupancy(&self, flex_of: impl Fn(WidgetId) -> PaneFlex) -> Vec<Vec<Option<PaneFlex>>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.pane.map(&flex_of)).collect())
            .collect()
    }

    /// Assign classes and sizes from a computed plan and cache row flexes
    pub fn apply(&mut self, plan: &FlexPlan) {
        let policy = self.policy;
        for (i, row) in self.rows.iter_mut().enumerate() {
            let vflex = plan.row(i);
            row.vflex = vflex;
            for (j, cell) in row.cells.iter_mut().enumerate() {
                if cell.pane.is_none() {
                    continue;
                }
                let assigned = policy.apply(CellFlex {
                    vflex,
                    hflex: plan.column(j),
                    cum_vflex: plan.cum_vflex,
                    cum_hflex: plan.cum_hflex,
                });
                if let Some(height) = assigned.row_height {
                    row.style.set("height", height);
                }
                if let Some(width) = assigned.cell_width {
                    cell.style.set("width", width);
                }
                if let Some(height) = assigned.cell_height {
                    cell.style.set("height", height);
                }
                cell.classes.set(&assigned.class_name);
            }
        }
    }
}
