// ABOUTME: Flex computation for the table-based grid engine.
// ABOUTME: Derives per-row and per-column effective flex and the cumulative denominators.

use cellflex_core::AUTOFLEX;

/// Flex factors read from the pane occupying a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneFlex {
    pub hflex: f64,
    pub vflex: f64,
}

/// Effective flex per row and column. `None` marks a row or column without
/// any occupied cell; those take no part in the cumulative sums.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexPlan {
    pub row_flex: Vec<Option<f64>>,
    pub col_flex: Vec<Option<f64>>,
    pub cum_vflex: f64,
    pub cum_hflex: f64,
}

impl FlexPlan {
    /// Compute the plan for a row-major, possibly ragged grid of cells.
    ///
    /// Returns `None` when the grid has no rows or no columns. A row or column
    /// is as demanding as its most flexible occupant (max, not sum). When an
    /// axis sums to zero every participant gets [`AUTOFLEX`] so the space is
    /// still split evenly.
    pub fn compute(cells: &[Vec<Option<PaneFlex>>]) -> Option<Self> {
        let nrows = cells.len();
        let ncols = cells.iter().map(Vec::len).max().unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return None;
        }

        let mut row_flex: Vec<Option<f64>> = vec![None; nrows];
        let mut col_flex: Vec<Option<f64>> = vec![None; ncols];
        for (i, row) in cells.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let Some(pane) = cell else { continue };
                // f64::max drops NaN; negative factors count as natural
                row_flex[i] = Some(row_flex[i].unwrap_or(0.0).max(pane.vflex.max(0.0)));
                col_flex[j] = Some(col_flex[j].unwrap_or(0.0).max(pane.hflex.max(0.0)));
            }
        }

        let cum_vflex = normalize(&mut row_flex);
        let cum_hflex = normalize(&mut col_flex);
        Some(Self {
            row_flex,
            col_flex,
            cum_vflex,
            cum_hflex,
        })
    }

    /// Effective flex of row `i`, 0 for rows without occupants
    pub fn row(&self, i: usize) -> f64 {
        self.row_flex.get(i).copied().flatten().unwrap_or(0.0)
    }

    pub fn column(&self, j: usize) -> f64 {
        self.col_flex.get(j).copied().flatten().unwrap_or(0.0)
    }
}

/// Sum the participating flexes, substituting AUTOFLEX when the sum is zero
fn normalize(flexes: &mut [Option<f64>]) -> f64 {
    let sum: f64 = flexes.iter().flatten().sum();
    if sum > 0.0 {
        return sum;
    }
    let mut count = 0;
    for flex in flexes.iter_mut().flatten() {
        *flex = AUTOFLEX;
        count += 1;
    }
    count as f64 * AUTOFLEX
}
