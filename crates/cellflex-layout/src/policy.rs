// ABOUTME: Cell-layout policies of the table-based containers.
// ABOUTME: Maps row/column flex and cumulative flex to heights, widths, and cell classes.

use cellflex_core::{is_autoflex, is_natural, Length};

/// Effective flexes for one occupied cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFlex {
    pub vflex: f64,
    pub hflex: f64,
    pub cum_vflex: f64,
    pub cum_hflex: f64,
}

/// What a policy assigns for one cell. `None` leaves the property untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub row_height: Option<Length>,
    pub cell_width: Option<Length>,
    pub cell_height: Option<Length>,
    pub class_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellPolicy {
    /// One row; only the horizontal axis participates
    RowTable,
    /// One column; vertical flex drives the row height
    ColumnTable,
    /// Label/value rows; flexible rows only on an explicit vflex
    Form,
    /// Both axes flex independently
    Grid,
}

impl CellPolicy {
    pub fn apply(&self, flex: CellFlex) -> CellStyle {
        match self {
            CellPolicy::RowTable => {
                let (cell_width, class_name) = if is_natural(flex.hflex) {
                    (Length::Auto, "")
                } else {
                    (Length::share(flex.hflex, flex.cum_hflex), "hflex")
                };
                CellStyle {
                    row_height: None,
                    cell_width: Some(cell_width),
                    cell_height: Some(Length::Percent(100.0)),
                    class_name: class_name.to_string(),
                }
            }
            CellPolicy::ColumnTable => {
                let (row_height, class_name) = if is_natural(flex.vflex) {
                    (Length::Auto, "hflex")
                } else {
                    (Length::share(flex.vflex, flex.cum_vflex), "vflex hflex")
                };
                CellStyle {
                    row_height: Some(row_height),
                    cell_width: None,
                    cell_height: None,
                    class_name: class_name.to_string(),
                }
            }
            CellPolicy::Form => {
                let mut classes = Vec::new();
                let row_height = if is_natural(flex.vflex) || is_autoflex(flex.vflex) {
                    Length::Auto
                } else {
                    classes.push("vflex");
                    Length::share(flex.vflex, flex.cum_vflex)
                };
                // The value column takes whatever width the label leaves
                let cell_width = if is_natural(flex.hflex) {
                    Length::Auto
                } else {
                    classes.push("hflex");
                    Length::Percent(100.0)
                };
                CellStyle {
                    row_height: Some(row_height),
                    cell_width: Some(cell_width),
                    cell_height: None,
                    class_name: classes.join(" "),
                }
            }
            CellPolicy::Grid => {
                let mut classes = Vec::new();
                let row_height = if is_natural(flex.vflex) {
                    Length::Auto
                } else {
                    classes.push("vflex");
                    Length::share(flex.vflex, flex.cum_vflex)
                };
                let cell_width = if is_natural(flex.hflex) {
                    Length::Auto
                } else {
                    classes.push("hflex");
                    Length::share(flex.hflex, flex.cum_hflex)
                };
                CellStyle {
                    row_height: Some(row_height),
                    cell_width: Some(cell_width),
                    cell_height: None,
                    class_name: classes.join(" "),
                }
            }
        }
    }
}
