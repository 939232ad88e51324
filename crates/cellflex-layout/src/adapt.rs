// ABOUTME: Height re-normalization for tables whose rows flex vertically.
// ABOUTME: Rescales flexible row percentages to the height left over by natural rows.

use cellflex_core::{is_autoflex, Length};

use crate::policy::CellPolicy;
use crate::table::{Row, TableLayout};

/// Forms keep autoflex rows at their natural height
fn is_flexible(policy: CellPolicy, row: &Row) -> bool {
    row.vflex > 0.0 && !(policy == CellPolicy::Form && is_autoflex(row.vflex))
}

/// Re-assign percentage heights of the flexible rows of `table`.
///
/// A percentage row height is relative to the whole table, not to the height
/// left after the natural-height rows, so the plain `flex / cumulative` split
/// over-allocates as soon as any auto row exists. `natural_heights[i]` is the
/// measured content height of row `i`; `container_height` is the table's
/// client height. Each flexible row gets
/// `round(vflex / cumulative * remaining%) + 1` percent, the extra percent
/// closing rounding gaps between rows.
pub fn adapt_row_heights(table: &mut TableLayout, container_height: f64, natural_heights: &[f64]) {
    // Give one flexible row everything so natural rows report their minimum
    let policy = table.policy();
    let Some(first_flexible) = table.rows.iter_mut().find(|r| is_flexible(policy, r)) else {
        return;
    };
    first_flexible.style.set("height", Length::Percent(100.0));

    if container_height <= 0.0 {
        return;
    }

    let mut remaining = container_height;
    let mut cum_vflex = 0.0;
    for (i, row) in table.rows.iter().enumerate() {
        if is_flexible(policy, row) {
            cum_vflex += row.vflex;
        } else if row.is_occupied() {
            remaining -= natural_heights.get(i).copied().unwrap_or(0.0);
        }
    }
    let remaining_percentage = (100.0 * remaining / container_height).max(0.0);

    for row in table.rows.iter_mut().filter(|r| is_flexible(policy, r)) {
        let percent = (row.vflex / cum_vflex * remaining_percentage).round() + 1.0;
        row.style.set("height", Length::Percent(percent));
    }
    tracing::debug!(
        "Adapted row heights: {:.1}px of {:.1}px left for flexible rows",
        remaining,
        container_height
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flex::{FlexPlan, PaneFlex};
    use crate::policy::CellPolicy;
    use crate::WidgetId;

    fn column_table(vflexes: &[f64]) -> TableLayout {
        let mut table = TableLayout::new(CellPolicy::ColumnTable, 0.0);
        for i in 0..vflexes.len() {
            table.insert(WidgetId(i as u32), [0.0, 0.0]).unwrap();
        }
        let cells = table.occupancy(|id| PaneFlex {
            hflex: 0.0,
            vflex: vflexes[id.0 as usize],
        });
        let plan = FlexPlan::compute(&cells).unwrap();
        table.apply(&plan);
        table
    }

    fn heights(table: &TableLayout) -> Vec<String> {
        table
            .rows
            .iter()
            .map(|r| r.style.get("height").unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn flexible_rows_share_remaining_height() {
        let mut table = column_table(&[0.0, 1.0, 1.0]);
        adapt_row_heights(&mut table, 300.0, &[60.0, 10.0, 10.0]);
        assert_eq!(heights(&table), vec!["auto", "41%", "41%"]);
    }

    #[test]
    fn adaptation_is_idempotent() {
        let mut table = column_table(&[0.0, 2.0, 1.0]);
        adapt_row_heights(&mut table, 500.0, &[120.0, 0.0, 0.0]);
        let first = heights(&table);
        adapt_row_heights(&mut table, 500.0, &[120.0, 0.0, 0.0]);
        assert_eq!(heights(&table), first);
        // 76% remaining: 2/3 -> 51 + 1, 1/3 -> 25 + 1
        assert_eq!(first, vec!["auto", "52%", "26%"]);
    }

    #[test]
    fn no_flexible_rows_is_a_no_op() {
        let mut table = TableLayout::new(CellPolicy::Form, 0.0);
        table.insert(WidgetId(0), [0.0, 0.0]).unwrap();
        table.rows[0].style.set("height", "auto");
        adapt_row_heights(&mut table, 300.0, &[40.0]);
        assert_eq!(heights(&table), vec!["auto"]);
    }

    #[test]
    fn form_autoflex_rows_stay_natural() {
        let mut table = TableLayout::new(CellPolicy::Form, 0.0);
        table.insert(WidgetId(0), [0.0, 0.0]).unwrap();
        table.insert(WidgetId(1), [0.0, 0.0]).unwrap();
        let cells = table.occupancy(|_| PaneFlex {
            hflex: 0.0,
            vflex: 0.0,
        });
        table.apply(&FlexPlan::compute(&cells).unwrap());
        adapt_row_heights(&mut table, 300.0, &[20.0]);
        assert_eq!(heights(&table), vec!["auto"]);
    }

    #[test]
    fn overfull_natural_rows_leave_one_percent() {
        let mut table = column_table(&[0.0, 1.0]);
        adapt_row_heights(&mut table, 100.0, &[150.0, 0.0]);
        assert_eq!(heights(&table), vec!["auto", "1%"]);
    }

    #[test]
    fn zero_height_keeps_first_row_at_full_height() {
        let mut table = column_table(&[1.0, 1.0]);
        adapt_row_heights(&mut table, 0.0, &[]);
        assert_eq!(heights(&table)[0], "100%");
    }
}
